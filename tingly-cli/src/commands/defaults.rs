//! `defaults` - the default provider/model mapping.

use anyhow::Result;

use tingly_core::api::DEFAULT_MODEL_NAME;
use tingly_core::Defaults;

use super::{expect_data, expect_ok, Context};
use crate::cli::DefaultsAction;

pub async fn run(ctx: &Context, action: DefaultsAction) -> Result<()> {
    match action {
        DefaultsAction::Show => {
            let defaults = expect_data(ctx.client.defaults().await, "show defaults")?;
            print_defaults(&defaults);
            Ok(())
        }
        DefaultsAction::Set {
            provider,
            model,
            model_name,
        } => {
            let defaults = Defaults {
                default_provider: provider,
                default_model: model,
                default_model_name: model_name.unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
            };
            let message = expect_ok(ctx.client.set_defaults(&defaults).await, "set defaults")?;
            match message {
                Some(message) => println!("{message}"),
                None => print_defaults(&defaults),
            }
            Ok(())
        }
    }
}

fn print_defaults(defaults: &Defaults) {
    println!(
        "Default provider: {}",
        if defaults.default_provider.is_empty() {
            "(unset)"
        } else {
            &defaults.default_provider
        }
    );
    println!(
        "Default model:    {}",
        if defaults.default_model.is_empty() {
            "(unset)"
        } else {
            &defaults.default_model
        }
    );
    println!("Model-name alias: {}", defaults.default_model_name);
}
