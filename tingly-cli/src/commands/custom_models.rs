//! `custom-models` - locally-stored, operator-added model names.

use anyhow::{bail, Result};

use tingly_core::CustomModelStore;

use super::Context;
use crate::cli::CustomModelAction;

pub fn run(ctx: &Context, action: CustomModelAction) -> Result<()> {
    let mut store = CustomModelStore::new(&ctx.db);

    match action {
        CustomModelAction::List { provider } => {
            match provider {
                Some(provider) => {
                    let models = store.models_for(&provider);
                    if models.is_empty() {
                        println!("No custom models for {provider}");
                    }
                    for model in models {
                        println!("{model}");
                    }
                }
                None => {
                    if store.all().is_empty() {
                        println!("No custom models");
                    }
                    let mut providers: Vec<&String> = store.all().keys().collect();
                    providers.sort();
                    for provider in providers {
                        println!("{provider}: {}", store.all()[provider].join(", "));
                    }
                }
            }
            Ok(())
        }
        CustomModelAction::Add { provider, model } => {
            if !store.save_model(&provider, &model) {
                bail!("could not save custom model {model} for {provider}");
            }
            println!("Added {model} to {provider}");
            Ok(())
        }
        CustomModelAction::Remove { provider, model } => {
            if !store.is_custom_model(&model, &provider) {
                bail!("{model} is not a custom model of {provider}");
            }
            if !store.remove_model(&provider, &model) {
                bail!("could not remove custom model {model} from {provider}");
            }
            println!("Removed {model} from {provider}");
            Ok(())
        }
    }
}
