//! `providers` - list and manage upstream providers.

use anyhow::Result;

use tingly_core::{Paginator, Provider, ProviderUpdate};

use super::{expect_data, expect_ok, Context};
use crate::cli::ProviderAction;

pub async fn run(ctx: &Context, action: ProviderAction) -> Result<()> {
    match action {
        ProviderAction::List { search } => list(ctx, search).await,
        ProviderAction::Show { name } => show(ctx, &name).await,
        ProviderAction::Add {
            name,
            api_base,
            token,
            api_style,
        } => {
            let provider = Provider {
                name: name.clone(),
                api_base,
                token: Some(token),
                enabled: true,
                api_style: api_style.into(),
            };
            let message = expect_ok(ctx.client.add_provider(&provider).await, "add provider")?;
            println!("{}", message.unwrap_or_else(|| format!("Provider {name} added")));
            Ok(())
        }
        ProviderAction::Remove { name } => {
            let message = expect_ok(ctx.client.delete_provider(&name).await, "remove provider")?;
            println!("{}", message.unwrap_or_else(|| format!("Provider {name} removed")));
            Ok(())
        }
        ProviderAction::Toggle { name } => {
            let message = expect_ok(ctx.client.toggle_provider(&name).await, "toggle provider")?;
            println!("{}", message.unwrap_or_else(|| format!("Provider {name} toggled")));
            Ok(())
        }
        ProviderAction::Update {
            name,
            api_base,
            enabled,
            token,
            api_style,
        } => {
            let update = ProviderUpdate {
                api_base,
                enabled,
                token,
                api_style: api_style.into(),
            };
            let message = expect_ok(
                ctx.client.update_provider(&name, &update).await,
                "update provider",
            )?;
            println!("{}", message.unwrap_or_else(|| format!("Provider {name} updated")));
            Ok(())
        }
    }
}

async fn list(ctx: &Context, search: Option<String>) -> Result<()> {
    let providers = expect_data(ctx.client.providers().await, "list providers")?;

    let mut paginator = Paginator::new(providers.len().max(1));
    if let Some(term) = search {
        paginator.set_search("providers", term);
    }
    let page = paginator.paginate(&providers, "providers");

    if page.items.is_empty() {
        println!("No providers");
        return Ok(());
    }

    for provider in &page.items {
        println!(
            "{}  {}  [{}]  {}",
            provider.name,
            provider.api_base,
            provider.api_style,
            if provider.enabled { "enabled" } else { "disabled" },
        );
    }
    println!("{} of {} providers", page.items.len(), providers.len());
    Ok(())
}

async fn show(ctx: &Context, name: &str) -> Result<()> {
    let provider = expect_data(ctx.client.provider(name).await, "show provider")?;

    println!("Name:      {}", provider.name);
    println!("API base:  {}", provider.api_base);
    println!("API style: {}", provider.api_style);
    println!(
        "Enabled:   {}",
        if provider.enabled { "yes" } else { "no" }
    );
    Ok(())
}
