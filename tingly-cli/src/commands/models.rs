//! `models` - browse provider models with search and paging.
//!
//! Custom models from the local store are merged into the provider's fetched
//! list and marked, the way the dashboard's model cards show them.

use anyhow::Result;

use tingly_core::{CustomModelStore, Paginator};

use super::{expect_data, Context};

pub async fn run(
    ctx: &Context,
    provider: Option<String>,
    search: Option<String>,
    page: usize,
    page_size: usize,
) -> Result<()> {
    match provider {
        Some(provider) => list_for_provider(ctx, &provider, search, page, page_size).await,
        None => overview(ctx).await,
    }
}

async fn overview(ctx: &Context) -> Result<()> {
    let map = expect_data(ctx.client.provider_models().await, "list provider models")?;
    let store = CustomModelStore::new(&ctx.db);

    if map.is_empty() && store.all().is_empty() {
        println!("No provider models cached");
        return Ok(());
    }

    let mut names: Vec<&String> = map.keys().collect();
    names.sort();
    for name in names {
        let info = &map[name];
        let custom = store.models_for(name).len();
        match info.last_updated {
            Some(updated) => println!(
                "{}: {} models ({} custom), updated {}",
                name,
                info.models.len(),
                custom,
                updated.format("%Y-%m-%d %H:%M")
            ),
            None => println!("{}: {} models ({} custom)", name, info.models.len(), custom),
        }
    }
    Ok(())
}

async fn list_for_provider(
    ctx: &Context,
    provider: &str,
    search: Option<String>,
    page: usize,
    page_size: usize,
) -> Result<()> {
    let mut models = expect_data(
        ctx.client.provider_models_for(provider).await,
        "list models",
    )?;

    // Merge in locally-added models that the provider listing doesn't know
    let store = CustomModelStore::new(&ctx.db);
    for model in store.models_for(provider) {
        if !models.contains(model) {
            models.push(model.clone());
        }
    }

    let mut paginator = Paginator::new(page_size);
    if let Some(term) = search {
        paginator.set_search(provider, term);
    }
    paginator.set_page(provider, page);

    let page = paginator.paginate(&models, provider);
    if page.items.is_empty() {
        println!("No models");
        return Ok(());
    }

    for model in &page.items {
        if store.is_custom_model(model, provider) {
            println!("{model} *");
        } else {
            println!("{model}");
        }
    }
    println!(
        "Page {}/{} ({} models, * = custom)",
        page.current_page,
        page.total_pages.max(1),
        page.total_items,
    );
    Ok(())
}
