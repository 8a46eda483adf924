//! Command handlers.

mod custom_models;
mod defaults;
mod history;
mod models;
mod providers;
mod server;
mod status;

use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;

use tingly_core::{AdminClient, ApiResponse, ConsoleSettings, Database};

use crate::cli::{Cli, Command};

/// Shared state every command handler works against.
pub struct Context {
    pub db: Database,
    pub settings: ConsoleSettings,
    pub client: AdminClient,
}

impl Context {
    fn init(
        db_path: Option<PathBuf>,
        api_base: Option<String>,
        server_base: Option<String>,
    ) -> Result<Self> {
        let db = match db_path {
            Some(path) => Database::open_at(path)?,
            None => Database::open()?,
        };
        db.migrate()?;

        let mut settings = ConsoleSettings::load(&db);
        if let Some(base) = api_base {
            settings.ui_api_base = base;
        }
        if let Some(base) = server_base {
            settings.server_api_base = base;
        }
        settings.validate();

        let client = AdminClient::from_settings(&settings)?;
        Ok(Self {
            db,
            settings,
            client,
        })
    }
}

/// Dispatch the parsed command line.
pub async fn run(args: Cli) -> Result<()> {
    let ctx = Context::init(args.db, args.api_base, args.server_base)?;

    match args.command {
        Command::Status { watch } => status::run(&ctx, watch).await,
        Command::Providers { action } => providers::run(&ctx, action).await,
        Command::Models {
            provider,
            search,
            page,
            page_size,
        } => models::run(&ctx, provider, search, page, page_size).await,
        Command::Defaults { action } => defaults::run(&ctx, action).await,
        Command::History {
            limit,
            search,
            action,
            status,
            export,
            watch,
        } => history::run(&ctx, limit, search, action, status, export, watch).await,
        Command::Server { action } => server::run(&ctx, action).await,
        Command::Token { client_id } => server::token(&ctx, &client_id).await,
        Command::CustomModels { action } => custom_models::run(&ctx, action),
    }
}

/// Unwrap a success envelope that must carry data.
pub fn expect_data<T>(response: ApiResponse<T>, what: &str) -> Result<T> {
    if !response.success {
        bail!(
            "{what} failed: {}",
            response.error_text().unwrap_or("unknown error")
        );
    }
    response
        .data
        .ok_or_else(|| anyhow!("{what} failed: response carried no data"))
}

/// Check a success envelope for a write-style call, returning its message.
pub fn expect_ok<T>(response: ApiResponse<T>, what: &str) -> Result<Option<String>> {
    if !response.success {
        bail!(
            "{what} failed: {}",
            response.error_text().unwrap_or("unknown error")
        );
    }
    Ok(response.message)
}
