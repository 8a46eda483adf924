//! Command-line definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tingly Console - admin console for the Tingly Box AI proxy
#[derive(Parser, Debug)]
#[command(name = "tingly-console")]
#[command(about = "Administrative console for the Tingly Box AI proxy")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Console database path (default: platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Override the UI-data API base URL for this invocation
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Override the server-control API base URL for this invocation
    #[arg(long, global = true, value_name = "URL")]
    pub server_base: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show proxy server status
    Status {
        /// Keep refreshing on the configured interval
        #[arg(long)]
        watch: bool,
    },

    /// Manage upstream providers
    Providers {
        #[command(subcommand)]
        action: ProviderAction,
    },

    /// List models, per provider or across all providers
    Models {
        /// Provider to list models for (all providers when omitted)
        provider: Option<String>,

        /// Filter models by case-insensitive substring
        #[arg(short, long)]
        search: Option<String>,

        /// 1-based page to show
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Models per page
        #[arg(long, default_value_t = 12)]
        page_size: usize,
    },

    /// Show or change the default model mapping
    Defaults {
        #[command(subcommand)]
        action: DefaultsAction,
    },

    /// Inspect the administrative action history
    History {
        /// Maximum entries to fetch (default from settings)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Filter by substring of action or message
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by exact action name
        #[arg(long)]
        action: Option<String>,

        /// Filter by outcome
        #[arg(long)]
        status: Option<OutcomeFilter>,

        /// Print in an export format instead of the table
        #[arg(long)]
        export: Option<ExportFormat>,

        /// Keep refreshing on the configured interval
        #[arg(long)]
        watch: bool,
    },

    /// Control the proxy server process
    Server {
        #[command(subcommand)]
        action: ServerAction,
    },

    /// Issue an access token for a proxy client
    Token {
        /// Client identifier the token is issued for
        #[arg(long)]
        client_id: String,
    },

    /// Manage locally-stored custom models
    CustomModels {
        #[command(subcommand)]
        action: CustomModelAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProviderAction {
    /// List configured providers
    List {
        /// Filter providers by case-insensitive substring
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one provider
    Show { name: String },

    /// Add a provider
    Add {
        name: String,
        api_base: String,
        token: String,

        /// API dialect the provider speaks
        #[arg(long, value_enum, default_value = "openai")]
        api_style: StyleArg,
    },

    /// Remove a provider
    Remove { name: String },

    /// Enable or disable a provider
    Toggle { name: String },

    /// Update a provider's configuration
    Update {
        name: String,

        #[arg(long)]
        api_base: String,

        #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
        enabled: bool,

        /// New token (stored token kept when omitted)
        #[arg(long)]
        token: Option<String>,

        #[arg(long, value_enum, default_value = "openai")]
        api_style: StyleArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum DefaultsAction {
    /// Show the current defaults
    Show,

    /// Set the default provider/model mapping
    Set {
        #[arg(long)]
        provider: String,

        #[arg(long)]
        model: String,

        /// Model-name alias the proxy answers to
        #[arg(long)]
        model_name: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ServerAction {
    /// Start the proxy server
    Start {
        /// Port to listen on (default from settings)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Stop the proxy server
    Stop,

    /// Restart the proxy server
    Restart {
        /// Port to listen on (default from settings)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CustomModelAction {
    /// List custom models, per provider or all
    List { provider: Option<String> },

    /// Add a custom model for a provider
    Add { provider: String, model: String },

    /// Remove a custom model from a provider
    Remove { provider: String, model: String },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StyleArg {
    Openai,
    Anthropic,
}

impl From<StyleArg> for tingly_core::ApiStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Openai => tingly_core::ApiStyle::OpenAi,
            StyleArg::Anthropic => tingly_core::ApiStyle::Anthropic,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutcomeFilter {
    Success,
    Failure,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
}
