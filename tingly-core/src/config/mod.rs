//! Configuration module for Tingly Console.
//!
//! Manages console settings stored in SQLite.

mod settings;

pub use settings::{ConsoleSettings, DEFAULT_API_BASE, DEFAULT_SERVER_PORT};
