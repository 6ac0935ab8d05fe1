//! Command-line tools for the Lalamove v3 delivery API.
//!
//! - [`cli`] — the `lalamove-webhook` command
//! - [`env`] — `.env` loading with the `LALAMOVE_` prefix

pub mod cli;
pub mod env;
pub mod error;

pub use cli::{register_webhook, run, WebhookArgs, WebhookSettings, WEBHOOK_DOCS_URL};
pub use error::CliError;
