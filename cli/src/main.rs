//! Lalamove webhook registration binary.
//!
//! Registers the callback URL that receives order and driver events.

use std::process::ExitCode;

use clap::Parser;
use lalamove_cli::{run, WebhookArgs, WEBHOOK_DOCS_URL};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lalamove_sdk=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = WebhookArgs::parse();

    match run(args).await {
        Ok(true) => {
            println!("Webhook registered.");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            eprintln!("Webhook registration failed (see {WEBHOOK_DOCS_URL})");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Webhook registration failed: {e} (see {WEBHOOK_DOCS_URL})");
            ExitCode::FAILURE
        }
    }
}
