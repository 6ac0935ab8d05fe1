//! `lalamove-webhook` command: registers the webhook URL for an account.

use std::path::PathBuf;

use clap::Parser;
use lalamove_sdk::{is_sandbox_credentials, ClientConfig, LalamoveClient, Market};

use crate::error::CliError;

/// Where to read about webhook registration failures.
pub const WEBHOOK_DOCS_URL: &str = "https://developers.lalamove.com/?shell#webhook";

/// Register a webhook URL with the Lalamove API.
///
/// Each setting may also come from the environment or the `.env` file.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "lalamove-webhook")]
#[command(author, version, about, long_about = None)]
pub struct WebhookArgs {
    /// API key (`LALAMOVE_APIKEY`)
    #[arg(long)]
    pub apikey: Option<String>,

    /// API secret (`LALAMOVE_SECRET`)
    #[arg(long)]
    pub secret: Option<String>,

    /// Market code, defaults to HK (`LALAMOVE_MARKET`)
    #[arg(long)]
    pub market: Option<String>,

    /// Webhook URL to register (`LALAMOVE_WEBHOOK_URL`)
    #[arg(long)]
    pub url: Option<String>,

    /// File that failed calls are logged to (`LALAMOVE_LOG_FILE`)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Env file read before resolving settings
    #[arg(long, env = "LALAMOVE_ENV_FILE", default_value = ".env")]
    pub env_file: PathBuf,
}

/// Fully resolved webhook settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSettings {
    /// API key.
    pub apikey: String,
    /// API secret.
    pub secret: String,
    /// Market code.
    pub market: String,
    /// Webhook URL.
    pub url: String,
    /// Failure log file, if any.
    pub log_file: Option<PathBuf>,
}

impl WebhookSettings {
    /// Returns true when the credentials are not production credentials.
    #[must_use]
    pub fn is_sandbox(&self) -> bool {
        is_sandbox_credentials(&self.apikey, &self.secret)
    }

    /// Builds the client configuration for these settings.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.apikey, &self.secret, &self.market)
            .with_sandbox(self.is_sandbox());
        match &self.log_file {
            Some(path) => config.with_log_file(path),
            None => config,
        }
    }
}

impl WebhookArgs {
    /// Fills unset flags from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `CliError::MissingSetting` when the API key, secret or URL is
    /// unset.
    pub fn resolve(self) -> Result<WebhookSettings, CliError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Fills unset flags using `lookup` for environment variables.
    ///
    /// # Errors
    ///
    /// Returns `CliError::MissingSetting` when the API key, secret or URL is
    /// unset.
    pub fn resolve_with<F>(self, lookup: F) -> Result<WebhookSettings, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |flag: Option<String>, env_var: &str| {
            flag.or_else(|| lookup(env_var))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |value: Option<String>, flag: &'static str, env_var: &'static str| {
            value.ok_or(CliError::MissingSetting { flag, env_var })
        };

        let apikey = require(
            pick(self.apikey, "LALAMOVE_APIKEY"),
            "apikey",
            "LALAMOVE_APIKEY",
        )?;
        let secret = require(
            pick(self.secret, "LALAMOVE_SECRET"),
            "secret",
            "LALAMOVE_SECRET",
        )?;
        let url = require(
            pick(self.url, "LALAMOVE_WEBHOOK_URL"),
            "url",
            "LALAMOVE_WEBHOOK_URL",
        )?;
        let market = pick(self.market, "LALAMOVE_MARKET")
            .unwrap_or_else(|| Market::HongKong.as_str().to_string());
        let log_file = self
            .log_file
            .or_else(|| pick(None, "LALAMOVE_LOG_FILE").map(PathBuf::from));

        Ok(WebhookSettings {
            apikey,
            secret,
            market,
            url,
            log_file,
        })
    }
}

/// Registers the webhook and returns whether the API accepted it.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the call fails.
pub async fn register_webhook(settings: &WebhookSettings) -> Result<bool, CliError> {
    let client = LalamoveClient::new(settings.client_config())?;

    tracing::info!(
        "Registering webhook {} (market {}, sandbox: {})",
        settings.url,
        settings.market,
        client.is_sandbox()
    );

    Ok(client.set_webhook(&settings.url).await?)
}

/// Runs the `lalamove-webhook` command.
///
/// Loads the env file, resolves settings and registers the webhook.
/// Returns `Ok(false)` when the API declined the URL.
///
/// # Errors
///
/// Returns an error if the env file is unreadable, a setting is missing or
/// the call fails.
pub async fn run(args: WebhookArgs) -> Result<bool, CliError> {
    crate::env::load_env_file(&args.env_file)?;
    let settings = args.resolve()?;
    register_webhook(&settings).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_flags() {
        let args = WebhookArgs::try_parse_from([
            "lalamove-webhook",
            "--apikey",
            "pk_test_1",
            "--secret",
            "sk_test_2",
            "--market",
            "SG",
            "--url",
            "https://example.com/hook",
        ])
        .unwrap();

        assert_eq!(args.apikey.as_deref(), Some("pk_test_1"));
        assert_eq!(args.market.as_deref(), Some("SG"));
        assert_eq!(args.env_file, PathBuf::from(".env"));
    }

    #[test]
    fn test_resolve_from_environment() {
        let vars = env(&[
            ("LALAMOVE_APIKEY", "pk_test_1"),
            ("LALAMOVE_SECRET", "sk_test_2"),
            ("LALAMOVE_WEBHOOK_URL", "https://example.com/hook"),
        ]);
        let settings = WebhookArgs::default()
            .resolve_with(|k| vars.get(k).cloned())
            .unwrap();

        assert_eq!(settings.apikey, "pk_test_1");
        assert_eq!(settings.market, "HK");
        assert!(settings.is_sandbox());
    }

    #[test]
    fn test_flags_take_precedence() {
        let vars = env(&[
            ("LALAMOVE_APIKEY", "pk_test_env"),
            ("LALAMOVE_SECRET", "sk_test_env"),
            ("LALAMOVE_MARKET", "TH"),
            ("LALAMOVE_WEBHOOK_URL", "https://env.example.com"),
        ]);
        let args = WebhookArgs {
            apikey: Some("pk_prod_flag".to_string()),
            secret: Some("sk_prod_flag".to_string()),
            market: Some("MY".to_string()),
            ..WebhookArgs::default()
        };
        let settings = args.resolve_with(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(settings.apikey, "pk_prod_flag");
        assert_eq!(settings.market, "MY");
        assert_eq!(settings.url, "https://env.example.com");
        assert!(!settings.is_sandbox());
        assert!(!settings.client_config().sandbox);
    }

    #[test]
    fn test_missing_apikey() {
        let err = WebhookArgs::default().resolve_with(|_| None).unwrap_err();
        assert!(matches!(
            err,
            CliError::MissingSetting { flag: "apikey", .. }
        ));
    }

    #[test]
    fn test_missing_url() {
        let vars = env(&[
            ("LALAMOVE_APIKEY", "pk_test_1"),
            ("LALAMOVE_SECRET", "sk_test_2"),
            ("LALAMOVE_WEBHOOK_URL", "   "),
        ]);
        let err = WebhookArgs::default()
            .resolve_with(|k| vars.get(k).cloned())
            .unwrap_err();
        assert!(matches!(err, CliError::MissingSetting { flag: "url", .. }));
    }

    #[test]
    fn test_sandbox_needs_both_production_credentials() {
        let settings = WebhookSettings {
            apikey: "pk_prod_1".to_string(),
            secret: "sk_test_2".to_string(),
            market: "HK".to_string(),
            url: "https://example.com/hook".to_string(),
            log_file: None,
        };
        assert!(settings.is_sandbox());
        assert!(settings.client_config().sandbox);
        assert!(settings.client_config().log_file.is_none());
    }

    #[test]
    fn test_log_file_from_flag_or_environment() {
        let vars = env(&[
            ("LALAMOVE_APIKEY", "pk_test_1"),
            ("LALAMOVE_SECRET", "sk_test_2"),
            ("LALAMOVE_WEBHOOK_URL", "https://example.com/hook"),
            ("LALAMOVE_LOG_FILE", "/var/log/lalamove.log"),
        ]);

        let settings = WebhookArgs::default()
            .resolve_with(|k| vars.get(k).cloned())
            .unwrap();
        assert_eq!(
            settings.client_config().log_file,
            Some(PathBuf::from("/var/log/lalamove.log"))
        );

        let args = WebhookArgs::try_parse_from(["lalamove-webhook", "--log-file", "webhook.log"])
            .unwrap();
        let settings = args.resolve_with(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(settings.log_file, Some(PathBuf::from("webhook.log")));
    }
}
