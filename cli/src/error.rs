//! CLI error types.

use std::path::PathBuf;

use lalamove_sdk::ClientError;

/// Errors raised by the command-line tools.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A required setting was given neither as a flag nor in the environment.
    #[error("missing --{flag} (or {env_var})")]
    MissingSetting {
        /// Flag name without the leading dashes.
        flag: &'static str,
        /// Environment variable that can supply it.
        env_var: &'static str,
    },

    /// The `.env` file exists but could not be read.
    #[error("cannot read env file {}: {source}", path.display())]
    EnvFile {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The API call failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_setting_display() {
        let err = CliError::MissingSetting {
            flag: "apikey",
            env_var: "LALAMOVE_APIKEY",
        };
        assert_eq!(err.to_string(), "missing --apikey (or LALAMOVE_APIKEY)");
    }

    #[test]
    fn test_client_error_is_transparent() {
        let err = CliError::from(ClientError::Timeout);
        assert_eq!(err.to_string(), ClientError::Timeout.to_string());
    }
}
