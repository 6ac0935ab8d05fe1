//! `.env` file loading.
//!
//! Each `KEY=VALUE` line becomes the environment variable `LALAMOVE_KEY`.
//! Keys are uppercased and never get the prefix twice; values are stripped
//! of surrounding spaces and quotes. Variables already present in the
//! process environment win over the file.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::CliError;

/// Prefix added to every key read from an env file.
pub const ENV_PREFIX: &str = "LALAMOVE_";

/// Parses env file contents into `(variable, value)` pairs.
///
/// Blank lines, `#` comments and lines with an empty key or value are
/// skipped.
#[must_use]
pub fn parse_env(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.starts_with('#') {
                return None;
            }
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            let key = key.strip_prefix(ENV_PREFIX).unwrap_or(key).trim();
            let value = value.trim().trim_matches(|c| c == '\'' || c == '"').trim();
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some((format!("{ENV_PREFIX}{}", key.to_uppercase()), value.to_string()))
        })
        .collect()
}

/// Loads an env file into the process environment.
///
/// A missing file is not an error. Returns the number of variables set.
///
/// # Errors
///
/// Returns `CliError::EnvFile` if the file exists but cannot be read.
pub fn load_env_file(path: &Path) -> Result<usize, CliError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No env file at {}", path.display());
            return Ok(0);
        }
        Err(source) => {
            return Err(CliError::EnvFile {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut loaded = 0;
    for (key, value) in parse_env(&contents) {
        if std::env::var_os(&key).is_some() {
            continue;
        }
        std::env::set_var(&key, value);
        loaded += 1;
    }

    tracing::debug!("Loaded {} variables from {}", loaded, path.display());
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_env_prefixes_and_uppercases() {
        let vars = parse_env("apikey=pk_test_1\nLALAMOVE_SECRET=sk_test_2\n");
        assert_eq!(
            vars,
            vec![
                ("LALAMOVE_APIKEY".to_string(), "pk_test_1".to_string()),
                ("LALAMOVE_SECRET".to_string(), "sk_test_2".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_env_trims_quotes_and_spaces() {
        let vars = parse_env("market = 'SG' \nwebhook_url=\" https://example.com/hook \"");
        assert_eq!(vars[0], ("LALAMOVE_MARKET".to_string(), "SG".to_string()));
        assert_eq!(
            vars[1],
            (
                "LALAMOVE_WEBHOOK_URL".to_string(),
                "https://example.com/hook".to_string()
            )
        );
    }

    #[test]
    fn test_parse_env_skips_blank_comment_and_incomplete_lines() {
        let vars = parse_env("\n# comment\nnovalue=\n=orphan\njunk\nok=1\n");
        assert_eq!(vars, vec![("LALAMOVE_OK".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_parse_env_keeps_equals_in_value() {
        let vars = parse_env("secret=abc=def");
        assert_eq!(vars[0].1, "abc=def");
    }

    #[test]
    fn test_load_env_file_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_env_file(&dir.path().join("absent.env")).unwrap();
        assert_eq!(loaded, 0);
    }

    #[test]
    fn test_load_env_file_does_not_override() {
        std::env::set_var("LALAMOVE_ENV_TEST_PRESET", "from-process");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "env_test_preset=from-file").unwrap();
        writeln!(file, "env_test_fresh=fresh").unwrap();

        let loaded = load_env_file(file.path()).unwrap();
        assert_eq!(loaded, 1);
        assert_eq!(
            std::env::var("LALAMOVE_ENV_TEST_PRESET").unwrap(),
            "from-process"
        );
        assert_eq!(std::env::var("LALAMOVE_ENV_TEST_FRESH").unwrap(), "fresh");
    }
}
