use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Service configuration loaded from environment variables.
/// Only the service shell is configurable; scoring behaviour is fixed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Request body cap for resume uploads.
    pub max_upload_bytes: usize,
    pub stopword_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            stopword_language: "en".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .map(|v| parse_upload_limit(&v))
                .transpose()?
                .unwrap_or(defaults.max_upload_bytes),
            stopword_language: std::env::var("STOPWORD_LANGUAGE")
                .unwrap_or(defaults.stopword_language),
        })
    }
}

fn parse_upload_limit(value: &str) -> Result<usize> {
    let limit = value
        .trim()
        .parse::<usize>()
        .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{value}'"))?;
    anyhow::ensure!(limit > 0, "MAX_UPLOAD_BYTES must be greater than zero");
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.stopword_language, "en");
    }

    #[test]
    fn test_upload_limit_parsing() {
        assert_eq!(parse_upload_limit(" 2048 ").unwrap(), 2048);
        assert!(parse_upload_limit("0").is_err());
        assert!(parse_upload_limit("ten megabytes").is_err());
    }
}
