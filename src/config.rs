use std::time::Duration;

use anyhow::{bail, Result};
use clap_serde_derive::ClapSerde;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "AiTextAnalyzer.toml";

#[derive(ClapSerde, Debug, Clone)]
pub struct Config {
    /// The address the listener binds to
    #[default("0.0.0.0".to_string())]
    #[arg(long, env)]
    pub(crate) address: String,

    /// The port the listener binds to
    #[default(3001)]
    #[arg(short, long, env)]
    pub(crate) port: u16,

    /// API key sent as bearer token to the completion API
    #[arg(long, env, hide_env_values = true)]
    pub(crate) groq_api_key: String,

    /// OpenAI compatible chat completions endpoint
    #[default("https://api.groq.com/openai/v1/chat/completions".to_string())]
    #[arg(long, env)]
    pub(crate) completion_url: String,

    /// Model identifier sent with every completion request
    #[default("meta-llama/llama-4-scout-17b-16e-instruct".to_string())]
    #[arg(long, env)]
    pub(crate) completion_model: String,

    /// Upper bound in seconds for a single completion request
    #[default(30)]
    #[arg(long, env)]
    pub(crate) request_timeout: u64,
}

impl Config {
    pub fn from_toml(path: &str) -> Result<Self> {
        let str = std::fs::read_to_string(path)?;
        Self::from_toml_str(&str)
    }

    /// Fields missing from the document keep their defaults
    pub fn from_toml_str(str: &str) -> Result<Self> {
        let opt: <Config as ClapSerde>::Opt = toml::from_str(str)?;
        Ok(Config::from(opt))
    }

    pub fn validate(&self) -> Result<()> {
        if self.groq_api_key.trim().is_empty() {
            bail!("Missing completion API key, set GROQ_API_KEY or --groq-api-key");
        }
        if self.request_timeout == 0 {
            bail!("Request timeout must be at least one second");
        }
        Ok(())
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

#[cfg(test)]
pub(crate) fn test_config(completion_url: &str) -> Config {
    Config {
        groq_api_key: "test-key".into(),
        completion_url: completion_url.into(),
        ..Config::default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test_log::test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.address, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(
            config.completion_url,
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(
            config.completion_model,
            "meta-llama/llama-4-scout-17b-16e-instruct"
        );
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test_log::test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("port = 8080\ngroq_api_key = \"abc\"").unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.groq_api_key, "abc");
        assert_eq!(config.address, "0.0.0.0");
        assert!(config.validate().is_ok());
    }

    #[test_log::test]
    fn test_missing_api_key_is_rejected() {
        assert!(Config::default().validate().is_err());
        assert!(test_config("http://localhost").validate().is_ok());
    }

    #[test_log::test]
    fn test_zero_timeout_is_rejected() {
        let config = Config {
            request_timeout: 0,
            ..test_config("http://localhost")
        };
        assert!(config.validate().is_err());
    }
}
