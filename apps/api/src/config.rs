use anyhow::{Context, Result};

const DEFAULT_LLM_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Messages endpoint. Overridable so a proxy or a local mock can sit in front of the provider.
    pub llm_api_url: String,
    pub llm_timeout_secs: u64,
    pub max_logo_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_api_url: std::env::var("LLM_API_URL")
                .unwrap_or_else(|_| DEFAULT_LLM_API_URL.to_string()),
            llm_timeout_secs: parse_env_or("LLM_TIMEOUT_SECS", 60)?,
            max_logo_bytes: parse_env_or("MAX_LOGO_BYTES", DEFAULT_MAX_LOGO_BYTES)?,
            port: parse_env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Config pointing at the given LLM endpoint, for tests.
    pub fn for_tests(llm_api_url: &str) -> Self {
        Config {
            anthropic_api_key: "test-key".to_string(),
            llm_api_url: llm_api_url.to_string(),
            llm_timeout_secs: 5,
            max_logo_bytes: 1024,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_or_uses_default_when_unset() {
        let value: u16 = parse_env_or("INVOICEWISE_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_parse_env_or_reads_value() {
        std::env::set_var("INVOICEWISE_TEST_TIMEOUT", " 15 ");
        let value: u64 = parse_env_or("INVOICEWISE_TEST_TIMEOUT", 60).unwrap();
        assert_eq!(value, 15);
    }

    #[test]
    fn test_parse_env_or_rejects_garbage() {
        std::env::set_var("INVOICEWISE_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env_or("INVOICEWISE_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }
}
