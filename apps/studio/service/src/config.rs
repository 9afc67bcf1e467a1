use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8791";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_STATIC_DIR: &str = "apps/studio/service/static";
const DEFAULT_GUIDE_PATH: &str = "UTILS_CALL_GUIDE.md";
const DEFAULT_GENERATOR_MODE: &str = "openai";
const DEFAULT_UPSTREAM_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";
const DEFAULT_MODEL: &str = "qwen3-14b";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 2048;
const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 60;

pub const GENERATOR_MODE_MOCK: &str = "mock";
pub const GENERATOR_MODE_OPENAI: &str = "openai";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
    pub static_dir: PathBuf,
    pub guide_path: PathBuf,
    pub generator_mode: String,
    pub upstream_base_url: String,
    pub upstream_api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub upstream_timeout_seconds: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PF_STUDIO_BIND_ADDR value '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr_raw = env_non_empty("PF_STUDIO_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr_raw
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_addr_raw,
                source,
            })?;

        let log_filter =
            env_non_empty("PF_STUDIO_LOG_FILTER").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let static_dir = env_non_empty("PF_STUDIO_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let guide_path = env_non_empty("PF_STUDIO_GUIDE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GUIDE_PATH));

        let generator_mode = env_non_empty("PF_STUDIO_GENERATOR_MODE")
            .unwrap_or_else(|| DEFAULT_GENERATOR_MODE.to_string());

        // OPENAI_* variables are honored as a fallback so an environment set
        // up for the stock OpenAI SDK keeps working unchanged.
        let upstream_base_url = env_non_empty("PF_STUDIO_UPSTREAM_BASE_URL")
            .or_else(|| env_non_empty("OPENAI_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string());

        let upstream_api_key =
            env_non_empty("PF_STUDIO_UPSTREAM_API_KEY").or_else(|| env_non_empty("OPENAI_API_KEY"));

        let model = env_non_empty("PF_STUDIO_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = env_non_empty("PF_STUDIO_TEMPERATURE")
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);

        let max_tokens = env_non_empty("PF_STUDIO_MAX_TOKENS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let upstream_timeout_seconds = env_non_empty("PF_STUDIO_UPSTREAM_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECONDS);

        Ok(Self {
            bind_addr,
            log_filter,
            static_dir,
            guide_path,
            generator_mode,
            upstream_base_url,
            upstream_api_key,
            model,
            temperature,
            max_tokens,
            upstream_timeout_seconds,
        })
    }

    /// Mock-mode fixture used by the router tests: no upstream, no key.
    pub fn for_tests(static_dir: PathBuf, guide_path: PathBuf) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            static_dir,
            guide_path,
            generator_mode: GENERATOR_MODE_MOCK.to_string(),
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            upstream_timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn with_env<T>(overrides: &[(&str, Option<&str>)], test: impl FnOnce() -> T) -> T {
        let lock = ENV_LOCK.get_or_init(|| Mutex::new(()));
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let previous = overrides
            .iter()
            .map(|(key, _)| (*key, env::var(key).ok()))
            .collect::<Vec<_>>();

        for (key, value) in overrides {
            if let Some(value) = value {
                unsafe { env::set_var(key, value) };
            } else {
                unsafe { env::remove_var(key) };
            }
        }

        let result = test();

        for (key, value) in previous {
            if let Some(value) = value {
                unsafe { env::set_var(key, value) };
            } else {
                unsafe { env::remove_var(key) };
            }
        }

        result
    }

    const ALL_VARS: [&str; 6] = [
        "PF_STUDIO_BIND_ADDR",
        "PF_STUDIO_GENERATOR_MODE",
        "PF_STUDIO_UPSTREAM_BASE_URL",
        "PF_STUDIO_UPSTREAM_API_KEY",
        "OPENAI_BASE_URL",
        "OPENAI_API_KEY",
    ];

    fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS.iter().map(|key| (*key, None)).collect()
    }

    #[test]
    fn from_env_uses_documented_defaults() {
        with_env(&cleared(), || {
            let config = Config::from_env().expect("default config");
            assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
            assert_eq!(config.generator_mode, GENERATOR_MODE_OPENAI);
            assert_eq!(config.model, DEFAULT_MODEL);
            assert_eq!(config.upstream_api_key, None);
        });
    }

    #[test]
    fn from_env_rejects_malformed_bind_addr() {
        let mut overrides = cleared();
        overrides[0] = ("PF_STUDIO_BIND_ADDR", Some("not-an-addr"));
        with_env(&overrides, || {
            let error = Config::from_env().expect_err("expected bind addr error");
            assert!(matches!(error, ConfigError::InvalidBindAddr { .. }));
        });
    }

    #[test]
    fn from_env_prefers_studio_vars_over_openai_fallback() {
        let mut overrides = cleared();
        overrides[2] = ("PF_STUDIO_UPSTREAM_BASE_URL", Some("https://studio.example.com/v1"));
        overrides[4] = ("OPENAI_BASE_URL", Some("https://fallback.example.com/v1"));
        with_env(&overrides, || {
            let config = Config::from_env().expect("config");
            assert_eq!(config.upstream_base_url, "https://studio.example.com/v1");
        });
    }

    #[test]
    fn from_env_falls_back_to_openai_api_key() {
        let mut overrides = cleared();
        overrides[5] = ("OPENAI_API_KEY", Some("sk-fallback"));
        with_env(&overrides, || {
            let config = Config::from_env().expect("config");
            assert_eq!(config.upstream_api_key.as_deref(), Some("sk-fallback"));
        });
    }

    #[test]
    fn for_tests_selects_mock_generator() {
        let config = Config::for_tests(PathBuf::from("static"), PathBuf::from("guide.md"));
        assert_eq!(config.generator_mode, GENERATOR_MODE_MOCK);
        assert_eq!(config.upstream_api_key, None);
    }
}
