//! Environment-backed configuration.
//!
//! Server settings use `KAKEHASHI_*` environment variables with defaults;
//! the backend credentials keep their provider-standard names
//! (`PINECONE_API_KEY`, `OPENAI_API_KEY`, `OPENAI_MODEL`).

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read overrides on top of defaults. The two
/// API keys stay optional here: the vector backend key is checked at call
/// time (hard failure), the generation key merely disables explanations.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Vector index host, no scheme. Default: [`DEFAULT_PINECONE_HOST`].
    pub pinecone_host: String,

    /// Vector backend API key. Required for upsert/search/stats calls.
    pub pinecone_api_key: Option<String>,

    /// Text-generation API key. Absence disables explanation features.
    pub openai_api_key: Option<String>,

    /// Chat model used for reasons and summaries. Default: `gpt-4o-mini`.
    pub openai_model: String,
}

/// Index host used when `KAKEHASHI_PINECONE_HOST` is not set.
pub const DEFAULT_PINECONE_HOST: &str =
    "firstprpjects-x0dk0o2.svc.aped-4627-b74a.pinecone.io";

/// Chat model used when `OPENAI_MODEL` is not set.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            pinecone_host: DEFAULT_PINECONE_HOST.to_string(),
            pinecone_api_key: None,
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "KAKEHASHI_PORT";
    const ENV_BIND_ADDR: &'static str = "KAKEHASHI_BIND_ADDR";
    const ENV_PINECONE_HOST: &'static str = "KAKEHASHI_PINECONE_HOST";
    const ENV_PINECONE_API_KEY: &'static str = "PINECONE_API_KEY";
    const ENV_OPENAI_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_OPENAI_MODEL: &'static str = "OPENAI_MODEL";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let pinecone_host =
            Self::parse_string_from_env(Self::ENV_PINECONE_HOST, defaults.pinecone_host);
        let pinecone_api_key = Self::parse_optional_string_from_env(Self::ENV_PINECONE_API_KEY);
        let openai_api_key = Self::parse_optional_string_from_env(Self::ENV_OPENAI_API_KEY);
        let openai_model =
            Self::parse_string_from_env(Self::ENV_OPENAI_MODEL, defaults.openai_model);

        Ok(Self {
            port,
            bind_addr,
            pinecone_host,
            pinecone_api_key,
            openai_api_key,
            openai_model,
        })
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
