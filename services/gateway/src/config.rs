//! Gateway configuration
//!
//! Read from environment variables, optionally seeded from a `.env` file.
//!
//! | Variable      | Default       |
//! |---------------|---------------|
//! | `API_HOST`    | `0.0.0.0`     |
//! | `API_PORT`    | `3000`        |
//! | `ENVIRONMENT` | `development` |

use anyhow::{bail, Context};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Case-insensitive parse; None for unknown names
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "development" => Some(Self::Development),
            "staging" => Some(Self::Staging),
            "production" => Some(Self::Production),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            environment: Environment::default(),
        }
    }
}

impl GatewayConfig {
    /// Load `.env` if present, then read the process environment
    pub fn load() -> anyhow::Result<Self> {
        // A missing .env file is normal outside development.
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = read("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match read("API_PORT") {
            Some(raw) => {
                let port: u16 = raw
                    .parse()
                    .with_context(|| format!("API_PORT must be a port number, got {raw:?}"))?;
                if port == 0 {
                    bail!("API_PORT must be non-zero");
                }
                port
            }
            None => DEFAULT_PORT,
        };

        let environment = match read("ENVIRONMENT") {
            Some(raw) => Environment::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Unknown ENVIRONMENT, falling back to development");
                Environment::Development
            }),
            None => Environment::default(),
        };

        Ok(Self {
            host,
            port,
            environment,
        })
    }
}
