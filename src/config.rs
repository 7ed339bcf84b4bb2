use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mastra: MastraConfig,
    pub limits: StreamLimits,
}

/// Connection settings for the upstream Mastra agent service.
#[derive(Debug, Clone)]
pub struct MastraConfig {
    pub base_url: String,
    /// Credential forwarded to the upstream service on every request.
    /// Injected into the client at startup, never staged through
    /// process-wide environment state at request time.
    pub api_key: String,
    pub agent_id: String,
    pub workflow_id: String,
    pub request_timeout_secs: u64,
}

/// Bounds applied while draining a streamed agent reply.
#[derive(Debug, Clone)]
pub struct StreamLimits {
    pub max_response_bytes: usize,
    pub drain_timeout_secs: u64,
}

impl Default for StreamLimits {
    fn default() -> Self {
        Self {
            max_response_bytes: 256 * 1024,
            drain_timeout_secs: 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY is not set; the upstream agent service requires it")?;

        let limit_defaults = StreamLimits::default();

        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", 8787)?,
            mastra: MastraConfig {
                base_url: env_or("MASTRA_BASE_URL", "http://localhost:4111"),
                api_key,
                agent_id: env_or("MASTRA_AGENT_ID", "weather-agent"),
                workflow_id: env_or("MASTRA_WORKFLOW_ID", "weather-workflow"),
                request_timeout_secs: parse_env("MASTRA_REQUEST_TIMEOUT_SECS", 120)?,
            },
            limits: StreamLimits {
                max_response_bytes: parse_env(
                    "MAX_RESPONSE_BYTES",
                    limit_defaults.max_response_bytes,
                )?,
                drain_timeout_secs: parse_env(
                    "DRAIN_TIMEOUT_SECS",
                    limit_defaults.drain_timeout_secs,
                )?,
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}
