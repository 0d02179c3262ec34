pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use self::toml_config::ServiceToml;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8008;
pub const DEFAULT_TIMEOUT_MS: u64 = 500;
pub const DEFAULT_MAX_SOURCES: usize = 32;

#[derive(Debug, Clone, Parser)]
#[command(name = "number-aggregator")]
#[command(about = "Fan-out aggregation service for remote number providers")]
pub struct CliConfig {
    #[arg(long, help = "Address to bind the HTTP server on")]
    pub host: Option<String>,

    #[arg(long, help = "Port to listen on")]
    pub port: Option<u16>,

    #[arg(long = "timeout-ms", help = "Per-source fetch timeout in milliseconds")]
    pub timeout_ms: Option<u64>,

    #[arg(long = "max-sources", help = "Maximum number of url parameters per request")]
    pub max_sources: Option<usize>,

    #[arg(long, help = "Optional TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long = "log-json", help = "Emit logs as JSON")]
    pub log_json: bool,
}

/// 解析後的服務配置。優先序:CLI 參數 > TOML 檔 > 預設值。
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub source_timeout_ms: u64,
    pub max_sources: usize,
}

impl ServiceConfig {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => Some(ServiceToml::from_file(path)?),
            None => None,
        };

        if let Some(name) = file.as_ref().and_then(|f| f.profile_name()) {
            tracing::info!("📋 Using configuration profile: {}", name);
        }

        Ok(Self {
            host: cli
                .host
                .clone()
                .or_else(|| file.as_ref().and_then(|f| f.host()))
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli
                .port
                .or_else(|| file.as_ref().and_then(|f| f.port()))
                .unwrap_or(DEFAULT_PORT),
            source_timeout_ms: cli
                .timeout_ms
                .or_else(|| file.as_ref().and_then(|f| f.timeout_ms()))
                .unwrap_or(DEFAULT_TIMEOUT_MS),
            max_sources: cli
                .max_sources
                .or_else(|| file.as_ref().and_then(|f| f.max_sources()))
                .unwrap_or(DEFAULT_MAX_SOURCES),
        })
    }
}

impl ConfigProvider for ServiceConfig {
    fn bind_host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms)
    }

    fn max_sources(&self) -> usize {
        self.max_sources
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.host)?;
        validation::validate_range("fetch.timeout_ms", self.source_timeout_ms, 1, 60_000)?;
        validation::validate_positive_number("fetch.max_sources", self.max_sources, 1)?;
        Ok(())
    }
}
