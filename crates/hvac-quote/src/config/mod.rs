use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use tracing::info;

use crate::workflows::pricing::{
    CostTableError, DealerCostTable, PlatinumPolicy, PricingEngine, PricingPolicy,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the quote site.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub pricing: PricingConfig,
    pub promotions: PromotionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let platinum_policy = match env::var("PRICING_PLATINUM_POLICY") {
            Ok(raw) if !raw.trim().is_empty() => PlatinumPolicy::parse(&raw)
                .ok_or(ConfigError::InvalidPlatinumPolicy { value: raw })?,
            _ => PlatinumPolicy::default(),
        };

        let dealer_cost_csv = env::var("DEALER_COST_CSV")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let seed_defaults = match env::var("PROMO_SEED_DEFAULTS") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "PROMO_SEED_DEFAULTS",
                value: raw,
            })?,
            Err(_) => true,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            pricing: PricingConfig {
                platinum_policy,
                dealer_cost_csv,
            },
            promotions: PromotionConfig { seed_defaults },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Dealer cost source and tier policy.
#[derive(Debug, Clone, Default)]
pub struct PricingConfig {
    pub platinum_policy: PlatinumPolicy,
    pub dealer_cost_csv: Option<PathBuf>,
}

impl PricingConfig {
    /// Builds the engine, reading the dealer cost CSV when one is configured.
    pub fn build_engine(&self) -> Result<PricingEngine, CostTableError> {
        let table = match &self.dealer_cost_csv {
            Some(path) => {
                let table = DealerCostTable::from_path(path)?;
                info!(path = %path.display(), entries = table.len(), "dealer cost table loaded");
                table
            }
            None => DealerCostTable::standard(),
        };

        let policy = PricingPolicy {
            platinum: self.platinum_policy,
            ..PricingPolicy::default()
        };
        Ok(PricingEngine::new(table, policy))
    }
}

#[derive(Debug, Clone)]
pub struct PromotionConfig {
    /// Insert the launch promo codes at startup.
    pub seed_defaults: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPlatinumPolicy { value: String },
    InvalidFlag { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPlatinumPolicy { value } => write!(
                f,
                "PRICING_PLATINUM_POLICY must be 'additive' or 'multiplier', got '{value}'"
            ),
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidPlatinumPolicy { .. }
            | ConfigError::InvalidFlag { .. } => None,
        }
    }
}
