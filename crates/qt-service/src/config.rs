//! Service configuration sourced from `QUARTERLY_*` environment variables.

use qt_data::{EdgarConfig, MAX_QUARTERS};
use qt_risk::{RiskEngineConfig, ZeroPolicy};
use qt_types::{config_error, QtResult};

pub const ENV_USER_AGENT: &str = "QUARTERLY_USER_AGENT";
pub const ENV_DATA_URL: &str = "QUARTERLY_DATA_URL";
pub const ENV_WWW_URL: &str = "QUARTERLY_WWW_URL";
pub const ENV_QUARTERS: &str = "QUARTERLY_QUARTERS";
pub const ENV_TIMEOUT_SECS: &str = "QUARTERLY_TIMEOUT_SECS";
pub const ENV_OFFLINE: &str = "QUARTERLY_OFFLINE";
pub const ENV_ZERO_AS_MISSING: &str = "QUARTERLY_ZERO_AS_MISSING";

/// Number of quarters fetched per company report.
pub const DEFAULT_QUARTERS: usize = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub edgar: EdgarConfig,
    pub quarters: usize,
    /// Serve sample data only, never calling EDGAR.
    pub offline: bool,
    pub risk: RiskEngineConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            edgar: EdgarConfig::default(),
            quarters: DEFAULT_QUARTERS,
            offline: false,
            risk: RiskEngineConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> QtResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> QtResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            config.edgar.user_agent = user_agent;
        }
        if let Some(url) = lookup(ENV_DATA_URL) {
            config.edgar.data_url = url;
        }
        if let Some(url) = lookup(ENV_WWW_URL) {
            config.edgar.www_url = url;
        }
        if let Some(raw) = lookup(ENV_QUARTERS) {
            config.quarters = parse_positive(ENV_QUARTERS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.edgar.timeout_secs = parse_positive(ENV_TIMEOUT_SECS, &raw)? as u64;
        }
        if let Some(raw) = lookup(ENV_OFFLINE) {
            config.offline = parse_flag(ENV_OFFLINE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_ZERO_AS_MISSING) {
            if parse_flag(ENV_ZERO_AS_MISSING, &raw)? {
                config.risk.zero_policy = ZeroPolicy::ZeroAsMissing;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> QtResult<()> {
        if self.quarters == 0 || self.quarters > MAX_QUARTERS {
            return Err(config_error!(
                "quarters must be between 1 and {}, got {}",
                MAX_QUARTERS,
                self.quarters
            ));
        }
        if self.edgar.user_agent.trim().is_empty() {
            return Err(config_error!("{} must not be empty", ENV_USER_AGENT));
        }
        self.risk.validate()
    }
}

fn parse_positive(key: &str, raw: &str) -> QtResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(config_error!("{} must be a positive integer, got '{}'", key, raw)),
    }
}

fn parse_flag(key: &str, raw: &str) -> QtResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(config_error!("{} must be a boolean, got '{}'", key, raw)),
    }
}
