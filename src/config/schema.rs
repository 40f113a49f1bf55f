//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::envelope::request::DEFAULT_MAX_BODY_SIZE;

/// Root configuration for the broker.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BrokerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Shared downstream client settings.
    pub downstream: DownstreamConfig,

    /// Downstream service endpoints.
    pub services: ServicesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// Timeout configuration for inbound and downstream operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request deadline in seconds.
    pub request_secs: u64,

    /// Total downstream call deadline in seconds.
    pub downstream_secs: u64,

    /// Downstream connection establishment timeout in seconds.
    pub connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            downstream_secs: 10,
            connect_secs: 5,
        }
    }
}

/// Settings for the process-wide downstream HTTP client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Idle connections kept per downstream host.
    pub pool_max_idle_per_host: usize,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 32,
        }
    }
}

/// Endpoints of the services the broker dispatches to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Authentication service (`auth` action).
    pub auth: ServiceConfig,

    /// Logging service (`logger` action).
    pub logger: ServiceConfig,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            auth: ServiceConfig::new("http://authentication-service/authenticate"),
            logger: ServiceConfig::new("http://logger-service/log"),
        }
    }
}

/// A single downstream service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Full URL the sub-payload is POSTed to.
    pub url: String,

    /// Status returned to the caller when the service answers with an
    /// envelope that has `error: true`.
    #[serde(default = "default_logic_error_status")]
    pub logic_error_status: u16,
}

impl ServiceConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            logic_error_status: default_logic_error_status(),
        }
    }
}

fn default_logic_error_status() -> u16 {
    401
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
