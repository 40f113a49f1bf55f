//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits > 0, status codes)
//! - Request deadline must outlast the downstream deadline
//! - Check addresses and service URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BrokerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{BrokerConfig, ServiceConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid URL for {service} service '{url}': {reason}")]
    ServiceUrl {
        service: &'static str,
        url: String,
        reason: String,
    },

    #[error("{service} service URL must use http or https, got '{scheme}'")]
    ServiceScheme { service: &'static str, scheme: String },

    #[error("{service} service logic_error_status {status} is not a 4xx/5xx code")]
    LogicErrorStatus { service: &'static str, status: u16 },

    #[error("timeout '{0}' must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("request_secs ({request_secs}) must be greater than downstream_secs ({downstream_secs})")]
    RequestDeadline {
        request_secs: u64,
        downstream_secs: u64,
    },

    #[error("max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Check every semantic constraint, collecting all failures.
pub fn validate_config(config: &BrokerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let timeouts = [
        ("request_secs", config.timeouts.request_secs),
        ("downstream_secs", config.timeouts.downstream_secs),
        ("connect_secs", config.timeouts.connect_secs),
    ];
    for (name, secs) in timeouts {
        if secs == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    let request_secs = config.timeouts.request_secs;
    let downstream_secs = config.timeouts.downstream_secs;
    if request_secs > 0 && downstream_secs > 0 && request_secs <= downstream_secs {
        errors.push(ValidationError::RequestDeadline {
            request_secs,
            downstream_secs,
        });
    }

    validate_service("auth", &config.services.auth, &mut errors);
    validate_service("logger", &config.services.logger, &mut errors);

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_service(service: &'static str, config: &ServiceConfig, errors: &mut Vec<ValidationError>) {
    match Url::parse(&config.url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::ServiceScheme {
                service,
                scheme: url.scheme().to_string(),
            });
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::ServiceUrl {
            service,
            url: config.url.clone(),
            reason: e.to_string(),
        }),
    }

    if !(400..=599).contains(&config.logic_error_status) {
        errors.push(ValidationError::LogicErrorStatus {
            service,
            status: config.logic_error_status,
        });
    }
}
