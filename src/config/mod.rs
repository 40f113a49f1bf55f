//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BrokerConfig (validated, immutable)
//!     → action-target table + shared downstream client built once at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once; targets never change while the process runs
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    BrokerConfig, DownstreamConfig, LimitsConfig, ListenerConfig, ObservabilityConfig,
    ServiceConfig, ServicesConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
