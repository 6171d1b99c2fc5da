//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FetcherConfig (validated, immutable)
//!     → handed to coordinators at construction
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty config is a working config
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every violation, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CacheConfig, FetcherConfig, ObservabilityConfig, PollingConfig, RetryConfig, TransportConfig,
};
pub use validation::{validate_config, validate_resource_url, ValidationError};
