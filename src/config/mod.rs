//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → NodeConfig (validated, immutable)
//!     → seeds the ServiceHub and the HTTP server
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server swaps the network map snapshot
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Only the network directory is hot-reloadable; identity and listeners are fixed
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AdminConfig, ListenerConfig, NetworkConfig, NodeConfig, NodeIdentityConfig, ObservabilityConfig,
    PartyConfig, TlsConfig,
};
