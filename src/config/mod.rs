//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → command line overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → ShopConfig (validated, immutable)
//!     → handed to PawnShopServer at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the server is built
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    InventoryConfig, ListenerConfig, ObservabilityConfig, PolicyConfig, ShopConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
