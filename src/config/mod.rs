//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, serde defaults fill the gaps)
//!     → resolve.rs (CLI argument > environment > file > default)
//!     → validation.rs (semantic checks)
//!     → DeployConfig (validated, immutable for the rest of the run)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the deployer runs with no config file at all
//! - An environment variable that is set but empty counts as unset
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod resolve;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_layered, ConfigError};
pub use resolve::Overrides;
pub use schema::{DeployConfig, DeploySettings, NetworkConfig, ObservabilityConfig, TokenConfig};

/// Bytecode location used when nothing else is configured.
pub const DEFAULT_BINARY_PATH: &str = "astroport_artifacts/astroport_token.wasm";

/// Initial signer balance used when nothing else is configured.
pub const DEFAULT_INITIAL_AMOUNT: &str = "1100000000000000";

/// Artifact directory used when nothing else is configured.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

pub const BINARY_PATH_ENV_VAR: &str = "CW20_BINARY_PATH";
pub const INITIAL_AMOUNT_ENV_VAR: &str = "TOKEN_INITIAL_AMOUNT";
pub const ARTIFACTS_DIR_ENV_VAR: &str = "ARTIFACTS_PATH";
pub const LCD_URL_ENV_VAR: &str = "LCD_CLIENT_URL";
pub const CHAIN_ID_ENV_VAR: &str = "CHAIN_ID";
pub const CONFIG_PATH_ENV_VAR: &str = "DEPLOY_CONFIG";
