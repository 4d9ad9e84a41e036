//! Layered setting resolution.
//!
//! Each setting is taken from the first non-empty source in this order:
//! explicit command-line argument, environment variable, config file.
//! The config file layer already carries the hard-coded default when the
//! file omits the key.

use crate::config::schema::DeployConfig;
use crate::config::{
    ARTIFACTS_DIR_ENV_VAR, BINARY_PATH_ENV_VAR, CHAIN_ID_ENV_VAR, INITIAL_AMOUNT_ENV_VAR,
    LCD_URL_ENV_VAR,
};

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub binary_path: Option<String>,
    pub initial_amount: Option<String>,
    pub artifacts_dir: Option<String>,
    pub lcd_url: Option<String>,
    pub chain_id: Option<String>,
    pub json_logs: bool,
}

/// Pick the first non-empty value among `explicit`, the environment variable
/// `env_var` (looked up through `lookup`), and `fallback`.
pub fn resolve_with<F>(explicit: Option<&str>, env_var: &str, fallback: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = explicit.map(str::trim).filter(|v| !v.is_empty()) {
        return value.to_string();
    }
    if let Some(value) = lookup(env_var).filter(|v| !v.trim().is_empty()) {
        return value.trim().to_string();
    }
    fallback.to_string()
}

/// Resolve a setting against the process environment.
pub fn resolve(explicit: Option<&str>, env_var: &str, fallback: &str) -> String {
    resolve_with(explicit, env_var, fallback, |key| std::env::var(key).ok())
}

/// Apply command-line and environment layers on top of a loaded config.
pub fn apply_overrides(config: &mut DeployConfig, overrides: &Overrides) {
    apply_overrides_with(config, overrides, |key| std::env::var(key).ok());
}

/// Same as [`apply_overrides`] with an injectable environment lookup.
pub fn apply_overrides_with<F>(config: &mut DeployConfig, overrides: &Overrides, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let deploy = &mut config.deploy;
    deploy.binary_path = resolve_with(
        overrides.binary_path.as_deref(),
        BINARY_PATH_ENV_VAR,
        &deploy.binary_path,
        &lookup,
    );
    deploy.initial_amount = resolve_with(
        overrides.initial_amount.as_deref(),
        INITIAL_AMOUNT_ENV_VAR,
        &deploy.initial_amount,
        &lookup,
    );
    deploy.artifacts_dir = resolve_with(
        overrides.artifacts_dir.as_deref(),
        ARTIFACTS_DIR_ENV_VAR,
        &deploy.artifacts_dir,
        &lookup,
    );

    let network = &mut config.network;
    network.lcd_url = resolve_with(
        overrides.lcd_url.as_deref(),
        LCD_URL_ENV_VAR,
        &network.lcd_url,
        &lookup,
    );
    network.chain_id = resolve_with(
        overrides.chain_id.as_deref(),
        CHAIN_ID_ENV_VAR,
        &network.chain_id,
        &lookup,
    );

    if overrides.json_logs {
        config.observability.json_logs = true;
    }
}
