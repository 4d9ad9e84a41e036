//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (gas, timeouts > 0)
//! - Reject token metadata the CW20 contract would refuse at instantiate time
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DeployConfig → Result<(), Vec<ValidationError>>
//! - Runs before any network call is made

use std::fmt;

use cosmwasm_std::Uint128;

use crate::config::schema::DeployConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a fully resolved configuration.
pub fn validate_config(config: &DeployConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let network = &config.network;

    match url::Url::parse(&network.lcd_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "network.lcd_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "network.lcd_url",
            format!("invalid URL '{}': {}", network.lcd_url, e),
        )),
    }

    if network.chain_id.trim().is_empty() {
        errors.push(ValidationError::new("network.chain_id", "must not be empty"));
    }
    if network.account_prefix.trim().is_empty() {
        errors.push(ValidationError::new("network.account_prefix", "must not be empty"));
    }
    if network.fee_denom.trim().is_empty() {
        errors.push(ValidationError::new("network.fee_denom", "must not be empty"));
    }
    if !(network.gas_price.is_finite() && network.gas_price >= 0.0) {
        errors.push(ValidationError::new(
            "network.gas_price",
            "must be a non-negative number",
        ));
    }
    if network.upload_gas_limit == 0 {
        errors.push(ValidationError::new("network.upload_gas_limit", "must be > 0"));
    }
    if network.instantiate_gas_limit == 0 {
        errors.push(ValidationError::new(
            "network.instantiate_gas_limit",
            "must be > 0",
        ));
    }
    if network.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "network.request_timeout_secs",
            "must be > 0",
        ));
    }
    if network.tx_timeout_secs == 0 {
        errors.push(ValidationError::new("network.tx_timeout_secs", "must be > 0"));
    }
    if network.poll_interval_ms == 0 {
        errors.push(ValidationError::new("network.poll_interval_ms", "must be > 0"));
    }

    let deploy = &config.deploy;
    if deploy.binary_path.trim().is_empty() {
        errors.push(ValidationError::new("deploy.binary_path", "must not be empty"));
    }
    if let Err(e) = deploy.initial_amount.parse::<Uint128>() {
        errors.push(ValidationError::new("deploy.initial_amount", e.to_string()));
    }
    if deploy.label.trim().is_empty() {
        errors.push(ValidationError::new("deploy.label", "must not be empty"));
    }

    let token = &config.token;
    if !(3..=50).contains(&token.name.chars().count()) {
        errors.push(ValidationError::new(
            "token.name",
            "must be between 3 and 50 characters",
        ));
    }
    let symbol_ok = (3..=12).contains(&token.symbol.len())
        && token
            .symbol
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '-');
    if !symbol_ok {
        errors.push(ValidationError::new(
            "token.symbol",
            "must be 3-12 characters of [a-zA-Z-]",
        ));
    }
    if token.decimals > 18 {
        errors.push(ValidationError::new("token.decimals", "must be <= 18"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
