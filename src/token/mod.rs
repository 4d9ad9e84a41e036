//! CW20 token messages.
//!
//! Message and response types come from `cw20` and `cw20-base`; this module
//! only builds the single-holder init message and names the queries for logs.

pub mod msg;

pub use msg::{query_kind, single_holder};
