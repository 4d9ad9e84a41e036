//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events on stderr)
//!
//! The deploy procedure additionally prints raw query responses and the final
//! marker on stdout, so stdout stays machine-readable.
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON optional) for machine parsing
//! - Each run carries a run ID on its span

pub mod logging;
