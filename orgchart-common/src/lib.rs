//! # Orgchart Common
//!
//! Foundational pieces shared by the orgchart crates:
//!
//! - [`error`] - Severity classification implemented by every error type
//! - [`logging`] - Formatting helpers for structured log output

pub mod error;
pub mod logging;

pub use error::{ErrorSeverity, Severity};
pub use logging::Pretty;
