//! Error severity classification
//!
//! The hierarchy engine itself is total and never fails; errors only arise at
//! the edges (fetching snapshots, loading configuration). Each crate defines
//! its own error enum and reports how serious a variant is through
//! [`Severity`], so callers can pick a log level without matching on
//! crate-specific variants.

/// Severity levels for error classification
///
/// - **Warning**: Potential issue but the operation can proceed.
/// - **Error**: The operation failed but the session remains usable.
/// - **Critical**: Nothing sensible can be shown until the cause is fixed.
///
/// # Examples
///
/// ```rust
/// use orgchart_common::ErrorSeverity;
///
/// // A missing snapshot file leaves the previous view in place
/// let not_found = ErrorSeverity::Error;
/// assert!(not_found > ErrorSeverity::Warning);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,

    /// Operation failed but the system can continue
    Error,

    /// System cannot continue, requires immediate attention
    Critical,
}

impl ErrorSeverity {
    /// Lowercase label suitable for structured log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSeverity::Warning => "warning",
            ErrorSeverity::Error => "error",
            ErrorSeverity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for error types that have severity levels
///
/// # Example
///
/// ```rust
/// use orgchart_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum FetchError {
///     Unreachable,
///     Stale,
/// }
///
/// impl Severity for FetchError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             FetchError::Unreachable => ErrorSeverity::Error,
///             FetchError::Stale => ErrorSeverity::Warning,
///         }
///     }
/// }
///
/// assert_eq!(FetchError::Stale.severity(), ErrorSeverity::Warning);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}
