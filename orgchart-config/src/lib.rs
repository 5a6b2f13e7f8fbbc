//! Orgchart configuration management using Figment
//!
//! Loads the knobs of the hierarchy engine from layered sources:
//!
//! - Global: `~/.orgchart/orgchart.{toml,yaml,yml,json}`
//! - Project: `./.orgchart/orgchart.{toml,yaml,yml,json}`
//! - Environment: `ORGCHART_CYCLE_POLICY`, `ORGCHART_INITIAL_EXPANSION_DEPTH`,
//!   `ORGCHART_SNAPSHOT_PATH`
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! cycle_policy = "promote"
//! initial_expansion_depth = 2
//! snapshot_path = "/srv/hr/employees.json"
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use orgchart::HierarchySession;
//! use orgchart_config::load_configuration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_configuration()?;
//! if let Some(source) = config.snapshot_source() {
//!     let session = HierarchySession::with_options(Box::new(source), config.session_options());
//!     session.refresh().await?;
//! }
//! # Ok(())
//! # }
//! ```

/// File discovery logic for configuration files
pub mod discovery;
/// Error types and handling
pub mod error;
/// Figment-backed loader
pub mod provider;
/// Configuration value types
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigLoader, ENV_PREFIX};
pub use types::{OrgChartConfig, MAX_INITIAL_EXPANSION_DEPTH};

/// Load configuration from all standard locations
pub fn load_configuration() -> ConfigResult<OrgChartConfig> {
    ConfigLoader::new().load()
}
