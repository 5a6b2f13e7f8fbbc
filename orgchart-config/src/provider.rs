//! Configuration loading using Figment

use crate::discovery::{ConfigFile, ConfigFormat, FileDiscovery};
use crate::error::ConfigResult;
use crate::types::OrgChartConfig;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use orgchart_common::Pretty;
use std::path::PathBuf;
use tracing::{debug, info, trace};

/// Prefix for environment overrides, e.g. `ORGCHART_CYCLE_POLICY=drop`
pub const ENV_PREFIX: &str = "ORGCHART_";

/// Loads [`OrgChartConfig`] from all sources.
///
/// Precedence, later overriding earlier:
/// 1. Built-in defaults
/// 2. Global file (`~/.orgchart/orgchart.*`)
/// 3. Project file (`./.orgchart/orgchart.*`)
/// 4. `ORGCHART_` environment variables
///
/// Nothing is cached; every `load` reads the files again.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    discovery: FileDiscovery,
    use_env: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            discovery: FileDiscovery::new(),
            use_env: true,
        }
    }

    /// Override the project configuration directory
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.discovery = self.discovery.with_project_dir(dir);
        self
    }

    /// Override the global configuration directory
    pub fn with_global_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.discovery = self.discovery.with_global_dir(dir);
        self
    }

    /// Ignore environment variables
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Load and validate the configuration
    pub fn load(&self) -> ConfigResult<OrgChartConfig> {
        let config: OrgChartConfig = self.build_figment().extract()?;
        config.validate()?;
        info!(
            cycle_policy = ?config.cycle_policy,
            initial_expansion_depth = config.initial_expansion_depth,
            "loaded orgchart configuration"
        );
        trace!("resolved configuration: {}", Pretty(&config));
        Ok(config)
    }

    fn build_figment(&self) -> Figment {
        debug!("Building figment configuration with precedence order");

        let mut figment = Figment::new().merge(Serialized::defaults(OrgChartConfig::default()));

        for config_file in self.discovery.discover_all() {
            trace!(
                "Loading config file: {} ({:?})",
                config_file.path.display(),
                config_file.format
            );
            figment = figment.merge(Self::load_config_file(&config_file));
        }

        if self.use_env {
            figment = figment
                .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()));
        }

        figment
    }

    fn load_config_file(config_file: &ConfigFile) -> Figment {
        let path = &config_file.path;
        match config_file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
