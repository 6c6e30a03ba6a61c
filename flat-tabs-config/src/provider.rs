//! Configuration provider using figment

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::PathBuf;
use tracing::{debug, trace};

use crate::discovery::{ConfigFile, ConfigFormat, FileDiscovery};
use crate::error::ConfigResult;
use crate::types::TabsConfig;
use crate::ENV_PREFIX;

/// Loads [`TabsConfig`] from defaults, discovered files and the environment.
///
/// Nothing is cached; every `load` reads the sources again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider over explicit project and global directories.
    pub fn with_directories(project_dir: Option<PathBuf>, global_dir: Option<PathBuf>) -> Self {
        Self {
            discovery: FileDiscovery::with_directories(project_dir, global_dir),
        }
    }

    /// Merge all sources, extract and validate.
    pub fn load(&self) -> ConfigResult<TabsConfig> {
        let config: TabsConfig = self.build_figment().extract()?;
        config.validate()?;
        debug!(align = %config.align, "configuration loaded");
        Ok(config)
    }

    /// Sources in precedence order, later ones override earlier ones:
    /// defaults, discovered files, environment.
    fn build_figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(TabsConfig::default()));

        for config_file in self.discovery.discover_all() {
            trace!(
                "Loading config file: {} ({:?})",
                config_file.path.display(),
                config_file.format
            );
            figment = figment.merge(Self::file_provider(&config_file));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }

    fn file_provider(config_file: &ConfigFile) -> Figment {
        let path = &config_file.path;
        match config_file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        }
    }
}
