//! Flat tabs configuration using Figment
//!
//! Settings for the tab-group interface are merged from several sources, later
//! ones overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. Global file: `~/.flat-tabs/config.{toml,yaml,yml,json}`
//! 3. Project file: `./.flat-tabs/config.{toml,yaml,yml,json}`
//! 4. Environment variables with the `FLAT_TABS_` prefix
//!
//! Configuration is read fresh on every call so edits take effect immediately.
//!
//! ```no_run
//! use flat_tabs_config::load_configuration;
//!
//! let config = load_configuration()?;
//! println!("tabs aligned {}", config.align);
//! # Ok::<(), flat_tabs_config::ConfigError>(())
//! ```

/// File discovery logic for configuration files
pub mod discovery;
/// Error types and handling
pub mod error;
/// Figment provider assembling all sources
pub mod provider;
/// Configuration value types
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use provider::ConfigProvider;
pub use types::TabsConfig;

/// Directory name searched for in the home and current directories.
pub const CONFIG_DIR_NAME: &str = ".flat-tabs";

/// Base name of the configuration file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_STEM: &str = "config";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "FLAT_TABS_";

/// Load configuration from all discovered sources.
pub fn load_configuration() -> ConfigResult<TabsConfig> {
    ConfigProvider::new().load()
}
