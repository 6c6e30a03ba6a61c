//! Configuration value types

use flat_tabs_fields::Align;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Settings for the flat tabs interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Default value of the "Align Tabs" option
    pub align: Align,
    /// Whether inactive panels are unmounted. The interface keeps them
    /// mounted and hidden, so only `false` is accepted.
    pub unmount_on_hide: bool,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            align: Align::Left,
            unmount_on_hide: false,
        }
    }
}

impl TabsConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.unmount_on_hide {
            return Err(ConfigError::InvalidValue {
                key: "unmount_on_hide".into(),
                message: "inactive tab panels always stay mounted".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TabsConfig::default();
        assert_eq!(config.align, Align::Left);
        assert!(!config.unmount_on_hide);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unmount_on_hide_rejected() {
        let config = TabsConfig {
            unmount_on_hide: true,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
