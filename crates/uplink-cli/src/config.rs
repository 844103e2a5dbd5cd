//! YAML decoder configuration.
//!
//! ```yaml
//! default_layout: v1
//! application_port: 10
//! devices:
//!   field-sensor-3:
//!     layout: v2
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uplink_frame::{LayoutVersion, APPLICATION_PORT};

use crate::error::CliError;

/// Placeholder used in messages when an input names no device.
pub const UNNAMED_DEVICE: &str = "(unnamed)";

/// Per-device settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    /// Layout this device's firmware sends.
    pub layout: LayoutVersion,
}

/// Decoder configuration loaded from `--config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Layout for devices without an entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_layout: Option<LayoutVersion>,
    /// Application port accepted from JSON input (defaults to 10).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_port: Option<u8>,
    /// Known devices by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub devices: BTreeMap<String, DeviceConfig>,
}

impl DecoderConfig {
    /// Load a configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text)?;
        debug!(
            path = %path.display(),
            devices = config.devices.len(),
            "loaded decoder config"
        );
        Ok(config)
    }

    /// Parse a configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, CliError> {
        // An empty file deserializes to unit, not to an empty mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// The application port JSON input must arrive on.
    pub fn application_port(&self) -> u8 {
        self.application_port.unwrap_or(APPLICATION_PORT)
    }

    /// Pick the layout for a frame.
    ///
    /// An explicit override wins, then the device's entry, then
    /// `default_layout`.
    pub fn resolve_layout(
        &self,
        explicit: Option<LayoutVersion>,
        device: Option<&str>,
    ) -> Result<LayoutVersion, CliError> {
        if let Some(layout) = explicit {
            return Ok(layout);
        }
        if let Some(entry) = device.and_then(|name| self.devices.get(name)) {
            return Ok(entry.layout);
        }
        self.default_layout.ok_or_else(|| CliError::NoLayout {
            device: device.unwrap_or(UNNAMED_DEVICE).to_string(),
        })
    }

    /// Generate an example configuration as a YAML string.
    pub fn example_yaml() -> String {
        let mut devices = BTreeMap::new();
        devices.insert(
            "field-sensor-1".to_string(),
            DeviceConfig {
                layout: LayoutVersion::V1,
            },
        );
        devices.insert(
            "field-sensor-2".to_string(),
            DeviceConfig {
                layout: LayoutVersion::V2,
            },
        );
        let example = DecoderConfig {
            default_layout: Some(LayoutVersion::V2),
            application_port: Some(APPLICATION_PORT),
            devices,
        };
        serde_yaml::to_string(&example).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
default_layout: v1
application_port: 12
devices:
  a:
    layout: v2
  b:
    layout: "1"
"#;
        let config = DecoderConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.default_layout, Some(LayoutVersion::V1));
        assert_eq!(config.application_port(), 12);
        assert_eq!(config.devices["a"].layout, LayoutVersion::V2);
        assert_eq!(config.devices["b"].layout, LayoutVersion::V1);
    }

    #[test]
    fn test_empty_config() {
        let config = DecoderConfig::from_yaml("").unwrap();
        assert_eq!(config, DecoderConfig::default());
        assert_eq!(config.application_port(), APPLICATION_PORT);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = DecoderConfig::from_yaml("default_layot: v1\n").unwrap_err();
        assert!(matches!(err, CliError::ConfigParse(_)));

        let err = DecoderConfig::from_yaml("default_layout: v3\n").unwrap_err();
        assert!(matches!(err, CliError::ConfigParse(_)));
    }

    #[test]
    fn test_resolve_layout_order() {
        let mut config = DecoderConfig::default();
        config.devices.insert(
            "a".to_string(),
            DeviceConfig {
                layout: LayoutVersion::V2,
            },
        );

        assert!(matches!(
            config.resolve_layout(None, None),
            Err(CliError::NoLayout { .. })
        ));
        assert!(matches!(
            config.resolve_layout(None, Some("b")),
            Err(CliError::NoLayout { device }) if device == "b"
        ));
        assert_eq!(
            config.resolve_layout(None, Some("a")).unwrap(),
            LayoutVersion::V2
        );

        config.default_layout = Some(LayoutVersion::V1);
        assert_eq!(
            config.resolve_layout(None, Some("b")).unwrap(),
            LayoutVersion::V1
        );
        assert_eq!(
            config.resolve_layout(None, Some("a")).unwrap(),
            LayoutVersion::V2
        );
        assert_eq!(
            config
                .resolve_layout(Some(LayoutVersion::V1), Some("a"))
                .unwrap(),
            LayoutVersion::V1
        );
    }

    #[test]
    fn test_example_round_trips() {
        let yaml = DecoderConfig::example_yaml();
        let config = DecoderConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config.default_layout, Some(LayoutVersion::V2));
        assert_eq!(config.devices.len(), 2);
    }
}
