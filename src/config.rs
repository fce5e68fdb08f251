use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, warn};

const CONFIG_FILE: &str = "config.yaml";
const CONFIG_DIR: &str = "flowvis";

pub const DEFAULT_BROKER: &str = "broker.hivemq.com";
pub const DEFAULT_PORT: u16 = 1883;

/// On-disk layout: the defaults live under a top-level `data:` mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    data: VisualizerDefaults,
}

/// Connection defaults pre-filled into the connection bar.
///
/// Loaded from `config.yaml` in the working directory, falling back to
/// the user config directory. A missing or broken file is only logged;
/// startup continues with built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizerDefaults {
    #[serde(default = "default_broker")]
    pub broker: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub topic: String,
}

fn default_broker() -> String {
    DEFAULT_BROKER.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for VisualizerDefaults {
    fn default() -> Self {
        VisualizerDefaults {
            broker: default_broker(),
            port: default_port(),
            topic: String::new(),
        }
    }
}

impl VisualizerDefaults {
    pub async fn load() -> Self {
        let Some(path) = Self::locate() else {
            warn!("No '{}' found, using built-in defaults", CONFIG_FILE);
            return Self::default();
        };

        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Self::from_yaml(&raw).unwrap_or_else(|e| {
                error!("Failed to parse '{}': {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read '{}': {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn locate() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }
        let fallback = dirs::config_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
        fallback.exists().then_some(fallback)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str::<ConfigFile>(raw).map(|file| file.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_data_mapping() {
        let raw = "data:\n  broker: mqtt.plant.local\n  port: 8883\n  topic: ucc\n";
        let defaults = VisualizerDefaults::from_yaml(raw).unwrap();
        assert_eq!(defaults.broker, "mqtt.plant.local");
        assert_eq!(defaults.port, 8883);
        assert_eq!(defaults.topic, "ucc");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let raw = "data:\n  topic: ucc\n";
        let defaults = VisualizerDefaults::from_yaml(raw).unwrap();
        assert_eq!(defaults.broker, DEFAULT_BROKER);
        assert_eq!(defaults.port, DEFAULT_PORT);
        assert_eq!(defaults.topic, "ucc");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(VisualizerDefaults::from_yaml("data: [broker").is_err());
        // A file without the `data:` mapping is rejected as well.
        assert!(VisualizerDefaults::from_yaml("broker: mqtt.plant.local").is_err());
    }
}
