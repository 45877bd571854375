//! Registry configuration
//!
//! Read from `ztunnel-vhost.yml`, with `ZTUNNEL_VHOST_ROTATION` taking
//! precedence over the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::rotation::RotationPolicy;

/// Environment variable overriding the rotation policy
pub const ROTATION_ENV: &str = "ZTUNNEL_VHOST_ROTATION";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Round-robin algorithm used by `get_next_host`
    #[serde(default)]
    pub rotation: RotationPolicy,
}

impl RegistryConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Defaults, overridden by the environment
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Applies `ZTUNNEL_VHOST_ROTATION` if it is set
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_rotation_override(std::env::var(ROTATION_ENV).ok().as_deref())
    }

    fn with_rotation_override(mut self, value: Option<&str>) -> Result<Self> {
        if let Some(value) = value {
            self.rotation = value
                .parse()
                .with_context(|| format!("Invalid {}", ROTATION_ENV))?;
        }
        Ok(self)
    }

    /// Search for a config file in the working directory
    pub fn find_config() -> Option<PathBuf> {
        ["ztunnel-vhost.yml", "ztunnel-vhost.yaml"]
            .into_iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: RegistryConfig = serde_yaml::from_str("rotation: ordered\n").unwrap();
        assert_eq!(config.rotation, RotationPolicy::Ordered);

        let config: RegistryConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.rotation, RotationPolicy::Compat);

        assert!(serde_yaml::from_str::<RegistryConfig>("rotation: random\n").is_err());
    }

    #[test]
    fn test_rotation_override() {
        let config = RegistryConfig::default()
            .with_rotation_override(Some("ORDERED"))
            .unwrap();
        assert_eq!(config.rotation, RotationPolicy::Ordered);

        let config = config.with_rotation_override(None).unwrap();
        assert_eq!(config.rotation, RotationPolicy::Ordered);

        let err = RegistryConfig::default()
            .with_rotation_override(Some("sticky"))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("sticky"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("ztunnel-vhost-{}.yml", std::process::id()));
        std::fs::write(&path, "rotation: ordered\n").unwrap();

        let config = RegistryConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.rotation, RotationPolicy::Ordered);

        assert!(RegistryConfig::load(Path::new("/nonexistent/ztunnel-vhost.yml")).is_err());
    }
}
