//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Keys left out of the file keep their [`GameConfig::default`] values.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(config.tile_size.is_finite() && config.tile_size > 0.0) {
            anyhow::bail!("tile_size must be positive, got {}", config.tile_size);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let config = ConfigLoader::parse("knockback_duration = 4\ntile_size = 8.0\n").unwrap();
        assert_eq!(config.knockback_duration, 4);
        assert_eq!(config.tile_size, 8.0);
        assert_eq!(config.stun_duration, GameConfig::DEFAULT_STUN_DURATION);
    }

    #[test]
    fn rejects_zero_tile_size() {
        let error = ConfigLoader::parse("tile_size = 0.0").unwrap_err();
        assert!(error.to_string().contains("tile_size"));
    }

    #[test]
    fn reports_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let error = ConfigLoader::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(error.to_string().starts_with("Failed to read file"));
    }
}
