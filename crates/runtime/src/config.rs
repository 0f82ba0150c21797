//! Configuration loading: TOML files plus environment overrides.
use std::env;
use std::path::Path;

use agent_core::AgentConfig;

/// Result type for configuration loading.
pub type LoadResult<T> = anyhow::Result<T>;

fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Loader for agent configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate an [`AgentConfig`] from a TOML file.
    ///
    /// Missing tables and keys fall back to their defaults, so an empty file
    /// yields the default configuration.
    pub fn load(path: &Path) -> LoadResult<AgentConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> LoadResult<AgentConfig> {
        let config: AgentConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid agent config: {}", e))?;

        Ok(config)
    }
}

/// Overrides for the handful of tunables worth changing per run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettingsOverrides {
    pub grid_size: Option<u32>,
    pub look_around_seconds: Option<f32>,
    pub needed_item_range: Option<f32>,
}

impl SettingsOverrides {
    /// Construct overrides from environment variables.
    ///
    /// Environment variables:
    /// - `AGENT_GRID_SIZE` - Exploration grid cells per side
    /// - `AGENT_LOOK_AROUND_SECONDS` - Scan duration after a hit
    /// - `AGENT_NEEDED_ITEM_RANGE` - Max detour for remembered non-food items
    pub fn from_env() -> Self {
        Self {
            grid_size: read_env("AGENT_GRID_SIZE"),
            look_around_seconds: read_env("AGENT_LOOK_AROUND_SECONDS"),
            needed_item_range: read_env("AGENT_NEEDED_ITEM_RANGE"),
        }
    }

    /// Reads the environment and applies whatever is set.
    pub fn apply_env(config: &mut AgentConfig) {
        Self::from_env().apply(config);
    }

    pub fn apply(&self, config: &mut AgentConfig) {
        if let Some(size) = self.grid_size {
            config.grid.size = size;
        }
        if let Some(seconds) = self.look_around_seconds {
            config.senses.look_around_seconds = seconds;
        }
        if let Some(range) = self.needed_item_range {
            config.senses.needed_item_range = range;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
