//! Simulator run settings.
use std::env;
use std::path::PathBuf;

/// How long and from which seed the simulator runs.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Optional TOML file with agent tunables.
    pub agent_config: Option<PathBuf>,
    pub ticks: u32,
    pub seed: u64,
    /// Seconds per tick.
    pub dt: f32,
    /// Ticks between progress reports.
    pub report_every: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            agent_config: None,
            ticks: 3_000,
            seed: 7,
            dt: 1.0 / 30.0,
            report_every: 300,
        }
    }
}

impl SimConfig {
    /// Construct run settings from environment variables.
    ///
    /// Environment variables:
    /// - `AGENT_CONFIG` - Path to a TOML agent configuration (default: built-in)
    /// - `SIM_TICKS` - Number of ticks to run (default: 3000)
    /// - `SIM_SEED` - Scenario seed (default: 7)
    /// - `SIM_DT` - Seconds per tick (default: 1/30)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("AGENT_CONFIG") {
            config.agent_config = Some(PathBuf::from(path));
        }
        if let Some(ticks) = read_env::<u32>("SIM_TICKS") {
            config.ticks = ticks;
        }
        if let Some(seed) = read_env::<u64>("SIM_SEED") {
            config.seed = seed;
        }
        if let Some(dt) = read_env::<f32>("SIM_DT") {
            config.dt = dt.clamp(1e-3, 1.0);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
