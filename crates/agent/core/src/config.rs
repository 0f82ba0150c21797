//! Agent configuration constants and tunable parameters.
//!
//! Every threshold the decision core uses lives here under a name. The
//! defaults are the values the agent was tuned with; none of them are derived
//! from anything else.

/// Top-level configuration, grouped by the sub-system that reads it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AgentConfig {
    pub grid: GridConfig,
    pub swap: SwapPolicy,
    pub senses: SenseConfig,
    pub vitals: VitalsConfig,
}

impl AgentConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of inventory slots mirrored from the host.
    pub const INVENTORY_SLOTS: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects configurations the exploration grid or senses cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.size < 3 {
            return Err(ConfigError::GridTooSmall(self.grid.size));
        }
        if self.grid.start_radius == 0 || self.grid.start_radius > self.grid.size / 2 {
            return Err(ConfigError::StartRadiusOutOfRange {
                radius: self.grid.start_radius,
                size: self.grid.size,
            });
        }
        if !(self.senses.memory_epsilon_sq > 0.0) {
            return Err(ConfigError::NonPositive("senses.memory_epsilon_sq"));
        }
        if !(self.senses.house_epsilon_sq > 0.0) {
            return Err(ConfigError::NonPositive("senses.house_epsilon_sq"));
        }
        if self.senses.look_around_seconds < 0.0 {
            return Err(ConfigError::NonPositive("senses.look_around_seconds"));
        }
        Ok(())
    }
}

/// Exploration grid layout and frontier search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GridConfig {
    /// Cells per side of the square grid laid over the world.
    pub size: u32,
    /// Radius (in cells) of the first ring scanned around a search center.
    pub start_radius: u32,
    /// Radius added to the world-center ring each time it comes up empty.
    pub radius_step: u32,
    /// How many times the world-center ring may grow before exploring is done.
    pub ring_expansions: u32,
    /// Revisit tiles consumed in queue order before switching to nearest-first.
    pub eager_revisit_window: usize,
    /// Distance ahead of the agent whose cell counts as observed each tick.
    pub probe_distance: f32,
}

impl GridConfig {
    pub const DEFAULT_SIZE: u32 = 51;
    pub const DEFAULT_START_RADIUS: u32 = 2;
    pub const DEFAULT_RADIUS_STEP: u32 = 10;
    pub const DEFAULT_RING_EXPANSIONS: u32 = 2;
    pub const DEFAULT_EAGER_REVISIT_WINDOW: usize = 3;
    pub const DEFAULT_PROBE_DISTANCE: f32 = 5.0;
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            start_radius: Self::DEFAULT_START_RADIUS,
            radius_step: Self::DEFAULT_RADIUS_STEP,
            ring_expansions: Self::DEFAULT_RING_EXPANSIONS,
            eager_revisit_window: Self::DEFAULT_EAGER_REVISIT_WINDOW,
            probe_distance: Self::DEFAULT_PROBE_DISTANCE,
        }
    }
}

/// Thresholds of the inventory swap heuristic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SwapPolicy {
    /// Remembered weapons of one kind at which holding more stops paying off.
    pub max_remembered_weapons: usize,
    /// Pistols held beyond this count are overrepresented.
    pub pistol_surplus: u32,
    /// Shotguns, medkits or food held beyond this count are overrepresented.
    pub item_surplus: u32,
    /// Ammo or value at or below this is considered nearly spent.
    pub low_value: i32,
}

impl Default for SwapPolicy {
    fn default() -> Self {
        Self {
            max_remembered_weapons: 3,
            pistol_surplus: 2,
            item_surplus: 1,
            low_value: 2,
        }
    }
}

/// Perception distances, tolerances and timers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SenseConfig {
    /// Two remembered items closer than this (squared) are the same item.
    pub memory_epsilon_sq: f32,
    /// Squared distance under which a target counts as reached.
    pub house_epsilon_sq: f32,
    /// An enemy is "in front" when `dot(forward, dir) > 1 - tolerance`.
    pub enemy_in_front_tolerance: f32,
    /// Distance beyond a hazard radius at which the agent starts avoiding it.
    pub hazard_warning_margin: f32,
    /// Distance beyond a hazard radius the agent runs to when caught inside.
    pub hazard_escape_margin: f32,
    /// Non-food items remembered farther than this are not worth a detour.
    pub needed_item_range: f32,
    /// How long the agent keeps scanning for an attacker after a hit.
    pub look_around_seconds: f32,
    /// Angle between velocity and facing that flips the exploration sweep.
    pub scan_turn_threshold_deg: f32,
}

impl SenseConfig {
    #[inline]
    pub fn scan_turn_threshold(&self) -> f32 {
        self.scan_turn_threshold_deg.to_radians()
    }
}

impl Default for SenseConfig {
    fn default() -> Self {
        Self {
            memory_epsilon_sq: 0.2,
            house_epsilon_sq: 2.0,
            enemy_in_front_tolerance: 0.002,
            hazard_warning_margin: 4.0,
            hazard_escape_margin: 5.0,
            needed_item_range: 250.0,
            look_around_seconds: 2.0,
            scan_turn_threshold_deg: 45.0,
        }
    }
}

/// Body limits used by consumable upkeep and the run policy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct VitalsConfig {
    pub max_health: f32,
    pub max_energy: f32,
    /// Stamina needed to start running.
    pub run_start_stamina: f32,
    /// Stamina above which an ongoing run continues.
    pub run_keep_stamina: f32,
}

impl VitalsConfig {
    /// Whether seek-style movement should request running this tick.
    pub fn should_run(&self, stamina: f32, running: bool) -> bool {
        if running {
            stamina > self.run_keep_stamina
        } else {
            stamina >= self.run_start_stamina
        }
    }
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            max_health: 10.0,
            max_energy: 10.0,
            run_start_stamina: 10.0,
            run_keep_stamina: 2.0,
        }
    }
}

/// Invalid configuration values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size {0} is too small (minimum 3)")]
    GridTooSmall(u32),

    #[error("start radius {radius} does not fit a grid of size {size}")]
    StartRadiusOutOfRange { radius: u32, size: u32 },

    #[error("`{0}` must be positive")]
    NonPositive(&'static str),
}
