//! Typed blackboard shared by every node of the decision tree.
//!
//! [`AgentContext`] owns the host world handle, the per-tick perception
//! snapshot and all cross-tick memory. Conditions read it and may stash what
//! they matched (a target point, the loot in range, the slot to replace) for
//! the actions that follow in the same sequence; actions mutate it and write
//! movement intents into [`Steering`].
//!
//! Per-tick fields are refreshed by [`AgentContext::refresh`] before the tree
//! is ticked. Targets set by earlier ticks survive until a node overwrites or
//! clears them.

use agent_core::{
    ActiveHouse, AgentConfig, AgentSnapshot, ExplorationGrid, HazardZoneInfo, HouseInfo,
    HouseMemory, Inventory, ItemMemory, PerceivedEntity, Steering, Vec2, WorldInterface,
};

use crate::branch::PriorityBranch;

/// Post-hit scanning state: spin around for a while to find the attacker.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LookAround {
    active: bool,
    remaining: f32,
}

impl LookAround {
    pub fn start(&mut self, seconds: f32) {
        self.active = true;
        self.remaining = seconds;
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }

    /// Counts down by `dt`. The scan ends once the timer runs out.
    pub fn tick(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.stop();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Blackboard for one agent.
pub struct AgentContext<W> {
    pub world: W,
    pub config: AgentConfig,

    // ===== refreshed every tick =====
    pub agent: AgentSnapshot,
    pub dt: f32,
    pub entities: Vec<PerceivedEntity>,
    pub houses_in_view: Vec<HouseInfo>,
    /// Loot within grab range, set by the loot-in-range condition.
    pub current_loot: Option<PerceivedEntity>,
    /// Slot picked by swap scoring for the current loot.
    pub replace_slot: Option<usize>,

    // ===== persistent =====
    pub steering: Steering,
    pub inventory: Inventory,
    pub explorer: ExplorationGrid,
    pub items: ItemMemory,
    pub houses: HouseMemory,
    pub active_house: Option<ActiveHouse>,
    pub house_target: Option<Vec2>,
    pub entity_target: Option<Vec2>,
    pub look_around: LookAround,

    pub(crate) branch: Option<PriorityBranch>,
}

impl<W: WorldInterface> AgentContext<W> {
    pub fn new(world: W, config: AgentConfig) -> Self {
        let agent = world.agent_info();
        let explorer = ExplorationGrid::new(&world.world_info(), config.grid.clone());
        let items = ItemMemory::new(config.senses.memory_epsilon_sq);
        let houses = HouseMemory::new(config.senses.memory_epsilon_sq);

        Self {
            world,
            config,
            agent,
            dt: 0.0,
            entities: Vec::new(),
            houses_in_view: Vec::new(),
            current_loot: None,
            replace_slot: None,
            steering: Steering::new(),
            inventory: Inventory::new(),
            explorer,
            items,
            houses,
            active_house: None,
            house_target: None,
            entity_target: None,
            look_around: LookAround::default(),
            branch: None,
        }
    }

    /// Pulls this tick's snapshot and perception from the world.
    ///
    /// Also runs down the look-around timer, whichever branch wins the tick.
    pub fn refresh(&mut self, dt: f32) {
        self.dt = dt;
        self.look_around.tick(dt);
        self.agent = self.world.agent_info();
        self.entities = self.world.visible_entities();
        self.houses_in_view = self.world.visible_houses();
        self.current_loot = None;
        self.replace_slot = None;
        self.branch = None;
    }

    pub fn enemies(&self) -> impl Iterator<Item = &PerceivedEntity> {
        self.entities.iter().filter(|entity| entity.is_enemy())
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies().count()
    }

    pub fn items_in_view(&self) -> impl Iterator<Item = &PerceivedEntity> {
        self.entities.iter().filter(|entity| entity.is_item())
    }

    /// Hazard zones in view that the world can describe.
    pub fn hazards(&self) -> impl Iterator<Item = HazardZoneInfo> + '_ {
        self.entities
            .iter()
            .filter(|entity| entity.is_hazard())
            .filter_map(|entity| self.world.hazard_zone_info(entity))
    }

    /// Seeks the navigable point closest to `target`, running if stamina allows.
    pub fn seek_point(&mut self, target: Vec2) {
        let next = self.world.closest_path_point(target);
        self.steering.seek(next, &self.agent);
        if self
            .config
            .vitals
            .should_run(self.agent.stamina, self.agent.run_mode)
        {
            self.steering.run();
        }
    }

    /// Which priority branch won the last tick.
    pub fn branch(&self) -> Option<PriorityBranch> {
        self.branch
    }
}
