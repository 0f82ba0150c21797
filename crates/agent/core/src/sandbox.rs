//! In-memory host world for tests and the headless simulator.
//!
//! [`SandboxWorld`] implements [`WorldInterface`] over plain vectors: items,
//! enemies, hazard zones and houses in an open rectangle with no obstacles.
//! [`SandboxWorld::step`] applies a [`FrameCommand`] with simple kinematics
//! (run doubles the speed and drains stamina, auto-orient faces the velocity)
//! and lets enemies chase and bite the agent.

use glam::Vec2;

use crate::config::AgentConfig;
use crate::error::WorldError;
use crate::interface::WorldInterface;
use crate::types::{
    AgentSnapshot, EntityHandle, EntityKind, FrameCommand, HazardZoneInfo, HouseInfo, ItemInfo,
    ItemKind, PerceivedEntity, WorldInfo,
};

const SLOTS: usize = AgentConfig::INVENTORY_SLOTS;

/// Cosine of the widest angle a pistol shot still hits at.
const PISTOL_HIT_COS: f32 = 0.985;
/// Cosine of the widest angle a shotgun blast still hits at.
const SHOTGUN_HIT_COS: f32 = 0.9;

const RUN_MULTIPLIER: f32 = 2.0;
const STAMINA_DRAIN: f32 = 2.0;
const STAMINA_REGEN: f32 = 1.0;
const ENERGY_DRAIN: f32 = 0.05;
const HAZARD_DAMAGE: f32 = 1.0;
const BITE_RANGE: f32 = 1.0;
const BITE_DAMAGE: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SandboxItem {
    pub handle: EntityHandle,
    pub location: Vec2,
    pub info: ItemInfo,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SandboxEnemy {
    pub handle: EntityHandle,
    pub location: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SandboxHazard {
    pub handle: EntityHandle,
    pub zone: HazardZoneInfo,
}

#[derive(Clone, Debug)]
pub struct SandboxWorld {
    pub agent: AgentSnapshot,
    pub world: WorldInfo,
    /// Perception radius around the agent.
    pub fov_radius: f32,
    pub enemy_speed: f32,
    pub max_vital: f32,
    /// Makes every grab fail, for exercising rejection paths.
    pub deny_grabs: bool,
    pub items: Vec<SandboxItem>,
    pub enemies: Vec<SandboxEnemy>,
    pub hazards: Vec<SandboxHazard>,
    pub houses: Vec<HouseInfo>,
    pub inventory: [Option<ItemInfo>; SLOTS],
    hand: Option<ItemInfo>,
    next_handle: u32,
    elapsed: f32,
    kills: u32,
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new(WorldInfo::new(Vec2::ZERO, Vec2::splat(51.0)))
    }
}

impl SandboxWorld {
    pub fn new(world: WorldInfo) -> Self {
        Self {
            agent: AgentSnapshot {
                position: world.center,
                ..AgentSnapshot::default()
            },
            world,
            fov_radius: 15.0,
            enemy_speed: 0.0,
            max_vital: 10.0,
            deny_grabs: false,
            items: Vec::new(),
            enemies: Vec::new(),
            hazards: Vec::new(),
            houses: Vec::new(),
            inventory: [None; SLOTS],
            hand: None,
            next_handle: 1,
            elapsed: 0.0,
            kills: 0,
        }
    }

    fn next_handle(&mut self) -> EntityHandle {
        let handle = EntityHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    pub fn add_item(&mut self, location: Vec2, info: ItemInfo) -> EntityHandle {
        let handle = self.next_handle();
        self.items.push(SandboxItem {
            handle,
            location,
            info,
        });
        handle
    }

    pub fn add_enemy(&mut self, location: Vec2) -> EntityHandle {
        let handle = self.next_handle();
        self.enemies.push(SandboxEnemy { handle, location });
        handle
    }

    pub fn add_hazard(&mut self, center: Vec2, radius: f32) -> EntityHandle {
        let handle = self.next_handle();
        self.hazards.push(SandboxHazard {
            handle,
            zone: HazardZoneInfo { center, radius },
        });
        handle
    }

    pub fn add_house(&mut self, center: Vec2, size: Vec2) {
        self.houses.push(HouseInfo::new(center, size));
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn is_alive(&self) -> bool {
        self.agent.health > 0.0 && self.agent.energy > 0.0
    }

    fn in_view(&self, point: Vec2, slack: f32) -> bool {
        let reach = self.fov_radius + slack;
        self.agent.distance_squared(point) <= reach * reach
    }

    fn slot_mut(&mut self, slot: usize) -> Result<&mut Option<ItemInfo>, WorldError> {
        self.inventory
            .get_mut(slot)
            .ok_or(WorldError::SlotOutOfRange(slot))
    }

    /// Removes the first visible enemy inside the firing cone, if any.
    fn resolve_shot(&mut self, hit_cos: f32) {
        let forward = self.agent.forward();
        let position = self.agent.position;
        let reach_sq = self.fov_radius * self.fov_radius;
        let hit = self.enemies.iter().position(|enemy| {
            let to_enemy = enemy.location - position;
            to_enemy.length_squared() <= reach_sq
                && forward.dot(to_enemy.normalize_or_zero()) >= hit_cos
        });
        if let Some(index) = hit {
            self.enemies.swap_remove(index);
            self.kills += 1;
        }
    }

    /// Advances the world by `dt` seconds under `command`.
    pub fn step(&mut self, command: &FrameCommand, dt: f32) {
        let agent = &mut self.agent;

        let running = command.run_mode && agent.stamina > 0.0;
        let mut velocity = command.linear_velocity.clamp_length_max(agent.max_linear_speed);
        if running {
            velocity *= RUN_MULTIPLIER;
            agent.stamina = (agent.stamina - STAMINA_DRAIN * dt).max(0.0);
        } else {
            agent.stamina = (agent.stamina + STAMINA_REGEN * dt).min(self.max_vital);
        }
        agent.run_mode = running;

        let min = self.world.origin();
        let max = min + self.world.dimensions;
        agent.position = (agent.position + velocity * dt).clamp(min, max - Vec2::splat(1e-3));
        agent.linear_velocity = velocity;

        if command.auto_orient {
            if velocity.length_squared() > 0.0 {
                agent.orientation = velocity.y.atan2(velocity.x);
            }
            agent.angular_velocity = 0.0;
        } else {
            let limit = agent.max_angular_speed;
            agent.angular_velocity = command.angular_velocity.clamp(-limit, limit);
            agent.orientation += agent.angular_velocity * dt;
        }

        agent.energy = (agent.energy - ENERGY_DRAIN * dt).max(0.0);

        for hazard in &self.hazards {
            if agent.position.distance_squared(hazard.zone.center) < hazard.zone.radius * hazard.zone.radius {
                agent.health -= HAZARD_DAMAGE * dt;
            }
        }

        agent.was_bitten = false;
        for enemy in &mut self.enemies {
            let to_agent = agent.position - enemy.location;
            let step = self.enemy_speed * dt;
            if to_agent.length() > BITE_RANGE {
                enemy.location += to_agent.normalize_or_zero() * step;
            } else {
                agent.health -= BITE_DAMAGE;
                agent.was_bitten = true;
                // Knocked back so a single enemy does not bite every frame.
                enemy.location -= to_agent.normalize_or_zero() * BITE_RANGE * 2.0;
            }
        }

        self.elapsed += dt;
    }
}

impl WorldInterface for SandboxWorld {
    fn agent_info(&self) -> AgentSnapshot {
        self.agent
    }

    fn world_info(&self) -> WorldInfo {
        self.world
    }

    fn visible_entities(&self) -> Vec<PerceivedEntity> {
        let items = self
            .items
            .iter()
            .filter(|item| self.in_view(item.location, 0.0))
            .map(|item| PerceivedEntity::new(item.handle, item.location, EntityKind::Item));
        let enemies = self
            .enemies
            .iter()
            .filter(|enemy| self.in_view(enemy.location, 0.0))
            .map(|enemy| PerceivedEntity::new(enemy.handle, enemy.location, EntityKind::Enemy));
        let hazards = self
            .hazards
            .iter()
            .filter(|hazard| self.in_view(hazard.zone.center, hazard.zone.radius))
            .map(|hazard| {
                PerceivedEntity::new(hazard.handle, hazard.zone.center, EntityKind::HazardZone)
            });
        items.chain(enemies).chain(hazards).collect()
    }

    fn visible_houses(&self) -> Vec<HouseInfo> {
        self.houses
            .iter()
            .filter(|house| self.in_view(house.center, house.size.max_element() / 2.0))
            .copied()
            .collect()
    }

    fn closest_path_point(&self, target: Vec2) -> Vec2 {
        let min = self.world.origin();
        target.clamp(min, min + self.world.dimensions)
    }

    fn hazard_zone_info(&self, entity: &PerceivedEntity) -> Option<HazardZoneInfo> {
        self.hazards
            .iter()
            .find(|hazard| hazard.handle == entity.handle)
            .map(|hazard| hazard.zone)
    }

    fn item_info(&self, entity: &PerceivedEntity) -> Option<ItemInfo> {
        self.items
            .iter()
            .find(|item| item.handle == entity.handle)
            .map(|item| item.info)
    }

    fn grab_item(&mut self, entity: &PerceivedEntity) -> Result<ItemInfo, WorldError> {
        if self.deny_grabs {
            return Err(WorldError::GrabDenied(entity.handle));
        }
        let index = self
            .items
            .iter()
            .position(|item| item.handle == entity.handle)
            .ok_or(WorldError::UnknownEntity(entity.handle))?;
        let item = self.items.swap_remove(index);
        self.hand = Some(item.info);
        Ok(item.info)
    }

    fn inventory_add(&mut self, slot: usize, item: ItemInfo) -> Result<(), WorldError> {
        let entry = self.slot_mut(slot)?;
        if entry.is_some() {
            return Err(WorldError::SlotOccupied(slot));
        }
        *entry = Some(item);
        self.hand = None;
        Ok(())
    }

    fn inventory_use(&mut self, slot: usize) -> Result<(), WorldError> {
        let max_vital = self.max_vital;
        let item = self.slot_mut(slot)?.as_mut().ok_or(WorldError::SlotEmpty(slot))?;
        let used = *item;
        match used.kind {
            ItemKind::Pistol | ItemKind::Shotgun => {
                if item.value <= 0 {
                    return Err(WorldError::UseDenied(slot));
                }
                item.value -= 1;
            }
            ItemKind::Medkit | ItemKind::Food => item.value = 0,
            ItemKind::Junk => return Err(WorldError::UseDenied(slot)),
        }

        match used.kind {
            ItemKind::Pistol => self.resolve_shot(PISTOL_HIT_COS),
            ItemKind::Shotgun => self.resolve_shot(SHOTGUN_HIT_COS),
            ItemKind::Medkit => {
                self.agent.health = (self.agent.health + used.value as f32).min(max_vital);
            }
            ItemKind::Food => {
                self.agent.energy = (self.agent.energy + used.value as f32).min(max_vital);
            }
            ItemKind::Junk => {}
        }
        Ok(())
    }

    fn inventory_remove(&mut self, slot: usize) -> Result<(), WorldError> {
        self.slot_mut(slot)?
            .take()
            .map(|_| ())
            .ok_or(WorldError::SlotEmpty(slot))
    }

    fn inventory_item(&self, slot: usize) -> Option<ItemInfo> {
        self.inventory.get(slot).copied().flatten()
    }
}
