//! Seeded world generation.

use agent_core::{ItemInfo, ItemKind, SandboxWorld, Vec2, WorldInfo};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Population of a generated world.
#[derive(Clone, Debug)]
pub struct ScenarioConfig {
    pub dimensions: Vec2,
    pub items: usize,
    pub enemies: usize,
    pub hazards: usize,
    pub houses: usize,
    pub enemy_speed: f32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            dimensions: Vec2::splat(102.0),
            items: 30,
            enemies: 6,
            hazards: 3,
            houses: 4,
            enemy_speed: 2.0,
        }
    }
}

const ITEM_KINDS: [ItemKind; 5] = [
    ItemKind::Pistol,
    ItemKind::Shotgun,
    ItemKind::Medkit,
    ItemKind::Food,
    ItemKind::Junk,
];

/// Keeps spawns away from the agent's starting point.
const SPAWN_CLEARANCE: f32 = 12.0;

/// Builds a world centered on the origin with the agent in the middle.
///
/// The same seed always yields the same world.
pub fn generate(seed: u64, config: &ScenarioConfig) -> SandboxWorld {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = SandboxWorld::new(WorldInfo::new(Vec2::ZERO, config.dimensions));
    world.enemy_speed = config.enemy_speed;

    let half = config.dimensions / 2.0;

    for _ in 0..config.houses {
        let size = Vec2::new(rng.gen_range(6.0..12.0), rng.gen_range(6.0..12.0));
        let center = random_point(&mut rng, half - size, 0.0);
        world.add_house(center, size);
    }

    for _ in 0..config.items {
        let kind = ITEM_KINDS[rng.gen_range(0..ITEM_KINDS.len())];
        let value = match kind {
            ItemKind::Junk => 0,
            _ => rng.gen_range(1..=6),
        };
        // Half of the loot sits inside houses.
        let location = match world.houses.get(rng.gen_range(0..config.houses.max(1) * 2)) {
            Some(house) => house.center + random_point(&mut rng, house.size / 2.5, 0.0),
            None => random_point(&mut rng, half, 0.0),
        };
        world.add_item(location, ItemInfo::new(kind, value));
    }

    for _ in 0..config.enemies {
        world.add_enemy(random_point(&mut rng, half, SPAWN_CLEARANCE));
    }

    for _ in 0..config.hazards {
        let radius = rng.gen_range(3.0..6.0);
        let center = random_point(&mut rng, half, SPAWN_CLEARANCE + radius);
        world.add_hazard(center, radius);
    }

    world
}

/// Uniform point in `[-half, half)`, at least `clearance` away from the origin.
/// `half` must be positive.
fn random_point(rng: &mut ChaCha8Rng, half: Vec2, clearance: f32) -> Vec2 {
    loop {
        let point = Vec2::new(rng.gen_range(-half.x..half.x), rng.gen_range(-half.y..half.y));
        if point.length() >= clearance || half.max_element() <= clearance {
            return point;
        }
    }
}
