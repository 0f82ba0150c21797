//! Condition leaves.
//!
//! Each condition answers one question about the current tick. Some also
//! record what they matched on the blackboard (the enemy to face, the escape
//! point, the loot in range) so that the actions following them in the same
//! sequence can act on it. A condition whose inputs are missing answers
//! `false`.

use agent_core::{ActiveHouse, ItemKind, MissingState, WorldInterface};

use super::degraded;
use crate::context::AgentContext;

/// An enemy lies almost exactly along the agent's facing.
pub fn is_enemy_in_front<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    let forward = ctx.agent.forward();
    let threshold = 1.0 - ctx.config.senses.enemy_in_front_tolerance;
    ctx.enemies().any(|enemy| {
        let dir = (enemy.location - ctx.agent.position).normalize_or_zero();
        dir.dot(forward) > threshold
    })
}

/// Any enemy is in view. Targets the first one.
pub fn is_enemy_in_fov<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    let first = ctx.enemies().next().map(|enemy| enemy.location);
    match first {
        Some(location) => {
            ctx.entity_target = Some(location);
            true
        }
        None => false,
    }
}

pub fn has_gun<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    ctx.inventory.has_weapon()
}

pub fn has_free_slot<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    !ctx.inventory.is_full()
}

/// Still scanning for the enemy that hit the agent.
pub fn is_looking_for_enemy<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    ctx.look_around.is_active()
}

/// The agent took a hit this frame. Starts a look-around and targets the
/// point right behind the agent, where the attacker most likely is.
pub fn is_hit_by_enemy<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    if !ctx.agent.was_bitten {
        return false;
    }
    ctx.entity_target = Some(ctx.agent.position - ctx.agent.forward());
    ctx.look_around.start(ctx.config.senses.look_around_seconds);
    tracing::debug!("hit by an unseen enemy, looking around");
    true
}

/// The agent stands inside a hazard zone. Targets the escape point just
/// outside the zone, straight away from its center.
pub fn is_inside_hazard<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    let position = ctx.agent.position;
    let margin = ctx.config.senses.hazard_escape_margin;
    let escape = ctx.hazards().find_map(|zone| {
        let offset = position - zone.center;
        if offset.length() > zone.radius {
            return None;
        }
        let away = offset.try_normalize().unwrap_or(agent_core::Vec2::X);
        Some(zone.center + away * (zone.radius + margin))
    });

    match escape {
        Some(point) => {
            ctx.entity_target = Some(point);
            true
        }
        None => false,
    }
}

/// A hazard zone in view is within the warning margin of the agent.
pub fn is_hazard_in_front<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    let position = ctx.agent.position;
    let margin = ctx.config.senses.hazard_warning_margin;
    ctx.hazards()
        .any(|zone| position.distance(zone.center) <= zone.radius + margin)
}

/// The closest item in view is within grab range. Records it as the loot.
pub fn is_loot_in_range<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    let position = ctx.agent.position;
    let range_sq = ctx.agent.grab_range * ctx.agent.grab_range;
    let closest = ctx
        .items_in_view()
        .map(|item| (*item, item.location.distance_squared(position)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b));

    match closest {
        Some((item, dist_sq)) if dist_sq < range_sq => {
            ctx.current_loot = Some(item);
            true
        }
        _ => false,
    }
}

/// Swapping a held item for the current loot pays off. Records the slot.
pub fn is_better_inventory_possible<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    let Some(loot) = ctx.current_loot else {
        degraded("is_better_inventory_possible", &MissingState("current_loot"));
        return false;
    };
    let Some(info) = ctx.world.item_info(&loot) else {
        return false;
    };

    let slot = ctx
        .inventory
        .score_swap(&ctx.world, info, &ctx.items, &ctx.config.swap);
    ctx.replace_slot = slot;
    slot.is_some()
}

/// An item in view is not in memory yet. Targets the closest such item.
pub fn has_unremembered_loot_in_view<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    let position = ctx.agent.position;
    let target = ctx
        .items_in_view()
        .filter(|item| !ctx.items.contains_near(item.location))
        .map(|item| item.location)
        .min_by(|a, b| {
            a.distance_squared(position)
                .total_cmp(&b.distance_squared(position))
        });

    match target {
        Some(location) => {
            ctx.entity_target = Some(location);
            true
        }
        None => false,
    }
}

/// The agent is inside the house being looted.
pub fn is_inside_house<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    ctx.active_house
        .is_some_and(|house| house.info.contains(ctx.agent.position))
}

/// The house target points at a known house, or a traversal is unfinished.
pub fn is_moving_towards_house<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    let epsilon_sq = ctx.config.senses.house_epsilon_sq;
    let towards_known = ctx
        .house_target
        .is_some_and(|target| ctx.houses.matches_known(target, epsilon_sq));
    let unfinished = ctx.active_house.is_some_and(|house| !house.is_finished());
    towards_known || unfinished
}

/// A house in view has not been looted this cycle. Makes it the active house.
///
/// When every visible house is already looted the house target and active
/// house are cleared.
pub fn is_new_house_in_fov<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    let new_house = ctx
        .houses_in_view
        .iter()
        .copied()
        .find(|house| !ctx.houses.is_looted(house.center));

    match new_house {
        Some(house) => {
            ctx.active_house = Some(ActiveHouse::new(house));
            ctx.house_target = Some(house.center);
            true
        }
        None => {
            ctx.active_house = None;
            ctx.house_target = None;
            false
        }
    }
}

/// Memory holds the first missing kind (food, then medkit, pistol, shotgun).
/// Targets the closest one; anything but food must be within range.
pub fn remembers_needed_item<W: WorldInterface>(ctx: &mut AgentContext<W>) -> bool {
    const NEEDS: [ItemKind; 4] = [
        ItemKind::Food,
        ItemKind::Medkit,
        ItemKind::Pistol,
        ItemKind::Shotgun,
    ];

    let Some(needed) = NEEDS.into_iter().find(|kind| !ctx.inventory.has(*kind)) else {
        return false;
    };
    let range = (needed != ItemKind::Food).then_some(ctx.config.senses.needed_item_range);

    match ctx.items.nearest_of(needed, ctx.agent.position, range) {
        Some(item) => {
            ctx.entity_target = Some(item.location);
            true
        }
        None => false,
    }
}
