//! Action leaves.
//!
//! Actions write steering intents, issue inventory commands through the
//! world, and update the grid and memories. They fail when the blackboard
//! field they act on is unset or the world rejects a command; the tree then
//! falls through to the next branch within the same tick.

use agent_core::{MissingState, Vec2, WorldInterface};
use behavior_tree::Status;

use super::degraded;
use crate::context::AgentContext;

fn require<T>(node: &'static str, field: &'static str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        degraded(node, &MissingState(field));
    }
    value
}

// ============================================================================
// Movement
// ============================================================================

/// Backs away from the entity target while keeping it in sight.
pub fn flee_and_look_at<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(target) = require("flee_and_look_at", "entity_target", ctx.entity_target) else {
        return Status::Failure;
    };
    ctx.steering.flee(target, &ctx.agent);
    ctx.steering.look_at(target);
    Status::Success
}

pub fn seek_entity<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(target) = require("seek_entity", "entity_target", ctx.entity_target) else {
        return Status::Failure;
    };
    ctx.seek_point(target);
    Status::Success
}

pub fn seek_house<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(target) = require("seek_house", "house_target", ctx.house_target) else {
        return Status::Failure;
    };
    ctx.seek_point(target);
    Status::Success
}

/// Turns toward the hazard zones in view.
pub fn look_at_hazard<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let centers: Vec<Vec2> = ctx.hazards().map(|zone| zone.center).collect();
    for center in centers {
        ctx.steering.look_at(center);
    }
    Status::Success
}

/// Drops every intent recorded so far this tick.
pub fn stand_still<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    ctx.steering.reset();
    Status::Success
}

// ============================================================================
// Combat
// ============================================================================

/// Fires at the enemies in view and ends any look-around.
pub fn shoot<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let enemies = ctx.enemy_count();
    match ctx.inventory.fire(&mut ctx.world, enemies) {
        Ok(weapon) => {
            tracing::debug!(%weapon, enemies, "shot at enemy");
            ctx.look_around.stop();
            Status::Success
        }
        Err(err) => {
            degraded("shoot", &err);
            Status::Failure
        }
    }
}

/// Spins in place at full speed while the look-around lasts.
pub fn turn_to_look_for_enemy<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    if require("turn_to_look_for_enemy", "entity_target", ctx.entity_target).is_none() {
        return Status::Failure;
    }
    ctx.steering.rotate(ctx.agent.max_angular_speed);
    Status::Success
}

/// Spins while backing away from where the hit came from.
pub fn look_for_enemy<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(target) = require("look_for_enemy", "entity_target", ctx.entity_target) else {
        return Status::Failure;
    };
    ctx.steering.rotate(ctx.agent.max_angular_speed);
    ctx.steering.flee(target, &ctx.agent);
    Status::Success
}

// ============================================================================
// Loot
// ============================================================================

pub fn pick_up_loot<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(loot) = require("pick_up_loot", "current_loot", ctx.current_loot) else {
        return Status::Failure;
    };
    match ctx.inventory.pick_up(&mut ctx.world, &loot) {
        Ok(item) => {
            ctx.items.forget_near(loot.location);
            tracing::info!(%item, "picked up item");
            Status::Success
        }
        Err(err) => {
            degraded("pick_up_loot", &err);
            Status::Failure
        }
    }
}

/// Gives up the slot chosen by swap scoring and picks up the current loot.
pub fn replace_and_pick_up<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(loot) = require("replace_and_pick_up", "current_loot", ctx.current_loot) else {
        return Status::Failure;
    };
    let Some(slot) = require("replace_and_pick_up", "replace_slot", ctx.replace_slot) else {
        return Status::Failure;
    };
    match ctx.inventory.replace(&mut ctx.world, slot, &loot) {
        Ok(item) => {
            ctx.items.forget_near(loot.location);
            tracing::info!(%item, slot, "swapped item");
            Status::Success
        }
        Err(err) => {
            degraded("replace_and_pick_up", &err);
            Status::Failure
        }
    }
}

/// Stores the current loot in item memory. Fails if it is already there.
pub fn remember_loot<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(loot) = require("remember_loot", "current_loot", ctx.current_loot) else {
        return Status::Failure;
    };
    let Some(info) = ctx.world.item_info(&loot) else {
        return Status::Failure;
    };
    if !ctx.items.remember(loot.location, info.kind) {
        return Status::Failure;
    }
    tracing::info!(item = %info.kind, remembered = ctx.items.len(), "remembering item");
    Status::Success
}

// ============================================================================
// Houses
// ============================================================================

/// Aims the house target at the active house's current corner.
///
/// The corner is (re)selected when the agent just entered (target still on
/// the center), just came back from grabbing an item, or reached the corner,
/// which also advances to the next one. Once all four corners are visited the
/// house is committed as looted and the node fails.
pub fn set_target_to_corner<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(mut house) = require("set_target_to_corner", "active_house", ctx.active_house)
    else {
        return Status::Failure;
    };
    let epsilon_sq = ctx.config.senses.house_epsilon_sq;
    let position = ctx.agent.position;

    let near = |point: Vec2, to: Vec2| point.distance_squared(to) < epsilon_sq;

    let just_entered = ctx
        .house_target
        .is_none_or(|target| near(target, house.info.center));
    let back_from_item = ctx.entity_target.is_some_and(|entity| near(entity, position));
    let reached_corner = ctx.house_target.is_some_and(|target| near(target, position));

    if back_from_item {
        ctx.entity_target = None;
    }
    if !just_entered && !back_from_item {
        if !reached_corner {
            return Status::Success;
        }
        house.advance();
    }

    match house.corner_target() {
        Some(corner) => {
            ctx.active_house = Some(house);
            ctx.house_target = Some(corner);
            Status::Success
        }
        None => {
            ctx.houses.commit(house.info);
            ctx.active_house = None;
            ctx.house_target = None;
            tracing::info!(center = ?house.info.center, "finished looting house");
            Status::Failure
        }
    }
}

/// Queues the surroundings of the freshly claimed house for exploration.
pub fn claim_house<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let Some(house) = require("claim_house", "active_house", ctx.active_house) else {
        return Status::Failure;
    };
    if !ctx.explorer.is_revisiting() {
        ctx.explorer.add_explore_tile(house.info.center);
    }
    tracing::info!(center = ?house.info.center, "found a new house");
    Status::Success
}

// ============================================================================
// Exploration
// ============================================================================

/// Walks toward the nearest undiscovered cell while sweeping the view.
///
/// The agent keeps turning in one direction until its facing drifts past the
/// scan threshold from its velocity, then turns back.
pub fn explore<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    let target = ctx.explorer.nearest_undiscovered(ctx.agent.position);
    let Some(target) = target else {
        return Status::Failure;
    };
    if ctx.explorer.is_done_exploring() {
        return Status::Failure;
    }

    ctx.seek_point(target);

    let look = ctx.agent.forward();
    let velocity = ctx.agent.linear_velocity;
    let delta = velocity.perp_dot(look).atan2(velocity.dot(look));
    let threshold = ctx.config.senses.scan_turn_threshold();
    let max = ctx.agent.max_angular_speed;
    let angular_velocity = if delta < -threshold {
        max
    } else if delta > threshold {
        -max
    } else {
        ctx.agent.angular_velocity
    };
    ctx.steering.rotate(angular_velocity);

    ctx.entity_target = None;
    ctx.house_target = None;
    Status::Success
}

/// Starts a new looting cycle over every known house.
///
/// Resets the grid, queues one revisit tile per known house and forgets
/// remembered junk.
pub fn revisit_houses<W: WorldInterface>(ctx: &mut AgentContext<W>) -> Status {
    ctx.explorer.reset();
    for known in ctx.houses.iter() {
        ctx.explorer.add_revisit_tile(known.info.center);
    }
    ctx.houses.begin_cycle();
    let purged = ctx.items.purge_junk();

    tracing::info!(
        houses = ctx.houses.len(),
        cycle = ctx.houses.cycle(),
        purged,
        "exploration exhausted, revisiting houses"
    );
    Status::Success
}
