//! Threat handling: enemies first, then hazard zones.

use agent_core::WorldInterface;
use behavior_tree::builder::{action, always_succeed, condition, inverter, selector, sequence};

use super::BehaviorTree;
use crate::nodes::*;

/// Armed with an enemy straight ahead → fire.
pub fn shoot_threat_in_front<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    sequence(vec![
        condition(is_enemy_in_front::<W>),
        condition(has_gun::<W>),
        action(shoot::<W>),
    ])
}

/// Armed with an enemy in view → back off while turning to face it.
///
/// Standing in a hazard zone adds a pull toward the escape point; outside one
/// the branch still commits to facing the enemy.
pub fn engage_threat_in_view<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    sequence(vec![
        condition(is_enemy_in_fov::<W>),
        condition(has_gun::<W>),
        action(flee_and_look_at::<W>),
        always_succeed(sequence(vec![
            condition(is_inside_hazard::<W>),
            action(seek_entity::<W>),
        ])),
    ])
}

/// Hit by something unseen, or still scanning → spin to find it.
///
/// Near a hazard the agent only turns; elsewhere it also backs away from
/// where the hit came from.
pub fn look_around_after_hit<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    sequence(vec![
        selector(vec![
            condition(is_looking_for_enemy::<W>),
            condition(is_hit_by_enemy::<W>),
        ]),
        condition(has_gun::<W>),
        inverter(condition(is_inside_hazard::<W>)),
        selector(vec![
            sequence(vec![
                condition(is_hazard_in_front::<W>),
                action(turn_to_look_for_enemy::<W>),
            ]),
            action(look_for_enemy::<W>),
        ]),
    ])
}

/// Close to a hazard zone → escape it if inside, otherwise hold still.
pub fn avoid_hazard<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    sequence(vec![
        condition(is_hazard_in_front::<W>),
        selector(vec![
            sequence(vec![
                condition(is_inside_hazard::<W>),
                action(seek_entity::<W>),
                action(look_at_hazard::<W>),
            ]),
            action(stand_still::<W>),
        ]),
    ])
}
