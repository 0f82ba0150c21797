use agent_core::{
    AgentConfig, Cell, EntityKind, HouseInfo, ItemInfo, ItemKind, PerceivedEntity, SandboxWorld,
    Vec2,
};
use agent_runtime::{Agent, PriorityBranch};

const DT: f32 = 0.1;

fn agent_in(world: SandboxWorld) -> Agent<SandboxWorld> {
    Agent::new(world, AgentConfig::default()).unwrap()
}

/// Puts `info` straight into the agent's inventory.
fn give(agent: &mut Agent<SandboxWorld>, info: ItemInfo) {
    let location = Vec2::splat(-100.0);
    let handle = agent.world_mut().add_item(location, info);
    let entity = PerceivedEntity::new(handle, location, EntityKind::Item);
    let ctx = agent.context_mut();
    ctx.inventory.pick_up(&mut ctx.world, &entity).unwrap();
}

#[test]
fn shoots_enemy_straight_ahead() {
    let mut world = SandboxWorld::default();
    world.add_enemy(Vec2::new(6.0, 0.0));
    let mut agent = agent_in(world);
    give(&mut agent, ItemInfo::new(ItemKind::Pistol, 5));

    agent.update(DT);

    assert_eq!(agent.last_branch(), Some(PriorityBranch::ShootThreat));
    assert_eq!(agent.world().kills(), 1);
    assert_eq!(
        agent.world().inventory[0],
        Some(ItemInfo::new(ItemKind::Pistol, 4))
    );
}

#[test]
fn shooting_preempts_loot_and_hazards() {
    let mut world = SandboxWorld::default();
    world.add_enemy(Vec2::new(6.0, 0.0));
    world.add_item(Vec2::new(1.0, 0.0), ItemInfo::new(ItemKind::Food, 3));
    world.add_hazard(Vec2::new(0.0, 8.0), 5.0);
    let mut agent = agent_in(world);
    give(&mut agent, ItemInfo::new(ItemKind::Pistol, 5));

    agent.update(DT);

    assert_eq!(agent.last_branch(), Some(PriorityBranch::ShootThreat));
    assert!(!agent.context().inventory.has(ItemKind::Food));
}

#[test]
fn backs_away_from_enemy_while_facing_it() {
    let mut world = SandboxWorld::default();
    world.add_enemy(Vec2::new(0.0, 6.0));
    let mut agent = agent_in(world);
    give(&mut agent, ItemInfo::new(ItemKind::Shotgun, 3));

    let command = agent.update(DT);

    assert_eq!(agent.last_branch(), Some(PriorityBranch::EngageThreat));
    assert_eq!(command.linear_velocity, Vec2::new(0.0, -5.0));
    assert_eq!(command.angular_velocity, core::f32::consts::PI);
    assert!(!command.auto_orient);
    assert_eq!(agent.world().kills(), 0);
}

#[test]
fn unarmed_agent_ignores_enemies() {
    let mut world = SandboxWorld::default();
    world.add_enemy(Vec2::new(6.0, 0.0));
    let mut agent = agent_in(world);

    agent.update(DT);

    assert_eq!(agent.last_branch(), Some(PriorityBranch::Explore));
}

#[test]
fn hit_starts_timed_look_around() {
    let mut world = SandboxWorld::default();
    world.agent.was_bitten = true;
    let mut agent = agent_in(world);
    give(&mut agent, ItemInfo::new(ItemKind::Pistol, 5));

    let command = agent.update(DT);
    assert_eq!(agent.last_branch(), Some(PriorityBranch::LookAround));
    assert!(agent.context().look_around.is_active());
    assert_eq!(command.angular_velocity, core::f32::consts::PI);
    assert_eq!(command.linear_velocity, Vec2::new(5.0, 0.0));

    // Keeps scanning after the hit frame until the timer runs out.
    agent.world_mut().agent.was_bitten = false;
    agent.update(DT);
    assert_eq!(agent.last_branch(), Some(PriorityBranch::LookAround));

    for _ in 0..25 {
        agent.update(DT);
    }
    assert!(!agent.context().look_around.is_active());
    assert_ne!(agent.last_branch(), Some(PriorityBranch::LookAround));
}

#[test]
fn look_around_runs_out_while_preempted() {
    let mut world = SandboxWorld::default();
    world.add_enemy(Vec2::new(0.0, 6.0));
    let mut agent = agent_in(world);
    give(&mut agent, ItemInfo::new(ItemKind::Shotgun, 3));
    agent.context_mut().look_around.start(0.5);

    for _ in 0..6 {
        agent.update(DT);
        assert_eq!(agent.last_branch(), Some(PriorityBranch::EngageThreat));
    }
    assert!(!agent.context().look_around.is_active());
}

#[test]
fn escapes_hazard_zone_when_inside() {
    let mut world = SandboxWorld::default();
    world.add_hazard(Vec2::new(2.0, 0.0), 5.0);
    let mut agent = agent_in(world);

    let command = agent.update(DT);

    assert_eq!(agent.last_branch(), Some(PriorityBranch::AvoidHazard));
    assert_eq!(agent.context().entity_target, Some(Vec2::new(-8.0, 0.0)));
    assert_eq!(command.linear_velocity, Vec2::new(-5.0, 0.0));
    assert!(command.run_mode);
    assert!(!command.auto_orient);
}

#[test]
fn stands_still_next_to_hazard_zone() {
    let mut world = SandboxWorld::default();
    world.add_hazard(Vec2::new(8.0, 0.0), 5.0);
    world.add_item(Vec2::new(0.0, 6.0), ItemInfo::new(ItemKind::Food, 3));
    let mut agent = agent_in(world);

    let command = agent.update(DT);

    assert_eq!(agent.last_branch(), Some(PriorityBranch::AvoidHazard));
    assert_eq!(command.linear_velocity, Vec2::ZERO);
    assert!(command.auto_orient);
}

#[test]
fn picks_up_loot_in_range() {
    let mut world = SandboxWorld::default();
    world.add_item(Vec2::new(1.0, 0.0), ItemInfo::new(ItemKind::Food, 3));
    let mut agent = agent_in(world);

    agent.update(DT);

    assert_eq!(agent.last_branch(), Some(PriorityBranch::HandleLoot));
    assert!(agent.context().inventory.has(ItemKind::Food));
    assert!(agent.world().items.is_empty());
}

#[test]
fn refused_grab_falls_back_to_remembering() {
    let mut world = SandboxWorld::default();
    world.deny_grabs = true;
    world.add_item(Vec2::new(1.0, 0.0), ItemInfo::new(ItemKind::Food, 3));
    let mut agent = agent_in(world);

    agent.update(DT);

    assert_eq!(agent.last_branch(), Some(PriorityBranch::HandleLoot));
    assert_eq!(agent.context().items.len(), 1);
    assert!(!agent.context().inventory.has(ItemKind::Food));
    assert_eq!(agent.world().items.len(), 1);
}

#[test]
fn empty_inventory_takes_pistol_despite_remembered_spares() {
    let mut world = SandboxWorld::default();
    world.add_item(Vec2::new(1.0, 0.0), ItemInfo::new(ItemKind::Pistol, 2));
    let mut agent = agent_in(world);
    for x in 0..4 {
        let location = Vec2::new(30.0 + x as f32, 30.0);
        agent.context_mut().items.remember(location, ItemKind::Pistol);
    }

    agent.update(DT);

    assert_eq!(agent.last_branch(), Some(PriorityBranch::HandleLoot));
    assert_eq!(
        agent.world().inventory[0],
        Some(ItemInfo::new(ItemKind::Pistol, 2))
    );
    assert!(agent.world().items.is_empty());
}

#[test]
fn walks_to_unremembered_loot() {
    let mut world = SandboxWorld::default();
    world.add_item(Vec2::new(8.0, 0.0), ItemInfo::new(ItemKind::Medkit, 4));
    let mut agent = agent_in(world);

    let command = agent.update(DT);

    assert_eq!(agent.last_branch(), Some(PriorityBranch::SeekLoot));
    assert_eq!(agent.context().entity_target, Some(Vec2::new(8.0, 0.0)));
    assert!(command.linear_velocity.x > 0.0);
    assert_eq!(command.linear_velocity.y, 0.0);
}

fn fill_inventory(agent: &mut Agent<SandboxWorld>) {
    give(agent, ItemInfo::new(ItemKind::Pistol, 5));
    give(agent, ItemInfo::new(ItemKind::Shotgun, 3));
    give(agent, ItemInfo::new(ItemKind::Medkit, 3));
    give(agent, ItemInfo::new(ItemKind::Food, 3));
    give(agent, ItemInfo::new(ItemKind::Pistol, 6));
}

#[test]
fn remembers_loot_not_worth_a_swap() {
    let mut world = SandboxWorld::default();
    world.add_item(Vec2::new(1.0, 0.0), ItemInfo::new(ItemKind::Pistol, 2));
    let mut agent = agent_in(world);
    fill_inventory(&mut agent);

    agent.update(DT);
    assert_eq!(agent.last_branch(), Some(PriorityBranch::HandleLoot));
    assert_eq!(agent.context().items.count_of(ItemKind::Pistol), 1);

    // Already remembered and nothing is missing: move on.
    agent.update(DT);
    assert_eq!(agent.last_branch(), Some(PriorityBranch::Explore));
    assert_eq!(agent.context().items.len(), 1);
}

#[test]
fn swaps_weakest_pistol_when_hoarding() {
    let mut world = SandboxWorld::default();
    world.add_item(Vec2::new(1.0, 0.0), ItemInfo::new(ItemKind::Pistol, 2));
    let mut agent = agent_in(world);
    fill_inventory(&mut agent);
    for x in 0..4 {
        let location = Vec2::new(30.0 + x as f32, 30.0);
        agent.context_mut().items.remember(location, ItemKind::Pistol);
    }

    agent.update(DT);

    assert_eq!(agent.last_branch(), Some(PriorityBranch::HandleLoot));
    assert_eq!(
        agent.world().inventory[0],
        Some(ItemInfo::new(ItemKind::Pistol, 2))
    );
    assert_eq!(
        agent.world().inventory[4],
        Some(ItemInfo::new(ItemKind::Pistol, 6))
    );
    assert!(agent.world().items.is_empty());
}

#[test]
fn fetches_remembered_food_first() {
    let mut agent = agent_in(SandboxWorld::default());
    let ctx = agent.context_mut();
    ctx.items.remember(Vec2::new(-20.0, 0.0), ItemKind::Medkit);
    ctx.items.remember(Vec2::new(300.0, 0.0), ItemKind::Food);

    agent.update(DT);

    assert_eq!(agent.last_branch(), Some(PriorityBranch::FetchNeededItem));
    assert_eq!(agent.context().entity_target, Some(Vec2::new(300.0, 0.0)));
}

#[test]
fn revisits_known_houses_once_exploration_is_exhausted() {
    let mut agent = agent_in(SandboxWorld::default());
    let house = HouseInfo::new(Vec2::new(20.0, 20.0), Vec2::splat(4.0));
    let ctx = agent.context_mut();
    let size = ctx.explorer.size() as i32;
    for x in 0..size {
        for y in 0..size {
            ctx.explorer.mark_discovered(Cell::new(x, y));
        }
    }
    ctx.houses.commit(house);
    ctx.items.remember(Vec2::new(-20.0, -20.0), ItemKind::Junk);

    agent.update(DT);

    assert_eq!(agent.last_branch(), Some(PriorityBranch::RevisitHouses));
    let ctx = agent.context();
    assert!(ctx.explorer.is_revisiting());
    assert_eq!(ctx.explorer.pending_revisit_tiles(), 1);
    assert_eq!(ctx.houses.cycle(), 1);
    assert!(!ctx.houses.is_looted(house.center));
    assert!(ctx.items.is_empty());

    let command = agent.update(DT);
    assert_eq!(agent.last_branch(), Some(PriorityBranch::Explore));
    assert!(command.linear_velocity.x > 0.0);
    assert!(command.linear_velocity.y > 0.0);
}

#[test]
fn same_world_same_commands() {
    let scenario = || {
        let mut world = SandboxWorld::default();
        world.enemy_speed = 1.0;
        world.add_enemy(Vec2::new(-12.0, 5.0));
        world.add_item(Vec2::new(7.0, -3.0), ItemInfo::new(ItemKind::Pistol, 4));
        world.add_hazard(Vec2::new(-5.0, -15.0), 3.0);
        world.add_house(Vec2::new(15.0, 15.0), Vec2::splat(6.0));
        agent_in(world)
    };

    let run = |mut agent: Agent<SandboxWorld>| {
        let mut trace = Vec::new();
        for _ in 0..200 {
            let command = agent.update(DT);
            agent.world_mut().step(&command, DT);
            trace.push((command, agent.last_branch()));
        }
        trace
    };

    assert_eq!(run(scenario()), run(scenario()));
}
