use approx::assert_abs_diff_eq;

use splitrock::constants::*;
use splitrock::entities::{Asteroid, Entity, Shot};
use splitrock::input::{Action, InputSnapshot};
use splitrock::registry::Groups;
use splitrock::simulation::{EndReason, GameState, Simulation};
use splitrock::types::Vector2D;

const DT: f64 = 1.0 / 60.0;

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

fn asteroid_radii(sim: &Simulation) -> Vec<f64> {
    sim.registry()
        .in_group(Groups::ASTEROIDS)
        .map(|(_, entity)| entity.body().radius)
        .collect()
}

#[test]
fn one_shot_splits_a_large_asteroid() {
    let mut sim = Simulation::with_seed(11);
    let target = sim.spawn_asteroid(Asteroid::new(Vector2D::new(200.0, 200.0), ASTEROID_MAX_RADIUS, Vector2D::ZERO));
    // 70 units away now, inside the combined radius after one frame of travel.
    let shot = sim.spawn_shot(Shot::new(Vector2D::new(200.0, 270.0), Vector2D::new(0.0, -PLAYER_SHOOT_SPEED)));
    let mut events: Vec<String> = Vec::new();

    let state = sim.step(DT, &idle(), &mut events);

    assert_eq!(state, GameState::Running);
    assert!(!sim.registry().contains(shot));
    assert!(!sim.registry().contains(target));
    assert_eq!(sim.registry().count(Groups::SHOTS), 0);
    let radii = asteroid_radii(&sim);
    assert_eq!(radii.len(), 2);
    for radius in radii {
        assert_abs_diff_eq!(radius, ASTEROID_MAX_RADIUS - ASTEROID_MIN_RADIUS);
    }
    assert_eq!(sim.score(), 10);
    assert_eq!(events, vec!["asteroid_split".to_string()]);
}

#[test]
fn player_fired_shot_travels_to_its_target() {
    let mut sim = Simulation::with_seed(5);
    sim.spawn_asteroid(Asteroid::new(
        Vector2D::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 + 200.0),
        ASTEROID_MAX_RADIUS,
        Vector2D::ZERO,
    ));
    let mut events: Vec<String> = Vec::new();

    sim.step(DT, &idle().with(Action::Fire), &mut events);
    assert_eq!(sim.registry().count(Groups::SHOTS), 1);

    for _ in 0..40 {
        sim.step(DT, &idle(), &mut events);
        if sim.score() > 0 {
            break;
        }
    }

    assert_eq!(sim.score(), 10);
    assert_eq!(sim.registry().count(Groups::SHOTS), 0);
    assert_eq!(sim.registry().count(Groups::ASTEROIDS), 2);
}

#[test]
fn cooldown_gates_firing() {
    let mut sim = Simulation::with_seed(5);
    if let Some(player) = sim.player_mut() {
        player.cooldown = DT;
    }
    let mut events: Vec<String> = Vec::new();
    let fire = idle().with(Action::Fire);

    sim.step(DT, &fire, &mut events);
    assert_eq!(sim.registry().count(Groups::SHOTS), 0);
    assert!(sim.player().is_some_and(|p| p.cooldown <= 0.0));

    sim.step(DT, &fire, &mut events);
    assert_eq!(sim.registry().count(Groups::SHOTS), 1);
}

#[test]
fn shot_resolves_against_one_of_two_coincident_asteroids() {
    let mut sim = Simulation::with_seed(8);
    let position = Vector2D::new(200.0, 200.0);
    sim.spawn_asteroid(Asteroid::new(position, ASTEROID_MAX_RADIUS, Vector2D::ZERO));
    sim.spawn_asteroid(Asteroid::new(position, ASTEROID_MAX_RADIUS, Vector2D::ZERO));
    sim.spawn_shot(Shot::new(position, Vector2D::ZERO));
    let mut events: Vec<String> = Vec::new();

    sim.step(DT, &idle(), &mut events);

    assert_eq!(sim.score(), 10);
    assert_eq!(events.len(), 1);
    let mut radii = asteroid_radii(&sim);
    radii.sort_by(f64::total_cmp);
    assert_eq!(radii.len(), 3);
    assert_abs_diff_eq!(radii[0], ASTEROID_MAX_RADIUS - ASTEROID_MIN_RADIUS);
    assert_abs_diff_eq!(radii[1], ASTEROID_MAX_RADIUS - ASTEROID_MIN_RADIUS);
    assert_abs_diff_eq!(radii[2], ASTEROID_MAX_RADIUS);
}

#[test]
fn fragments_are_not_hit_again_in_the_same_frame() {
    let mut sim = Simulation::with_seed(8);
    let position = Vector2D::new(200.0, 200.0);
    sim.spawn_asteroid(Asteroid::new(position, ASTEROID_MAX_RADIUS, Vector2D::ZERO));
    sim.spawn_shot(Shot::new(position, Vector2D::ZERO));
    sim.spawn_shot(Shot::new(position, Vector2D::ZERO));
    let mut events: Vec<String> = Vec::new();

    sim.step(DT, &idle(), &mut events);
    assert_eq!(sim.registry().count(Groups::SHOTS), 1);
    assert_eq!(sim.registry().count(Groups::ASTEROIDS), 2);

    sim.step(DT, &idle(), &mut events);
    assert_eq!(sim.registry().count(Groups::SHOTS), 0);
    assert_eq!(sim.registry().count(Groups::ASTEROIDS), 3);
    assert_eq!(sim.score(), 10 + 50);
}

#[test]
fn smallest_asteroid_is_destroyed_outright() {
    let mut sim = Simulation::with_seed(2);
    let position = Vector2D::new(200.0, 200.0);
    sim.spawn_asteroid(Asteroid::new(position, ASTEROID_MIN_RADIUS, Vector2D::ZERO));
    sim.spawn_shot(Shot::new(position, Vector2D::ZERO));
    let mut events: Vec<String> = Vec::new();

    sim.step(DT, &idle(), &mut events);

    assert_eq!(sim.registry().count(Groups::ASTEROIDS), 0);
    assert_eq!(sim.score(), 100);
    assert_eq!(events, vec!["asteroid_split".to_string()]);
}

#[test]
fn asteroid_on_the_player_ends_the_game() {
    let mut sim = Simulation::with_seed(4);
    let center = Vector2D::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
    sim.spawn_asteroid(Asteroid::new(center + Vector2D::new(70.0, 0.0), ASTEROID_MAX_RADIUS, Vector2D::ZERO));
    let mut events: Vec<String> = Vec::new();

    let state = sim.step(DT, &idle(), &mut events);

    assert_eq!(
        state,
        GameState::Ended {
            reason: EndReason::PlayerHit,
            score: 0
        }
    );
    assert_eq!(events, vec!["player_hit".to_string()]);
}

#[test]
fn player_hit_ends_before_shots_resolve() {
    let mut sim = Simulation::with_seed(4);
    let center = Vector2D::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
    sim.spawn_asteroid(Asteroid::new(center, ASTEROID_MAX_RADIUS, Vector2D::ZERO));
    sim.spawn_shot(Shot::new(center, Vector2D::ZERO));
    let mut events: Vec<String> = Vec::new();

    let state = sim.step(DT, &idle(), &mut events);

    assert!(matches!(state, GameState::Ended { reason: EndReason::PlayerHit, score: 0 }));
    assert_eq!(sim.registry().count(Groups::ASTEROIDS), 1);
    assert_eq!(sim.registry().count(Groups::SHOTS), 1);
}

#[test]
fn every_edge_is_a_boundary_hit() {
    for position in [
        Vector2D::new(0.0, 100.0),
        Vector2D::new(SCREEN_WIDTH, 100.0),
        Vector2D::new(100.0, 0.0),
        Vector2D::new(100.0, SCREEN_HEIGHT),
    ] {
        let mut sim = Simulation::with_seed(1);
        if let Some(player) = sim.player_mut() {
            player.body.position = position;
        }
        let mut events: Vec<String> = Vec::new();

        let state = sim.step(DT, &idle(), &mut events);

        assert_eq!(
            state,
            GameState::Ended {
                reason: EndReason::WindowBoundaryHit,
                score: 0
            },
            "{position:?}"
        );
    }
}

#[test]
fn spawner_feeds_the_field_over_time() {
    let mut sim = Simulation::with_seed(21);
    let mut events: Vec<String> = Vec::new();
    for _ in 0..60 {
        assert_eq!(sim.step(DT, &idle(), &mut events), GameState::Running);
    }
    let spawned: Vec<Entity> = sim
        .registry()
        .in_group(Groups::ASTEROIDS)
        .map(|(_, entity)| entity.clone())
        .collect();
    assert_eq!(spawned.len(), 1);
    assert_abs_diff_eq!(spawned[0].body().radius, ASTEROID_MAX_RADIUS);
    assert!(sim.registry().groups(sim.registry().ids_in(Groups::ASTEROIDS)[0]).contains(Groups::DRAWABLE));
}

#[test]
fn same_seed_and_inputs_are_deterministic() {
    let run = || {
        let mut sim = Simulation::with_seed(77);
        let mut events: Vec<String> = Vec::new();
        let script = [
            idle().with(Action::Fire),
            idle().with(Action::RotateLeft),
            idle().with(Action::ThrustForward).with(Action::Fire),
            idle(),
        ];
        for frame in 0..240 {
            sim.step(DT, &script[frame % script.len()], &mut events);
        }
        (sim.snapshot(), sim.state(), events)
    };
    assert_eq!(run(), run());
}
