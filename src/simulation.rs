use std::fmt;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::constants::*;
use crate::entities::{Asteroid, Entity, Player, Shot};
use crate::events::{EventSink, StateSnapshot};
use crate::input::InputSnapshot;
use crate::registry::{EntityId, Groups, Registry};
use crate::rendering::DrawTarget;
use crate::spawner::AsteroidField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    PlayerHit,
    WindowBoundaryHit,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::PlayerHit => "player_hit",
            EndReason::WindowBoundaryHit => "window_boundary_hit",
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    Ended { reason: EndReason, score: u32 },
}

impl GameState {
    pub fn is_running(&self) -> bool {
        matches!(self, GameState::Running)
    }
}

/// Points for destroying an asteroid of `radius`. Smaller rocks are worth
/// more, in steps of ten, never less than ten.
pub fn points_for_radius(radius: f64) -> u32 {
    let step = (ASTEROID_MAX_RADIUS - ASTEROID_MIN_RADIUS) / 10.0;
    let buckets = ((ASTEROID_MAX_RADIUS - radius) / step).floor().max(1.0);
    buckets as u32 * 10
}

/// Everything one game session owns: entities, spawner, score and RNG.
pub struct Simulation {
    registry: Registry,
    player: EntityId,
    field: AsteroidField,
    rng: StdRng,
    width: f64,
    height: f64,
    score: u32,
    frame: u64,
    state: GameState,
}

impl Simulation {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let (width, height) = (SCREEN_WIDTH, SCREEN_HEIGHT);
        let mut registry = Registry::new();
        let player = registry.spawn(Player::new(width / 2.0, height / 2.0));
        Simulation {
            registry,
            player,
            field: AsteroidField::new(width, height),
            rng,
            width,
            height,
            score: 0,
            frame: 0,
            state: GameState::Running,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player(&self) -> Option<&Player> {
        match self.registry.get(self.player) {
            Some(Entity::Player(player)) => Some(player),
            _ => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        match self.registry.get_mut(self.player) {
            Some(Entity::Player(player)) => Some(player),
            _ => None,
        }
    }

    pub fn spawn_asteroid(&mut self, asteroid: Asteroid) -> EntityId {
        self.registry.spawn(asteroid)
    }

    pub fn spawn_shot(&mut self, shot: Shot) -> EntityId {
        self.registry.spawn(shot)
    }

    pub fn snapshot(&self) -> StateSnapshot {
        let (player_x, player_y, player_rotation) = self
            .player()
            .map_or((0.0, 0.0, 0.0), |p| (p.body.position.x, p.body.position.y, p.rotation));
        StateSnapshot {
            frame: self.frame,
            score: self.score,
            asteroids: self.registry.count(Groups::ASTEROIDS),
            shots: self.registry.count(Groups::SHOTS),
            player_x,
            player_y,
            player_rotation,
        }
    }

    /// Runs one frame: update, then player checks, then shot resolution.
    /// Once the game has ended this does nothing.
    pub fn step(&mut self, dt: f64, input: &InputSnapshot, sink: &mut impl EventSink) -> GameState {
        if !self.state.is_running() {
            return self.state;
        }
        sink.log_state(&self.snapshot());
        self.frame += 1;

        self.update_entities(dt, input);
        if let Some(reason) = self.check_player() {
            return self.end(reason, sink);
        }
        self.resolve_shots(sink);
        self.state
    }

    fn update_entities(&mut self, dt: f64, input: &InputSnapshot) {
        for id in self.registry.ids_in(Groups::UPDATABLE) {
            let Some(entity) = self.registry.get_mut(id) else {
                continue;
            };
            if let Some(spawned) = entity.update(dt, input) {
                self.registry.spawn(spawned);
            }
        }
        if let Some(asteroid) = self.field.tick(dt, &mut self.rng) {
            self.registry.spawn(asteroid);
        }

        self.cull_strays(Groups::SHOTS, SHOT_DESPAWN_MARGIN);
        self.cull_strays(Groups::ASTEROIDS, ASTEROID_DESPAWN_MARGIN);
    }

    /// Drops members of `group` whose center is more than `margin` outside
    /// the field. Nothing moving away from the field that far comes back.
    fn cull_strays(&mut self, group: Groups, margin: f64) {
        let (width, height) = (self.width, self.height);
        let strays: Vec<EntityId> = self
            .registry
            .in_group(group)
            .filter(|(_, entity)| entity.body().is_beyond(width, height, margin))
            .map(|(id, _)| id)
            .collect();
        for id in strays {
            self.registry.despawn(id);
        }
    }

    fn check_player(&self) -> Option<EndReason> {
        let player = self.player()?;
        let hit = self
            .registry
            .in_group(Groups::ASTEROIDS)
            .any(|(_, asteroid)| player.body.collides_with(asteroid.body()));
        if hit {
            return Some(EndReason::PlayerHit);
        }
        if player.hits_boundary(self.width, self.height) {
            return Some(EndReason::WindowBoundaryHit);
        }
        None
    }

    fn end(&mut self, reason: EndReason, sink: &mut impl EventSink) -> GameState {
        sink.log_event(reason.as_str());
        info!("Game over ({}) at frame {}. Final score: {}", reason, self.frame, self.score);
        self.state = GameState::Ended {
            reason,
            score: self.score,
        };
        self.state
    }

    /// Each shot destroys at most one asteroid. Fragments created here are
    /// first tested next frame.
    fn resolve_shots(&mut self, sink: &mut impl EventSink) {
        let shots = self.registry.ids_in(Groups::SHOTS);
        for asteroid_id in self.registry.ids_in(Groups::ASTEROIDS) {
            let Some(asteroid) = self.registry.get(asteroid_id).map(|e| *e.body()) else {
                continue;
            };
            let hit = shots.iter().copied().find(|&shot_id| {
                self.registry
                    .get(shot_id)
                    .is_some_and(|shot| shot.body().collides_with(&asteroid))
            });
            if let Some(shot_id) = hit {
                self.registry.despawn(shot_id);
                self.score += points_for_radius(asteroid.radius);
                self.split_asteroid(asteroid_id, sink);
            }
        }
    }

    /// Destroys an asteroid and spawns its fragments. The split event is
    /// logged for every destroyed asteroid, fragments or not.
    pub fn split_asteroid(&mut self, id: EntityId, sink: &mut impl EventSink) -> Vec<EntityId> {
        if !self.registry.groups(id).contains(Groups::ASTEROIDS) {
            return Vec::new();
        }
        let Some(Entity::Asteroid(asteroid)) = self.registry.despawn(id) else {
            return Vec::new();
        };
        sink.log_event("asteroid_split");

        match asteroid.split(&mut self.rng) {
            Some(fragments) => fragments
                .into_iter()
                .map(|fragment| self.registry.spawn(fragment))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn draw(&self, target: &mut impl DrawTarget) {
        for (_, entity) in self.registry.in_group(Groups::DRAWABLE) {
            entity.draw(target);
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
