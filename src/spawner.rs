use crate::constants::*;
use crate::entities::Asteroid;
use crate::types::Vector2D;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Unit vector pointing from this edge into the playfield.
    pub fn inward(self) -> Vector2D {
        match self {
            Edge::Left => Vector2D::new(1.0, 0.0),
            Edge::Right => Vector2D::new(-1.0, 0.0),
            Edge::Top => Vector2D::new(0.0, 1.0),
            Edge::Bottom => Vector2D::new(0.0, -1.0),
        }
    }

    /// Point at fraction `t` along the edge, pushed one max radius outside
    /// the screen so new asteroids drift in rather than pop in.
    pub fn point(self, t: f64, width: f64, height: f64) -> Vector2D {
        match self {
            Edge::Left => Vector2D::new(-ASTEROID_MAX_RADIUS, t * height),
            Edge::Right => Vector2D::new(width + ASTEROID_MAX_RADIUS, t * height),
            Edge::Top => Vector2D::new(t * width, -ASTEROID_MAX_RADIUS),
            Edge::Bottom => Vector2D::new(t * width, height + ASTEROID_MAX_RADIUS),
        }
    }
}

/// Emits a large asteroid from a random screen edge every
/// `ASTEROID_SPAWN_RATE` seconds. Owns nothing it spawns.
#[derive(Clone, Debug)]
pub struct AsteroidField {
    spawn_timer: f64,
    width: f64,
    height: f64,
}

impl AsteroidField {
    pub fn new(width: f64, height: f64) -> Self {
        AsteroidField {
            spawn_timer: 0.0,
            width,
            height,
        }
    }

    pub fn spawn_timer(&self) -> f64 {
        self.spawn_timer
    }

    pub fn tick(&mut self, dt: f64, rng: &mut impl Rng) -> Option<Asteroid> {
        self.spawn_timer += dt;
        if self.spawn_timer <= ASTEROID_SPAWN_RATE {
            return None;
        }
        self.spawn_timer = 0.0;
        Some(self.spawn(rng))
    }

    pub fn spawn(&self, rng: &mut impl Rng) -> Asteroid {
        let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
        let position = edge.point(rng.gen_range(0.0..=1.0), self.width, self.height);
        let turn = rng.gen_range(-ASTEROID_SPAWN_CONE_DEGREES..=ASTEROID_SPAWN_CONE_DEGREES);
        let velocity = edge.inward().rotate(turn) * ASTEROID_SPEED;
        Asteroid::new(position, ASTEROID_MAX_RADIUS, velocity)
    }
}
