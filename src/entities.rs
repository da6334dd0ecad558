use crate::body::CircleBody;
use crate::constants::*;
use crate::input::InputSnapshot;
use crate::registry::Groups;
use crate::rendering::DrawTarget;
use crate::types::Vector2D;
use rand::Rng;

// --- Player ---
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: CircleBody,
    pub rotation: f64, // Degrees
    pub cooldown: f64, // Seconds, goes negative while idle
}

impl Player {
    pub fn new(x: f64, y: f64) -> Self {
        Player {
            body: CircleBody::new(Vector2D::new(x, y), PLAYER_RADIUS),
            rotation: 0.0,
            cooldown: 0.0,
        }
    }

    pub fn forward(&self) -> Vector2D {
        Vector2D::FORWARD.rotate(self.rotation)
    }

    /// Apex first, then the two base corners.
    pub fn triangle(&self) -> [Vector2D; 3] {
        let radius = self.body.radius;
        let forward = self.forward();
        let right = Vector2D::FORWARD.rotate(self.rotation + 90.0) * (radius / 1.5);
        let position = self.body.position;
        [
            position + forward * radius,
            position - forward * radius - right,
            position - forward * radius + right,
        ]
    }

    pub fn draw(&self, target: &mut impl DrawTarget) {
        target.triangle(self.triangle(), LINE_WIDTH);
    }

    pub fn rotate(&mut self, dt: f64) {
        self.rotation += PLAYER_TURN_SPEED * dt;
    }

    pub fn thrust(&mut self, dt: f64) {
        self.body.position += self.forward() * PLAYER_SPEED * dt;
    }

    /// Applies this frame's input. Returns the shot fired, if any.
    pub fn update(&mut self, dt: f64, input: &InputSnapshot) -> Option<Shot> {
        let mut fired = None;
        if input.fire && self.cooldown <= 0.0 {
            fired = Some(self.shoot());
            self.cooldown = PLAYER_SHOOT_COOLDOWN_SECONDS;
        }
        if input.rotate_left {
            self.rotate(-dt);
        }
        if input.rotate_right {
            self.rotate(dt);
        }
        if input.thrust_backward {
            self.thrust(-dt);
        }
        if input.thrust_forward {
            self.thrust(dt);
        }

        self.cooldown -= dt;
        fired
    }

    pub fn shoot(&self) -> Shot {
        Shot::new(self.body.position, self.forward() * PLAYER_SHOOT_SPEED)
    }

    /// Touching an edge counts as leaving the playfield.
    pub fn hits_boundary(&self, width: f64, height: f64) -> bool {
        let Vector2D { x, y } = self.body.position;
        x <= 0.0 || y <= 0.0 || x >= width || y >= height
    }
}

// --- Asteroid ---
#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub body: CircleBody,
}

impl Asteroid {
    pub fn new(position: Vector2D, radius: f64, velocity: Vector2D) -> Self {
        debug_assert!(
            radius > 0.0 && radius <= ASTEROID_MAX_RADIUS,
            "asteroid radius out of range: {radius}"
        );
        Asteroid {
            body: CircleBody::new(position, radius).with_velocity(velocity),
        }
    }

    pub fn draw(&self, target: &mut impl DrawTarget) {
        target.circle(self.body.position, self.body.radius, LINE_WIDTH);
    }

    pub fn update(&mut self, dt: f64) {
        self.body.update(dt);
    }

    /// Fragments left behind when this asteroid is destroyed. The smallest
    /// tier leaves nothing.
    pub fn split(&self, rng: &mut impl Rng) -> Option<[Asteroid; 2]> {
        if self.body.radius <= ASTEROID_MIN_RADIUS {
            return None;
        }
        let angle = rng.gen_range(ASTEROID_SPLIT_MIN_ANGLE..=ASTEROID_SPLIT_MAX_ANGLE);
        Some(self.fragments(angle))
    }

    fn fragments(&self, angle: f64) -> [Asteroid; 2] {
        let radius = self.body.radius - ASTEROID_MIN_RADIUS;
        let position = self.body.position;
        let velocity = self.body.velocity;
        [
            Asteroid::new(position, radius, velocity.rotate(angle) * ASTEROID_SPLIT_SPEEDUP),
            Asteroid::new(position, radius, velocity.rotate(-angle) * ASTEROID_SPLIT_SPEEDUP),
        ]
    }
}

// --- Shot ---
#[derive(Clone, Debug, PartialEq)]
pub struct Shot {
    pub body: CircleBody,
}

impl Shot {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Shot {
            body: CircleBody::new(position, SHOT_RADIUS).with_velocity(velocity),
        }
    }

    pub fn draw(&self, target: &mut impl DrawTarget) {
        target.circle(self.body.position, self.body.radius, LINE_WIDTH);
    }

    pub fn update(&mut self, dt: f64) {
        self.body.update(dt);
    }
}

// --- Entity ---
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Player(Player),
    Asteroid(Asteroid),
    Shot(Shot),
}

impl Entity {
    /// Collections an entity of this kind joins when spawned.
    pub fn groups(&self) -> Groups {
        match self {
            Entity::Player(_) => Groups::UPDATABLE | Groups::DRAWABLE,
            Entity::Asteroid(_) => Groups::UPDATABLE | Groups::DRAWABLE | Groups::ASTEROIDS,
            Entity::Shot(_) => Groups::UPDATABLE | Groups::DRAWABLE | Groups::SHOTS,
        }
    }

    pub fn body(&self) -> &CircleBody {
        match self {
            Entity::Player(player) => &player.body,
            Entity::Asteroid(asteroid) => &asteroid.body,
            Entity::Shot(shot) => &shot.body,
        }
    }

    /// Advances one frame. Returns anything the entity spawned.
    pub fn update(&mut self, dt: f64, input: &InputSnapshot) -> Option<Entity> {
        match self {
            Entity::Player(player) => player.update(dt, input).map(Entity::Shot),
            Entity::Asteroid(asteroid) => {
                asteroid.update(dt);
                None
            }
            Entity::Shot(shot) => {
                shot.update(dt);
                None
            }
        }
    }

    pub fn draw(&self, target: &mut impl DrawTarget) {
        match self {
            Entity::Player(player) => player.draw(target),
            Entity::Asteroid(asteroid) => asteroid.draw(target),
            Entity::Shot(shot) => shot.draw(target),
        }
    }
}

impl From<Player> for Entity {
    fn from(player: Player) -> Self {
        Entity::Player(player)
    }
}

impl From<Asteroid> for Entity {
    fn from(asteroid: Asteroid) -> Self {
        Entity::Asteroid(asteroid)
    }
}

impl From<Shot> for Entity {
    fn from(shot: Shot) -> Self {
        Entity::Shot(shot)
    }
}
