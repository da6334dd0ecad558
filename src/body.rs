use crate::types::Vector2D;

/// Shape and motion state shared by every movable entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleBody {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub radius: f64,
}

impl CircleBody {
    /// Creates a resting body. Velocity is assigned afterwards by whoever spawns it.
    pub fn new(position: Vector2D, radius: f64) -> Self {
        debug_assert!(radius >= 0.0, "radius must not be negative: {radius}");
        debug_assert!(position.is_finite(), "position must be finite: {position:?}");
        CircleBody {
            position,
            velocity: Vector2D::ZERO,
            radius,
        }
    }

    pub fn with_velocity(mut self, velocity: Vector2D) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn update(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }

    pub fn collides_with(&self, other: &CircleBody) -> bool {
        self.position.distance_to(other.position) <= self.radius + other.radius
    }

    /// True once the center is more than `margin` outside a `width x height` field.
    pub fn is_beyond(&self, width: f64, height: f64, margin: f64) -> bool {
        let Vector2D { x, y } = self.position;
        x < -margin || y < -margin || x > width + margin || y > height + margin
    }
}
