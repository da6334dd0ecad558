// --- Playfield ---
pub const SCREEN_WIDTH: f64 = 1280.0;
pub const SCREEN_HEIGHT: f64 = 720.0;
pub const MAX_FPS: f64 = 60.0;

// --- Asteroids ---
pub const ASTEROID_MIN_RADIUS: f64 = 20.0;
pub const ASTEROID_KINDS: u32 = 3;
pub const ASTEROID_MAX_RADIUS: f64 = ASTEROID_MIN_RADIUS * ASTEROID_KINDS as f64;
pub const ASTEROID_SPAWN_RATE: f64 = 0.8; // Seconds between spawns
pub const ASTEROID_SPEED: f64 = 70.0;
pub const ASTEROID_SPAWN_CONE_DEGREES: f64 = 30.0;
pub const ASTEROID_SPLIT_MIN_ANGLE: f64 = 20.0;
pub const ASTEROID_SPLIT_MAX_ANGLE: f64 = 50.0;
pub const ASTEROID_SPLIT_SPEEDUP: f64 = 1.2;
// Spawns sit one max radius outside an edge, so culling starts past that
pub const ASTEROID_DESPAWN_MARGIN: f64 = ASTEROID_MAX_RADIUS + SHOT_DESPAWN_MARGIN;

// --- Player ---
pub const PLAYER_RADIUS: f64 = 20.0;
pub const PLAYER_TURN_SPEED: f64 = 300.0; // Degrees per second
pub const PLAYER_SPEED: f64 = 200.0;
pub const PLAYER_SHOOT_SPEED: f64 = 500.0;
pub const PLAYER_SHOOT_COOLDOWN_SECONDS: f64 = 0.3;

// --- Shots ---
pub const SHOT_RADIUS: f64 = 5.0;
pub const SHOT_DESPAWN_MARGIN: f64 = 100.0;

// --- Presentation ---
pub const LINE_WIDTH: f64 = 2.0;
pub const KEY_HOLD_SECONDS: f64 = 0.15; // Terminals only report presses and auto-repeat
pub const STATE_LOG_INTERVAL_FRAMES: u64 = 60;
pub const LOG_FILE: &str = "splitrock.log";
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
