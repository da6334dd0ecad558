//! A small terminal asteroids game: a ship, its shots, and asteroids that
//! split when hit. The simulation core ([`simulation::Simulation`]) is
//! independent of the terminal; [`game::Game`] drives it with crossterm.

pub mod body;
pub mod clock;
pub mod constants;
pub mod entities;
pub mod events;
pub mod game;
pub mod input;
pub mod registry;
pub mod rendering;
pub mod simulation;
pub mod spawner;
pub mod terminal_io;
pub mod types;
