use std::io::{self, Write};
use std::time::Duration;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event},
};
use log::{error, info};

use crate::clock::FrameClock;
use crate::constants::MAX_FPS;
use crate::events::LogSink;
use crate::rendering::{DrawTarget, GameGrid, OutputTarget};
use crate::simulation::{EndReason, GameState, Simulation};
use crate::terminal_io::{KeyboardState, SimulatedInput};
use crate::types::Vector2D;

/// How a session finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    GameOver { reason: EndReason, score: u32 },
    Quit { score: u32 },
    FrameLimit { score: u32 },
}

impl Outcome {
    pub fn score(&self) -> u32 {
        match *self {
            Outcome::GameOver { score, .. } | Outcome::Quit { score } | Outcome::FrameLimit { score } => score,
        }
    }

    fn headline(&self) -> &'static str {
        match self {
            Outcome::GameOver { reason: EndReason::PlayerHit, .. } => "GAME OVER! Hit by an asteroid.",
            Outcome::GameOver { reason: EndReason::WindowBoundaryHit, .. } => "GAME OVER! You left the field.",
            Outcome::Quit { .. } => "GAME OVER! You quit.",
            Outcome::FrameLimit { .. } => "GAME OVER! Frame limit reached.",
        }
    }
}

pub struct Game {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
    seed: Option<u64>,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        debug_mode_active: bool,
        max_frames: Option<u64>,
    ) -> Self {
        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            simulated_input,
            debug_mode_active,
            max_frames,
            seed: None,
        }
    }

    /// Fixes the asteroid RNG so a scripted session replays identically.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn run(&mut self) -> io::Result<Outcome> {
        let mut simulation = self.seed.map_or_else(Simulation::new, Simulation::with_seed);
        let mut sink = LogSink;
        let mut keyboard = KeyboardState::new();
        let mut clock = FrameClock::new();
        let mut game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
        let mut frame_count: u64 = 0;

        let outcome = loop {
            if self.max_frames.is_some_and(|max| frame_count >= max) {
                break Outcome::FrameLimit { score: simulation.score() };
            }

            // Headless runs step at the nominal rate instead of real time.
            let dt = if self.debug_mode_active { 1.0 / MAX_FPS } else { clock.tick(MAX_FPS) };
            keyboard.advance(dt);
            if self.handle_input(&mut keyboard, frame_count)? {
                game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
            }

            let input = keyboard.snapshot();
            if input.quit {
                info!("Quit requested at frame {}.", frame_count);
                break Outcome::Quit { score: simulation.score() };
            }

            let state = simulation.step(dt, &input, &mut sink);
            self.render(&mut game_grid, &simulation)?;
            frame_count += 1;

            if let GameState::Ended { reason, score } = state {
                break Outcome::GameOver { reason, score };
            }
        };

        info!("Session finished after {} frames: {:?}", frame_count, outcome);
        self.show_game_over_screen(&outcome)?;
        Ok(outcome)
    }

    /// Feeds this frame's key events to `keyboard`. Returns true when the
    /// terminal was resized.
    fn handle_input(&mut self, keyboard: &mut KeyboardState, frame_count: u64) -> io::Result<bool> {
        let mut events = Vec::new();
        if self.debug_mode_active {
            if let Some(sim_input) = &mut self.simulated_input {
                events = sim_input.events_for(frame_count);
            }
        } else {
            while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
                events.push(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?);
            }
        }

        let mut resized = false;
        for event in &events {
            if let Event::Resize(new_width, new_height) = *event {
                self.terminal_width = new_width;
                self.terminal_height = new_height;
                resized = true;
                info!("Terminal resized to {}x{}", new_width, new_height);
            }
            keyboard.handle_event(event);
        }
        Ok(resized)
    }

    fn render(&mut self, game_grid: &mut GameGrid, simulation: &Simulation) -> io::Result<()> {
        game_grid.clear();
        simulation.draw(game_grid);
        game_grid.text(&format!("Score: {}", simulation.score()), Vector2D::ZERO);

        if !self.debug_mode_active {
            game_grid.render(&mut self.stdout_target).map_err(|e| { error!("Failed to render game grid: {}", e); e })?;
        } else if let OutputTarget::ScreenBuffer(ref mut sb) = self.stdout_target {
            sb.clear();
            for y in 0..game_grid.height {
                for x in 0..game_grid.width {
                    sb.set_char(x, y, game_grid.grid[y as usize][x as usize]);
                }
            }
        }

        let controls_text = [
            "Controls:",
            r"  A / Left  : Rotate Left",
            r"  D / Right : Rotate Right",
            r"  W / Up    : Thrust",
            r"  S / Down  : Reverse",
            r"  Spacebar  : Fire",
            r"  q         : Quit",
        ];
        let controls_box_height = controls_text.len() as u16;
        let controls_start_y = self.terminal_height.saturating_sub(controls_box_height);

        for (i, line) in controls_text.iter().enumerate() {
            self.stdout_target.execute_move_to(MoveTo(0, controls_start_y.saturating_add(i as u16)))?;
            write!(self.stdout_target, "{}", line)?;
        }

        if let OutputTarget::ScreenBuffer(ref sb) = self.stdout_target {
            sb.print_to_log();
        }
        self.stdout_target.flush().map_err(|e| { error!("Failed to flush stdout during game loop: {}", e); e })?;
        Ok(())
    }

    fn show_game_over_screen(&mut self, outcome: &Outcome) -> io::Result<()> {
        let game_grid_dummy = GameGrid::new(self.terminal_width, self.terminal_height);
        game_grid_dummy.clear_screen_manual(&mut self.stdout_target)?;

        let game_over_msg = outcome.headline();
        let score_msg = format!("Final Score: {}", outcome.score());
        let exit_msg = "Press any key to exit...";

        let center = |len: usize| (self.terminal_width / 2).saturating_sub(len as u16 / 2);
        let go_x = center(game_over_msg.len());
        let score_x = center(score_msg.len());
        let exit_x = center(exit_msg.len());

        let go_y = (self.terminal_height / 2).saturating_sub(2);
        let score_y = self.terminal_height / 2;
        let exit_y = self.terminal_height / 2 + 2;

        self.stdout_target.execute_move_to(MoveTo(go_x, go_y))?;
        write!(self.stdout_target, "{}", game_over_msg)?;

        self.stdout_target.execute_move_to(MoveTo(score_x, score_y))?;
        write!(self.stdout_target, "{}", score_msg)?;

        if self.debug_mode_active {
            if let OutputTarget::ScreenBuffer(ref sb) = self.stdout_target {
                sb.print_to_log();
            }
            return Ok(());
        }

        self.stdout_target.execute_move_to(MoveTo(exit_x, exit_y))?;
        write!(self.stdout_target, "{}", exit_msg)?;
        self.stdout_target.flush()?;
        info!("Game over screen displayed. Waiting for final key press.");

        // Drain keys still buffered from play before waiting.
        while event::poll(Duration::from_millis(200))? {
            event::read()?;
        }
        loop {
            if let Event::Key(_) = event::read().map_err(|e| { error!("Failed to read event: {}", e); e })? {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::ScreenBuffer;

    fn headless(max_frames: Option<u64>, script: SimulatedInput) -> Game {
        Game::new(
            80,
            24,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(80, 24)),
            Some(script),
            true,
            max_frames,
        )
    }

    #[test]
    fn scripted_quit_ends_the_session() {
        let mut game = headless(Some(200), SimulatedInput::scripted()).with_seed(17);
        let outcome = game.run().unwrap();
        assert!(matches!(outcome, Outcome::Quit { .. }), "{outcome:?}");
    }

    #[test]
    fn quit_key_wins_over_a_later_frame_limit() {
        let mut script = std::collections::HashMap::new();
        script.insert(3, vec![Event::Key(crossterm::event::KeyCode::Char('q').into())]);
        let mut game = headless(Some(10), SimulatedInput::new(script)).with_seed(17);
        assert_eq!(game.run().unwrap(), Outcome::Quit { score: 0 });
    }

    #[test]
    fn frame_limit_stops_an_idle_session() {
        let mut game = headless(Some(5), SimulatedInput::new(Default::default()));
        let outcome = game.run().unwrap();
        assert_eq!(outcome, Outcome::FrameLimit { score: 0 });
        match &game.stdout_target {
            OutputTarget::ScreenBuffer(sb) => {
                let screen: String = (0..sb.height).map(|y| sb.row(y)).collect();
                assert!(screen.contains("Final Score: 0"));
            }
            OutputTarget::Stdout(_) => unreachable!(),
        }
    }
}
