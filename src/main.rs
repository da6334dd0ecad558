use std::env;
use std::io::{self, Write};
use crossterm::{
    cursor::{Hide, Show},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};

use splitrock::constants::{LOG_FILE, LOG_LEVEL};
use splitrock::game::{Game, Outcome};
use splitrock::rendering::{GameGrid, OutputTarget, ScreenBuffer};
use splitrock::terminal_io::SimulatedInput;

struct Options {
    debug_mode_active: bool,
    width: u16,
    height: u16,
    max_frames: Option<u64>,
}

// splitrock [max_frames]
// splitrock --debug [width height [max_frames]]
fn parse_args(args: &[String]) -> Options {
    let debug_mode_active = args.get(1).is_some_and(|arg| arg == "--debug");
    if debug_mode_active {
        let mut options = Options {
            debug_mode_active,
            width: 80,
            height: 24,
            max_frames: None,
        };
        if args.len() >= 4 {
            options.width = args[2].parse::<u16>().unwrap_or(80);
            options.height = args[3].parse::<u16>().unwrap_or(24);
        }
        options.max_frames = args.get(4).and_then(|arg| arg.parse::<u64>().ok());
        options
    } else {
        Options {
            debug_mode_active,
            width: 0,
            height: 0,
            max_frames: args.get(1).and_then(|arg| arg.parse::<u64>().ok()),
        }
    }
}

fn play(options: &Options) -> io::Result<Outcome> {
    let mut stdout_target;
    let simulated_input;
    let terminal_width: u16;
    let terminal_height: u16;

    if options.debug_mode_active {
        info!("Debug mode enabled. Resolution {}x{}", options.width, options.height);
        terminal_width = options.width;
        terminal_height = options.height;
        stdout_target = OutputTarget::ScreenBuffer(ScreenBuffer::new(terminal_width, terminal_height));
        simulated_input = Some(SimulatedInput::scripted());
    } else {
        let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
        terminal_width = width;
        terminal_height = height;
        info!("Terminal size: {}x{}", terminal_width, terminal_height);
        stdout_target = OutputTarget::Stdout(io::stdout());
        simulated_input = None;

        let game_grid_dummy = GameGrid::new(terminal_width, terminal_height);
        game_grid_dummy.clear_screen_manual(&mut stdout_target).map_err(|e| { error!("Failed to clear screen manually: {}", e); e })?;
        stdout_target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
        stdout_target.flush()?;
    }

    let mut game = Game::new(
        terminal_width,
        terminal_height,
        stdout_target,
        simulated_input,
        options.debug_mode_active,
        options.max_frames,
    );
    game.run()
}

fn main() -> io::Result<()> {
    simple_logging::log_to_file(LOG_FILE, LOG_LEVEL)?;
    info!("Starting splitrock.");

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);

    if !options.debug_mode_active {
        enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
        info!("Raw mode enabled.");
    }

    let result = play(&options);

    // Hand the terminal back even when the game failed.
    if !options.debug_mode_active {
        let mut stdout = OutputTarget::Stdout(io::stdout());
        if let Err(e) = stdout.execute_other_command(Show) {
            error!("Failed to show cursor on exit: {}", e);
        }
        disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode on exit: {}", e); e })?;
    }

    let outcome = result.map_err(|e| { error!("Game aborted: {}", e); e })?;
    info!("Exiting with {:?}", outcome);
    println!("Final score: {}", outcome.score());
    Ok(())
}
