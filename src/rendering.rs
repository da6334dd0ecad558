use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::types::Vector2D;

/// Anything the playfield can be drawn onto. Coordinates are world units.
pub trait DrawTarget {
    fn circle(&mut self, center: Vector2D, radius: f64, line_width: f64);
    fn triangle(&mut self, vertices: [Vector2D; 3], line_width: f64);
    fn text(&mut self, label: &str, position: Vector2D);
}

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    cursor_x: u16,
    cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.set_char(self.cursor_x, self.cursor_y, c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.buffer[y as usize][x as usize] = c;
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer
            .get(y as usize)
            .map(|row| row.iter().collect())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.buffer = vec![vec![' '; self.width as usize]; self.height as usize];
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for y in 0..self.height {
            info!("{}", self.row(y));
        }
        info!("---------------------");
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Ignore in debug mode
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                sb.write_str(&String::from_utf8_lossy(buf));
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

// --- GameGrid: the playfield scaled onto terminal cells ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    scale_x: f64,
    scale_y: f64,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            scale_x: width as f64 / SCREEN_WIDTH,
            scale_y: height as f64 / SCREEN_HEIGHT,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn char_at(&self, x: u16, y: u16) -> Option<char> {
        self.grid.get(y as usize)?.get(x as usize).copied()
    }

    pub fn clear(&mut self) {
        self.grid = vec![vec![' '; self.width as usize]; self.height as usize];
    }

    /// Cell under a world point, if it is on screen.
    pub fn cell(&self, point: Vector2D) -> Option<(u16, u16)> {
        let x = (point.x * self.scale_x).floor();
        let y = (point.y * self.scale_y).floor();
        if x < 0.0 || y < 0.0 || x >= self.width as f64 || y >= self.height as f64 {
            return None;
        }
        Some((x as u16, y as u16))
    }

    fn plot(&mut self, point: Vector2D, c: char) {
        if let Some((x, y)) = self.cell(point) {
            self.set_char(x, y, c);
        }
    }

    fn segment(&mut self, from: Vector2D, to: Vector2D, c: char) {
        let cells = ((to.x - from.x) * self.scale_x)
            .abs()
            .max(((to.y - from.y) * self.scale_y).abs());
        let samples = (cells * 2.0).ceil().max(1.0) as usize;
        for i in 0..=samples {
            let t = i as f64 / samples as f64;
            self.plot(from + (to - from) * t, c);
        }
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(self.width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

// Lines are always one cell wide on a character grid.
impl DrawTarget for GameGrid {
    fn circle(&mut self, center: Vector2D, radius: f64, _line_width: f64) {
        let cells = radius * self.scale_x.max(self.scale_y);
        if cells < 1.0 {
            self.plot(center, '*');
            return;
        }
        let samples = (std::f64::consts::TAU * cells * 2.0).ceil() as usize;
        for i in 0..samples {
            let angle = 360.0 * i as f64 / samples as f64;
            self.plot(center + Vector2D::new(radius, 0.0).rotate(angle), 'o');
        }
    }

    fn triangle(&mut self, vertices: [Vector2D; 3], _line_width: f64) {
        let [apex, left, right] = vertices;
        self.segment(left, right, '#');
        self.segment(apex, left, '#');
        self.segment(apex, right, '#');
        self.plot(apex, 'A');
    }

    fn text(&mut self, label: &str, position: Vector2D) {
        let Some((x, y)) = self.cell(position) else {
            return;
        };
        for (i, c) in label.chars().enumerate() {
            self.set_char(x.saturating_add(i as u16), y, c);
        }
    }
}
