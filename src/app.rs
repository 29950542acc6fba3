use std::{thread::sleep, time::{Duration, Instant}};

use crate::{Coords, TermInt};
use crate::game::{Collision, Command, Game, Playfield, Status};
use crate::input::{classify, KeyAction};
use crate::point::Point;
use crate::term::{Canvas, TermManager};
use crate::ticker::Ticker;

use anyhow::{bail, Context, Result};
use log::info;

const LOOP_SLEEP_MS: u64 = 5;
const POLL_TIMEOUT_MS: u64 = 1;
const HEADER_ROWS: TermInt = 1;

const SNAKE_BODY_CHARS: [char; 2] = ['█', '▓'];
const FOOD_CHAR: char = 'O';

/// Owns the game and its tick scheduler, and feeds both from a single loop so
/// input and ticks never overlap.
pub struct App {
    game: Game,
    ticker: Ticker,
    term: TermManager,
    dirty: bool,
}

impl App {
    pub fn new(game: Game, tick_interval: Duration) -> Self {
        App { game, ticker: Ticker::new(tick_interval), term: TermManager::new(), dirty: true }
    }

    pub fn run(&mut self) -> Result<()> {
        let needed = board_size(self.game.playfield());
        let (w, h) = self.term.get_terminal_size().context("Failed to read terminal size")?;
        if w < needed.0 || h < needed.1 {
            bail!("Terminal is {}x{}, the board needs at least {}x{}", w, h, needed.0, needed.1);
        }

        self.term.setup().context("Failed to set up terminal")?;
        let result = self.game_loop();
        self.term.restore().context("Failed to restore terminal")?;

        result
    }

    fn game_loop(&mut self) -> Result<()> {
        loop {
            let events = self.term
                .read_key_events_queue(Duration::from_millis(POLL_TIMEOUT_MS))
                .context("Failed to read key events")?;

            for key_ev in events {
                match classify(&key_ev) {
                    KeyAction::Quit => {
                        info!("Quit requested");
                        return Ok(());
                    }
                    KeyAction::Game(command) => self.dispatch(command),
                    KeyAction::None if self.game.status() == Status::NotStarted => {
                        self.dispatch(Command::StartOrResume)
                    }
                    KeyAction::None => {}
                }
            }

            if self.ticker.poll(Instant::now()) {
                self.game.tick();
                self.sync_ticker();
                self.dirty = true;
            }

            if self.dirty {
                self.term.present(render(&self.game)).context("Failed to draw frame")?;
                self.dirty = false;
            }

            sleep(Duration::from_millis(LOOP_SLEEP_MS));
        }
    }

    fn dispatch(&mut self, command: Command) {
        self.game.handle(command);
        self.sync_ticker();
        self.dirty = true;
    }

    /// The ticker runs exactly while the game does.
    fn sync_ticker(&mut self) {
        if self.game.status() == Status::Running {
            self.ticker.start(Instant::now());
        } else {
            self.ticker.stop();
        }
    }
}

/// Terminal cells needed for the header plus the bordered board.
pub fn board_size(field: &Playfield) -> Coords {
    let cols = field.columns() as TermInt + 1;
    let rows = field.rows() as TermInt + 1;
    (cols, rows + HEADER_ROWS)
}

/// Maps a logical point onto its terminal cell, if it lies on the board.
pub fn to_cell(field: &Playfield, p: Point) -> Option<Coords> {
    let col = (p.x - field.left).div_euclid(field.step);
    let row = (p.y - field.top).div_euclid(field.step);

    if p.x < field.left || p.y < field.top || col > field.columns() || row > field.rows() {
        return None;
    }

    Some((col as TermInt, row as TermInt + HEADER_ROWS))
}

pub fn render(game: &Game) -> Canvas {
    let field = game.playfield();
    let (width, height) = board_size(field);
    let mut canvas = Canvas::new(width, height);
    let center = (width / 2, HEADER_ROWS + (height - HEADER_ROWS) / 2);

    if game.status() == Status::NotStarted {
        canvas.border((0, HEADER_ROWS), (width - 1, height - 1));
        canvas.message(center, &[
            "SNAKE",
            "GAME",
            "",
            "Press any key to begin",
        ]);
        return canvas;
    }

    canvas.text((0, 0), &format!("SCORE: {:02}", game.score()));
    let best = format!("BEST: {:02}", game.best());
    canvas.text((width - best.chars().count() as TermInt, 0), &best);

    if game.status() == Status::Paused {
        canvas.text((width / 2 - 3, 0), "Paused");
    }

    canvas.border((0, HEADER_ROWS), (width - 1, height - 1));

    if let Some(cell) = game.food().and_then(|f| to_cell(field, f)) {
        canvas.put(cell, FOOD_CHAR);
    }

    let snake = game.snake();
    for (i, segment) in snake.tail().iter().enumerate() {
        if let Some(cell) = to_cell(field, *segment) {
            canvas.put(cell, SNAKE_BODY_CHARS[i % 2]);
        }
    }

    if let Some(cell) = to_cell(field, snake.head()) {
        canvas.put(cell, snake.head_char());
    }

    if game.status() == Status::GameOver {
        let reason = match game.collision() {
            Some(Collision::Wall) => "You hit the wall",
            Some(Collision::Body) => "You bit yourself",
            None => "",
        };
        canvas.message(center, &[
            "GAME OVER",
            reason,
            "",
            "Press enter to start again",
        ]);
    }

    canvas
}
