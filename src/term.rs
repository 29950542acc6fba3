use crate::{Coords, TermInt};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal, Result};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

/// An off-screen character grid. Frames are composed here and handed to
/// `TermManager::present`.
pub struct Canvas {
    width: TermInt,
    height: TermInt,
    cells: Vec<char>,
}

impl Canvas {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        Canvas { width, height, cells: vec![' '; width as usize * height as usize] }
    }

    pub fn size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn get(&self, pos: Coords) -> Option<char> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Out-of-bounds writes are dropped.
    pub fn put(&mut self, pos: Coords, ch: char) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = ch;
        }
    }

    pub fn text(&mut self, pos: Coords, s: &str) {
        for (i, ch) in s.chars().enumerate() {
            self.put((pos.0 + i as TermInt, pos.1), ch);
        }
    }

    pub fn border(&mut self, top_left: Coords, bottom_right: Coords) {
        let (x0, y0) = top_left;
        let (x1, y1) = bottom_right;

        for x in x0..=x1 {
            let ch = if x == x0 || x == x1 {'+'} else {'-'};
            self.put((x, y0), ch);
            self.put((x, y1), ch);
        }

        for y in y0 + 1..y1 {
            self.put((x0, y), '|');
            self.put((x1, y), '|');
        }
    }

    /// Draws a blank-padded box of centered lines around `center`.
    pub fn message(&mut self, center: Coords, lines: &[&str]) {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        for y_diff in 0..msg_height {
            for x_diff in 0..msg_width {
                self.put((top_left.0 + x_diff, top_left.1 + y_diff), ' ');
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            self.text((top_left.0, top_left.1 + i as TermInt + 1), &padded_line);
        }
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }
}

pub struct TermManager {
    stdout: Stdout,
    screen: Option<Canvas>,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), screen: None }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn get_terminal_size(&self) -> Result<Coords> {
        terminal::size()
    }

    /// Drains every key event already waiting, without blocking past `timeout`.
    pub fn read_key_events_queue(&self, timeout: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(timeout)? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    /// Writes the cells of `canvas` that differ from what is on screen.
    pub fn present(&mut self, canvas: Canvas) -> Result<()> {
        let (width, height) = canvas.size();

        for y in 0..height {
            for x in 0..width {
                let ch = canvas.get((x, y)).unwrap_or(' ');
                let shown = self.screen.as_ref().and_then(|s| s.get((x, y)));
                if shown != Some(ch) {
                    queue!(self.stdout, cursor::MoveTo(x, y), style::Print(ch))?;
                }
            }
        }

        self.screen = Some(canvas);
        self.stdout.flush()?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = None;
        Ok(())
    }
}
