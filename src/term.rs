use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use crate::{Cell, GameError, TermCoords, TermInt};

pub struct TermManager {
    size: TermCoords,
    grid: TermCoords,
    origin: TermCoords,
    stdout: Stdout,
    screen: Vec<(char, Color)>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: TermCoords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager {
            size: (0, 0),
            grid: (0, 0),
            origin: (0, 0),
            stdout: stdout(),
            screen: vec![],
            current_msg: None,
        }
    }

    // Claims the terminal and centers the playfield box in it. The box is the
    // grid plus a one-cell border on each side and an info bar row below.
    pub fn setup(&mut self, grid_w: TermInt, grid_h: TermInt) -> Result<(), GameError> {
        let (cols, rows) = terminal::size()?;
        let (need_cols, need_rows) = (grid_w + 2, grid_h + 3);
        if cols < need_cols || rows < need_rows {
            return Err(GameError::TerminalTooSmall {
                cols,
                rows,
                need_cols,
                need_rows,
            });
        }

        self.size = (cols, rows);
        self.grid = (grid_w, grid_h);
        self.origin = ((cols - need_cols) / 2, (rows - need_rows) / 2);
        self.screen = vec![(' ', Color::Reset); cols as usize * rows as usize];

        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<(), GameError> {
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking)?;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>, GameError> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn clear(&mut self) -> Result<(), GameError> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        for slot in self.screen.iter_mut() {
            *slot = (' ', Color::Reset);
        }
        Ok(())
    }

    pub fn draw_border(&mut self) -> Result<(), GameError> {
        let (ox, oy) = self.origin;
        let (end_x, end_y) = (ox + self.grid.0 + 1, oy + self.grid.1 + 1);

        for x in ox..=end_x {
            let ch = if x == ox || x == end_x { '+' } else { '-' };
            self.print_at((x, oy), ch, Color::Reset)?;
            self.print_at((x, end_y), ch, Color::Reset)?;
        }

        for y in oy + 1..end_y {
            self.print_at((ox, y), '|', Color::Reset)?;
            self.print_at((end_x, y), '|', Color::Reset)?;
        }

        Ok(())
    }

    // The caller keeps the cell inside the grid; dead heads are never drawn.
    pub fn draw_cell(&mut self, cell: Cell, ch: char, color: Color) -> Result<(), GameError> {
        let pos = (
            self.origin.0 + 1 + cell.0 as TermInt,
            self.origin.1 + 1 + cell.1 as TermInt,
        );
        self.print_at(pos, ch, color)
    }

    pub fn clear_cell(&mut self, cell: Cell) -> Result<(), GameError> {
        self.draw_cell(cell, ' ', Color::Reset)
    }

    pub fn draw_info_bar(&mut self, text: &str, color: Color) -> Result<(), GameError> {
        let row = self.origin.1 + self.grid.1 + 2;
        let width = self.grid.0 as usize + 2;

        for (i, ch) in text
            .chars()
            .chain(std::iter::repeat(' '))
            .take(width)
            .enumerate()
        {
            self.print_at((self.origin.0 + i as TermInt, row), ch, color)?;
        }

        Ok(())
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<(), GameError> {
        if self.current_msg.is_some() {
            self.hide_message()?;
        }

        let msg_height = lines.len() as TermInt + 2;
        let msg_width = lines.iter().map(|l| l.len()).max().unwrap_or(0) as TermInt + 2;
        let top_left = (
            self.size.0 / 2 - msg_width / 2,
            self.size.1 / 2 - msg_height / 2,
        );

        // Blank rows above and below the text
        for y in [top_left.1, top_left.1 + msg_height - 1] {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, y), ' ', Color::Reset)?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^width$}", width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded.char_indices() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch, Color::Reset)?;
            }
        }

        self.current_msg = Some(Message {
            top_left,
            width: msg_width,
            height: msg_height,
        });
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<(), GameError> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Repaint what the message box covered from the screen buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let (x, y) = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                let (ch, color) = self.screen[self.size.0 as usize * y as usize + x as usize];
                self.print_at_no_save((x, y), ch, color)?;
            }
        }

        self.flush()
    }

    pub fn flush(&mut self) -> Result<(), GameError> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: TermCoords, ch: char, color: Color) -> Result<(), GameError> {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            SetForegroundColor(color),
            Print(ch)
        )?;
        self.screen[self.size.0 as usize * pos.1 as usize + pos.0 as usize] = (ch, color);
        Ok(())
    }

    // Used for message overlays, which are restored from the screen buffer
    // rather than saved into it.
    fn print_at_no_save(&mut self, pos: TermCoords, ch: char, color: Color) -> Result<(), GameError> {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            SetForegroundColor(color),
            Print(ch)
        )?;
        Ok(())
    }
}
