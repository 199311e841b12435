use std::thread::sleep;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use log::{debug, info};
use rand::rngs::ThreadRng;

use crate::food::FoodKind;
use crate::session::{Phase, Session, TickResult, GRID_HEIGHT, GRID_WIDTH};
use crate::snake::Direction;
use crate::term::TermManager;
use crate::{Cell, GameError, TermInt};

const POLL_INTERVAL_MS: u64 = 5;
const DEATH_HOLD: Duration = Duration::from_secs(2);

const BODY_CHAR: char = '█';
const WALL_CHAR: char = '█';
const FOOD_CHAR: char = '█';

const SNAKE_COLOR: Color = Color::Rgb { r: 139, g: 0, b: 0 };
const WALL_COLOR: Color = Color::Rgb { r: 100, g: 100, b: 100 };
const INFO_COLOR: Color = Color::Rgb { r: 173, g: 216, b: 230 };

fn food_color(kind: FoodKind) -> Color {
    match kind {
        FoodKind::Common => Color::Rgb { r: 46, g: 139, b: 87 },
        FoodKind::Uncommon => Color::Rgb { r: 199, g: 21, b: 133 },
        FoodKind::Rare => Color::Rgb { r: 25, g: 25, b: 112 },
        FoodKind::Golden => Color::Rgb { r: 255, g: 215, b: 0 },
    }
}

pub struct SnakeGame {
    term: TermManager,
    session: Session,
    rng: ThreadRng,
}

impl SnakeGame {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let session = Session::new(&mut rng);
        SnakeGame {
            term: TermManager::new(),
            session,
            rng,
        }
    }

    pub fn run(&mut self) -> Result<(), GameError> {
        self.term.setup(GRID_WIDTH as TermInt, GRID_HEIGHT as TermInt)?;
        info!(
            "session started: {}x{} grid, {} food items, {:.2} steps/s",
            GRID_WIDTH,
            GRID_HEIGHT,
            self.session.foods().len(),
            self.session.speed()
        );

        let outcome = self.play();

        // Hand the terminal back even if the loop bailed out with an error
        let restored = self.term.restore();
        outcome.and(restored)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn play(&mut self) -> Result<(), GameError> {
        self.draw_board()?;

        let mut pending: Option<Direction> = None;
        let mut ticks_until_step = self.step_ticks();

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                match &key_ev {
                    ev if is_ctrl_c(ev) => return Ok(()),
                    KeyEvent { code, modifiers: _ } => match code {
                        KeyCode::Esc => self.toggle_pause()?,
                        code if self.session.phase() == Phase::Running => {
                            if let Some(dir) = direction_for(code) {
                                pending = Some(dir);
                            }
                        }
                        _ => {}
                    },
                }
            }

            if self.session.phase() == Phase::Paused {
                continue;
            }

            // Count down til the next simulation step
            ticks_until_step -= 1;
            if ticks_until_step > 0 {
                continue;
            }

            let result = self.session.tick(pending.take(), &mut self.rng);
            // Eating may have raised the speed, so recompute the cadence
            ticks_until_step = self.step_ticks();

            match result {
                TickResult::Moved {
                    new_head,
                    old_head,
                    freed_tail,
                    ate,
                } => {
                    self.draw_step(new_head, old_head, freed_tail, ate)?;
                }
                TickResult::Died(cause) => {
                    info!(
                        "game over: snake {}, final score {}",
                        cause,
                        self.session.score()
                    );
                    let score_line = format!("Final score: {}", self.session.score());
                    self.term.show_message(&["GAME OVER!", &score_line])?;
                    sleep(DEATH_HOLD);
                    return Ok(());
                }
            }
        }
    }

    fn toggle_pause(&mut self) -> Result<(), GameError> {
        self.session.toggle_pause();

        match self.session.phase() {
            Phase::Paused => self.term.show_message(&["PAUSED", "Press Esc to resume"]),
            Phase::Running => self.term.hide_message(),
            Phase::Dead => Ok(()),
        }
    }

    fn draw_board(&mut self) -> Result<(), GameError> {
        self.term.clear()?;
        self.term.draw_border()?;

        for &cell in self.session.walls() {
            self.term.draw_cell(cell, WALL_CHAR, WALL_COLOR)?;
        }

        self.draw_foods()?;

        let head_char = self.session.snake().head_char();
        for (i, &cell) in self.session.snake().cells().iter().enumerate() {
            let ch = if i == 0 { head_char } else { BODY_CHAR };
            self.term.draw_cell(cell, ch, SNAKE_COLOR)?;
        }

        self.draw_info_bar()?;
        self.term.flush()
    }

    fn draw_step(
        &mut self,
        new_head: Cell,
        old_head: Cell,
        freed_tail: Option<Cell>,
        ate: Option<FoodKind>,
    ) -> Result<(), GameError> {
        if let Some(tail) = freed_tail {
            // Food may sit under the body when two items shared a cell;
            // let it reappear once the tail has passed over it.
            match self.session.food_at(tail) {
                Some(kind) => self.term.draw_cell(tail, FOOD_CHAR, food_color(kind))?,
                None => self.term.clear_cell(tail)?,
            }
        }

        self.term.draw_cell(old_head, BODY_CHAR, SNAKE_COLOR)?;
        self.term
            .draw_cell(new_head, self.session.snake().head_char(), SNAKE_COLOR)?;

        if let Some(kind) = ate {
            debug!(
                "ate {:?} food at {:?}: score {}, speed {:.2} steps/s",
                kind,
                new_head,
                self.session.score(),
                self.session.speed()
            );
            // A replacement spawned somewhere; repaint the whole set
            self.draw_foods()?;
            self.draw_info_bar()?;
        }

        self.term.flush()
    }

    fn draw_foods(&mut self) -> Result<(), GameError> {
        for f in self.session.foods() {
            self.term.draw_cell(f.cell, FOOD_CHAR, food_color(f.kind))?;
        }
        Ok(())
    }

    fn draw_info_bar(&mut self) -> Result<(), GameError> {
        let text = format!(
            "Score: {} | Length: {}",
            self.session.score(),
            self.session.snake().len()
        );
        self.term.draw_info_bar(&text, INFO_COLOR)
    }

    fn step_ticks(&self) -> u64 {
        let interval_ms = 1000.0 / self.session.speed();
        (interval_ms / POLL_INTERVAL_MS as f32).round().max(1.0) as u64
    }
}

fn direction_for(code: &KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('a') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(
        ev,
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL
        }
    )
}
