use std::fmt;

use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::food::{Food, FoodKind};
use crate::snake::{Direction, Snake};
use crate::{Cell, GridInt};

pub const GRID_WIDTH: GridInt = 30;
pub const GRID_HEIGHT: GridInt = 20;
pub const INITIAL_SNAKE_LENGTH: usize = 5;
pub const INITIAL_SPEED: f32 = 10.0;
pub const FOOD_COUNT: usize = 3;
pub const WALLS: [Cell; 4] = [(10, 5), (10, 6), (15, 10), (16, 10)];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Dead,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeathCause {
    OutOfBounds,
    Wall,
    SelfBite,
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeathCause::OutOfBounds => "left the playfield",
            DeathCause::Wall => "hit a wall",
            DeathCause::SelfBite => "bit itself",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TickResult {
    Moved {
        new_head: Cell,
        old_head: Cell,
        freed_tail: Option<Cell>,
        ate: Option<FoodKind>,
    },
    Died(DeathCause),
}

pub struct Session {
    snake: Snake,
    foods: Vec<Food>,
    walls: Vec<Cell>,
    score: u64,
    speed: f32,
    phase: Phase,
    width: GridInt,
    height: GridInt,
}

impl Session {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let snake = Snake::new(
            (GRID_WIDTH / 4, GRID_HEIGHT / 2),
            INITIAL_SNAKE_LENGTH,
            Direction::Right,
        );

        let mut session = Session {
            snake,
            foods: Vec::with_capacity(FOOD_COUNT),
            walls: WALLS.to_vec(),
            score: 0,
            speed: INITIAL_SPEED,
            phase: Phase::Running,
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
        };

        for _ in 0..FOOD_COUNT {
            session.add_food(rng);
        }

        session
    }

    // One simulation step. Must only be called while the session is running;
    // the frame loop gates it on the phase.
    pub fn tick<R: Rng>(&mut self, requested: Option<Direction>, rng: &mut R) -> TickResult {
        debug_assert_eq!(self.phase, Phase::Running);

        if let Some(dir) = requested {
            self.snake.set_direction(dir);
        }

        let old_head = self.snake.head();
        let new_head = self.snake.advance();

        let mut ate = None;
        let mut freed_tail = None;
        // At most one food per tick; the first match in list order wins.
        if let Some(i) = self.foods.iter().position(|f| f.cell == new_head) {
            let kind = self.foods.remove(i).kind;
            self.score += kind.score();
            self.speed += kind.speed_bonus();
            self.add_food(rng);
            ate = Some(kind);
        } else {
            freed_tail = self.snake.drop_tail();
        }

        if let Some(cause) = self.death_cause(new_head) {
            self.phase = Phase::Dead;
            return TickResult::Died(cause);
        }

        TickResult::Moved {
            new_head,
            old_head,
            freed_tail,
            ate,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Dead => Phase::Dead,
        };
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn food_at(&self, cell: Cell) -> Option<FoodKind> {
        self.foods.iter().find(|f| f.cell == cell).map(|f| f.kind)
    }

    pub fn walls(&self) -> &[Cell] {
        &self.walls
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    ///////////////////////////////////////////////////////////////////////////

    fn death_cause(&self, head: Cell) -> Option<DeathCause> {
        let (x, y) = head;
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Some(DeathCause::OutOfBounds);
        }
        if self.walls.contains(&head) {
            return Some(DeathCause::Wall);
        }
        // The neck (index 1) is adjacent by construction and not checked.
        if self.snake.cells()[2..].contains(&head) {
            return Some(DeathCause::SelfBite);
        }
        None
    }

    // Draws a replacement cell from the free set instead of rejection-sampling,
    // so placement is bounded even on a crowded grid. Food may land on food.
    fn add_food<R: Rng>(&mut self, rng: &mut R) -> bool {
        let free = self.free_cells();
        match free.choose(rng) {
            Some(&cell) => {
                self.foods.push(Food {
                    cell,
                    kind: FoodKind::random(rng),
                });
                true
            }
            None => {
                warn!("no free cell left to place food");
                false
            }
        }
    }

    fn free_cells(&self) -> Vec<Cell> {
        let mut cells = vec![];
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = (x, y);
                if self.snake.cells().contains(&cell) || self.walls.contains(&cell) {
                    continue;
                }
                cells.push(cell);
            }
        }
        cells
    }
}
