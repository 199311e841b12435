use crate::{Cell, GridInt};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> Cell {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left)
        )
    }
}

pub struct Snake {
    body: Vec<Cell>,
    direction: Direction,
}

impl Snake {
    pub fn new(head: Cell, length: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length as GridInt)
            .map(|i| (head.0 - dx * i, head.1 - dy * i))
            .collect();
        Snake { body, direction }
    }

    #[cfg(test)]
    pub fn from_cells(body: Vec<Cell>, direction: Direction) -> Self {
        Snake { body, direction }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    // Reversals would fold the snake onto its own neck, so they are dropped.
    pub fn set_direction(&mut self, requested: Direction) {
        if !requested.is_reverse_of(self.direction) {
            self.direction = requested;
        }
    }

    pub fn advance(&mut self) -> Cell {
        let (dx, dy) = self.direction.delta();
        let head = (self.body[0].0 + dx, self.body[0].1 + dy);
        self.body.insert(0, head);
        head
    }

    pub fn drop_tail(&mut self) -> Option<Cell> {
        self.body.pop()
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_builds_head_first_body_opposite_to_heading() {
        let snake = Snake::new((5, 2), 5, Right);
        assert_eq!(snake.cells(), &[(5, 2), (4, 2), (3, 2), (2, 2), (1, 2)]);

        let snake = Snake::new((3, 3), 3, Up);
        assert_eq!(snake.cells(), &[(3, 3), (3, 4), (3, 5)]);
    }

    #[test]
    fn reversal_requests_are_ignored() {
        for (current, reverse) in [(Up, Down), (Down, Up), (Left, Right), (Right, Left)] {
            let mut snake = Snake::new((5, 5), 3, current);
            snake.set_direction(reverse);
            assert_eq!(snake.direction(), current);
        }
    }

    #[test]
    fn perpendicular_requests_are_applied() {
        for requested in [Up, Down] {
            let mut snake = Snake::new((5, 5), 3, Right);
            snake.set_direction(requested);
            assert_eq!(snake.direction(), requested);
        }
        let mut snake = Snake::new((5, 5), 3, Right);
        snake.set_direction(Right);
        assert_eq!(snake.direction(), Right);
    }

    #[test]
    fn advance_prepends_one_cell_along_heading() {
        let mut snake = Snake::new((5, 2), 5, Right);
        let head = snake.advance();
        assert_eq!(head, (6, 2));
        assert_eq!(snake.head(), (6, 2));
        assert_eq!(snake.len(), 6);
    }

    #[test]
    fn drop_tail_removes_the_last_cell() {
        let mut snake = Snake::new((5, 2), 5, Right);
        snake.advance();
        assert_eq!(snake.drop_tail(), Some((1, 2)));
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn advance_follows_a_turn() {
        let mut snake = Snake::new((5, 2), 3, Right);
        snake.set_direction(Down);
        assert_eq!(snake.advance(), (5, 3));
    }
}
