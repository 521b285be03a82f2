use rand::Rng;

use crate::Cell;
use crate::apple::spawn_position;
use crate::config::GridSize;
use crate::snake::Snake;

/// What currently sits on a cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Occupant {
    Snake,
    Apple,
    Empty,
}

/// The fixed grid with the snake and its single apple.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    bounds: GridSize,
    snake: Snake,
    apple: Cell,
}

impl Board {
    #[must_use]
    pub fn new(bounds: GridSize, snake: Snake, apple: Cell) -> Self {
        Self {
            bounds,
            snake,
            apple,
        }
    }

    /// Classifies `cell`. Out-of-bounds cells are reported as empty.
    #[must_use]
    pub fn occupied_by(&self, cell: Cell) -> Occupant {
        if self.snake.occupies(cell) {
            Occupant::Snake
        } else if cell == self.apple {
            Occupant::Apple
        } else {
            Occupant::Empty
        }
    }

    /// Moves the apple to a random cell outside the snake.
    ///
    /// Returns `None` and leaves the apple untouched when no cell is free.
    pub fn place_apple<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Cell> {
        let cell = spawn_position(rng, self.bounds, &self.snake)?;
        self.apple = cell;
        Some(cell)
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    #[must_use]
    pub fn apple(&self) -> Cell {
        self.apple
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::snake::Snake;

    use super::{Board, Occupant};

    fn board() -> Board {
        Board::new(
            GridSize {
                width: 15,
                height: 15,
            },
            Snake::from_cells([168, 169, 170, 171]),
            100,
        )
    }

    #[test]
    fn occupied_by_reports_each_occupant() {
        let board = board();

        assert_eq!(board.occupied_by(168), Occupant::Snake);
        assert_eq!(board.occupied_by(171), Occupant::Snake);
        assert_eq!(board.occupied_by(100), Occupant::Apple);
        assert_eq!(board.occupied_by(0), Occupant::Empty);
    }

    #[test]
    fn placed_apple_lands_on_empty_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = board();

        for _ in 0..50 {
            let cell = board.place_apple(&mut rng).expect("board has free cells");
            assert_eq!(board.apple(), cell);
            assert_eq!(board.occupied_by(cell), Occupant::Apple);
        }
    }
}
