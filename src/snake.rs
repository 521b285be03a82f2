use std::collections::VecDeque;

use crate::Cell;
use crate::config::GridSize;
use crate::input::Direction;

/// Snake body as row-major cells, head first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Creates a snake from explicit body cells (front is head).
    ///
    /// Callers are responsible for contiguity; see
    /// [`crate::config::GameConfig::validate`].
    #[must_use]
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            body: cells.into_iter().collect(),
        }
    }

    /// Moves the head onto `next_head`. The tail is kept when `grow` is set.
    pub fn advance(&mut self, next_head: Cell, grow: bool) {
        self.body.push_front(next_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    #[must_use]
    pub fn tail(&self) -> Option<Cell> {
        self.body.back().copied()
    }

    /// Direction of travel, derived from the head and the segment behind it.
    #[must_use]
    pub fn head_direction(&self, bounds: GridSize) -> Option<Direction> {
        let head = self.head()?;
        let neck = self.body.get(1).copied()?;
        bounds.direction_between(neck, head)
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns true if moving onto `cell` would hit the body.
    ///
    /// Without growth the tail leaves its cell on the same tick, so it does
    /// not count.
    #[must_use]
    pub fn blocks(&self, cell: Cell, grow: bool) -> bool {
        let checked = if grow {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        self.body.iter().take(checked).any(|segment| *segment == cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::Snake;

    const GRID: GridSize = GridSize {
        width: 15,
        height: 15,
    };

    #[test]
    fn snake_moves_one_cell_per_advance() {
        let mut snake = Snake::from_cells([168, 169, 170, 171]);

        snake.advance(167, false);

        assert_eq!(snake.head(), Some(167));
        assert_eq!(snake.tail(), Some(170));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn snake_growth_keeps_previous_tail() {
        let mut snake = Snake::from_cells([168, 169, 170, 171]);

        snake.advance(167, true);

        assert_eq!(snake.len(), 5);
        assert_eq!(snake.tail(), Some(171));
    }

    #[test]
    fn head_direction_follows_head_and_neck() {
        assert_eq!(
            Snake::from_cells([168, 169, 170, 171]).head_direction(GRID),
            Some(Direction::Left)
        );
        assert_eq!(
            Snake::from_cells([153, 168, 169, 170]).head_direction(GRID),
            Some(Direction::Up)
        );
        assert_eq!(Snake::from_cells([168]).head_direction(GRID), None);
    }

    #[test]
    fn vacating_tail_does_not_block() {
        // Square loop: head 1 follows the tail at 0.
        let snake = Snake::from_cells([1, 16, 15, 0]);

        assert!(!snake.blocks(0, false));
        assert!(snake.blocks(0, true));
        assert!(snake.blocks(15, false));
        assert!(!snake.blocks(2, false));
    }
}
