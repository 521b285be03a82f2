use rand::Rng;

use crate::Cell;
use crate::config::GridSize;
use crate::snake::Snake;

/// Picks a uniformly random cell not occupied by the snake.
///
/// Returns `None` when the snake covers the whole grid.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Cell> {
    let candidates: Vec<Cell> = (0..bounds.total_cells())
        .filter(|cell| !snake.occupies(*cell))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::snake::Snake;

    use super::spawn_position;

    #[test]
    fn apple_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = GridSize {
            width: 8,
            height: 6,
        };
        let snake = Snake::from_cells([3, 2, 1, 0]);

        for _ in 0..100 {
            let apple = spawn_position(&mut rng, bounds, &snake).expect("board has free cells");
            assert!(bounds.contains(apple));
            assert!(!snake.occupies(apple));
        }
    }

    #[test]
    fn apple_spawn_finds_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = GridSize {
            width: 3,
            height: 2,
        };
        let snake = Snake::from_cells([0, 1, 2, 5, 4]);

        assert_eq!(spawn_position(&mut rng, bounds, &snake), Some(3));
    }

    #[test]
    fn full_board_has_no_apple_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = GridSize {
            width: 2,
            height: 2,
        };
        let snake = Snake::from_cells([0, 1, 3, 2]);

        assert_eq!(spawn_position(&mut rng, bounds, &snake), None);
    }
}
