use super::grid::Bounds;
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Whether eating a food item helps or hurts the snake
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Hazard {
    #[default]
    Safe,
    Hazardous,
}

impl Hazard {
    /// Roll a fair [`HAZARD_ROLL_SIDES`][consts::HAZARD_ROLL_SIDES]-sided die
    /// to decide whether a new food item is hazardous
    pub(crate) fn roll<R: Rng>(rng: &mut R) -> Hazard {
        if rng.random_range(1..=consts::HAZARD_ROLL_SIDES) <= consts::HAZARD_THRESHOLD {
            Hazard::Hazardous
        } else {
            Hazard::Safe
        }
    }

    pub(crate) fn is_hazardous(self) -> bool {
        self == Hazard::Hazardous
    }
}

/// A snapshot of the current food item
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Food {
    pub(crate) pos: Position,
    pub(crate) hazard: Hazard,

    /// Incremented every time a new food item is placed, so that a hazard
    /// timer can tell whether the food it was armed for is still around
    pub(crate) generation: u64,
}

/// The food item, shared between the game loop and any hazard timers
#[derive(Clone, Debug, Default)]
pub(crate) struct FoodCell(Arc<Mutex<Food>>);

impl FoodCell {
    pub(crate) fn new() -> FoodCell {
        FoodCell::default()
    }

    fn lock(&self) -> MutexGuard<'_, Food> {
        // The guarded value is plain data, so a panic elsewhere can't leave
        // it half-written.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return a copy of the current food item
    pub(crate) fn get(&self) -> Food {
        *self.lock()
    }

    /// Replace the food with a new item at `pos`, returning the new item's
    /// generation
    pub(crate) fn replace(&self, pos: Position, hazard: Hazard) -> u64 {
        let mut food = self.lock();
        food.pos = pos;
        food.hazard = hazard;
        food.generation = food.generation.wrapping_add(1);
        food.generation
    }

    /// Change the hazard of the current item without placing a new one
    #[cfg(test)]
    pub(super) fn set_hazard(&self, hazard: Hazard) {
        self.lock().hazard = hazard;
    }

    /// Downgrade the food to [`Hazard::Safe`] if it is still the item with
    /// the given generation.  Returns `true` if the food was changed.
    pub(crate) fn expire(&self, generation: u64) -> bool {
        let mut food = self.lock();
        if food.generation == generation && food.hazard.is_hazardous() {
            food.hazard = Hazard::Safe;
            true
        } else {
            false
        }
    }
}

/// Choose a cell within `bounds` that is not occupied by `snake` and decide
/// whether the food placed there is hazardous.  Returns `None` if the snake
/// fills the whole grid.
///
/// A handful of uniformly random cells are tried first; if they're all
/// taken, a cell is chosen uniformly from the complete list of free cells.
pub(crate) fn place_food<R: Rng>(
    rng: &mut R,
    bounds: Bounds,
    snake: &Snake,
) -> Option<(Position, Hazard)> {
    if snake.len() >= bounds.area() {
        return None;
    }
    let sampled = (0..consts::PLACEMENT_ATTEMPTS)
        .map(|_| {
            Position::new(
                rng.random_range(0..bounds.width),
                rng.random_range(0..bounds.height),
            )
        })
        .find(|&p| !snake.occupies(p));
    let pos = match sampled {
        Some(p) => p,
        None => bounds
            .positions()
            .filter(|&p| !snake.occupies(p))
            .choose(rng)?,
    };
    Some((pos, Hazard::roll(rng)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// A snake filling every cell of a `width`×`height` grid except for the
    /// cells listed in `holes`, snaking back and forth row by row
    fn filling_snake(width: u16, height: u16, holes: &[Position]) -> Snake {
        let bounds = Bounds::new(width, height);
        let mut cells = (0..height)
            .flat_map(|y| {
                let row = (0..width).map(move |x| Position::new(x, y));
                if y % 2 == 0 {
                    row.collect::<Vec<_>>()
                } else {
                    row.rev().collect::<Vec<_>>()
                }
            })
            .filter(|p| !holes.contains(p))
            .collect::<VecDeque<_>>();
        let head = cells.pop_back().expect("grid should not be empty");
        let mut snake = Snake::new(head, Direction::North, bounds);
        snake.size = cells.len() + 1;
        snake.body = cells;
        snake
    }

    #[rstest]
    #[case(5, 5)]
    #[case(20, 20)]
    #[case(3, 40)]
    fn placement_avoids_snake(#[case] width: u16, #[case] height: u16) {
        let bounds = Bounds::new(width, height);
        let snake = Snake::new(bounds.center(), Direction::North, bounds);
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        for _ in 0..1000 {
            let (pos, _) = place_food(&mut rng, bounds, &snake).unwrap();
            assert!(pos.x < bounds.width && pos.y < bounds.height);
            assert!(!snake.occupies(pos));
        }
    }

    #[test]
    fn crowded_grid_falls_back_to_scan() {
        let hole = Position::new(2, 3);
        let snake = filling_snake(5, 5, &[hole]);
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        for _ in 0..50 {
            let (pos, _) = place_food(&mut rng, Bounds::new(5, 5), &snake).unwrap();
            assert_eq!(pos, hole);
        }
    }

    #[test]
    fn full_grid_has_no_placement() {
        let snake = filling_snake(5, 5, &[]);
        assert_eq!(snake.len(), 25);
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        assert_eq!(place_food(&mut rng, Bounds::new(5, 5), &snake), None);
    }

    #[test]
    fn hazard_rate_is_half() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let trials = 100_000;
        let hazardous = (0..trials)
            .filter(|_| Hazard::roll(&mut rng).is_hazardous())
            .count();
        assert!(
            (47_000..=53_000).contains(&hazardous),
            "{hazardous} of {trials} rolls were hazardous"
        );
    }

    #[test]
    fn replace_bumps_generation() {
        let cell = FoodCell::new();
        let g1 = cell.replace(Position::new(1, 2), Hazard::Hazardous);
        let g2 = cell.replace(Position::new(3, 4), Hazard::Safe);
        assert_ne!(g1, g2);
        assert_eq!(
            cell.get(),
            Food {
                pos: Position::new(3, 4),
                hazard: Hazard::Safe,
                generation: g2,
            }
        );
    }

    #[test]
    fn expire_current_generation() {
        let cell = FoodCell::new();
        let generation = cell.replace(Position::new(1, 2), Hazard::Hazardous);
        assert!(cell.expire(generation));
        assert_eq!(cell.get().hazard, Hazard::Safe);
        assert_eq!(cell.get().pos, Position::new(1, 2));
        assert!(!cell.expire(generation));
    }

    #[test]
    fn expire_stale_generation() {
        let cell = FoodCell::new();
        let old = cell.replace(Position::new(1, 2), Hazard::Hazardous);
        let _ = cell.replace(Position::new(3, 4), Hazard::Safe);
        let new = cell.replace(Position::new(5, 6), Hazard::Hazardous);
        assert!(!cell.expire(old));
        assert_eq!(cell.get().hazard, Hazard::Hazardous);
        assert!(cell.expire(new));
        assert_eq!(cell.get().hazard, Hazard::Safe);
    }

    #[test]
    fn clones_share_food() {
        let cell = FoodCell::new();
        let other = cell.clone();
        let generation = cell.replace(Position::new(1, 2), Hazard::Hazardous);
        assert_eq!(other.get().generation, generation);
        assert!(other.expire(generation));
        assert_eq!(cell.get().hazard, Hazard::Safe);
    }
}
