use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Generation strategy that colors the target and every cell independently at random, then patches one random cell
/// to the target color when the dice left the round without a match.
#[derive(Clone, Debug)]
pub struct RandomRoundGenerator {
    rng: SmallRng,
}

impl RandomRoundGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn pick_color(&mut self) -> Color {
        Color::ALL[self.rng.random_range(0..Color::ALL.len())]
    }

    pub fn generate_round(&mut self, config: &GameConfig) -> Round {
        let target = self.pick_color();
        let mut cells: Vec<Cell> = (0..config.cells)
            .map(|_| Cell::new(self.pick_color()))
            .collect();

        if !cells.iter().any(|cell| cell.color == target) {
            let forced = self.rng.random_range(0..cells.len());
            log::trace!("no cell matched {}, forcing cell {}", target, forced);
            cells[forced].color = target;
        }

        Round::new_unchecked(target, cells)
    }
}

impl RoundGenerator for RandomRoundGenerator {
    fn generate(&mut self, config: &GameConfig) -> Round {
        self.generate_round(config)
    }
}
