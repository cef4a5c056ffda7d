#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use color::*;
pub use error::*;
pub use game_loop::*;
pub use generator::*;
pub use round::*;
pub use schedule::*;
pub use session::*;
pub use snapshot::*;

mod color;
mod error;
mod game_loop;
mod generator;
mod round;
mod schedule;
mod session;
mod snapshot;

/// Count type used for scores, high scores and the countdown.
pub type Count = u32;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of cells in every round.
    pub cells: u8,
    /// Countdown length in ticks.
    pub duration: Count,
    pub tick_period: Duration,
}

impl GameConfig {
    pub const DEFAULT_CELLS: u8 = 9;
    pub const DEFAULT_DURATION: Count = 30;
    pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(1500);

    pub const fn new_unchecked(cells: u8, duration: Count, tick_period: Duration) -> Self {
        Self {
            cells,
            duration,
            tick_period,
        }
    }

    pub fn new(cells: u8, duration: Count, tick_period: Duration) -> Self {
        let cells = cells.max(1);
        let duration = duration.max(1);
        let tick_period = tick_period.max(Duration::from_millis(1));
        Self::new_unchecked(cells, duration, tick_period)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(
            Self::DEFAULT_CELLS,
            Self::DEFAULT_DURATION,
            Self::DEFAULT_TICK_PERIOD,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_classic_game() {
        let config = GameConfig::default();

        assert_eq!(config.cells, 9);
        assert_eq!(config.duration, 30);
        assert_eq!(config.tick_period, Duration::from_millis(1500));
    }

    #[test]
    fn new_config_clamps_degenerate_values() {
        let config = GameConfig::new(0, 0, Duration::ZERO);

        assert_eq!(config.cells, 1);
        assert_eq!(config.duration, 1);
        assert_eq!(config.tick_period, Duration::from_millis(1));
    }
}
