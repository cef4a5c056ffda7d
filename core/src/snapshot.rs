use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything the presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub target: Color,
    pub cells: Vec<Color>,
    pub score: Count,
    pub high_score: Count,
    pub time_left: Count,
    pub game_over: bool,
    pub round_number: u64,
}

impl From<&Session> for Snapshot {
    fn from(session: &Session) -> Self {
        let round = session.round();
        Self {
            target: round.target(),
            cells: round.cells().iter().map(|cell| cell.color).collect(),
            score: session.score(),
            high_score: session.high_score(),
            time_left: session.time_left(),
            game_over: session.is_over(),
            round_number: session.round_number(),
        }
    }
}
