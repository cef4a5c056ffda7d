use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Running,
    GameOver,
}

impl SessionState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Running
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Ignored,
    Ticked,
    Expired,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Ignored => false,
            Self::Ticked => true,
            Self::Expired => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TapOutcome {
    Ignored,
    Hit,
    Miss,
}

impl TapOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Ignored => false,
            Self::Hit => true,
            Self::Miss => true,
        }
    }
}

/// Score, countdown and current round of one player.
///
/// Every transition takes the round generator explicitly, so the session itself is plain data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSession")]
pub struct Session {
    config: GameConfig,
    score: Count,
    high_score: Count,
    time_left: Count,
    round: Round,
    round_number: u64,
    state: SessionState,
}

#[derive(Deserialize)]
struct RawSession {
    config: GameConfig,
    score: Count,
    high_score: Count,
    time_left: Count,
    round: Round,
    round_number: u64,
    state: SessionState,
}

impl TryFrom<RawSession> for Session {
    type Error = GameError;

    fn try_from(raw: RawSession) -> Result<Self> {
        let round = Round::new(&raw.config, raw.round.target(), raw.round.cells().to_vec())?;
        Ok(Self {
            config: raw.config,
            score: raw.score,
            high_score: raw.high_score.max(raw.score),
            time_left: raw.time_left,
            round,
            round_number: raw.round_number,
            state: raw.state,
        })
    }
}

impl Session {
    pub fn new(config: GameConfig, generator: &mut impl RoundGenerator) -> Self {
        let round = generator.generate(&config);
        Self {
            config,
            score: 0,
            high_score: 0,
            time_left: config.duration,
            round,
            round_number: 1,
            state: Default::default(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> Count {
        self.score
    }

    pub fn high_score(&self) -> Count {
        self.high_score
    }

    pub fn time_left(&self) -> Count {
        self.time_left
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    /// How many rounds this session has generated, including the current one.
    pub fn round_number(&self) -> u64 {
        self.round_number
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn tick(&mut self, generator: &mut impl RoundGenerator) -> TickOutcome {
        if !self.accepts_input() {
            return TickOutcome::Ignored;
        }

        self.time_left = self.time_left.saturating_sub(1);
        self.next_round(generator);
        log::debug!("tick, {} left", self.time_left);

        if self.time_left == 0 {
            self.state = SessionState::GameOver;
            log::debug!("game over, score {} (best {})", self.score, self.high_score);
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked
        }
    }

    pub fn tap(&mut self, index: usize, generator: &mut impl RoundGenerator) -> TapOutcome {
        if !self.accepts_input() {
            return TapOutcome::Ignored;
        }

        let Some(cell) = self.round.get(index) else {
            log::warn!("tap outside of grid: {}", index);
            return TapOutcome::Ignored;
        };

        let outcome = if self.round.is_match(cell) {
            self.score += 1;
            self.high_score = self.high_score.max(self.score);
            log::debug!("hit {} at {}, score {}", cell.color, index, self.score);
            TapOutcome::Hit
        } else {
            log::debug!("miss at {}: {} is not {}", index, cell.color, self.round.target());
            TapOutcome::Miss
        };

        self.next_round(generator);
        outcome
    }

    pub fn restart(&mut self, generator: &mut impl RoundGenerator) {
        self.score = 0;
        self.time_left = self.config.duration;
        self.state = SessionState::Running;
        self.next_round(generator);
        log::debug!("restart, best so far {}", self.high_score);
    }

    fn accepts_input(&self) -> bool {
        self.state.is_running() && self.time_left > 0
    }

    fn next_round(&mut self, generator: &mut impl RoundGenerator) {
        self.round = generator.generate(&self.config);
        self.round_number += 1;
    }
}
