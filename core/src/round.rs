use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

/// One tappable square of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub color: Color,
}

impl Cell {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        Self::new(color)
    }
}

/// A target color plus the grid of candidate cells, always solvable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRound")]
pub struct Round {
    target: Color,
    cells: Vec<Cell>,
}

#[derive(Deserialize)]
struct RawRound {
    target: Color,
    cells: Vec<Cell>,
}

impl TryFrom<RawRound> for Round {
    type Error = GameError;

    fn try_from(raw: RawRound) -> Result<Self> {
        Self::checked(raw.target, raw.cells)
    }
}

impl Round {
    pub fn new(config: &GameConfig, target: Color, cells: Vec<Cell>) -> Result<Self> {
        let expected = usize::from(config.cells);
        if cells.len() != expected {
            return Err(GameError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Self::checked(target, cells)
    }

    fn checked(target: Color, cells: Vec<Cell>) -> Result<Self> {
        if !cells.iter().any(|cell| cell.color == target) {
            return Err(GameError::UnsolvableRound);
        }
        Ok(Self::new_unchecked(target, cells))
    }

    pub(crate) const fn new_unchecked(target: Color, cells: Vec<Cell>) -> Self {
        Self { target, cells }
    }

    pub fn target(&self) -> Color {
        self.target
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn is_match(&self, cell: Cell) -> bool {
        cell.color == self.target
    }

    pub fn match_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| self.is_match(cell)).count()
    }
}

impl Index<usize> for Round {
    type Output = Cell;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}
