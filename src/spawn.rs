use log::debug;
use rand::Rng;

use crate::board::{Board, Tile};

/// Chance, out of 100, that a new tile is a 4 rather than a 2.
pub const SPAWN_RATE: u32 = 10;

/// Where a new tile landed, and the roll that put it there.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Spawn {
    pub row: usize,
    pub col: usize,
    pub tile: Tile,
    pub roll: u32,
}

impl Board {
    /// Drop a new tile into a random empty square.
    ///
    /// Panics if the board is full; callers only spawn after a move that changed the board.
    pub fn spawn(&mut self, rng: &mut impl Rng) -> Spawn {
        assert!(self.empty > 0, "cannot spawn a tile into a full board");
        let roll = rng.gen_range(0..self.empty as u32 * 100);
        self.place(roll)
    }

    /// Place a tile using a roll in `0..empty_count * 100`. The roll modulo the number of empty
    /// squares picks the square (row-major), the quotient picks the value.
    pub fn place(&mut self, roll: u32) -> Spawn {
        let slots = self.empty as u32;
        assert!(slots > 0, "cannot spawn a tile into a full board");
        assert!(roll < slots * 100, "spawn roll {} out of range", roll);

        let slot = (roll % slots) as usize;
        let tile = if roll / slots < SPAWN_RATE {
            Tile::FOUR
        } else {
            Tile::TWO
        };
        let (row, col) = self
            .empty_cells()
            .nth(slot)
            .expect("empty count out of sync with the board");

        self.rows[row][col] = Some(tile);
        self.empty -= 1;
        debug!(
            "insert {} at ({}x{}) [slots={}]",
            tile.value(),
            row,
            col,
            self.empty
        );

        Spawn {
            row,
            col,
            tile,
            roll,
        }
    }
}
