use std::fmt;

/// Width and height of the board.
pub const SIZE: usize = 4;

/// Digits reserved for a single entry when the board is printed.
pub(crate) const ENTRY_DIGITS: usize = 6;

/// A single occupied square, stored as the base-2 exponent of its value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tile(u8);

/// A whole board of 2048, plus a cached count of its empty squares.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) rows: [[Option<Tile>; SIZE]; SIZE],
    pub(crate) empty: usize,
}

/// A user move that can be applied to a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid tile value {value} at ({row}, {col}): must be 0 or a power of two from 2 to {}", Tile::MAX_VALUE)]
    InvalidTile { row: usize, col: usize, value: u32 },
}

impl Tile {
    pub const TWO: Tile = Tile(1);
    pub const FOUR: Tile = Tile(2);

    /// Largest tile a board may be built with. A full board of these can merge all the way down
    /// to a single tile and still fit in a `u32`.
    pub const MAX_VALUE: u32 = 1 << 27;

    pub fn from_value(value: u32) -> Option<Self> {
        if (2..=Self::MAX_VALUE).contains(&value) && value.is_power_of_two() {
            Some(Tile(value.trailing_zeros() as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u32 {
        1 << self.0
    }

    pub fn exponent(self) -> u8 {
        self.0
    }

    pub fn double(self) -> Self {
        Tile(self.0 + 1)
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Numeric code written to the event log.
    pub fn code(self) -> u8 {
        match self {
            Direction::Left => 1,
            Direction::Right => 2,
            Direction::Down => 3,
            Direction::Up => 4,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new, completely empty board.
    pub fn new() -> Self {
        Board {
            rows: [[None; SIZE]; SIZE],
            empty: SIZE * SIZE,
        }
    }

    /// Build a board from raw values, where 0 marks an empty square.
    pub fn from_values(values: [[u32; SIZE]; SIZE]) -> Result<Self, BoardError> {
        let mut board = Board::new();
        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let tile =
                    Tile::from_value(value).ok_or(BoardError::InvalidTile { row, col, value })?;
                board.rows[row][col] = Some(tile);
                board.empty -= 1;
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> &[[Option<Tile>; SIZE]; SIZE] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.rows[row][col]
    }

    /// The board as plain numbers, 0 for empty squares.
    pub fn values(&self) -> [[u32; SIZE]; SIZE] {
        self.rows
            .map(|row| row.map(|cell| cell.map_or(0, Tile::value)))
    }

    pub fn empty_count(&self) -> usize {
        self.empty
    }

    /// Empty squares in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| self.rows[row][col].is_none())
    }

    /// The coordinates of one line of the board, ordered from the edge the tiles move towards.
    fn line(direction: Direction, offset: usize) -> [(usize, usize); SIZE] {
        let mut line = [(0, 0); SIZE];
        for (step, coord) in line.iter_mut().enumerate() {
            let i = match direction {
                Direction::Up | Direction::Left => step,
                Direction::Down | Direction::Right => SIZE - 1 - step,
            };
            *coord = match direction {
                Direction::Up | Direction::Down => (i, offset),
                Direction::Left | Direction::Right => (offset, i),
            };
        }
        line
    }

    /// Slide and merge every line towards the edge named by `direction`. Returns whether any
    /// square changed; an unchanged board is left exactly as it was.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let mut changed = false;
        for offset in 0..SIZE {
            let line = Self::line(direction, offset);
            for lead in 0..SIZE - 1 {
                let (row, col) = line[lead];
                for &(next_row, next_col) in &line[lead + 1..] {
                    let Some(next) = self.rows[next_row][next_col] else {
                        continue;
                    };
                    match self.rows[row][col] {
                        Some(candidate) if candidate == next => {
                            // A square merges at most once per move.
                            self.rows[row][col] = Some(candidate.double());
                            self.rows[next_row][next_col] = None;
                            self.empty += 1;
                            changed = true;
                            break;
                        }
                        None => {
                            // Keep scanning: the moved tile may still merge further along.
                            self.rows[row][col] = Some(next);
                            self.rows[next_row][next_col] = None;
                            changed = true;
                        }
                        Some(_) => break,
                    }
                }
            }
        }
        changed
    }

    /// Whether moving in `direction` would change anything.
    pub fn can_move(&self, direction: Direction) -> bool {
        let mut probe = *self;
        probe.apply_move(direction)
    }
}

pub(crate) fn separator() -> String {
    let mut line = String::from("+");
    for _ in 0..SIZE {
        line.push_str(&"-".repeat(ENTRY_DIGITS + 2));
        line.push('+');
    }
    line
}

pub(crate) fn wall() -> String {
    let mut line = String::from("|");
    for _ in 0..SIZE {
        line.push_str(&" ".repeat(ENTRY_DIGITS + 2));
        line.push('|');
    }
    line
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = separator();
        for row in &self.rows {
            writeln!(f, "{}", separator)?;
            for cell in row {
                match cell {
                    Some(tile) => write!(f, "| {:>width$} ", tile.value(), width = ENTRY_DIGITS)?,
                    None => write!(f, "| {:width$} ", "", width = ENTRY_DIGITS)?,
                }
            }
            writeln!(f, "|")?;
        }
        write!(f, "{}", separator)
    }
}
