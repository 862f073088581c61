use log::{debug, info};
use rand::Rng;

use crate::board::{Board, Direction, SIZE};
use crate::spawn::Spawn;

/// Receives notifications as a game is played. Observers see every event in order but cannot
/// change the game.
pub trait Observer {
    fn started(&mut self, _size: usize) {}

    /// A move changed the board. Called before the tile it earns is spawned.
    fn moved(&mut self, _direction: Direction, _board: &Board) {}

    fn spawned(&mut self, _spawn: &Spawn, _board: &Board) {}
}

impl Observer for () {}

impl<O: Observer> Observer for Option<O> {
    fn started(&mut self, size: usize) {
        if let Some(observer) = self {
            observer.started(size);
        }
    }

    fn moved(&mut self, direction: Direction, board: &Board) {
        if let Some(observer) = self {
            observer.moved(direction, board);
        }
    }

    fn spawned(&mut self, spawn: &Spawn, board: &Board) {
        if let Some(observer) = self {
            observer.spawned(spawn, board);
        }
    }
}

/// One game session: the board, the last move that changed it, and whoever is watching.
pub struct Game<O: Observer = ()> {
    board: Board,
    last_move: Option<Direction>,
    observer: O,
}

impl Game {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::with_observer(rng, ())
    }
}

impl<O: Observer> Game<O> {
    /// Start a game on an empty board with a single tile spawned.
    pub fn with_observer(rng: &mut impl Rng, observer: O) -> Self {
        let mut game = Self::from_board(Board::new(), observer);
        game.spawn(rng);
        info!("new {}x{} game", SIZE, SIZE);
        game
    }

    /// Pick up from an existing board without spawning anything.
    pub fn from_board(board: Board, mut observer: O) -> Self {
        observer.started(SIZE);
        Game {
            board,
            last_move: None,
            observer,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The most recent move that changed the board.
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Apply a move, spawning a new tile if the board changed. Returns whether it did.
    pub fn apply_move(&mut self, direction: Direction, rng: &mut impl Rng) -> bool {
        let changed = self.board.apply_move(direction);
        debug!(
            "move {:?}: changed={} slots={}",
            direction,
            changed,
            self.board.empty_count()
        );
        if !changed {
            return false;
        }

        self.last_move = Some(direction);
        self.observer.moved(direction, &self.board);
        self.spawn(rng);
        true
    }

    fn spawn(&mut self, rng: &mut impl Rng) -> Spawn {
        let spawn = self.board.spawn(rng);
        self.observer.spawned(&spawn, &self.board);
        spawn
    }
}
