use std::{
    fmt,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use log::warn;

use crate::board::{Board, Direction};
use crate::game::Observer;
use crate::spawn::Spawn;

/// Plaintext record of a game, enough to replay it: the board size, then every move code and the
/// empty-square count and roll behind every spawn.
pub struct EventLog<W: Write> {
    /// Dropped after the first failed write.
    output: Option<W>,
}

impl EventLog<BufWriter<File>> {
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(output: W) -> Self {
        EventLog {
            output: Some(output),
        }
    }

    /// The underlying writer, unless a write to it failed.
    pub fn into_inner(self) -> Option<W> {
        self.output
    }

    fn record(&mut self, line: fmt::Arguments<'_>, flush: bool) {
        let Some(output) = self.output.as_mut() else {
            return;
        };
        let result = output.write_fmt(line).and_then(|()| {
            if flush {
                output.flush()
            } else {
                Ok(())
            }
        });
        if let Err(err) = result {
            warn!("event log disabled after write failure: {}", err);
            self.output = None;
        }
    }
}

impl<W: Write> Observer for EventLog<W> {
    fn started(&mut self, size: usize) {
        self.record(format_args!("{},{}\n", size, size), false);
    }

    fn moved(&mut self, direction: Direction, _board: &Board) {
        self.record(format_args!("{}\n", direction.code()), false);
    }

    fn spawned(&mut self, spawn: &Spawn, board: &Board) {
        self.record(
            format_args!("{},{}\n", board.empty_count(), spawn.roll),
            true,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SIZE;
    use crate::game::Game;
    use rand::{rngs::StdRng, SeedableRng};

    fn lines(log: EventLog<Vec<u8>>) -> Vec<String> {
        let bytes = log.into_inner().unwrap();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn logs_size_then_first_spawn() {
        let mut rng = StdRng::seed_from_u64(11);
        let game = Game::with_observer(&mut rng, EventLog::new(Vec::new()));
        let lines = lines(game.into_observer());

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "4,4");
        let (slots, roll) = lines[1].split_once(',').unwrap();
        assert_eq!(slots, "15");
        assert!(roll.parse::<u32>().unwrap() < 16 * 100);
    }

    #[test]
    fn logs_move_codes_before_spawns() {
        let mut rng = StdRng::seed_from_u64(5);
        let board = Board::from_values([[2, 0, 0, 2], [0; SIZE], [0; SIZE], [0; SIZE]]).unwrap();
        let mut game = Game::from_board(board, EventLog::new(Vec::new()));

        assert!(game.apply_move(Direction::Right, &mut rng));
        let lines = lines(game.into_observer());

        assert_eq!(lines[0], "4,4");
        assert_eq!(lines[1], "2");
        assert!(lines[2].starts_with("14,"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn direction_codes() {
        let codes: Vec<u8> = [
            Direction::Left,
            Direction::Right,
            Direction::Down,
            Direction::Up,
        ]
        .iter()
        .map(|d| d.code())
        .collect();
        assert_eq!(codes, [1, 2, 3, 4]);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_disables_log_without_stopping_game() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = Game::with_observer(&mut rng, EventLog::new(Broken));
        for direction in Direction::ALL {
            game.apply_move(direction, &mut rng);
        }
        assert!(game.board().empty_count() < SIZE * SIZE);
        assert!(game.into_observer().into_inner().is_none());
    }
}
