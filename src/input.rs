use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::board::Direction;

/// What a key press asks the game to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Quit,
    /// Not a move; the key is dropped before it reaches the board.
    Ignore,
}

/// Figure out if the user is trying to escape the game, as raw mode stops all the usual suspects
/// from working
fn is_exit_request(key_event: KeyEvent) -> bool {
    if key_event.code == KeyCode::Esc {
        return true;
    }

    key_event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key_event.code, KeyCode::Char('c' | 'd'))
}

pub fn command_for(key_event: KeyEvent) -> Command {
    if is_exit_request(key_event) {
        return Command::Quit;
    }
    if key_event.kind != KeyEventKind::Press {
        return Command::Ignore;
    }

    match key_event.code {
        KeyCode::Up => Command::Move(Direction::Up),
        KeyCode::Down => Command::Move(Direction::Down),
        KeyCode::Left => Command::Move(Direction::Left),
        KeyCode::Right => Command::Move(Direction::Right),
        // Letters work in either case.
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Command::Move(Direction::Up),
            's' => Command::Move(Direction::Down),
            'a' => Command::Move(Direction::Left),
            'd' => Command::Move(Direction::Right),
            'q' => Command::Quit,
            _ => Command::Ignore,
        },
        _ => Command::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Command {
        command_for(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn letters_and_arrows_move() {
        assert_eq!(press(KeyCode::Char('a')), Command::Move(Direction::Left));
        assert_eq!(press(KeyCode::Char('D')), Command::Move(Direction::Right));
        assert_eq!(press(KeyCode::Char('s')), Command::Move(Direction::Down));
        assert_eq!(press(KeyCode::Char('W')), Command::Move(Direction::Up));
        assert_eq!(press(KeyCode::Up), Command::Move(Direction::Up));
        assert_eq!(press(KeyCode::Left), Command::Move(Direction::Left));
    }

    #[test]
    fn exit_keys_quit() {
        assert_eq!(press(KeyCode::Char('q')), Command::Quit);
        assert_eq!(press(KeyCode::Char('Q')), Command::Quit);
        assert_eq!(press(KeyCode::Esc), Command::Quit);
        assert_eq!(
            command_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Command::Quit
        );
        assert_eq!(
            command_for(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Command::Quit
        );
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(press(KeyCode::Char('x')), Command::Ignore);
        assert_eq!(press(KeyCode::Enter), Command::Ignore);
        assert_eq!(
            command_for(KeyEvent::new_with_kind(
                KeyCode::Char('a'),
                KeyModifiers::NONE,
                KeyEventKind::Release
            )),
            Command::Ignore
        );
    }
}
