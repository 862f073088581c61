use crossterm::{
    cursor::{Hide, MoveTo, Show},
    style::{Attribute, Color, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    QueueableCommand,
};
use std::io::Write;

use crate::board::{separator, wall, Board, Tile, ENTRY_DIGITS, SIZE};

/// Top-left corner of the grid on screen.
const ORIGIN: (u16, u16) = (5, 3);
const GRID_WIDTH: u16 = (SIZE * (ENTRY_DIGITS + 3) + 1) as u16;
const GRID_HEIGHT: u16 = (SIZE * 4 + 1) as u16;
const HELP: &str = "wasd / arrows to move, q to quit";
const TOO_SMALL: &str = "Window too small to draw the game board";

/// Background and text darkness for each tile, starting from 2.
static PALETTE: [(u8, u8, u8, bool); 17] = [
    (238, 228, 218, true),  // 2
    (237, 224, 200, true),  // 4
    (242, 177, 121, false), // 8
    (245, 149, 99, false),  // 16
    (246, 124, 95, false),  // 32
    (246, 94, 59, false),   // 64
    (237, 207, 114, true),  // 128
    (237, 204, 97, false),  // 256
    (237, 200, 80, false),  // 512
    (237, 197, 63, false),  // 1024
    (237, 194, 68, false),  // 2048
    (181, 134, 180, false), // 4096
    (168, 97, 171, false),  // 8192
    (160, 72, 163, false),  // 16 384
    (128, 0, 128, false),   // 32 768
    (96, 0, 70, false),     // 65 536
    (60, 58, 50, false),    // 131 072
];

fn tile_colors(tile: Tile) -> (Color, bool) {
    let index = usize::from(tile.exponent() - 1).min(PALETTE.len() - 1);
    let (r, g, b, is_dark) = PALETTE[index];
    (Color::Rgb { r, g, b }, is_dark)
}

/// A wrapper around crossterm + stdout that puts boards on the screen
pub struct Renderer<Output: Write> {
    output: Output,
    size: (u16, u16),
}

impl<Output: Write> Renderer<Output> {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor.
    pub fn new(output: Output) -> crossterm::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        // From here on Drop restores the terminal.
        let mut renderer = Renderer {
            output,
            size: (0, 0),
        };
        renderer.output.queue(EnterAlternateScreen)?.queue(Hide)?;
        renderer.resize(crossterm::terminal::size()?);
        Ok(renderer)
    }

    /// Handle a resize event - the board still has to be redrawn afterwards.
    pub fn resize(&mut self, new_size: (u16, u16)) {
        self.size = new_size;
    }

    fn draw_cell(&mut self, cell: Option<Tile>) -> crossterm::Result<()> {
        let Some(tile) = cell else {
            write!(self.output, "{:width$}", "", width = ENTRY_DIGITS)?;
            return Ok(());
        };

        let (bg, is_dark) = tile_colors(tile);
        self.output.queue(SetBackgroundColor(bg))?;
        if is_dark {
            self.output.queue(SetForegroundColor(Color::Black))?;
        } else {
            self.output
                .queue(SetForegroundColor(Color::White))?
                .queue(SetAttribute(Attribute::Bold))?;
        }
        write!(self.output, "{:>width$}", tile.value(), width = ENTRY_DIGITS)?;
        self.output
            .queue(SetAttribute(Attribute::Reset))?
            .queue(ResetColor)?;
        Ok(())
    }

    fn draw_line(&mut self, y: u16, line: &str) -> crossterm::Result<()> {
        self.output.queue(MoveTo(ORIGIN.0, y))?;
        write!(self.output, "{}", line)?;
        Ok(())
    }

    fn fits(&self) -> bool {
        self.size.0 >= ORIGIN.0 + GRID_WIDTH && self.size.1 >= ORIGIN.1 + GRID_HEIGHT + 2
    }

    /// Draw the current board on the screen, or a notice if the window is too small for it.
    pub fn draw_board(&mut self, board: &Board) -> crossterm::Result<()> {
        self.output.queue(Clear(ClearType::All))?;
        if !self.fits() {
            self.output.queue(MoveTo(0, 0))?;
            write!(self.output, "{}", TOO_SMALL)?;
            return self.output.flush();
        }

        let separator = separator();
        let wall = wall();

        for (i, row) in board.rows().iter().enumerate() {
            let y = ORIGIN.1 + 4 * i as u16;
            self.draw_line(y, &separator)?;
            self.draw_line(y + 1, &wall)?;
            self.output.queue(MoveTo(ORIGIN.0, y + 2))?;
            for &cell in row {
                write!(self.output, "| ")?;
                self.draw_cell(cell)?;
                write!(self.output, " ")?;
            }
            write!(self.output, "|")?;
            self.draw_line(y + 3, &wall)?;
        }

        let bottom = ORIGIN.1 + GRID_HEIGHT - 1;
        self.draw_line(bottom, &separator)?;
        self.draw_line(bottom + 1, HELP)?;
        self.output.flush()
    }
}

impl<Output: Write> Drop for Renderer<Output> {
    fn drop(&mut self) {
        self.output.queue(Show).ok();
        self.output.queue(LeaveAlternateScreen).ok();
        self.output.flush().ok();
        crossterm::terminal::disable_raw_mode().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offscreen(size: (u16, u16)) -> Renderer<Vec<u8>> {
        Renderer {
            output: Vec::new(),
            size,
        }
    }

    #[test]
    fn every_reachable_tile_has_a_color() {
        for exponent in 1..=17u32 {
            let tile = Tile::from_value(1 << exponent).unwrap();
            let (color, _) = tile_colors(tile);
            assert!(matches!(color, Color::Rgb { .. }));
        }
        assert!(tile_colors(Tile::TWO).1);
        assert!(!tile_colors(Tile::from_value(2048).unwrap()).1);
    }

    #[test]
    fn draws_grid_values_and_help() {
        let board =
            Board::from_values([[2, 0, 0, 0], [0, 2048, 0, 0], [0; SIZE], [0, 0, 0, 4]]).unwrap();
        let mut renderer = offscreen((80, 30));
        renderer.draw_board(&board).unwrap();

        let screen = String::from_utf8_lossy(&renderer.output).into_owned();
        assert!(screen.contains("+--------+--------+--------+--------+"));
        assert!(screen.contains("|        |        |        |        |"));
        assert!(screen.contains("  2048"));
        assert!(screen.contains("     4"));
        assert!(screen.contains(HELP));
    }

    #[test]
    fn drop_restores_cursor_and_main_screen() {
        let mut screen = Vec::new();
        {
            let mut renderer = Renderer {
                output: &mut screen,
                size: (80, 30),
            };
            renderer.draw_board(&Board::new()).unwrap();
        }
        let screen = String::from_utf8_lossy(&screen).into_owned();
        assert!(screen.ends_with("\x1b[?25h\x1b[?1049l"));
    }

    #[test]
    fn small_window_shows_notice_until_resized() {
        let mut renderer = offscreen((20, 10));
        renderer.draw_board(&Board::new()).unwrap();
        let screen = String::from_utf8_lossy(&renderer.output).into_owned();
        assert!(screen.contains(TOO_SMALL));
        assert!(!screen.contains(HELP));

        renderer.output.clear();
        renderer.resize((80, 30));
        renderer.draw_board(&Board::new()).unwrap();
        let screen = String::from_utf8_lossy(&renderer.output).into_owned();
        assert!(!screen.contains(TOO_SMALL));
        assert!(screen.contains(HELP));
    }
}
