use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use env_logger::Env;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use term_2048::{command_for, Command, EventLog, Game, Renderer};

#[derive(Debug, Parser)]
#[command(author, version, about = "Play 2048 in the terminal")]
struct Cli {
    /// Seed for tile spawns, to replay the same game (random when omitted)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Where to record board size, moves and spawns
    #[arg(long, value_name = "PATH", default_value = "log.txt")]
    event_log: PathBuf,

    /// Don't write the event log at all
    #[arg(long)]
    no_event_log: bool,

    /// Write debug diagnostics to this file (filtered by RUST_LOG, default "debug")
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,
}

/// Diagnostics only go to a file: anything on stderr would land in the middle of the board.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create debug log {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug_log.as_deref())?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let events = if cli.no_event_log {
        None
    } else {
        let log = EventLog::create(&cli.event_log)
            .with_context(|| format!("failed to create event log {}", cli.event_log.display()))?;
        Some(log)
    };

    let mut game = Game::with_observer(&mut rng, events);

    let stdout = std::io::stdout();
    let mut renderer = Renderer::new(stdout.lock()).context("failed to set up the terminal")?;
    renderer.draw_board(game.board())?;

    loop {
        match crossterm::event::read()? {
            Event::Key(key_event) => match command_for(key_event) {
                Command::Quit => break,
                Command::Move(direction) => {
                    if game.apply_move(direction, &mut rng) {
                        renderer.draw_board(game.board())?;
                    }
                }
                Command::Ignore => {}
            },
            Event::Resize(columns, rows) => {
                renderer.resize((columns, rows));
                renderer.draw_board(game.board())?;
            }
            _ => {}
        }
    }

    info!("quit after last move {:?}", game.last_move());
    Ok(())
}
