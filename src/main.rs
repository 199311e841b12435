mod food;
mod game;
mod session;
mod snake;
mod term;

use std::process::exit;

use thiserror::Error;

pub type GridInt = i32;
pub type Cell = (GridInt, GridInt);
pub type TermInt = u16;
pub type TermCoords = (TermInt, TermInt);

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal failure: {0}")]
    Term(#[from] crossterm::ErrorKind),
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("terminal is {cols}x{rows}, the playfield needs at least {need_cols}x{need_rows}")]
    TerminalTooSmall {
        cols: TermInt,
        rows: TermInt,
        need_cols: TermInt,
        need_rows: TermInt,
    },
}

fn main() {
    env_logger::init();

    let mut game = game::SnakeGame::new();
    if let Err(err) = game.run() {
        eprintln!("fatal: {err}");
        exit(1);
    }
}
