// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Saving and loading games.
//!
//! A save file is a header line followed by one line per round:
//!
//! ```text
//! [Chess console] Saved at: Sat Jun  1 12:00:00 2019
//! E2-E4   | E7-E5
//! G1-F3   |
//! ```
//!
//! Loading replays every move through the legality checks. A file that does
//! not parse, or that contains a move which is not legal at that point,
//! is rejected as a whole and the game is reset to a fresh one.
use std::error::Error;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use chrono::prelude::*;
use pest::Parser;

use crate::game::Game;
use crate::legality::IllegalMove;
use crate::notation::{Notation, NotationError};

pub const HEADER_PREFIX: &str = "[Chess console] Saved at: ";

#[derive(Parser)]
#[grammar = "save.pest"]
struct SaveParser;

#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Syntax(String),
    Notation {
        ply: usize,
        error: NotationError,
    },
    Illegal {
        ply: usize,
        notation: String,
        error: IllegalMove,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "could not read save file: {}", err),
            LoadError::Syntax(msg) => write!(f, "save file has invalid lines: {}", msg),
            LoadError::Notation { ply, error } => {
                write!(f, "move {} is not valid notation: {}", ply + 1, error)
            }
            LoadError::Illegal {
                ply,
                notation,
                error,
            } => write!(f, "move {} ({}) is illegal: {}", ply + 1, notation, error),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Notation { error, .. } => Some(error),
            LoadError::Illegal { error, .. } => Some(error),
            LoadError::Syntax(_) => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> LoadError {
        LoadError::Io(err)
    }
}

/// Writes the game's history in save file format.
pub fn write_game<W: Write>(game: &Game, writer: &mut W) -> io::Result<()> {
    let now = Local::now();
    writeln!(writer, "{}{}", HEADER_PREFIX, now.format("%a %b %e %H:%M:%S %Y"))?;
    for round in game.ledger().rounds() {
        writeln!(writer, "{} | {}", round.white, round.black)?;
    }

    Ok(())
}

pub fn save_to_file<P: AsRef<Path>>(game: &Game, path: P) -> io::Result<()> {
    let mut file = fs::File::create(path.as_ref())?;
    write_game(game, &mut file)?;
    info!("saved {} moves to {}", game.ledger().len(), path.as_ref().display());
    Ok(())
}

/// The moves recorded in a save file, in the order they were played.
pub fn parse_moves(text: &str) -> Result<Vec<String>, LoadError> {
    let file = SaveParser::parse(Rule::save_file, text)
        .map_err(|err| LoadError::Syntax(err.to_string()))?;

    let mut moves = Vec::new();
    for pair in file.flatten() {
        if pair.as_rule() == Rule::half {
            moves.push(pair.as_str().to_owned());
        }
    }

    Ok(moves)
}

/// Reads and replays a save file. Any failure, including a file that cannot
/// be read, resets the game to the initial position.
pub fn load_from_file<P: AsRef<Path>>(game: &mut Game, path: P) -> Result<(), LoadError> {
    match fs::read_to_string(path.as_ref()) {
        Ok(text) => game.load(&text),
        Err(err) => {
            warn!("could not read {}, starting a new game: {}", path.as_ref().display(), err);
            *game = Game::new();
            Err(err.into())
        }
    }
}

impl Game {
    /// Replaces this game with the one recorded in `text`. On failure the
    /// game is reset to the initial position.
    pub fn load(&mut self, text: &str) -> Result<(), LoadError> {
        match replay(text) {
            Ok(game) => {
                info!("loaded game with {} moves", game.ledger().len());
                *self = game;
                Ok(())
            }
            Err(err) => {
                warn!("discarding loaded game: {}", err);
                *self = Game::new();
                Err(err)
            }
        }
    }
}

fn replay(text: &str) -> Result<Game, LoadError> {
    let mut game = Game::new();
    for (ply, text) in parse_moves(text)?.iter().enumerate() {
        let notation =
            Notation::parse(text).map_err(|error| LoadError::Notation { ply, error })?;
        game.play(notation.from, notation.to, notation.promotion)
            .map_err(|error| LoadError::Illegal {
                ply,
                notation: notation.to_string(),
                error,
            })?;
    }

    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rounds() {
        let text = "[Chess console] Saved at: Sat Jun  1 12:00:00 2019\n\
                    E2-E4   | E7-E5  \n\
                    G1-F3   | \n";
        assert_eq!(
            vec!["E2-E4", "E7-E5", "G1-F3"],
            parse_moves(text).unwrap()
        );
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let text = "[header]\n\n[another comment]\nE2-E4 | E7-E5";
        assert_eq!(vec!["E2-E4", "E7-E5"], parse_moves(text).unwrap());
    }

    #[test]
    fn parse_rejects_garbage() {
        match parse_moves("[header]\nthis is not a move\n") {
            Err(LoadError::Syntax(_)) => {}
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn header_written() {
        let mut game = Game::new();
        game.play(crate::Square::E2, crate::Square::E4, None).unwrap();
        let mut buf = Vec::new();
        write_game(&game, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with(HEADER_PREFIX));
        assert_eq!(Some("E2-E4   | "), lines.next());
        assert_eq!(None, lines.next());
    }
}
