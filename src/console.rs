// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The interactive console. Reads one command per line and redraws the game
//! after each one.
use std::io::{self, BufRead, Write};

use crate::game::{Game, GameStatus};
use crate::notation::Notation;
use crate::save;

/// How many of the most recent rounds are shown under the board.
const SHOWN_ROUNDS: usize = 5;

const HELP: &str = "commands:
  n, new                start a new game
  m, move E2 E4 [Q]     move a piece, optionally naming a promotion piece
  u, undo               take back the last move
  s, save FILE          save the game
  l, load FILE          load a saved game
  q, quit               leave";

pub struct Session {
    game: Game,
}

impl Session {
    pub fn new(game: Game) -> Session {
        Session { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn run<R, W>(&mut self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        self.print_situation(&mut writer)?;
        prompt(&mut writer)?;
        for maybe_line in reader.lines() {
            let line = maybe_line?;
            let components: Vec<_> = line.split_whitespace().collect();
            let (command, args) = components.split_first().unwrap_or((&"", &[]));
            match command.to_ascii_lowercase().as_str() {
                "n" | "new" => {
                    self.game = Game::new();
                    info!("started a new game");
                    writeln!(&mut writer, "New game started.")?;
                }
                "m" | "move" => self.handle_move(&mut writer, args)?,
                "u" | "undo" => match self.game.undo() {
                    Ok(()) => writeln!(&mut writer, "Move taken back.")?,
                    Err(err) => writeln!(&mut writer, "[Invalid] {}", err)?,
                },
                "s" | "save" => self.handle_save(&mut writer, args)?,
                "l" | "load" => self.handle_load(&mut writer, args)?,
                "h" | "help" | "?" => {
                    writeln!(&mut writer, "{}", HELP)?;
                    prompt(&mut writer)?;
                    continue;
                }
                "q" | "quit" => break,
                "" => {
                    prompt(&mut writer)?;
                    continue;
                }
                _ => writeln!(&mut writer, "unrecognized command, try 'help'")?,
            }

            self.print_situation(&mut writer)?;
            prompt(&mut writer)?;
        }

        Ok(())
    }

    fn handle_move<W: Write>(&mut self, w: &mut W, args: &[&str]) -> io::Result<()> {
        let text = match args {
            [single] => single.to_string(),
            [from, to] => format!("{}-{}", from, to),
            [from, to, promotion] => format!("{}-{}={}", from, to, promotion),
            _ => {
                writeln!(w, "[Invalid] usage: move E2 E4 [Q]")?;
                return Ok(());
            }
        };

        let notation = match Notation::parse(&text) {
            Ok(notation) => notation,
            Err(err) => return writeln!(w, "[Invalid] {}", err),
        };

        match self
            .game
            .play(notation.from, notation.to, notation.promotion)
        {
            Ok(report) => {
                if let Some(piece) = report.captured {
                    writeln!(w, "{} captured {}.", report.mov.piece.color.name(), piece)?;
                }
            }
            Err(err) => writeln!(w, "[Invalid] {}", err)?,
        }

        Ok(())
    }

    fn handle_save<W: Write>(&mut self, w: &mut W, args: &[&str]) -> io::Result<()> {
        let path = match args.first() {
            Some(path) => path,
            None => return writeln!(w, "[Invalid] usage: save FILE"),
        };

        match save::save_to_file(&self.game, path) {
            Ok(()) => writeln!(w, "Game saved to {}.", path),
            Err(err) => writeln!(w, "[Invalid] could not save to {}: {}", path, err),
        }
    }

    fn handle_load<W: Write>(&mut self, w: &mut W, args: &[&str]) -> io::Result<()> {
        let path = match args.first() {
            Some(path) => path,
            None => return writeln!(w, "[Invalid] usage: load FILE"),
        };

        match save::load_from_file(&mut self.game, path) {
            Ok(()) => writeln!(w, "Game loaded from {}.", path),
            Err(err) => writeln!(w, "[Invalid] can't load this game: {}", err),
        }
    }

    fn print_situation<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        writeln!(w)?;
        write!(w, "{}", self.game.board())?;

        let rounds = self.game.ledger().rounds();
        if !rounds.is_empty() {
            writeln!(w, "Last moves:")?;
            let skip = rounds.len().saturating_sub(SHOWN_ROUNDS);
            for (idx, round) in rounds.iter().enumerate().skip(skip) {
                writeln!(w, "{:>3}. {} | {}", idx + 1, round.white, round.black)?;
            }
        }

        let snapshot = self.game.snapshot();
        if !snapshot.white_captured.is_empty() {
            writeln!(w, "Captured white pieces: {}", snapshot.white_captured)?;
        }
        if !snapshot.black_captured.is_empty() {
            writeln!(w, "Captured black pieces: {}", snapshot.black_captured)?;
        }

        let side = self.game.side_to_move();
        match self.game.evaluate() {
            GameStatus::Checkmate { winner } => {
                writeln!(w, "Checkmate! {} wins the game.", winner.name())
            }
            GameStatus::Check(color) => {
                writeln!(w, "{} king is in check. {} to move.", color.name(), side.name())
            }
            GameStatus::Ongoing => writeln!(w, "{} to move.", side.name()),
        }
    }
}

fn prompt<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "> ")?;
    w.flush()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::types::{Color, Square};

    fn run(session: &mut Session, input: &str) -> String {
        let mut output = Vec::new();
        session.run(Cursor::new(input), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn plays_moves() {
        let mut session = Session::new(Game::new());
        let output = run(&mut session, "m e2 e4\nmove E7-E5\nq\n");
        assert_eq!(2, session.game().ledger().len());
        assert_eq!(Color::White, session.game().side_to_move());
        assert!(output.contains("1. E2-E4   | E7-E5"));
    }

    #[test]
    fn reports_invalid_moves() {
        let mut session = Session::new(Game::new());
        let output = run(&mut session, "m e2 e5\nm z9 e4\nm e2\nq\n");
        assert!(session.game().ledger().is_empty());
        assert_eq!(3, output.matches("[Invalid]").count());
    }

    #[test]
    fn undo_and_new() {
        let mut session = Session::new(Game::new());
        run(&mut session, "m e2 e4\nu\n");
        assert!(session.game().ledger().is_empty());
        assert!(session.game().board().is_occupied(Square::E2));

        let output = run(&mut session, "u\n");
        assert!(output.contains("[Invalid] there is no move to undo"));

        run(&mut session, "m d2 d4\nn\n");
        assert!(session.game().ledger().is_empty());
    }

    #[test]
    fn announces_checkmate() {
        let mut session = Session::new(Game::new());
        let output = run(&mut session, "m f2 f3\nm e7 e5\nm g2 g4\nm d8 h4\n");
        assert!(output.contains("Checkmate! Black wins the game."));
        assert!(session.game().is_finished());
    }
}
