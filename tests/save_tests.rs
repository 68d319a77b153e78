// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
extern crate chess_rules;
use std::fs;

use chess_rules::save::{self, LoadError};
use chess_rules::{Board, Game, IllegalMove, NotationError, PieceKind, Square};
use pretty_assertions::assert_eq;

fn played_game() -> Game {
    let mut game = Game::new();
    for &(from, to) in &[
        (Square::E2, Square::E4),
        (Square::D7, Square::D5),
        (Square::E4, Square::D5),
        (Square::G8, Square::F6),
        (Square::G1, Square::F3),
        (Square::F6, Square::D5),
        (Square::F1, Square::C4),
        (Square::C8, Square::G4),
    ] {
        game.play(from, to, None).unwrap();
    }

    game.play(Square::E1, Square::G1, None).unwrap();
    game
}

fn write(game: &Game) -> String {
    let mut buf = Vec::new();
    save::write_game(game, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn assert_fresh(game: &Game) {
    assert_eq!(Board::from_start_position(), *game.board());
    assert!(game.ledger().is_empty());
    assert!(!game.can_undo());
}

#[test]
fn saved_game_loads_back() {
    let game = played_game();
    let text = write(&game);
    assert!(text.lines().any(|line| line == "E1-G1   | "));

    let mut loaded = Game::new();
    loaded.load(&text).unwrap();
    assert_eq!(*game.board(), *loaded.board());
    assert_eq!(game.ledger().rounds(), loaded.ledger().rounds());
    assert_eq!(game.snapshot(), loaded.snapshot());
}

#[test]
fn promotion_survives_save() {
    let mut game = Game::new();
    for &(from, to) in &[
        (Square::H2, Square::H4),
        (Square::G7, Square::G5),
        (Square::H4, Square::G5),
        (Square::H7, Square::H6),
        (Square::G5, Square::H6),
        (Square::F8, Square::G7),
        (Square::H6, Square::H7),
        (Square::B8, Square::C6),
    ] {
        game.play(from, to, None).unwrap();
    }
    game.play(Square::H7, Square::G8, Some(PieceKind::Knight))
        .unwrap();

    let text = write(&game);
    assert!(text.contains("H7-G8=N"));

    let mut loaded = Game::new();
    loaded.load(&text).unwrap();
    assert_eq!(*game.board(), *loaded.board());
}

#[test]
fn out_of_range_square_resets() {
    let mut game = played_game();
    let text = "[Chess console] Saved at: Sat Jun  1 12:00:00 2019\n\
                E2-E4   | E7-E5  \n\
                E4-E9   | \n";
    match game.load(text) {
        Err(LoadError::Notation {
            ply: 2,
            error: NotationError::OutOfRange { .. },
        }) => {}
        other => panic!("expected notation error, got {:?}", other),
    }

    assert_fresh(&game);
}

#[test]
fn illegal_move_resets() {
    let mut game = played_game();
    let text = "[Chess console] Saved at: Sat Jun  1 12:00:00 2019\n\
                E2-E4   | E7-E5  \n\
                E4-E5   | \n";
    match game.load(text) {
        Err(LoadError::Illegal { ply: 2, error, .. }) => {
            assert_eq!(IllegalMove::PathBlocked, error)
        }
        other => panic!("expected illegal move, got {:?}", other),
    }

    assert_fresh(&game);
}

#[test]
fn bad_promotion_piece_resets() {
    let mut game = played_game();
    let text = "[Chess console] Saved at: Sat Jun  1 12:00:00 2019\n\
                E2-E4=K | \n";
    match game.load(text) {
        Err(LoadError::Notation {
            ply: 0,
            error: NotationError::BadPromotion('K'),
        }) => {}
        other => panic!("expected notation error, got {:?}", other),
    }

    assert_fresh(&game);
}

#[test]
fn missing_file_starts_fresh() {
    let mut game = played_game();
    let path = std::env::temp_dir().join("chess_rules_no_such_save.txt");
    match save::load_from_file(&mut game, &path) {
        Err(LoadError::Io(_)) => {}
        other => panic!("expected io error, got {:?}", other),
    }

    assert_fresh(&game);
}

#[test]
fn save_and_load_file() {
    let game = played_game();
    let path = std::env::temp_dir().join(format!("chess_rules_save_{}.txt", std::process::id()));
    save::save_to_file(&game, &path).unwrap();

    let mut loaded = Game::new();
    save::load_from_file(&mut loaded, &path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(*game.board(), *loaded.board());
}
