// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
extern crate chess_rules;
use chess_rules::{Color, FenParseError, Game, GameStatus, IllegalMove, Square};

fn game(fen: &str) -> Game {
    Game::from_fen(fen).unwrap()
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    game.play(Square::F2, Square::F3, None).unwrap();
    game.play(Square::E7, Square::E5, None).unwrap();
    game.play(Square::G2, Square::G4, None).unwrap();
    let report = game.play(Square::D8, Square::H4, None).unwrap();

    assert_eq!(GameStatus::Checkmate { winner: Color::Black }, report.status);
    assert!(game.is_finished());
    assert_eq!(
        Err(IllegalMove::GameFinished),
        game.validate(Square::A2, Square::A3)
    );
}

#[test]
fn boxed_king_on_back_rank() {
    let mut game = game("7k/8/8/8/8/8/6PP/r6K w - - 0 1");
    assert!(game.is_in_check());
    assert!(game.is_checkmate());
}

#[test]
fn double_check_without_escape() {
    // the rook on e2 could take either checker, but not both.
    let mut game = game("k7/8/8/8/8/8/4RnPP/4r2K w - - 0 1");
    assert!(game.is_checkmate());
}

#[test]
fn checker_captured() {
    let mut game = game("4k3/8/8/R7/8/8/6PP/r6K w - - 0 1");
    assert!(game.is_in_check());
    assert!(!game.is_checkmate());
    assert!(!game.is_finished());
}

#[test]
fn check_blocked() {
    let mut game = game("4k3/8/8/3R4/8/8/6PP/r6K w - - 0 1");
    assert!(!game.is_checkmate());
}

#[test]
fn king_steps_away() {
    let mut game = game("4k3/8/8/8/8/8/7P/r6K w - - 0 1");
    assert!(!game.is_checkmate());
}

#[test]
fn pinned_capturer_does_not_help() {
    // the bishop could take on f1 but is pinned by the bishop on a8.
    let mut game = game("b3k3/8/8/8/8/8/6BP/5r1K w - - 0 1");
    assert!(game.is_checkmate());

    let mut game = self::game("4k3/8/8/8/8/8/6BP/5r1K w - - 0 1");
    assert!(!game.is_checkmate());
}

#[test]
fn pinned_blocker_does_not_help() {
    // the knight could block on f1 but is pinned by the rook on h8.
    let mut game = game("k6r/8/8/8/8/8/6PN/r6K w - - 0 1");
    assert!(game.is_checkmate());

    let mut game = self::game("k7/8/8/8/8/8/6PN/r6K w - - 0 1");
    assert!(!game.is_checkmate());
}

#[test]
fn checking_pawn_taken_en_passant() {
    let mut game = game("8/8/pp6/kp6/p1p5/P7/1P6/7K w - - 0 1");
    let report = game.play(Square::B2, Square::B4, None).unwrap();
    assert_eq!(GameStatus::Check(Color::Black), report.status);

    game.play(Square::C4, Square::B3, None).unwrap();
    assert!(!game.board().is_occupied(Square::B4));
    assert!(!game.is_king_in_check(Color::Black, None));
}

#[test]
fn checking_pawn_single_step_is_mate() {
    let mut game = game("8/8/pp6/kp6/p1p5/PP6/8/7K w - - 0 1");
    let report = game.play(Square::B3, Square::B4, None).unwrap();
    assert_eq!(GameStatus::Checkmate { winner: Color::White }, report.status);
}

#[test]
fn undo_reopens_finished_game() {
    let mut game = Game::new();
    game.play(Square::F2, Square::F3, None).unwrap();
    game.play(Square::E7, Square::E5, None).unwrap();
    game.play(Square::G2, Square::G4, None).unwrap();
    game.play(Square::D8, Square::H4, None).unwrap();
    assert!(game.is_finished());

    game.undo().unwrap();
    assert!(!game.is_finished());
    assert!(game.play(Square::D8, Square::E7, None).is_ok());
}

#[test]
fn touching_kings_rejected_before_evaluation() {
    // white to move with the black king on g2 next to the white king.
    match Game::from_fen("8/8/8/8/8/5b2/6kP/7K w - - 0 1") {
        Err(err) => assert_eq!(FenParseError::OpponentInCheck(Color::Black), err),
        Ok(_) => panic!("position with the side not to move in check was accepted"),
    }
}
