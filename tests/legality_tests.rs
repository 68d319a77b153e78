// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
extern crate chess_rules;
use chess_rules::{Color, Game, IllegalMove, MoveKind, Piece, PieceKind, Square};

fn game(fen: &str) -> Game {
    Game::from_fen(fen).unwrap()
}

#[test]
fn no_piece_lands_on_its_own_side() {
    let game = Game::new();
    for &(from, to) in &[
        (Square::A1, Square::A2),
        (Square::B1, Square::D2),
        (Square::C1, Square::D2),
        (Square::D1, Square::D2),
        (Square::E1, Square::E2),
    ] {
        assert_eq!(Err(IllegalMove::SameColorDestination), game.validate(from, to));
    }

    // a pawn's diagonal step is a capture, so its own piece is refused there.
    let game = self::game("4k3/8/8/8/8/3P4/4P3/4K3 w - - 0 1");
    assert_eq!(
        Err(IllegalMove::SameColorDestination),
        game.validate(Square::E2, Square::D3)
    );
}

#[test]
fn wrong_side_and_empty_squares() {
    let game = Game::new();
    assert_eq!(Err(IllegalMove::NotYourTurn), game.validate(Square::E7, Square::E5));
    assert_eq!(
        Err(IllegalMove::NoPieceAtSource(Square::E4)),
        game.validate(Square::E4, Square::E5)
    );
}

#[test]
fn en_passant_right_after_double_push() {
    let mut game = Game::new();
    game.play(Square::E2, Square::E4, None).unwrap();
    game.play(Square::A7, Square::A6, None).unwrap();
    game.play(Square::E4, Square::E5, None).unwrap();
    game.play(Square::D7, Square::D5, None).unwrap();

    let mov = game.validate(Square::E5, Square::D6).unwrap();
    assert_eq!(MoveKind::EnPassant { captured: Square::D5 }, mov.kind);

    let report = game.play(Square::E5, Square::D6, None).unwrap();
    assert_eq!(Some(Piece::new(PieceKind::Pawn, Color::Black)), report.captured);
    assert!(!game.board().is_occupied(Square::D5));
    assert!(!game.board().is_occupied(Square::E5));
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Color::White)),
        game.board().piece_at(Square::D6)
    );
    assert_eq!(&[Piece::new(PieceKind::Pawn, Color::Black)], game.captured(Color::Black));
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut game = Game::new();
    game.play(Square::E2, Square::E4, None).unwrap();
    game.play(Square::A7, Square::A6, None).unwrap();
    game.play(Square::E4, Square::E5, None).unwrap();
    game.play(Square::D7, Square::D5, None).unwrap();
    game.play(Square::A2, Square::A3, None).unwrap();
    game.play(Square::H7, Square::H6, None).unwrap();

    assert_eq!(
        Err(IllegalMove::EnPassantUnavailable),
        game.validate(Square::E5, Square::D6)
    );
}

#[test]
fn en_passant_needs_a_double_push() {
    let mut game = game("4k3/8/3p4/4P3/8/8/8/4K3 b - - 0 1");
    game.play(Square::D6, Square::D5, None).unwrap();
    assert_eq!(
        Err(IllegalMove::EnPassantUnavailable),
        game.validate(Square::E5, Square::D6)
    );
}

#[test]
fn en_passant_exposing_king_on_rank() {
    // both pawns leave the fifth rank, opening it to the rook on h5.
    let mut game = game("4k3/3p4/8/K3P2r/8/8/8/8 b - - 0 1");
    game.play(Square::D7, Square::D5, None).unwrap();
    assert_eq!(
        Err(IllegalMove::LeavesKingInCheck),
        game.validate(Square::E5, Square::D6)
    );
}

#[test]
fn castle_both_sides() {
    let game = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert_eq!(
        MoveKind::Castle {
            rook_from: Square::H1,
            rook_to: Square::F1
        },
        game.validate(Square::E1, Square::G1).unwrap().kind
    );
    assert_eq!(
        MoveKind::Castle {
            rook_from: Square::A1,
            rook_to: Square::D1
        },
        game.validate(Square::E1, Square::C1).unwrap().kind
    );
}

#[test]
fn castle_through_attacked_square() {
    let game = game("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert_eq!(
        Err(IllegalMove::CastlingThroughCheck),
        game.validate(Square::E1, Square::G1)
    );
    assert!(game.validate(Square::E1, Square::C1).is_ok());
}

#[test]
fn castle_into_check() {
    let game = game("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert_eq!(
        Err(IllegalMove::LeavesKingInCheck),
        game.validate(Square::E1, Square::G1)
    );
}

#[test]
fn castle_out_of_check() {
    let game = game("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert_eq!(
        Err(IllegalMove::CastlingWhileInCheck),
        game.validate(Square::E1, Square::G1)
    );
}

#[test]
fn castle_without_right_or_rook() {
    let game = self::game("4k3/8/8/8/8/8/8/R3K2R w Q - 0 1");
    assert_eq!(
        Err(IllegalMove::CastlingNotAllowed),
        game.validate(Square::E1, Square::G1)
    );

    let game = self::game("4k3/8/8/8/8/8/8/4K3 w K - 0 1");
    assert_eq!(
        Err(IllegalMove::CastlingRookMissing),
        game.validate(Square::E1, Square::G1)
    );
}

#[test]
fn castle_with_piece_in_the_way() {
    let game = game("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1");
    assert_eq!(
        Err(IllegalMove::CastlingPathBlocked),
        game.validate(Square::E1, Square::C1)
    );
}

#[test]
fn castle_after_king_moved() {
    let mut game = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    game.play(Square::E1, Square::E2, None).unwrap();
    game.play(Square::A8, Square::A7, None).unwrap();
    game.play(Square::E2, Square::E1, None).unwrap();
    assert_eq!(
        Err(IllegalMove::CastlingNotAllowed),
        game.validate(Square::E8, Square::C8)
    );
    game.play(Square::E8, Square::G8, None).unwrap();
    assert_eq!(
        Err(IllegalMove::CastlingNotAllowed),
        game.validate(Square::E1, Square::G1)
    );
}

#[test]
fn pinned_piece_cannot_leave_the_line() {
    let game = game("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
    assert_eq!(
        Err(IllegalMove::LeavesKingInCheck),
        game.validate(Square::E2, Square::C3)
    );
}

#[test]
fn kings_never_touch() {
    let game = game("4k3/8/4K3/8/8/8/8/8 w - - 0 1");
    for &to in &[Square::D7, Square::E7, Square::F7] {
        assert_eq!(Err(IllegalMove::LeavesKingInCheck), game.validate(Square::E6, to));
    }
    assert!(game.validate(Square::E6, Square::E5).is_ok());
}
