// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::attacks;
use crate::board::Board;
use crate::types::{Color, Line, Piece, PieceKind, Square, DIRECTIONS};

/// Classifies the straight line running from `from` to `to`, if any. Two
/// squares a knight's jump apart are `LShape`; anything else that is not a
/// rank, file or diagonal is `None`.
pub fn line_between(from: Square, to: Square) -> Option<Line> {
    let rows = to.row() - from.row();
    let columns = to.column() - from.column();
    match (rows.abs(), columns.abs()) {
        (0, 0) => None,
        (0, _) => Some(Line::Horizontal),
        (_, 0) => Some(Line::Vertical),
        (r, c) if r == c => Some(Line::Diagonal),
        (1, 2) | (2, 1) => Some(Line::LShape),
        _ => None,
    }
}

/// Every square strictly between `from` and `to` along `line`.
///
/// # Panics
///
/// Panics if `from` and `to` do not actually lie on a common `line`. Callers
/// are expected to have classified the geometry already.
pub fn squares_between(from: Square, to: Square, line: Line) -> Vec<Square> {
    let rows = to.row() - from.row();
    let columns = to.column() - from.column();
    let consistent = match line {
        Line::Horizontal => rows == 0 && columns != 0,
        Line::Vertical => columns == 0 && rows != 0,
        Line::Diagonal => rows.abs() == columns.abs() && rows != 0,
        Line::LShape => false,
    };

    if !consistent {
        panic!(
            "invalid path query: {} to {} is not a {:?} line",
            from, to, line
        );
    }

    let (step_rows, step_columns) = (rows.signum(), columns.signum());
    let mut between = Vec::new();
    let mut cursor = from;
    while let Some(next) = cursor.offset(step_rows, step_columns) {
        if next == to {
            break;
        }

        between.push(next);
        cursor = next;
    }

    between
}

/// Whether every square strictly between `from` and `to` along `line` is
/// empty. Panics on inconsistent geometry, like `squares_between`.
pub fn is_path_free(board: &Board, from: Square, to: Square, line: Line) -> bool {
    squares_between(from, to, line)
        .into_iter()
        .all(|sq| !board.is_occupied(sq))
}

/// Pieces of `color` that could move onto the (empty) square `target`:
/// sliders with a clear line, knights, and pawns pushing one square or two
/// from their starting row. Kings are never included, since a king cannot
/// interpose between an attacker and itself.
pub fn reaching_pieces(board: &Board, target: Square, color: Color) -> Vec<Square> {
    let mut found = Vec::new();

    for &dir in DIRECTIONS.iter() {
        let line = dir.line();
        let mut cursor = target;
        while let Some(next) = cursor.towards(dir) {
            cursor = next;
            let piece = match board.piece_at(cursor) {
                Some(piece) => piece,
                None => continue,
            };

            let slides_here = match (piece.kind, line) {
                (PieceKind::Queen, _) => true,
                (PieceKind::Rook, Line::Horizontal) | (PieceKind::Rook, Line::Vertical) => true,
                (PieceKind::Bishop, Line::Diagonal) => true,
                _ => false,
            };

            if piece.color == color && slides_here {
                found.push(cursor);
            }

            break;
        }
    }

    for &sq in attacks::knight_targets(target) {
        if board.piece_at(sq) == Some(Piece::new(PieceKind::Knight, color)) {
            found.push(sq);
        }
    }

    let pawn = Some(Piece::new(PieceKind::Pawn, color));
    let back = -color.forward();
    if let Some(one_back) = target.offset(back, 0) {
        if board.piece_at(one_back) == pawn {
            found.push(one_back);
        } else if !board.is_occupied(one_back) {
            if let Some(two_back) = target.offset(2 * back, 0) {
                if two_back.row() == color.pawn_row() && board.piece_at(two_back) == pawn {
                    found.push(two_back);
                }
            }
        }
    }

    found
}

/// Whether any piece of `color` could move onto `target`.
pub fn is_reachable(board: &Board, target: Square, color: Color) -> bool {
    !reaching_pieces(board, target, color).is_empty()
}

/// Whether `defender` has a piece that could step into the line between the
/// attacker on `attacker` and the king on `king`.
pub fn can_be_blocked(
    board: &Board,
    attacker: Square,
    king: Square,
    line: Line,
    defender: Color,
) -> bool {
    squares_between(attacker, king, line)
        .into_iter()
        .any(|sq| is_reachable(board, sq, defender))
}
