// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack detection. Given a square and the color defending it, finds every
//! opposing piece that attacks the square, optionally as if a move had
//! already been made.
use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::TableIndex;
use crate::types::{Color, Line, Piece, PieceKind, Square, DIRECTIONS, SQUARES};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

pub type SquareVec = ArrayVec<[Square; 8]>;

struct KnightTable {
    table: Vec<SquareVec>,
}

impl KnightTable {
    pub fn new() -> KnightTable {
        let table = SQUARES
            .iter()
            .map(|&sq| {
                KNIGHT_OFFSETS
                    .iter()
                    .filter_map(|&(rows, columns)| sq.offset(rows, columns))
                    .collect()
            })
            .collect();

        KnightTable { table }
    }

    pub fn targets(&self, sq: Square) -> &[Square] {
        &self.table[sq.as_index()]
    }
}

struct KingTable {
    table: Vec<SquareVec>,
}

impl KingTable {
    pub fn new() -> KingTable {
        let table = SQUARES
            .iter()
            .map(|&sq| DIRECTIONS.iter().filter_map(|&dir| sq.towards(dir)).collect())
            .collect();

        KingTable { table }
    }

    pub fn targets(&self, sq: Square) -> &[Square] {
        &self.table[sq.as_index()]
    }
}

lazy_static! {
    static ref KNIGHT_TABLE: KnightTable = KnightTable::new();
    static ref KING_TABLE: KingTable = KingTable::new();
}

/// Squares a knight on `sq` jumps to.
pub fn knight_targets(sq: Square) -> &'static [Square] {
    KNIGHT_TABLE.targets(sq)
}

/// Squares adjacent to `sq`, in compass order starting north.
pub fn king_targets(sq: Square) -> &'static [Square] {
    KING_TABLE.targets(sq)
}

/// A piece attacking a square, along with the line it attacks along.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Attack {
    pub square: Square,
    pub line: Line,
}

/// A move that has not been made. Board reads performed through it see the
/// origin (and the optional vacated square, the pawn taken en passant) as
/// empty and the destination as holding the moving piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hypothetical {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub vacated: Option<Square>,
}

impl Hypothetical {
    pub fn new(piece: Piece, from: Square, to: Square) -> Hypothetical {
        Hypothetical {
            piece,
            from,
            to,
            vacated: None,
        }
    }

    pub fn vacating(self, square: Square) -> Hypothetical {
        Hypothetical {
            vacated: Some(square),
            ..self
        }
    }
}

/// A read-only view of a board with an optional hypothetical move laid over
/// it. The board itself is never touched.
#[derive(Copy, Clone)]
pub(crate) struct View<'a> {
    board: &'a Board,
    hypothetical: Option<&'a Hypothetical>,
}

impl<'a> View<'a> {
    pub fn new(board: &'a Board, hypothetical: Option<&'a Hypothetical>) -> View<'a> {
        View {
            board,
            hypothetical,
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if let Some(hypo) = self.hypothetical {
            if square == hypo.to {
                return Some(hypo.piece);
            }

            if square == hypo.from || Some(square) == hypo.vacated {
                return None;
            }
        }

        self.board.piece_at(square)
    }
}

/// Returns every piece not of color `defender` that attacks `target`, in the
/// order the rays and knight offsets are scanned.
pub fn attackers(
    board: &Board,
    target: Square,
    defender: Color,
    hypothetical: Option<&Hypothetical>,
) -> Vec<Attack> {
    let view = View::new(board, hypothetical);
    let attacker = defender.toggle();
    let mut found = Vec::new();

    for &dir in DIRECTIONS.iter() {
        let (rows, _) = dir.as_vector();
        let line = dir.line();
        let mut cursor = target;
        let mut distance = 0;
        while let Some(next) = cursor.towards(dir) {
            cursor = next;
            distance += 1;
            let piece = match view.piece_at(cursor) {
                Some(piece) => piece,
                None => continue,
            };

            // the first piece on a ray blocks everything behind it.
            if piece.color == attacker && attacks_along(piece, line, distance, rows) {
                found.push(Attack {
                    square: cursor,
                    line,
                });
            }

            break;
        }
    }

    for &sq in knight_targets(target) {
        if view.piece_at(sq) == Some(Piece::new(PieceKind::Knight, attacker)) {
            found.push(Attack {
                square: sq,
                line: Line::LShape,
            });
        }
    }

    found
}

/// Whether any piece not of color `defender` attacks `target`.
pub fn is_attacked(
    board: &Board,
    target: Square,
    defender: Color,
    hypothetical: Option<&Hypothetical>,
) -> bool {
    !attackers(board, target, defender, hypothetical).is_empty()
}

// Whether `piece`, found `distance` squares from the target along a ray, can
// attack back down that ray. `rows` is the row step taken from the target
// towards the piece.
fn attacks_along(piece: Piece, line: Line, distance: i32, rows: i32) -> bool {
    match (piece.kind, line) {
        (PieceKind::Queen, _) => true,
        (PieceKind::Rook, Line::Horizontal) | (PieceKind::Rook, Line::Vertical) => true,
        (PieceKind::Bishop, Line::Diagonal) => true,
        (PieceKind::King, _) => distance == 1,
        // a pawn attacks forward, so it must sit behind the target relative
        // to its own direction of travel.
        (PieceKind::Pawn, Line::Diagonal) => distance == 1 && rows == -piece.color.forward(),
        _ => false,
    }
}
