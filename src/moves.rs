// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module defines validated moves. A `Move` is only ever produced
//! by the legality validator, and its `MoveKind` carries everything the
//! executor needs to know about the special rules the move triggered.
use std::fmt;

use crate::legality::IllegalMove;
use crate::notation::Notation;
use crate::types::{Piece, PieceKind, Square};

/// What kind of move a validated move turned out to be.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// A move onto an empty square.
    Quiet,
    /// A move onto a square holding an opposing piece.
    Capture,
    /// A pawn capture en passant. `captured` is the square of the pawn being
    /// taken, which is not the destination.
    EnPassant { captured: Square },
    /// Castling. The king moves two squares and the rook jumps over it.
    Castle { rook_from: Square, rook_to: Square },
    /// A pawn reaching its last rank. `piece` is `None` until the player has
    /// chosen what to promote to.
    Promotion {
        capture: bool,
        piece: Option<PieceKind>,
    },
}

/// A legal move, as returned by `Game::validate`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub kind: MoveKind,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        match self.kind {
            MoveKind::Capture | MoveKind::EnPassant { .. } => true,
            MoveKind::Promotion { capture, .. } => capture,
            _ => false,
        }
    }

    pub fn is_promotion(&self) -> bool {
        match self.kind {
            MoveKind::Promotion { .. } => true,
            _ => false,
        }
    }

    /// The piece chosen for a promotion, if this is one and it has been
    /// resolved.
    pub fn promotion_piece(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion { piece, .. } => piece,
            _ => None,
        }
    }

    /// Resolves a pending promotion to the given piece kind. Only queens,
    /// rooks, bishops and knights are acceptable.
    pub fn promote_to(self, kind: PieceKind) -> Result<Move, IllegalMove> {
        let capture = match self.kind {
            MoveKind::Promotion { capture, .. } => capture,
            _ => return Err(IllegalMove::NotAPromotion),
        };

        if !kind.is_promotion_target() {
            return Err(IllegalMove::InvalidPromotion(kind));
        }

        Ok(Move {
            kind: MoveKind::Promotion {
                capture,
                piece: Some(kind),
            },
            ..self
        })
    }

    pub fn notation(&self) -> Notation {
        Notation {
            from: self.from,
            to: self.to,
            promotion: self.promotion_piece(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}
