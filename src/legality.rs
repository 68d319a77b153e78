// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move legality. A move is checked in three stages: the geometry of the
//! moving piece (which also decides whether the move is a capture, castle,
//! en passant or promotion), the color of whatever stands on the destination,
//! and finally whether the move would leave the mover's own king attacked.
use std::error::Error;
use std::fmt;

use crate::attacks::{self, Hypothetical};
use crate::board::{self, Board};
use crate::game::Game;
use crate::moves::{Move, MoveKind};
use crate::path;
use crate::types::{Color, Line, Piece, PieceKind, Square};

/// Reasons a move can be rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    NoPieceAtSource(Square),
    NotYourTurn,
    SameSquare,
    GameFinished,
    InvalidGeometry(PieceKind),
    PathBlocked,
    EnPassantUnavailable,
    SameColorDestination,
    LeavesKingInCheck,
    CastlingWhileInCheck,
    CastlingPathBlocked,
    CastlingNotAllowed,
    CastlingRookMissing,
    CastlingThroughCheck,
    PromotionRequired,
    InvalidPromotion(PieceKind),
    NotAPromotion,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IllegalMove::NoPieceAtSource(sq) => write!(f, "there is no piece on {}", sq),
            IllegalMove::NotYourTurn => write!(f, "that piece belongs to the other player"),
            IllegalMove::SameSquare => write!(f, "a move must change squares"),
            IllegalMove::GameFinished => write!(f, "the game is over"),
            IllegalMove::InvalidGeometry(PieceKind::Pawn) => {
                write!(f, "pawns move forward one square, two from their starting rank, or capture diagonally")
            }
            IllegalMove::InvalidGeometry(PieceKind::Knight) => {
                write!(f, "knights move in an L shape")
            }
            IllegalMove::InvalidGeometry(PieceKind::Bishop) => {
                write!(f, "bishops move diagonally")
            }
            IllegalMove::InvalidGeometry(PieceKind::Rook) => {
                write!(f, "rooks move horizontally or vertically")
            }
            IllegalMove::InvalidGeometry(PieceKind::Queen) => {
                write!(f, "queens move horizontally, vertically or diagonally")
            }
            IllegalMove::InvalidGeometry(PieceKind::King) => {
                write!(f, "kings move one square, or two when castling")
            }
            IllegalMove::PathBlocked => write!(f, "another piece is in the way"),
            IllegalMove::EnPassantUnavailable => {
                write!(f, "en passant is only allowed right after a two-square pawn move")
            }
            IllegalMove::SameColorDestination => {
                write!(f, "the destination holds one of your own pieces")
            }
            IllegalMove::LeavesKingInCheck => write!(f, "the move would leave your king in check"),
            IllegalMove::CastlingWhileInCheck => write!(f, "cannot castle while in check"),
            IllegalMove::CastlingPathBlocked => {
                write!(f, "cannot castle with pieces between the king and rook")
            }
            IllegalMove::CastlingNotAllowed => {
                write!(f, "the king or rook has already moved")
            }
            IllegalMove::CastlingRookMissing => write!(f, "there is no rook to castle with"),
            IllegalMove::CastlingThroughCheck => {
                write!(f, "cannot castle through an attacked square")
            }
            IllegalMove::PromotionRequired => {
                write!(f, "choose a piece to promote to (Q, R, B or N)")
            }
            IllegalMove::InvalidPromotion(kind) => write!(f, "cannot promote to {}", kind),
            IllegalMove::NotAPromotion => write!(f, "the move is not a promotion"),
        }
    }
}

impl Error for IllegalMove {}

impl Game {
    /// Checks whether the side to move may move the piece on `from` to `to`.
    ///
    /// On success the returned move describes exactly what the move does. A
    /// promotion comes back pending and has to be resolved with
    /// `Move::promote_to` before it can be applied.
    pub fn validate(&self, from: Square, to: Square) -> Result<Move, IllegalMove> {
        let result = self.validate_inner(from, to);
        if let Err(ref err) = result {
            debug!("rejected {}-{}: {:?}", from, to, err);
        }

        result
    }

    fn validate_inner(&self, from: Square, to: Square) -> Result<Move, IllegalMove> {
        if self.is_finished() {
            return Err(IllegalMove::GameFinished);
        }

        let board = self.board();
        let piece = board
            .piece_at(from)
            .ok_or(IllegalMove::NoPieceAtSource(from))?;
        if piece.color != board.side_to_move() {
            return Err(IllegalMove::NotYourTurn);
        }

        if from == to {
            return Err(IllegalMove::SameSquare);
        }

        // 1. geometry, which also classifies the move.
        let kind = match piece.kind {
            PieceKind::Pawn => self.pawn_move(piece.color, from, to)?,
            PieceKind::Knight => knight_move(board, from, to)?,
            PieceKind::Bishop => slide(board, from, to, PieceKind::Bishop)?,
            PieceKind::Rook => slide(board, from, to, PieceKind::Rook)?,
            PieceKind::Queen => slide(board, from, to, PieceKind::Queen)?,
            PieceKind::King => king_move(board, piece.color, from, to)?,
        };

        // 2. a piece never lands on its own side.
        if let Some(target) = board.piece_at(to) {
            if target.color == piece.color {
                return Err(IllegalMove::SameColorDestination);
            }
        }

        // 3. the king must not be left attacked.
        let mut hypo = Hypothetical::new(piece, from, to);
        if let MoveKind::EnPassant { captured } = kind {
            hypo = hypo.vacating(captured);
        }

        if self.is_king_in_check(piece.color, Some(&hypo)) {
            return Err(IllegalMove::LeavesKingInCheck);
        }

        Ok(Move {
            from,
            to,
            piece,
            kind,
        })
    }

    fn pawn_move(&self, color: Color, from: Square, to: Square) -> Result<MoveKind, IllegalMove> {
        let board = self.board();
        let rows = to.row() - from.row();
        let columns = to.column() - from.column();
        let forward = color.forward();

        let kind = if columns == 0 && rows == forward {
            if board.is_occupied(to) {
                return Err(IllegalMove::PathBlocked);
            }

            MoveKind::Quiet
        } else if columns == 0 && rows == 2 * forward {
            if from.row() != color.pawn_row() {
                return Err(IllegalMove::InvalidGeometry(PieceKind::Pawn));
            }

            if !path::is_path_free(board, from, to, Line::Vertical) || board.is_occupied(to) {
                return Err(IllegalMove::PathBlocked);
            }

            MoveKind::Quiet
        } else if columns.abs() == 1 && rows == forward {
            match board.piece_at(to) {
                Some(_) => MoveKind::Capture,
                None => self.en_passant(color, from, to)?,
            }
        } else {
            return Err(IllegalMove::InvalidGeometry(PieceKind::Pawn));
        };

        if to.row() == color.promotion_row() {
            return Ok(MoveKind::Promotion {
                capture: kind == MoveKind::Capture,
                piece: None,
            });
        }

        Ok(kind)
    }

    // A diagonal pawn step onto an empty square is only legal right after an
    // opposing pawn moved two squares to land beside the capturing pawn.
    fn en_passant(&self, color: Color, from: Square, to: Square) -> Result<MoveKind, IllegalMove> {
        let captured = Square::from_coords(from.row(), to.column())
            .ok_or(IllegalMove::EnPassantUnavailable)?;
        let last = self
            .ledger()
            .last()
            .ok_or(IllegalMove::EnPassantUnavailable)?;

        let victim = Piece::new(PieceKind::Pawn, color.toggle());
        let double_push = last.from.column() == last.to.column()
            && (last.to.row() - last.from.row()).abs() == 2;
        if last.to != captured || !double_push || self.board().piece_at(captured) != Some(victim) {
            return Err(IllegalMove::EnPassantUnavailable);
        }

        Ok(MoveKind::EnPassant { captured })
    }
}

fn occupancy_kind(board: &Board, to: Square) -> MoveKind {
    if board.is_occupied(to) {
        MoveKind::Capture
    } else {
        MoveKind::Quiet
    }
}

fn knight_move(board: &Board, from: Square, to: Square) -> Result<MoveKind, IllegalMove> {
    match path::line_between(from, to) {
        Some(Line::LShape) => Ok(occupancy_kind(board, to)),
        _ => Err(IllegalMove::InvalidGeometry(PieceKind::Knight)),
    }
}

fn slide(board: &Board, from: Square, to: Square, kind: PieceKind) -> Result<MoveKind, IllegalMove> {
    let line = match (kind, path::line_between(from, to)) {
        (PieceKind::Rook, Some(line @ Line::Horizontal))
        | (PieceKind::Rook, Some(line @ Line::Vertical))
        | (PieceKind::Bishop, Some(line @ Line::Diagonal))
        | (PieceKind::Queen, Some(line @ Line::Horizontal))
        | (PieceKind::Queen, Some(line @ Line::Vertical))
        | (PieceKind::Queen, Some(line @ Line::Diagonal)) => line,
        _ => return Err(IllegalMove::InvalidGeometry(kind)),
    };

    if !path::is_path_free(board, from, to, line) {
        return Err(IllegalMove::PathBlocked);
    }

    Ok(occupancy_kind(board, to))
}

fn king_move(board: &Board, color: Color, from: Square, to: Square) -> Result<MoveKind, IllegalMove> {
    let rows = (to.row() - from.row()).abs();
    let columns = to.column() - from.column();
    if rows <= 1 && columns.abs() <= 1 {
        return Ok(occupancy_kind(board, to));
    }

    let home = Square::from_coords(color.back_row(), 4);
    if rows == 0 && columns.abs() == 2 && Some(from) == home {
        return castle(board, color, from, columns > 0);
    }

    Err(IllegalMove::InvalidGeometry(PieceKind::King))
}

// Castling conditions are checked in a fixed order: the king may not be in
// check, the squares between king and rook must be empty, the right must
// still be held with the rook on its corner, and the square the king passes
// over must not be attacked. The destination itself is covered by the
// self-check stage.
fn castle(board: &Board, color: Color, from: Square, kingside: bool) -> Result<MoveKind, IllegalMove> {
    let (rook_from, mask, step) = if kingside {
        (board::kingside_rook(color), board::kingside_castle_mask(color), 1)
    } else {
        (board::queenside_rook(color), board::queenside_castle_mask(color), -1)
    };

    if attacks::is_attacked(board, from, color, None) {
        return Err(IllegalMove::CastlingWhileInCheck);
    }

    if !path::is_path_free(board, from, rook_from, Line::Horizontal) {
        return Err(IllegalMove::CastlingPathBlocked);
    }

    if !board.castle_status().contains(mask) {
        return Err(IllegalMove::CastlingNotAllowed);
    }

    if board.piece_at(rook_from) != Some(Piece::new(PieceKind::Rook, color)) {
        return Err(IllegalMove::CastlingRookMissing);
    }

    let rook_to = from
        .offset(0, step)
        .expect("invalid castle: king home square on the board edge");
    if attacks::is_attacked(board, rook_to, color, None) {
        return Err(IllegalMove::CastlingThroughCheck);
    }

    Ok(MoveKind::Castle { rook_from, rook_to })
}
