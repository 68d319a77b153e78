// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;

use crate::board::{self, Board, FenParseError};
use crate::ledger::{Ledger, Round};
use crate::legality::IllegalMove;
use crate::moves::{Move, MoveKind};
use crate::types::{CastleStatus, Color, Piece, PieceKind, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    NothingToUndo,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::NothingToUndo => write!(f, "there is no move to undo"),
        }
    }
}

impl Error for GameError {}

/// Where the game stands after a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check(Color),
    Checkmate { winner: Color },
}

/// The outcome of `Game::play`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub mov: Move,
    pub captured: Option<Piece>,
    pub status: GameStatus,
}

// Enough state to take back the most recent move. Origin and destination come
// from the ledger; everything else the move changed is kept here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct UndoRecord {
    mov: Move,
    captured: Option<Piece>,
    castle_status: CastleStatus,
}

/// A read-only picture of the game, for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Piece letters per rank, eighth rank first, with '.' for empty squares.
    pub ranks: Vec<String>,
    pub side_to_move: Color,
    /// White pieces that have been captured.
    pub white_captured: String,
    /// Black pieces that have been captured.
    pub black_captured: String,
    pub rounds: Vec<Round>,
    pub in_check: bool,
    /// The side to move has been checkmated.
    pub checkmate: bool,
    pub finished: bool,
}

/// A single game of chess: the board, its history, and the one move that can
/// be taken back.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    ledger: Ledger,
    white_captured: Vec<Piece>,
    black_captured: Vec<Piece>,
    undo: Option<UndoRecord>,
    pub(crate) finished: bool,
}

impl Game {
    /// A new game from the standard starting position.
    pub fn new() -> Game {
        Game::from_board(Board::from_start_position())
    }

    /// A game starting from an arbitrary position, with no history.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Game, FenParseError> {
        Board::from_fen(fen).map(Game::from_board)
    }

    fn from_board(board: Board) -> Game {
        Game {
            ledger: Ledger::new(board.side_to_move()),
            board,
            white_captured: Vec::new(),
            black_captured: Vec::new(),
            undo: None,
            finished: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Pieces of `color` that have been captured, in the order they fell.
    pub fn captured(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.white_captured,
            Color::Black => &self.black_captured,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    fn captured_mut(&mut self, color: Color) -> &mut Vec<Piece> {
        match color {
            Color::White => &mut self.white_captured,
            Color::Black => &mut self.black_captured,
        }
    }
}

impl Game {
    /// Executes a validated move and returns the piece it captured, if any.
    ///
    /// The move is not validated again; it must come from `validate` on this
    /// game in its current state, with any promotion resolved.
    pub fn apply(&mut self, mov: Move) -> Option<Piece> {
        let color = mov.piece.color;
        let placed = match mov.kind {
            MoveKind::Promotion {
                piece: Some(kind), ..
            } => Piece::new(kind, color),
            MoveKind::Promotion { piece: None, .. } => {
                panic!("invalid move: promotion {} has no piece chosen", mov)
            }
            _ => mov.piece,
        };

        let castle_status = self.board.castle_status();
        self.board.remove(mov.from);
        let captured = match mov.kind {
            MoveKind::EnPassant { captured } => self.board.remove(captured),
            _ if mov.is_capture() => self.board.remove(mov.to),
            _ => None,
        };

        if let Some(piece) = captured {
            self.captured_mut(piece.color).push(piece);
        }

        self.board.set(mov.to, placed);
        if let MoveKind::Castle { rook_from, rook_to } = mov.kind {
            let rook = self
                .board
                .remove(rook_from)
                .expect("invalid move: castling without a rook");
            self.board.set(rook_to, rook);
        }

        // castling rights: the king moving loses both, a rook leaving its
        // corner loses that side, and so does a rook captured in its corner.
        if mov.piece.kind == PieceKind::King {
            self.board.revoke_castle(board::castle_mask(color));
        }

        if mov.piece.kind == PieceKind::Rook {
            if let Some(mask) = board::rook_home_mask(mov.from) {
                self.board.revoke_castle(mask);
            }
        }

        if captured.is_some() {
            if let Some(mask) = board::rook_home_mask(mov.to) {
                self.board.revoke_castle(mask);
            }
        }

        self.board.toggle_side();
        self.ledger.record(mov.notation());
        self.undo = Some(UndoRecord {
            mov,
            captured,
            castle_status,
        });

        debug!("{} played {}", color.name(), mov);
        captured
    }

    /// Takes back the most recent move. Only one move can be taken back; a
    /// second call without an intervening move fails.
    pub fn undo(&mut self) -> Result<(), GameError> {
        let record = self.undo.take().ok_or(GameError::NothingToUndo)?;
        let notation = self
            .ledger
            .pop_last()
            .expect("invalid history: undo record without a ledger entry");
        let (from, to) = (notation.from, notation.to);

        // the origin gets back the piece that moved, a pawn if it promoted.
        self.board.remove(to);
        self.board.set(from, record.mov.piece);
        self.board.toggle_side();

        if let Some(piece) = record.captured {
            let restored = self
                .captured_mut(piece.color)
                .pop()
                .expect("invalid history: captured piece missing from capture list");
            let square = match record.mov.kind {
                MoveKind::EnPassant { captured } => captured,
                _ => to,
            };
            self.board.set(square, restored);
        }

        if let MoveKind::Castle { rook_from, rook_to } = record.mov.kind {
            let rook = self
                .board
                .remove(rook_to)
                .expect("invalid history: castled rook missing");
            self.board.set(rook_from, rook);
        }

        self.board.restore_castle(record.castle_status);
        self.finished = false;
        debug!("took back {}", notation);
        Ok(())
    }

    /// Validates and plays a move for the side to move, then reports whether
    /// the opponent is in check or checkmated. `promotion` must be given
    /// exactly when the move is a promotion.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveReport, IllegalMove> {
        let mut mov = self.validate(from, to)?;
        match (mov.is_promotion(), promotion) {
            (true, Some(kind)) => mov = mov.promote_to(kind)?,
            (true, None) => return Err(IllegalMove::PromotionRequired),
            (false, Some(_)) => return Err(IllegalMove::NotAPromotion),
            (false, None) => {}
        }

        let captured = self.apply(mov);
        let status = self.evaluate();
        Ok(MoveReport {
            mov,
            captured,
            status,
        })
    }

    /// Check and checkmate for the side to move. Finishes the game on mate.
    pub fn evaluate(&mut self) -> GameStatus {
        let side = self.side_to_move();
        if self.is_checkmate() {
            GameStatus::Checkmate {
                winner: side.toggle(),
            }
        } else if self.is_in_check() {
            GameStatus::Check(side)
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let letters = |pieces: &[Piece]| -> String { pieces.iter().map(|p| p.letter()).collect() };
        Snapshot {
            ranks: self.board.rank_strings(),
            side_to_move: self.side_to_move(),
            white_captured: letters(&self.white_captured),
            black_captured: letters(&self.black_captured),
            rounds: self.ledger.rounds(),
            in_check: self.is_in_check(),
            checkmate: self.is_mated(),
            finished: self.finished,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
