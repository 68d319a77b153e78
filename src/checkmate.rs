// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Check and checkmate detection.
//!
//! A king in check is mated when it has no safe square to step to, the
//! checking piece cannot be captured, and the check cannot be blocked. A
//! double check can only be answered by a king move, so once the king has
//! nowhere to go a second attacker always means mate.
use crate::attacks::{self, Attack, Hypothetical};
use crate::game::Game;
use crate::path;
use crate::types::{Color, Piece, PieceKind, Square};

impl Game {
    /// Whether the king of `color` is attacked, optionally after a
    /// hypothetical move. If the hypothetical move is the king's own, its
    /// destination is the square tested.
    pub fn is_king_in_check(&self, color: Color, hypothetical: Option<&Hypothetical>) -> bool {
        let king = Piece::new(PieceKind::King, color);
        let square = match hypothetical {
            Some(hypo) if hypo.piece == king => hypo.to,
            _ => self.board().king_square(color),
        };

        attacks::is_attacked(self.board(), square, color, hypothetical)
    }

    /// Whether the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        self.is_king_in_check(self.side_to_move(), None)
    }

    /// Whether the side to move is checkmated. Finishes the game if so.
    pub fn is_checkmate(&mut self) -> bool {
        let mate = self.is_mated();
        if mate && !self.finished {
            self.finished = true;
            info!("checkmate, {} wins", self.side_to_move().toggle().name());
        }

        mate
    }

    /// Whether the side to move is checkmated, leaving the game as it is.
    pub fn is_mated(&self) -> bool {
        let color = self.side_to_move();
        let king = self.board().king_square(color);
        let checkers = attacks::attackers(self.board(), king, color, None);
        if checkers.is_empty() {
            return false;
        }

        !self.king_can_escape(color, king)
            && match checkers.as_slice() {
                [single] => !self.can_answer_single_check(color, king, *single),
                _ => true,
            }
    }

    // Any neighbouring square not held by our own side where the king would
    // no longer be attacked. The king's old square reads as empty, so a
    // slider cannot be escaped by stepping straight back along its line.
    fn king_can_escape(&self, color: Color, king: Square) -> bool {
        let piece = Piece::new(PieceKind::King, color);
        attacks::king_targets(king).iter().any(|&sq| {
            match self.board().piece_at(sq) {
                Some(occupant) if occupant.color == color => false,
                _ => {
                    let hypo = Hypothetical::new(piece, king, sq);
                    !attacks::is_attacked(self.board(), sq, color, Some(&hypo))
                }
            }
        })
    }

    // Capturing or blocking a single checker. Every candidate response is
    // run through the validator, so a pinned defender does not count.
    fn can_answer_single_check(&self, color: Color, king: Square, check: Attack) -> bool {
        let attacker = self
            .board()
            .piece_at(check.square)
            .expect("invalid check: attacker square is empty");

        let can_capture = attacks::attackers(self.board(), check.square, attacker.color, None)
            .iter()
            .any(|capture| self.validate(capture.square, check.square).is_ok());
        if can_capture || self.can_capture_en_passant(color, check.square) {
            return true;
        }

        match attacker.kind {
            PieceKind::King => panic!("invalid check: king on {} gives check", check.square),
            // nothing stands between a pawn or knight and its target.
            kind if !kind.is_sliding() => false,
            // can_interpose also tries en passant captures landing on the
            // line, which path::can_be_blocked does not see.
            _ => path::squares_between(check.square, king, check.line)
                .into_iter()
                .any(|sq| self.can_interpose(color, sq)),
        }
    }

    // A checking pawn that just moved two squares can be taken en passant.
    fn can_capture_en_passant(&self, color: Color, checker: Square) -> bool {
        let pawn = Some(Piece::new(PieceKind::Pawn, color));
        let landing = match checker.offset(color.forward(), 0) {
            Some(sq) => sq,
            None => return false,
        };

        [-1, 1].iter().any(|&side| match checker.offset(0, side) {
            Some(from) if self.board().piece_at(from) == pawn => {
                self.validate(from, landing).is_ok()
            }
            _ => false,
        })
    }

    fn can_interpose(&self, color: Color, square: Square) -> bool {
        let mut candidates = path::reaching_pieces(self.board(), square, color);

        // an en passant capture also lands on an empty square.
        let pawn = Some(Piece::new(PieceKind::Pawn, color));
        for &side in &[-1, 1] {
            if let Some(from) = square.offset(-color.forward(), side) {
                if self.board().piece_at(from) == pawn {
                    candidates.push(from);
                }
            }
        }

        candidates
            .into_iter()
            .any(|from| self.validate(from, square).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use crate::game::Game;
    use crate::types::Color;

    fn game(fen: &str) -> Game {
        Game::from_fen(fen).unwrap()
    }

    #[test]
    fn check_smoke() {
        let game = game("4k3/8/8/8/8/8/8/4K2r w - - 0 1");
        assert!(game.is_in_check());
        assert!(game.is_king_in_check(Color::White, None));
        assert!(!game.is_king_in_check(Color::Black, None));
    }

    #[test]
    fn not_in_check_is_not_mate() {
        let mut game = Game::new();
        assert!(!game.is_checkmate());
        assert!(!game.is_finished());
    }

    #[test]
    fn boxed_king_mated() {
        // white king h1 boxed in by its own pawns, queen checks along the rank.
        let mut game = game("7k/8/8/8/8/8/6PP/5q1K w - - 0 1");
        assert!(game.is_checkmate());
        assert!(game.is_finished());
    }

    #[test]
    fn mated_does_not_finish() {
        let mut game = game("7k/8/8/8/8/8/6PP/5q1K w - - 0 1");
        assert!(game.is_mated());
        assert!(!game.is_finished());
        assert!(game.is_checkmate());
        assert!(game.is_mated());
    }

    #[test]
    fn escape_square_available() {
        let mut game = game("7k/8/8/8/8/8/7P/4q2K w - - 0 1");
        assert!(!game.is_checkmate());
        assert!(!game.is_finished());
    }
}
