// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Write};

use crate::attacks;
use crate::types::TableIndex;
use crate::types::{CastleStatus, Color, File, Piece, PieceKind, Rank, Square};
use crate::types::{FILES, RANKS, SQUARES};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Possible errors that can arise when parsing a FEN string into a `Board`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    InvalidSideToMove,
    InvalidCastle,
    MissingKing(Color),
    ExtraKing(Color),
    OpponentInCheck(Color),
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            FenParseError::UnexpectedEnd => write!(f, "unexpected end of input"),
            FenParseError::InvalidDigit => write!(f, "invalid empty-square count"),
            FenParseError::FileDoesNotSumToEight => write!(f, "rank does not sum to eight files"),
            FenParseError::UnknownPiece => write!(f, "unknown piece letter"),
            FenParseError::InvalidSideToMove => write!(f, "invalid side to move"),
            FenParseError::InvalidCastle => write!(f, "invalid castling field"),
            FenParseError::MissingKing(color) => write!(f, "{} has no king", color.name()),
            FenParseError::ExtraKing(color) => write!(f, "{} has more than one king", color.name()),
            FenParseError::OpponentInCheck(color) => {
                write!(f, "{} is in check but it is not their move", color.name())
            }
        }
    }
}

impl Error for FenParseError {}

/// The board: an 8x8 grid of squares, the side to move, and the castling
/// rights still held by each side.
///
/// Only the executor in `game` mutates a board. Everything else reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
    castle_status: CastleStatus,
}

//
// Board state getters
//

impl Board {
    /// An empty board with white to move and no castling rights.
    pub fn empty() -> Board {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            castle_status: CastleStatus::NONE,
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()]
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn opponent(&self) -> Color {
        self.side_to_move.toggle()
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_status.contains(kingside_castle_mask(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_status.contains(queenside_castle_mask(color))
    }

    /// Locates the king of the given color. Every legal board has exactly one
    /// king per side, so a missing king is a broken invariant.
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces(color)
            .find(|&(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
            .expect("invalid board: no king for color")
    }

    /// Every piece of the given color along with the square it stands on.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        SQUARES.iter().filter_map(move |&sq| match self.piece_at(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }
}

//
// Board mutation, used by the move executor
//

impl Board {
    pub(crate) fn set(&mut self, square: Square, piece: Piece) {
        self.squares[square.as_index()] = Some(piece);
    }

    pub(crate) fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()].take()
    }

    pub(crate) fn toggle_side(&mut self) {
        self.side_to_move = self.side_to_move.toggle();
    }

    pub(crate) fn revoke_castle(&mut self, mask: CastleStatus) {
        self.castle_status &= !mask;
    }

    pub(crate) fn restore_castle(&mut self, status: CastleStatus) {
        self.castle_status = status;
    }
}

impl Board {
    pub fn from_start_position() -> Board {
        Board::from_fen(START_FEN).expect("invalid start position")
    }

    /// Constructs a board from a FEN string. Only the placement, side to move
    /// and castling fields are read; en passant comes from the move history
    /// and the clocks are not tracked, so anything after the castling field
    /// is ignored.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Board, FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat<'a>(iter: &mut Stream<'a>, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn advance<'a>(iter: &mut Stream<'a>) {
            let _ = iter.next();
        }

        fn peek<'a>(iter: &mut Stream<'a>) -> Result<char, FenParseError> {
            if let Some(c) = iter.peek() {
                Ok(*c)
            } else {
                Err(FenParseError::UnexpectedEnd)
            }
        }

        fn eat_side_to_move<'a>(iter: &mut Stream<'a>) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            advance(iter);
            Ok(side)
        }

        fn eat_castle_status<'a>(iter: &mut Stream<'a>) -> Result<CastleStatus, FenParseError> {
            if peek(iter)? == '-' {
                advance(iter);
                return Ok(CastleStatus::NONE);
            }

            let mut status = CastleStatus::NONE;
            for _ in 0..4 {
                match iter.peek() {
                    Some('K') => status |= CastleStatus::WHITE_KINGSIDE,
                    Some('k') => status |= CastleStatus::BLACK_KINGSIDE,
                    Some('Q') => status |= CastleStatus::WHITE_QUEENSIDE,
                    Some('q') => status |= CastleStatus::BLACK_QUEENSIDE,
                    Some(' ') | None => break,
                    Some(_) => return Err(FenParseError::InvalidCastle),
                }

                advance(iter);
            }

            Ok(status)
        }

        let mut board = Board::empty();
        let iter = &mut fen.as_ref().chars().peekable();
        for &rank in RANKS.iter().rev() {
            let mut file = File::A as usize;
            while file <= File::H as usize {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if c.is_digit(10) {
                    if c < '1' || c > '8' {
                        return Err(FenParseError::InvalidDigit);
                    }

                    file += c as usize - '0' as usize;
                    if file > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    advance(iter);
                    continue;
                }

                // if it's not a digit, it represents a piece.
                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                board.set(Square::of(rank, File::from_index(file)), piece);
                advance(iter);
                file += 1;
            }

            if rank != Rank::One {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        board.side_to_move = eat_side_to_move(iter)?;
        if iter.peek().is_some() {
            eat(iter, ' ')?;
            board.castle_status = eat_castle_status(iter)?;
        }

        for &color in &[Color::White, Color::Black] {
            let kings = board
                .pieces(color)
                .filter(|&(_, piece)| piece.kind == PieceKind::King)
                .count();
            match kings {
                0 => return Err(FenParseError::MissingKing(color)),
                1 => {}
                _ => return Err(FenParseError::ExtraKing(color)),
            }
        }

        // the side that just moved can never have left its king attacked.
        let opponent = board.opponent();
        if attacks::is_attacked(&board, board.king_square(opponent), opponent, None) {
            return Err(FenParseError::OpponentInCheck(opponent));
        }

        Ok(board)
    }

    /// The FEN for this board. There is no en passant square or clock state
    /// to report, so those fields are always `- 0 1`.
    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                if let Some(piece) = self.piece_at(Square::of(rank, file)) {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        write!(&mut buf, " {} ", self.side_to_move).unwrap();
        if self.castle_status.is_empty() {
            buf.push('-');
        }
        if self.can_castle_kingside(Color::White) {
            buf.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            buf.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            buf.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            buf.push('q');
        }
        buf.push_str(" - 0 1");
        buf
    }

    /// The board as eight strings of piece letters, eighth rank first, with
    /// '.' for an empty square.
    pub fn rank_strings(&self) -> Vec<String> {
        RANKS
            .iter()
            .rev()
            .map(|&rank| {
                FILES
                    .iter()
                    .map(|&file| match self.piece_at(Square::of(rank, file)) {
                        Some(piece) => piece.letter(),
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            write!(f, "{} |", rank)?;
            for &file in &FILES {
                if let Some(piece) = self.piece_at(Square::of(rank, file)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f)?;
        }

        write!(f, "   ")?;
        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        write!(f, "   ")?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::from_start_position()
    }
}

//
// Helper functions
//

pub(crate) fn kingside_rook(color: Color) -> Square {
    match color {
        Color::White => Square::H1,
        Color::Black => Square::H8,
    }
}

pub(crate) fn kingside_castle_mask(color: Color) -> CastleStatus {
    match color {
        Color::White => CastleStatus::WHITE_KINGSIDE,
        Color::Black => CastleStatus::BLACK_KINGSIDE,
    }
}

pub(crate) fn queenside_rook(color: Color) -> Square {
    match color {
        Color::White => Square::A1,
        Color::Black => Square::A8,
    }
}

pub(crate) fn queenside_castle_mask(color: Color) -> CastleStatus {
    match color {
        Color::White => CastleStatus::WHITE_QUEENSIDE,
        Color::Black => CastleStatus::BLACK_QUEENSIDE,
    }
}

pub(crate) fn castle_mask(color: Color) -> CastleStatus {
    match color {
        Color::White => CastleStatus::WHITE,
        Color::Black => CastleStatus::BLACK,
    }
}

/// The castling right that is lost when a rook leaves (or is captured on)
/// the given corner, if that corner is a rook home square at all.
pub(crate) fn rook_home_mask(square: Square) -> Option<CastleStatus> {
    match square {
        Square::A1 => Some(CastleStatus::WHITE_QUEENSIDE),
        Square::H1 => Some(CastleStatus::WHITE_KINGSIDE),
        Square::A8 => Some(CastleStatus::BLACK_QUEENSIDE),
        Square::H8 => Some(CastleStatus::BLACK_KINGSIDE),
        _ => None,
    }
}
