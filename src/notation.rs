// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Coordinate move notation, as written to the move history and to save
//! files: `E2-E4`, or `E7-E8=Q` for a promotion. The promoted piece's letter
//! is always upper case, whichever side promotes.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::types::{PieceKind, Square};

/// Width of a fixed-width notation record. Moves without a promotion are
/// padded with trailing spaces up to it.
pub const RECORD_WIDTH: usize = 7;

/// Possible errors that can arise when parsing a move in coordinate notation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NotationError {
    BadLength(usize),
    MissingSeparator,
    OutOfRange { row: i32, column: i32 },
    BadPromotion(char),
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NotationError::BadLength(len) => {
                write!(f, "expected 5 or 7 characters, found {}", len)
            }
            NotationError::MissingSeparator => write!(f, "missing '-' or '=' separator"),
            NotationError::OutOfRange { row, column } => {
                write!(f, "coordinate (row {}, column {}) is off the board", row, column)
            }
            NotationError::BadPromotion(c) => write!(f, "cannot promote to '{}'", c),
        }
    }
}

impl Error for NotationError {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Notation {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Notation {
    /// Parses a move such as `e2-e4` or `B7-B8=Q`. File letters may be in
    /// either case and trailing padding is ignored.
    pub fn parse(text: &str) -> Result<Notation, NotationError> {
        let chars: Vec<char> = text.trim_end().chars().collect();
        if chars.len() != 5 && chars.len() != RECORD_WIDTH {
            return Err(NotationError::BadLength(chars.len()));
        }

        if chars[2] != '-' {
            return Err(NotationError::MissingSeparator);
        }

        let from = parse_square(chars[0], chars[1])?;
        let to = parse_square(chars[3], chars[4])?;
        let promotion = if chars.len() == RECORD_WIDTH {
            if chars[5] != '=' {
                return Err(NotationError::MissingSeparator);
            }

            match PieceKind::try_from(chars[6]) {
                Ok(kind) if kind.is_promotion_target() => Some(kind),
                _ => return Err(NotationError::BadPromotion(chars[6])),
            }
        } else {
            None
        };

        Ok(Notation {
            from,
            to,
            promotion,
        })
    }

    /// The notation padded to the fixed record width.
    pub fn padded(&self) -> String {
        format!("{:<width$}", self.to_string(), width = RECORD_WIDTH)
    }
}

fn parse_square(file: char, rank: char) -> Result<Square, NotationError> {
    let column = file.to_ascii_uppercase() as i32 - 'A' as i32;
    let row = rank as i32 - '1' as i32;
    Square::from_coords(row, column).ok_or(NotationError::OutOfRange { row, column })
}

impl FromStr for Notation {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Notation::parse(s)
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.letter())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain() {
        let note = Notation::parse("E2-E4").unwrap();
        assert_eq!(Square::E2, note.from);
        assert_eq!(Square::E4, note.to);
        assert_eq!(None, note.promotion);
    }

    #[test]
    fn parse_lower_case_and_padding() {
        let note = Notation::parse("g1-f3  ").unwrap();
        assert_eq!(Square::G1, note.from);
        assert_eq!(Square::F3, note.to);
    }

    #[test]
    fn parse_promotion() {
        let note: Notation = "a2-a1=n".parse().unwrap();
        assert_eq!(Some(PieceKind::Knight), note.promotion);
        assert_eq!("A2-A1=N", note.to_string());
    }

    #[test]
    fn out_of_range() {
        assert_eq!(
            Err(NotationError::OutOfRange { row: 8, column: 4 }),
            Notation::parse("E2-E9")
        );
        assert_eq!(
            Err(NotationError::OutOfRange { row: 1, column: 8 }),
            Notation::parse("I2-E4")
        );
    }

    #[test]
    fn bad_shapes() {
        assert_eq!(Err(NotationError::BadLength(4)), Notation::parse("E2E4"));
        assert_eq!(Err(NotationError::MissingSeparator), Notation::parse("E2xE4"));
        assert_eq!(Err(NotationError::MissingSeparator), Notation::parse("E7-E8+Q"));
        assert_eq!(Err(NotationError::BadPromotion('K')), Notation::parse("E7-E8=K"));
        assert_eq!(Err(NotationError::BadLength(0)), Notation::parse(""));
    }

    #[test]
    fn padded_width() {
        let note = Notation::parse("E2-E4").unwrap();
        assert_eq!("E2-E4  ", note.padded());
        let promo = Notation::parse("E7-E8=R").unwrap();
        assert_eq!("E7-E8=R", promo.padded());
    }
}
