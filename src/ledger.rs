// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::notation::Notation;
use crate::types::Color;

/// One white move and the black reply that followed it, as fixed-width
/// notation records. A half that has not been played is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Round {
    pub white: String,
    pub black: String,
}

/// The ordered history of every move played in a game.
///
/// Moves alternate colors starting from `first`, which is white for a game
/// played from the initial position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    first: Color,
    plies: Vec<Notation>,
}

impl Ledger {
    pub fn new(first: Color) -> Ledger {
        Ledger {
            first,
            plies: Vec::new(),
        }
    }

    pub fn record(&mut self, notation: Notation) {
        self.plies.push(notation);
    }

    /// The most recently played move.
    pub fn last(&self) -> Option<&Notation> {
        self.plies.last()
    }

    /// Removes the most recent move. If it was black's, white's half of the
    /// round stays in place.
    pub fn pop_last(&mut self) -> Option<Notation> {
        self.plies.pop()
    }

    pub fn len(&self) -> usize {
        self.plies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    /// The history grouped into rounds.
    pub fn rounds(&self) -> Vec<Round> {
        let mut rounds = Vec::new();
        let mut iter = self.plies.iter().map(|n| n.padded());
        if self.first == Color::Black {
            if let Some(black) = iter.next() {
                rounds.push(Round {
                    white: String::new(),
                    black,
                });
            }
        }

        while let Some(white) = iter.next() {
            let black = iter.next().unwrap_or_default();
            rounds.push(Round { white, black });
        }

        rounds
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new(Color::White)
    }
}
