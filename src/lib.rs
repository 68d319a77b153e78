// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate pest_derive;

pub mod attacks;
mod board;
mod checkmate;
pub mod console;
mod game;
mod ledger;
mod legality;
mod moves;
mod notation;
pub mod path;
pub mod save;
mod types;

pub use attacks::{Attack, Hypothetical};
pub use board::{Board, FenParseError, START_FEN};
pub use game::{Game, GameError, GameStatus, MoveReport, Snapshot};
pub use ledger::{Ledger, Round};
pub use legality::IllegalMove;
pub use moves::{Move, MoveKind};
pub use notation::{Notation, NotationError};
pub use types::{CastleStatus, Color, File, Line, Piece, PieceKind, Rank, Square};
