//! A rules engine for the board game 'Tic-Tac-4'
//!
//! Nine games of Connect 4 are laid out in a 3x3 grid. Winning (or filling)
//! one of them claims that cell of the grid, and the grid itself is played
//! as tic-tac-toe: three claimed wins in a line take the match.
//!
//! # Basic Usage
//!
//! ```
//! use tictac4::{MetaGame, Mark, MoveResult, Outcome};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut game = MetaGame::new();
//!
//! // player A stacks four pieces in the centre board's first column
//! for &column in [0, 1, 0, 1, 0, 1].iter() {
//!     game.play_checked(1, 1, column)?;
//! }
//! let result = game.play_checked(1, 1, 0)?;
//!
//! assert!(matches!(result, MoveResult::SubGameResolved { .. }));
//! assert_eq!(game.claim(1, 1), Some(Outcome::Winner(Mark::PlayerA)));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod mark;

pub mod sub_game;

pub mod meta_game;

pub mod notation;


pub use error::{Axis, Rejection};
pub use mark::{Mark, Outcome};
pub use meta_game::{MatchEvent, MatchObserver, MetaGame, MoveResult, Placement};
pub use notation::MoveCoords;
pub use sub_game::{DropResult, SubGame};

/// The width of a sub-board in tiles
pub const WIDTH: usize = 7;

/// The height of a sub-board in tiles
pub const HEIGHT: usize = 6;

/// The number of same-mark tiles in a line needed to win a sub-board
pub const WIN_LENGTH: usize = 4;

/// The number of sub-boards along each side of the meta grid
pub const META_SIZE: usize = 3;

// a winning run must fit on the board both ways
const_assert!(WIN_LENGTH <= WIDTH && WIN_LENGTH <= HEIGHT);
// the meta-line table is written out for tic-tac-toe
const_assert!(META_SIZE == 3);
// sub-boards and columns are single digits in move notation
const_assert!(META_SIZE * META_SIZE <= 9 && WIDTH <= 9);
