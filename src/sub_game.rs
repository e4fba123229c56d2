//! A single game of Connect 4 occupying one cell of the meta grid

use anyhow::{anyhow, Result};
use tracing::debug;

use std::fmt;

use crate::{Axis, Mark, Outcome, Rejection, HEIGHT, WIDTH, WIN_LENGTH};

/// The landing spot of a successful drop, and the outcome it produced if any
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct DropResult {
    pub row: usize,
    pub column: usize,
    pub mark: Mark,
    /// `Some` only on the drop that finished the sub-game
    pub outcome: Option<Outcome>,
}

/// A 6x7 Connect 4 board with its own turn order
///
/// Every sub-game starts with `PlayerA` to move and alternates locally,
/// independent of the other boards in the match.
///
/// # Freezing
/// A sub-game freezes itself the moment it is won or filled. The owning
/// [`MetaGame`](crate::MetaGame) also freezes every sub-game when the match
/// ends, so a frozen sub-game may still have no [`outcome`](Self::outcome).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SubGame {
    cells: [[Mark; WIDTH]; HEIGHT], // row 0 is the top, pieces fall towards HEIGHT - 1
    heights: [usize; WIDTH],
    turn: Mark,
    frozen: bool,
    outcome: Option<Outcome>,
    num_moves: usize,
}

impl SubGame {
    pub fn new() -> Self {
        Self {
            cells: [[Mark::Empty; WIDTH]; HEIGHT],
            heights: [0; WIDTH],
            turn: Mark::PlayerA,
            frozen: false,
            outcome: None,
            num_moves: 0,
        }
    }

    /// Builds a sub-game by playing a string of 1-indexed column digits
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    if board.outcome.is_some() {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    board.drop(column - 1)?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Builds an unresolved sub-game from raw cells, for test setup and analysis
    ///
    /// No win or draw is evaluated until the next [`drop`](Self::drop).
    pub fn from_cells(cells: [[Mark; WIDTH]; HEIGHT], turn: Mark) -> Result<Self> {
        if turn.is_empty() {
            return Err(anyhow!("turn must belong to a player"));
        }

        let mut heights = [0; WIDTH];
        for column in 0..WIDTH {
            // count the stack from the bottom, then make sure nothing floats above it
            let height = (0..HEIGHT)
                .rev()
                .take_while(|&row| !cells[row][column].is_empty())
                .count();
            if (0..HEIGHT - height).any(|row| !cells[row][column].is_empty()) {
                return Err(anyhow!(
                    "Invalid position, column {} has a floating piece",
                    column + 1
                ));
            }
            heights[column] = height;
        }
        if heights.iter().sum::<usize>() == WIDTH * HEIGHT {
            return Err(anyhow!("Invalid position, board is already full"));
        }

        Ok(Self {
            cells,
            heights,
            turn,
            frozen: false,
            outcome: None,
            num_moves: heights.iter().sum(),
        })
    }

    /// Drops the current player's piece into `column`
    ///
    /// The piece lands in the lowest empty row. If it completes a line the
    /// sub-game is won by the mover and the turn is not passed on; if it
    /// fills the board the sub-game is drawn. Either way the sub-game freezes.
    pub fn drop(&mut self, column: usize) -> Result<DropResult, Rejection> {
        if self.frozen {
            return Err(Rejection::Frozen);
        }
        if column >= WIDTH {
            return Err(Rejection::OutOfRange {
                axis: Axis::Column,
                index: column,
                bound: WIDTH,
            });
        }
        if !self.playable(column) {
            return Err(Rejection::ColumnFull { column });
        }

        let mark = self.turn;
        let row = HEIGHT - 1 - self.heights[column];
        self.cells[row][column] = mark;
        self.heights[column] += 1;
        self.num_moves += 1;

        let outcome = if self.check_winning_move(row, column) {
            Some(Outcome::Winner(mark))
        } else if self.is_full() {
            Some(Outcome::Drawn)
        } else {
            self.turn = mark.opponent();
            None
        };

        if let Some(outcome) = outcome {
            self.outcome = Some(outcome);
            self.frozen = true;
        }
        debug!(row, column, ?mark, ?outcome, "piece dropped");

        Ok(DropResult {
            row,
            column,
            mark,
            outcome,
        })
    }

    /// Freezes or unfreezes the board. A sub-game with an outcome stays frozen.
    pub fn set_frozen(&mut self, frozen: bool) {
        if !frozen && self.outcome.is_some() {
            debug!("ignoring unfreeze of a finished sub-game");
            return;
        }
        self.frozen = frozen;
    }

    pub fn cells(&self) -> &[[Mark; WIDTH]; HEIGHT] {
        &self.cells
    }

    /// The mark at (`row`, `column`), row 0 being the top
    ///
    /// # Panics
    /// Panics if `row >= HEIGHT` or `column >= WIDTH`.
    pub fn cell(&self, row: usize, column: usize) -> Mark {
        self.cells[row][column]
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// Whether `column` exists and still has room, regardless of freezing
    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.heights[column] < HEIGHT
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == WIDTH * HEIGHT
    }

    /// Columns that would accept a piece right now
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&column| !self.frozen && self.playable(column))
    }

    // counts the run through the freshly placed tile along each axis
    fn check_winning_move(&self, row: usize, column: usize) -> bool {
        let player = self.cells[row][column];
        if player.is_empty() {
            return false;
        }

        // vertical, horizontal, then both diagonals
        for &(dy, dx) in [(1i32, 0i32), (0, 1), (1, 1), (1, -1)].iter() {
            let mut run = 1;
            for &sign in [-1i32, 1].iter() {
                let mut y = row as i32 + sign * dy;
                let mut x = column as i32 + sign * dx;
                loop {
                    if x < 0
                        || x >= WIDTH as i32
                        || y < 0
                        || y >= HEIGHT as i32
                        || self.cells[y as usize][x as usize] != player
                    {
                        break;
                    }
                    y += sign * dy;
                    x += sign * dx;
                    run += 1;
                }
            }
            if run >= WIN_LENGTH {
                return true;
            }
        }

        false
    }
}

impl Default for SubGame {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            let line: String = row.iter().map(Mark::glyph).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
