//! Compact move notation
//!
//! A move is two digits: the sub-board, numbered 1 to 9 row by row from the
//! top left, then the 1-indexed column to drop into. `"52"` drops into the
//! second column of the centre board. Whitespace and commas between digits
//! are ignored, so `"52 52,11"` and `"525211"` are the same list of moves.

use anyhow::{anyhow, Result};

use std::fmt;

use crate::{META_SIZE, WIDTH};

/// A decoded, 0-indexed move
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MoveCoords {
    pub meta_row: usize,
    pub meta_column: usize,
    pub column: usize,
}

impl fmt::Display for MoveCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            board_number(self.meta_row, self.meta_column),
            self.column + 1
        )
    }
}

/// The 1-based number a player uses for the sub-board at (`meta_row`, `meta_column`)
pub fn board_number(meta_row: usize, meta_column: usize) -> usize {
    meta_row * META_SIZE + meta_column + 1
}

/// Parses a whole list of moves
pub fn parse_moves<S: AsRef<str>>(moves: S) -> Result<Vec<MoveCoords>> {
    let mut digits = Vec::new();
    for c in moves.as_ref().chars() {
        if c.is_whitespace() || c == ',' {
            continue;
        }
        match c.to_digit(10) {
            Some(digit) => digits.push(digit as usize),
            None => return Err(anyhow!("could not parse '{}' as a valid move", c)),
        }
    }
    if digits.len() % 2 != 0 {
        return Err(anyhow!("incomplete move, every move needs a board and a column"));
    }

    digits
        .chunks(2)
        .map(|pair| decode(pair[0], pair[1]))
        .collect()
}

/// Parses exactly one move, e.g. typed at a prompt
pub fn parse_move<S: AsRef<str>>(input: S) -> Result<MoveCoords> {
    let mut moves = parse_moves(input)?;
    match moves.len() {
        1 => Ok(moves.remove(0)),
        0 => Err(anyhow!("no move given")),
        n => Err(anyhow!("expected a single move, found {}", n)),
    }
}

fn decode(board: usize, column: usize) -> Result<MoveCoords> {
    if board < 1 || board > META_SIZE * META_SIZE {
        return Err(anyhow!(
            "board {} out of range. Boards must be between 1 and {}",
            board,
            META_SIZE * META_SIZE
        ));
    }
    if column < 1 || column > WIDTH {
        return Err(anyhow!(
            "column {} out of range. Columns must be between 1 and {}",
            column,
            WIDTH
        ));
    }
    Ok(MoveCoords {
        meta_row: (board - 1) / META_SIZE,
        meta_column: (board - 1) % META_SIZE,
        column: column - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_are_ignored() -> Result<()> {
        assert_eq!(parse_moves("52 52,11")?, parse_moves("525211")?);
        Ok(())
    }

    #[test]
    fn boards_are_numbered_row_major() -> Result<()> {
        let coords = parse_move("64")?;
        assert_eq!(
            coords,
            MoveCoords {
                meta_row: 1,
                meta_column: 2,
                column: 3
            }
        );
        assert_eq!(coords.to_string(), "64");
        Ok(())
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(parse_move("0 1").is_err());
        assert!(parse_move("18").is_err());
        assert!(parse_move("5").is_err());
        assert!(parse_move("5a").is_err());
        assert!(parse_move("").is_err());
        assert!(parse_move("1111").is_err());
    }
}
