use std::fmt;

/// Which coordinate of a move was out of bounds
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Axis {
    MetaRow,
    MetaColumn,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::MetaRow => write!(f, "board row"),
            Axis::MetaColumn => write!(f, "board column"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Reasons a move is refused.
///
/// A rejected move never changes any game state.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum Rejection {
    #[error("board is frozen, no more pieces can be played there")]
    Frozen,

    #[error("column {} is full", .column + 1)]
    ColumnFull { column: usize },

    #[error("{axis} {index} out of range, must be below {bound}")]
    OutOfRange {
        axis: Axis,
        index: usize,
        bound: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_full_display_is_one_indexed() {
        let err = Rejection::ColumnFull { column: 3 };
        assert_eq!(err.to_string(), "column 4 is full");
    }

    #[test]
    fn out_of_range_display() {
        let err = Rejection::OutOfRange {
            axis: Axis::MetaRow,
            index: 3,
            bound: 3,
        };
        assert_eq!(err.to_string(), "board row 3 out of range, must be below 3");
    }
}
