use std::fmt;

/// The content of a single tile, or whose turn it is
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Mark {
    PlayerA,
    PlayerB,
    Empty,
}

impl Mark {
    pub fn is_empty(&self) -> bool {
        match self {
            Mark::Empty => true,
            _ => false,
        }
    }

    /// The player who moves after this one. `Empty` has no opponent.
    pub fn opponent(&self) -> Mark {
        match self {
            Mark::PlayerA => Mark::PlayerB,
            Mark::PlayerB => Mark::PlayerA,
            Mark::Empty => Mark::Empty,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Mark::PlayerA => 'X',
            Mark::PlayerB => 'O',
            Mark::Empty => '.',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::PlayerA => write!(f, "player A"),
            Mark::PlayerB => write!(f, "player B"),
            Mark::Empty => write!(f, "nobody"),
        }
    }
}

/// How a finished sub-board or match ended
///
/// Also used as the claim recorded in a meta grid cell.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Outcome {
    Winner(Mark),
    Drawn,
}

impl Outcome {
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Drawn => None,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Outcome::Winner(mark) => mark.glyph(),
            Outcome::Drawn => '-',
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(mark) => write!(f, "won by {}", mark),
            Outcome::Drawn => write!(f, "drawn"),
        }
    }
}
