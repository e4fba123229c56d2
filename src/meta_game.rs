//! The 3x3 match of sub-games, played as tic-tac-toe over their outcomes

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use std::fmt;

use crate::{notation, Axis, Mark, Outcome, Rejection, SubGame, HEIGHT, META_SIZE};

/// The claimed outcome of each meta grid cell
pub type Claims = [[Option<Outcome>; META_SIZE]; META_SIZE];

/// Every line of three in the meta grid: rows, then columns, then diagonals
const META_LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A piece that landed somewhere in the match
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Placement {
    pub meta_row: usize,
    pub meta_column: usize,
    pub row: usize,
    pub column: usize,
    pub mark: Mark,
}

/// What a successful move did to the match
///
/// A single move can resolve its sub-game and end the match at once; the
/// `MatchOver` variant then still carries the sub-game's claim so both can
/// be shown in order.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MoveResult {
    Continuing(Placement),
    SubGameResolved {
        placement: Placement,
        outcome: Outcome,
    },
    MatchOver {
        placement: Placement,
        claim: Outcome,
        outcome: Outcome,
    },
}

impl MoveResult {
    pub fn placement(&self) -> Placement {
        match self {
            MoveResult::Continuing(placement)
            | MoveResult::SubGameResolved { placement, .. }
            | MoveResult::MatchOver { placement, .. } => *placement,
        }
    }
}

/// Notifications sent to subscribers, in the order they happen
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MatchEvent {
    Placed(Placement),
    /// Sent exactly once per match
    MatchOver(Outcome),
}

/// A subscriber to match events, typically a presentation layer
pub trait MatchObserver {
    fn notify(&mut self, event: &MatchEvent);
}

impl<F: FnMut(&MatchEvent)> MatchObserver for F {
    fn notify(&mut self, event: &MatchEvent) {
        self(event)
    }
}

/// The whole match: nine sub-games plus the claims they produced
///
/// # Concurrency
/// The engine is synchronous and unsynchronised. Callers sharing a
/// `MetaGame` between threads must serialise calls to
/// [`play_checked`](Self::play_checked), e.g. behind a single `Mutex`.
pub struct MetaGame {
    sub_games: [[SubGame; META_SIZE]; META_SIZE],
    claims: Claims,
    outcome: Option<Outcome>,
    num_moves: usize,
    observers: Vec<Box<dyn MatchObserver>>,
}

impl MetaGame {
    pub fn new() -> Self {
        Self {
            sub_games: [[SubGame::new(); META_SIZE]; META_SIZE],
            claims: [[None; META_SIZE]; META_SIZE],
            outcome: None,
            num_moves: 0,
            observers: Vec::new(),
        }
    }

    /// Replays a list of moves in compact notation (see [`notation`])
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut game = Self::new();

        for (i, coords) in notation::parse_moves(moves)?.into_iter().enumerate() {
            game.play_checked(coords.meta_row, coords.meta_column, coords.column)
                .with_context(|| format!("move {} ({}) was rejected", i + 1, coords))?;
        }
        Ok(game)
    }

    /// Registers an observer for placements and the end of the match
    pub fn subscribe<O: MatchObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Starts a new match, keeping subscribers
    pub fn reset(&mut self) {
        self.sub_games = [[SubGame::new(); META_SIZE]; META_SIZE];
        self.claims = [[None; META_SIZE]; META_SIZE];
        self.outcome = None;
        self.num_moves = 0;
    }

    /// Drops a piece into `column` of the sub-game at (`meta_row`, `meta_column`)
    ///
    /// If the drop finishes that sub-game, its outcome is claimed on the meta
    /// grid and the match is checked for a tic-tac-toe line or a full grid.
    /// When the match ends every sub-game is frozen.
    pub fn play_checked(
        &mut self,
        meta_row: usize,
        meta_column: usize,
        column: usize,
    ) -> Result<MoveResult, Rejection> {
        let result = self.play(meta_row, meta_column, column);
        if let Err(rejection) = &result {
            debug!(meta_row, meta_column, column, %rejection, "move rejected");
        }
        result
    }

    fn play(
        &mut self,
        meta_row: usize,
        meta_column: usize,
        column: usize,
    ) -> Result<MoveResult, Rejection> {
        check_meta_bounds(meta_row, meta_column)?;
        if self.outcome.is_some() {
            return Err(Rejection::Frozen);
        }

        let landing = self.sub_games[meta_row][meta_column].drop(column)?;
        self.num_moves += 1;

        let placement = Placement {
            meta_row,
            meta_column,
            row: landing.row,
            column: landing.column,
            mark: landing.mark,
        };
        self.emit(MatchEvent::Placed(placement));

        let claim = match landing.outcome {
            Some(claim) => claim,
            None => return Ok(MoveResult::Continuing(placement)),
        };
        self.claims[meta_row][meta_column] = Some(claim);
        info!(meta_row, meta_column, %claim, "sub-game resolved");

        let outcome = match match_outcome(&self.claims) {
            Some(outcome) => outcome,
            None => return Ok(MoveResult::SubGameResolved { placement, outcome: claim }),
        };
        self.outcome = Some(outcome);
        self.freeze_all();
        info!(%outcome, moves = self.num_moves, "match over");
        self.emit(MatchEvent::MatchOver(outcome));

        Ok(MoveResult::MatchOver {
            placement,
            claim,
            outcome,
        })
    }

    /// Freezes or unfreezes a single sub-game. Nothing is unfrozen once the match is over.
    pub fn set_frozen(
        &mut self,
        meta_row: usize,
        meta_column: usize,
        frozen: bool,
    ) -> Result<(), Rejection> {
        check_meta_bounds(meta_row, meta_column)?;
        if !frozen && self.outcome.is_some() {
            return Ok(());
        }
        self.sub_games[meta_row][meta_column].set_frozen(frozen);
        Ok(())
    }

    fn freeze_all(&mut self) {
        for sub_game in self.sub_games.iter_mut().flat_map(|row| row.iter_mut()) {
            sub_game.set_frozen(true);
        }
    }

    fn emit(&mut self, event: MatchEvent) {
        for observer in self.observers.iter_mut() {
            observer.notify(&event);
        }
    }

    /// # Panics
    /// Panics if either index is `META_SIZE` or more;
    /// [`play_checked`](Self::play_checked) rejects those instead.
    pub fn sub_game(&self, meta_row: usize, meta_column: usize) -> &SubGame {
        &self.sub_games[meta_row][meta_column]
    }

    pub fn sub_games(&self) -> &[[SubGame; META_SIZE]; META_SIZE] {
        &self.sub_games
    }

    /// The claimed outcome of the sub-game at (`meta_row`, `meta_column`)
    ///
    /// # Panics
    /// Panics if either index is `META_SIZE` or more.
    pub fn claim(&self, meta_row: usize, meta_column: usize) -> Option<Outcome> {
        self.claims[meta_row][meta_column]
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// Every (meta row, meta column, column) that would currently be accepted
    pub fn legal_moves(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let over = self.is_over();
        (0..META_SIZE)
            .flat_map(|meta_row| (0..META_SIZE).map(move |meta_column| (meta_row, meta_column)))
            .filter(move |_| !over)
            .flat_map(move |(meta_row, meta_column)| {
                self.sub_games[meta_row][meta_column]
                    .legal_columns()
                    .map(move |column| (meta_row, meta_column, column))
            })
    }
}

impl Default for MetaGame {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MetaGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaGame")
            .field("claims", &self.claims)
            .field("outcome", &self.outcome)
            .field("num_moves", &self.num_moves)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl fmt::Display for MetaGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (meta_row, boards) in self.sub_games.iter().enumerate() {
            if meta_row > 0 {
                writeln!(f)?;
            }
            for row in 0..HEIGHT {
                let line: Vec<String> = boards
                    .iter()
                    .map(|board| board.cells()[row].iter().map(Mark::glyph).collect())
                    .collect();
                writeln!(f, "{}", line.join(" | "))?;
            }
        }
        Ok(())
    }
}

/// The first meta line of three identical wins, checked rows, columns, then diagonals
///
/// Drawn claims never count towards a line.
#[instrument(level = "trace")]
pub fn meta_winner(claims: &Claims) -> Option<Mark> {
    for line in META_LINES.iter() {
        let [a, b, c] = *line;
        let first = claims[a.0][a.1];
        if let Some(mark) = first.and_then(|claim| claim.winner()) {
            if first == claims[b.0][b.1] && first == claims[c.0][c.1] {
                return Some(mark);
            }
        }
    }
    None
}

fn check_meta_bounds(meta_row: usize, meta_column: usize) -> Result<(), Rejection> {
    if meta_row >= META_SIZE {
        return Err(Rejection::OutOfRange {
            axis: Axis::MetaRow,
            index: meta_row,
            bound: META_SIZE,
        });
    }
    if meta_column >= META_SIZE {
        return Err(Rejection::OutOfRange {
            axis: Axis::MetaColumn,
            index: meta_column,
            bound: META_SIZE,
        });
    }
    Ok(())
}

// a win takes precedence over a full grid
fn match_outcome(claims: &Claims) -> Option<Outcome> {
    if let Some(mark) = meta_winner(claims) {
        return Some(Outcome::Winner(mark));
    }
    if claims.iter().flat_map(|row| row.iter()).all(Option::is_some) {
        return Some(Outcome::Drawn);
    }
    None
}
