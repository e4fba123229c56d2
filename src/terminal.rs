use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use tictac4::{Mark, MetaGame, Outcome, SubGame, HEIGHT, META_SIZE, WIDTH};

// pictures drawn over a finished board, '#' is a lit tile
const CROSS: [&str; HEIGHT] = ["#.....#", ".#...#.", "..#.#..", "...#...", "..#.#..", ".#...#."];
const RING: [&str; HEIGHT] = ["..###..", ".#...#.", ".#...#.", ".#...#.", ".#...#.", "..###.."];
const SAD: [&str; HEIGHT] = [".......", "..#.#..", ".......", "..###..", ".#...#.", "......."];

const SEPARATOR: &str = " | ";

fn mark_color(mark: Mark) -> Color {
    match mark {
        Mark::PlayerA => Color::Red,
        Mark::PlayerB => Color::Yellow,
        Mark::Empty => Color::DarkBlue,
    }
}

pub fn mark_name(mark: Mark) -> &'static str {
    match mark {
        Mark::PlayerA => "Red",
        Mark::PlayerB => "Yellow",
        Mark::Empty => "Nobody",
    }
}

enum Tile {
    Piece(Mark),
    // a lit tile of a decided board's picture
    Picture(Outcome),
    Blank,
}

impl Tile {
    fn glyph(&self) -> char {
        match self {
            Tile::Piece(mark) => mark.glyph(),
            Tile::Picture(outcome) => outcome.glyph(),
            Tile::Blank => ' ',
        }
    }

    fn color(&self) -> Color {
        match self {
            Tile::Piece(mark) => mark_color(*mark),
            Tile::Picture(Outcome::Winner(mark)) => mark_color(*mark),
            Tile::Picture(Outcome::Drawn) => Color::White,
            Tile::Blank => Color::DarkBlue,
        }
    }
}

fn tile(board: &SubGame, row: usize, column: usize) -> Tile {
    let outcome = match board.outcome() {
        Some(outcome) => outcome,
        None => return Tile::Piece(board.cell(row, column)),
    };
    let picture = match outcome {
        Outcome::Winner(Mark::PlayerA) => CROSS,
        Outcome::Winner(_) => RING,
        Outcome::Drawn => SAD,
    };
    if picture[row].as_bytes()[column] == b'#' {
        Tile::Picture(outcome)
    } else {
        Tile::Blank
    }
}

/// Draws the whole match: board numbers, column numbers, then the tiles
pub fn render(game: &MetaGame, colour: bool) -> Result<()> {
    let mut stdout = stdout();

    for meta_row in 0..META_SIZE {
        let labels: Vec<String> = (0..META_SIZE)
            .map(|meta_column| {
                let number = meta_row * META_SIZE + meta_column + 1;
                format!("{:^width$}", format!("[{}]", number), width = WIDTH)
            })
            .collect();
        let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        let headers = vec![cols; META_SIZE];
        stdout.queue(PrintStyledContent(style(labels.join(SEPARATOR) + "\n")))?;
        stdout.queue(PrintStyledContent(style(headers.join(SEPARATOR) + "\n")))?;

        for row in 0..HEIGHT {
            for meta_column in 0..META_SIZE {
                if meta_column > 0 {
                    stdout.queue(PrintStyledContent(style(SEPARATOR)))?;
                }
                let board = game.sub_game(meta_row, meta_column);
                for column in 0..WIDTH {
                    let tile = tile(board, row, column);
                    if colour {
                        stdout.queue(PrintStyledContent(
                            style("O")
                                .attribute(Attribute::Bold)
                                .on(Color::DarkBlue)
                                .with(tile.color()),
                        ))?;
                    } else {
                        stdout.queue(PrintStyledContent(style(tile.glyph())))?;
                    }
                }
            }
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
