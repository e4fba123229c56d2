use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};

use tictac4::*;

mod terminal;
use terminal::*;

/// Tic-Tac-4: nine games of Connect 4 played as one game of tic-tac-toe
#[derive(Parser, Debug)]
#[command(name = "tictac4", version)]
struct Cli {
    /// Moves to replay before play starts, e.g. "52 52 11" (board 1-9, then column 1-7)
    #[arg(long)]
    moves: Option<String>,

    /// Print plain characters instead of coloured tiles
    #[arg(long)]
    plain: bool,
}

fn describe(outcome: Outcome) -> String {
    match outcome {
        Outcome::Winner(mark) => format!("won by {}", mark_name(mark)),
        Outcome::Drawn => "a tie".to_string(),
    }
}

// prints each placement as it happens, the match result is reported from the move result
fn announce(event: &MatchEvent) {
    match event {
        MatchEvent::Placed(placement) => println!(
            "{} dropped into board {}, column {}",
            mark_name(placement.mark),
            notation::board_number(placement.meta_row, placement.meta_column),
            placement.column + 1
        ),
        MatchEvent::MatchOver(outcome) => info!(%outcome, "match finished"),
    }
}

fn ask(question: &str) -> Result<bool> {
    let stdin = stdin();
    loop {
        let mut buffer = String::new();
        print!("{}", question);
        stdout().flush()?;
        if stdin.read_line(&mut buffer)? == 0 {
            return Ok(false);
        }
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut game = match &cli.moves {
        Some(moves) => MetaGame::from_moves(moves)?,
        None => MetaGame::new(),
    };
    game.subscribe(announce);

    let stdin = stdin();

    println!("Welcome to Tic-Tac-4\n");

    // game loop
    loop {
        render(&game, !cli.plain)?;

        if let Some(outcome) = game.outcome() {
            match outcome {
                Outcome::Winner(mark) => println!("{} has won!", mark_name(mark)),
                Outcome::Drawn => println!("That's a tie."),
            }
            if ask("Would you like to play again? y/n: ")? {
                game.reset();
                continue;
            }
            break;
        }

        print!("Move input (board, column) > ");
        stdout().flush()?;
        let mut input_str = String::new();
        if stdin.read_line(&mut input_str)? == 0 {
            break;
        }

        let coords = match notation::parse_move(input_str.trim()) {
            Err(err) => {
                println!("{}", err);
                continue;
            }
            Ok(coords) => coords,
        };

        match game.play_checked(coords.meta_row, coords.meta_column, coords.column) {
            // try the move again
            Err(rejection) => println!("Invalid move: {}", rejection),
            Ok(MoveResult::Continuing(_)) => {}
            Ok(MoveResult::SubGameResolved { outcome, .. })
            | Ok(MoveResult::MatchOver { claim: outcome, .. }) => {
                println!(
                    "Board {} is {}",
                    notation::board_number(coords.meta_row, coords.meta_column),
                    describe(outcome)
                );
            }
        }
    }
    Ok(())
}
