use anyhow::Context;
use clap::Parser;
use pile_search::config::GameConfig;
use pile_search::game::StateTree;
use pile_search::minimax::MinimizerMode;
use pile_search::play::{Match, Player};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play the three-pile take-away game against a minimax engine", long_about = None)]
struct Args {
    /// Initial size of each pile (3 or more)
    m: u32,
    /// Tokens removed from the red pile by move 3, in [2, M-1]
    k1: u32,
    /// Tokens removed from the green pile by move 4, in [2, M-1]
    k2: u32,
    /// Tokens removed from the yellow pile by move 5, in [2, M-1]
    k3: u32,

    /// Model your side as an optimal minimizer instead of the default greedy one
    #[clap(long)]
    optimal: bool,

    /// Write the full game tree as a Graphviz file
    #[clap(long)]
    dot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = GameConfig::new(args.m, args.k1, args.k2, args.k3)?;
    let tree = StateTree::build(&config)?;
    println!("Game tree built: {} states", tree.len());

    if let Some(path) = &args.dot {
        fs::write(path, tree.to_dot())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Game tree written to {}", path.display());
    }

    let mode = if args.optimal {
        MinimizerMode::Optimal
    } else {
        MinimizerMode::Greedy
    };
    let mut game = Match::new(&tree, mode);
    println!("Your side is modeled as the {:?} minimizer.", game.mode());
    println!("Moves:");
    for (i, rule) in tree.rules().iter().enumerate() {
        println!("  {}: {}", i, rule);
    }

    loop {
        println!("---------------------");
        println!("Step: {}, {}", game.steps(), game.current().piles());

        if game.is_over() {
            println!("---------------------");
            match game.winner() {
                Some(Player::Maximizer) => println!("The engine wins."),
                Some(Player::Minimizer) => println!("You win!"),
                None => println!("Nothing to play."),
            }
            break;
        }

        if game.to_move() == Player::Maximizer {
            let played = game.play_engine_move()?;
            println!("Engine plays {}: {}", played, tree.rules()[played]);
            continue;
        }

        print!(
            "Enter your move {:?}, 'u' to undo, or 'q' to quit: ",
            game.legal_moves()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        if trimmed_input == "u" {
            if game.undo() {
                println!("Move undone.");
            } else {
                println!("Cannot undo further.");
            }
            continue;
        }

        match trimmed_input.parse::<usize>() {
            Ok(index) => {
                if let Err(e) = game.play_opponent_move(index) {
                    println!("{}. Please try again.", e);
                }
            }
            Err(_) => println!("Invalid input: enter a move number, 'u', or 'q'."),
        }
    }
    Ok(())
}
