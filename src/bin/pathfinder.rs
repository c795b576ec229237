use anyhow::{bail, Context};
use clap::Parser;
use pile_search::compare::Comparison;
use pile_search::config::SpaceConfig;
use pile_search::search::BestFirstSearch;
use pile_search::space::{StateSpace, VertexId};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare UCS and A* on a random state space", long_about = None)]
struct Args {
    /// Number of letters in the first half of a vertex, in [1,9]
    l: u8,
    /// Number of digits in the second half of a vertex, in [1,9]
    m: u8,
    /// Vertex length, even and at least 2
    d: usize,
    /// Number of vertices, in [3, (L*M)^(d/2)]
    n: usize,

    /// Seed for the state-space generator (random if omitted)
    #[clap(short, long)]
    seed: Option<u64>,

    /// Write the neighbor graph as a Graphviz file
    #[clap(long)]
    dot: Option<PathBuf>,
}

/// Prompts until the user enters a 1-based index that is in range and not in `taken`.
fn read_state(
    input: &mut impl BufRead,
    name: &str,
    size: usize,
    taken: &[VertexId],
) -> anyhow::Result<VertexId> {
    loop {
        print!("Enter state-index of {} [1-{}]: ", name, size);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before {} was chosen", name);
        }
        let index = match line.trim().parse::<usize>() {
            Ok(index) if (1..=size).contains(&index) => index - 1,
            _ => {
                eprintln!("Please enter a number between 1 and {}.", size);
                continue;
            }
        };
        if taken.contains(&index) {
            eprintln!(
                "State #{} is already used as {} state! Please try again...",
                index + 1,
                if taken.first() == Some(&index) { "source" } else { "goal" }
            );
            continue;
        }
        return Ok(index);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SpaceConfig::new(args.l, args.m, args.d, args.n)?;
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let space = StateSpace::generate(&config, &mut rng)?;
    print!("{}", space);

    if let Some(path) = &args.dot {
        fs::write(path, space.to_dot())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Neighbor graph written to {}", path.display());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let source = read_state(&mut input, "Source", space.len(), &[])?;
    let goal1 = read_state(&mut input, "Goal #1", space.len(), &[source])?;
    let goal2 = read_state(&mut input, "Goal #2", space.len(), &[source, goal1])?;

    println!(
        "Source:  {}\nGoal #1: {}\nGoal #2: {}",
        space.vertices()[source],
        space.vertices()[goal1],
        space.vertices()[goal2]
    );

    let mut search = BestFirstSearch::new(&space);
    for (name, goal) in [("Goal #1", goal1), ("Goal #2", goal2)] {
        println!("\n--- {} ---", name);
        let comparison = Comparison::run(&mut search, source, goal)?;
        println!("{}", comparison.describe(&space));
    }
    Ok(())
}
