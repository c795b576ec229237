use pile_search::compare::Comparison;
use pile_search::config::SpaceConfig;
use pile_search::search::BestFirstSearch;
use pile_search::space::StateSpace;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const NUM_RANDOM_SPACES: usize = 20;
const QUERIES_PER_SPACE: usize = 25;
const START_SEED: u64 = 0;

/// (L, M, d, N) configurations evaluated, from sparse to dense graphs.
const CONFIGURATIONS: [(u8, u8, usize, usize); 4] = [
    (3, 3, 4, 40),
    (4, 4, 4, 200),
    (3, 3, 6, 300),
    (5, 5, 4, 600),
];

fn main() -> anyhow::Result<()> {
    env_logger::init();
    println!(
        "Comparing UCS and A* on {} spaces x {} queries per configuration...",
        NUM_RANDOM_SPACES, QUERIES_PER_SPACE
    );

    for (l, m, d, n) in CONFIGURATIONS {
        let config = SpaceConfig::new(l, m, d, n)?;
        let mut reductions = Vec::new();
        let mut disconnected = 0usize;

        for space_idx in 0..NUM_RANDOM_SPACES {
            let current_seed = START_SEED + space_idx as u64;
            let mut rng = SmallRng::seed_from_u64(current_seed);
            let space = StateSpace::generate(&config, &mut rng)?;
            let mut search = BestFirstSearch::new(&space);

            for _ in 0..QUERIES_PER_SPACE {
                let source = rng.gen_range(0..space.len());
                let mut goal = rng.gen_range(0..space.len());
                while goal == source {
                    goal = rng.gen_range(0..space.len());
                }
                let comparison = Comparison::run(&mut search, source, goal)?;
                if comparison.ucs.cost != comparison.astar.cost {
                    eprintln!(
                        "Warning: UCS and A* disagree on cost for {} -> {} (seed {})",
                        source, goal, current_seed
                    );
                }
                if comparison.ucs.is_connected() {
                    reductions.push(comparison.reduction);
                } else {
                    disconnected += 1;
                }
            }
        }

        let average = if reductions.is_empty() {
            0.0
        } else {
            reductions.iter().sum::<f64>() / reductions.len() as f64
        };
        println!(
            "L={} M={} d={} N={:<4}: connected queries: {:<5} disconnected: {:<5} average A* reduction: {:.2}%",
            l,
            m,
            d,
            n,
            reductions.len(),
            disconnected,
            average
        );
    }
    Ok(())
}
