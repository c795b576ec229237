//! Side-by-side UCS / A* runs and the expansion savings of the heuristic.
use crate::error::{Error, Result};
use crate::search::{Algorithm, BestFirstSearch, SearchSolution};
use crate::space::{StateSpace, VertexId};

/// Percentage of UCS expansions that A* avoided:
/// `(ucs - astar) / ucs * 100`.
///
/// # Arguments
/// * `ucs`: A solution produced with `Algorithm::UniformCost`.
/// * `astar`: A solution produced with `Algorithm::AStar` for the same
///   source and goal.
///
/// # Returns
/// * `Ok(percentage)`, negative if A* expanded more nodes.
/// * `Err(Error::ComparisonMismatch)` if the arguments are in the wrong
///   order, come from different queries, or UCS expanded nothing.
pub fn expansion_reduction(ucs: &SearchSolution, astar: &SearchSolution) -> Result<f64> {
    if ucs.algorithm != Algorithm::UniformCost {
        return Err(Error::ComparisonMismatch {
            reason: format!("first solution must come from UCS, found {}", ucs.algorithm),
        });
    }
    if astar.algorithm != Algorithm::AStar {
        return Err(Error::ComparisonMismatch {
            reason: format!("second solution must come from A*, found {}", astar.algorithm),
        });
    }
    if ucs.source != astar.source || ucs.goal != astar.goal {
        return Err(Error::ComparisonMismatch {
            reason: format!(
                "queries differ: {} -> {} vs {} -> {}",
                ucs.source, ucs.goal, astar.source, astar.goal
            ),
        });
    }
    if ucs.expansions == 0 {
        return Err(Error::ComparisonMismatch {
            reason: "UCS solution has no expansions".to_string(),
        });
    }
    let ucs_expansions = ucs.expansions as f64;
    Ok((ucs_expansions - astar.expansions as f64) / ucs_expansions * 100.0)
}

/// UCS and A* solutions for one `(source, goal)` query.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub ucs: SearchSolution,
    pub astar: SearchSolution,
    pub reduction: f64,
}

impl Comparison {
    /// Runs both algorithms on the same searcher and compares them.
    pub fn run(search: &mut BestFirstSearch<'_>, source: VertexId, goal: VertexId) -> Result<Self> {
        let ucs = search.run(source, goal, Algorithm::UniformCost)?;
        let astar = search.run(source, goal, Algorithm::AStar)?;
        let reduction = expansion_reduction(&ucs, &astar)?;
        log::info!(
            "{} -> {}: UCS {} / A* {} expansions ({:.2}% fewer)",
            source,
            goal,
            ucs.expansions,
            astar.expansions,
            reduction
        );
        Ok(Comparison {
            ucs,
            astar,
            reduction,
        })
    }

    /// Multi-line report: both solutions followed by the reduction.
    pub fn describe(&self, space: &StateSpace) -> String {
        format!(
            "{}\n{}\nA* expanded {:.2}% fewer states than UCS",
            self.ucs.describe(space),
            self.astar.describe(space),
            self.reduction
        )
    }
}
