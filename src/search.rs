//! A* and Uniform-Cost Search over a `StateSpace`.
//!
//! Search metadata lives in `SearchNode`s that are created the first time a
//! vertex is reached and cached by vertex id for the lifetime of the
//! `BestFirstSearch`. Each run clears the per-run fields (`visited`, costs,
//! predecessor) of the nodes it touched, so the same searcher can answer any
//! number of independent queries; the cache itself and the neighbor lists
//! stored in it survive.
use crate::adjacency::{edge_cost, heuristic};
use crate::error::Result;
use crate::frontier::Frontier;
use crate::space::{StateSpace, VertexId};
use std::fmt;

/// Cost reported by `SearchSolution::total_cost` when the goal is unreachable.
pub const NO_PATH_COST: f64 = -1.0;

/// Which best-first variant to run. UCS is A* with the heuristic term fixed to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    UniformCost,
    AStar,
}

impl Algorithm {
    pub fn uses_heuristic(&self) -> bool {
        matches!(self, Algorithm::AStar)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::UniformCost => f.pad("UCS"),
            Algorithm::AStar => f.pad("A*"),
        }
    }
}

/// Search metadata attached to one vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchNode {
    vertex: VertexId,
    cost_from_source: f64,
    estimated_total: f64,
    visited: bool,
    predecessor: Option<VertexId>,
    neighbors: Option<Vec<VertexId>>,
}

impl SearchNode {
    fn new(vertex: VertexId) -> Self {
        SearchNode {
            vertex,
            cost_from_source: f64::INFINITY,
            estimated_total: f64::INFINITY,
            visited: false,
            predecessor: None,
            neighbors: None,
        }
    }

    /// Clears per-run metadata. The vertex and its cached neighbors are kept.
    fn reset(&mut self) {
        self.cost_from_source = f64::INFINITY;
        self.estimated_total = f64::INFINITY;
        self.visited = false;
        self.predecessor = None;
    }

    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    /// `g`: cost of the best known path from the source.
    pub fn cost_from_source(&self) -> f64 {
        self.cost_from_source
    }

    /// `e = g + h` for A*, `g` for UCS.
    pub fn estimated_total(&self) -> f64 {
        self.estimated_total
    }

    /// Whether the node is in the closed set of the current run.
    pub fn visited(&self) -> bool {
        self.visited
    }

    /// Previous vertex on the best known path. The source is its own predecessor.
    pub fn predecessor(&self) -> Option<VertexId> {
        self.predecessor
    }
}

/// Outcome of one search.
///
/// An unreachable goal is a normal outcome: `cost` is `None`, `path` is
/// empty and `total_cost()` returns `NO_PATH_COST`.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchSolution {
    pub source: VertexId,
    pub goal: VertexId,
    pub algorithm: Algorithm,
    /// Number of nodes taken off the frontier.
    pub expansions: usize,
    pub cost: Option<f64>,
    /// Vertices from source to goal, both included. `[source]` when they coincide.
    pub path: Vec<VertexId>,
}

impl SearchSolution {
    pub fn is_connected(&self) -> bool {
        self.cost.is_some()
    }

    /// Path cost, or `NO_PATH_COST` when the goal was not reached.
    pub fn total_cost(&self) -> f64 {
        self.cost.unwrap_or(NO_PATH_COST)
    }

    /// Human-readable summary with the path spelled out as vertices of `space`.
    pub fn describe(&self, space: &StateSpace) -> String {
        let mut output = format!("{:<4} expansions: {:<6}", self.algorithm, self.expansions);
        match self.cost {
            Some(cost) => {
                let path: Vec<String> = self
                    .path
                    .iter()
                    .map(|&id| space.vertices()[id].to_string())
                    .collect();
                output.push_str(&format!("cost: {:<6.1} path: {}", cost, path.join(" -> ")));
            }
            None => output.push_str("no path"),
        }
        output
    }
}

/// Best-first searcher bound to one state space.
///
/// # Examples
/// ```
/// use pile_search::search::{Algorithm, BestFirstSearch};
/// use pile_search::utils::space_from_str_array;
///
/// let space = space_from_str_array(&["A0", "B0", "A1"]).unwrap();
/// let mut search = BestFirstSearch::new(&space);
/// let solution = search.run(0, 1, Algorithm::UniformCost).unwrap();
/// assert_eq!(solution.cost, Some(1.0));
/// assert_eq!(solution.path, vec![0, 1]);
/// ```
pub struct BestFirstSearch<'a> {
    space: &'a StateSpace,
    nodes: Vec<Option<SearchNode>>,
    open: Frontier<VertexId>,
    closed: Frontier<VertexId>,
}

impl<'a> BestFirstSearch<'a> {
    pub fn new(space: &'a StateSpace) -> Self {
        BestFirstSearch {
            space,
            nodes: vec![None; space.len()],
            open: Frontier::new(),
            closed: Frontier::new(),
        }
    }

    /// Cached node for `vertex`, if the vertex has been reached by any run.
    pub fn node(&self, vertex: VertexId) -> Option<&SearchNode> {
        self.nodes.get(vertex).and_then(Option::as_ref)
    }

    /// Number of vertices that have a cached `SearchNode`.
    pub fn cached_nodes(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    fn node_mut(&mut self, vertex: VertexId) -> &mut SearchNode {
        self.nodes[vertex].get_or_insert_with(|| SearchNode::new(vertex))
    }

    fn neighbors_of(&mut self, vertex: VertexId) -> Vec<VertexId> {
        let space = self.space;
        self.node_mut(vertex)
            .neighbors
            .get_or_insert_with(|| space.neighbors(vertex))
            .clone()
    }

    /// Searches for a cheapest path from `source` to `goal`.
    ///
    /// # Arguments
    /// * `source`, `goal`: Vertex ids in the bound state space.
    /// * `algorithm`: `AStar` adds the weighted Hamming distance to the goal to
    ///   every estimate; `UniformCost` orders by path cost alone.
    ///
    /// # Returns
    /// * `Ok(SearchSolution)`, which may report that the goal is unreachable.
    /// * `Err(Error::UnknownVertex)` if either id is out of range.
    pub fn run(
        &mut self,
        source: VertexId,
        goal: VertexId,
        algorithm: Algorithm,
    ) -> Result<SearchSolution> {
        let space = self.space;
        space.vertex(source)?;
        let goal_vertex = space.vertex(goal)?;
        let vertices = space.vertices();
        let estimate = |id: VertexId, g: f64| {
            if algorithm.uses_heuristic() {
                g + heuristic(&vertices[id], goal_vertex)
            } else {
                g
            }
        };

        let start = self.node_mut(source);
        start.cost_from_source = 0.0;
        start.estimated_total = estimate(source, 0.0);
        start.predecessor = Some(source);
        self.open.append(source);

        let mut expansions = 0;
        let mut reached = None;
        while let Some(current) = self.open.pop_min_by(|id| estimated_total(&self.nodes, id)) {
            expansions += 1;
            self.closed.append(current);
            let node = self.node_mut(current);
            node.visited = true;
            let current_cost = node.cost_from_source;
            if current == goal {
                reached = Some(self.reconstruct(goal));
                break;
            }

            for neighbor in self.neighbors_of(current) {
                let new_cost = current_cost + edge_cost(&vertices[current], &vertices[neighbor]);
                let in_open = self.open.contains(neighbor);
                let node = self.node_mut(neighbor);
                if node.visited || (in_open && new_cost >= node.cost_from_source) {
                    continue;
                }
                node.predecessor = Some(current);
                node.cost_from_source = new_cost;
                node.estimated_total = estimate(neighbor, new_cost);
                if !in_open {
                    self.open.append(neighbor);
                }
            }
        }

        let (cost, path) = match reached {
            Some((cost, path)) => (Some(cost), path),
            None => (None, Vec::new()),
        };
        log::debug!(
            "{} {} -> {}: {} expansions, frontier peak {}, cost {:?}",
            algorithm,
            vertices[source],
            goal_vertex,
            expansions,
            self.open.high_water(),
            cost
        );
        self.finish_run();
        Ok(SearchSolution {
            source,
            goal,
            algorithm,
            expansions,
            cost,
            path,
        })
    }

    /// Follows predecessors back from `goal` to the self-referencing source.
    fn reconstruct(&self, goal: VertexId) -> (f64, Vec<VertexId>) {
        let predecessor_of = |id: VertexId| {
            self.node(id)
                .and_then(SearchNode::predecessor)
                .expect("every reached node has a predecessor")
        };
        let last = predecessor_of(goal);
        let vertices = self.space.vertices();
        let cost = self.nodes[last]
            .as_ref()
            .map_or(0.0, SearchNode::cost_from_source)
            + edge_cost(&vertices[last], &vertices[goal]);

        let mut path = vec![goal];
        let mut id = goal;
        loop {
            let previous = predecessor_of(id);
            if previous == id {
                break;
            }
            path.push(previous);
            id = previous;
        }
        path.reverse();
        (cost, path)
    }

    /// Clears metadata of every node touched by the last run and empties both sets.
    fn finish_run(&mut self) {
        while let Some(id) = self.open.pop_any().or_else(|| self.closed.pop_any()) {
            if let Some(node) = self.nodes[id].as_mut() {
                node.reset();
            }
        }
    }

    /// Clears per-run metadata of every cached node.
    pub fn reset(&mut self) {
        self.open.clear();
        self.closed.clear();
        for node in self.nodes.iter_mut().flatten() {
            node.reset();
        }
    }
}

fn estimated_total(nodes: &[Option<SearchNode>], id: VertexId) -> f64 {
    nodes[id]
        .as_ref()
        .map_or(f64::INFINITY, SearchNode::estimated_total)
}
