//! Neighbor relation and edge weights of the implicit vertex graph.
//!
//! Two vertices are neighbors when they differ in exactly one position. The
//! cost of changing a position is 1.0 in the letter half and 0.5 in the
//! digit half, which makes the weighted Hamming distance both the edge cost
//! between neighbors and an admissible A* estimate between any two vertices:
//! every differing position has to be changed by at least one step.
use crate::space::Vertex;

/// Cost of changing one symbol in the first (letter) half.
pub const FRONT_WEIGHT: f64 = 1.0;
/// Cost of changing one symbol in the second (digit) half.
pub const BACK_WEIGHT: f64 = 0.5;

/// Number of positions where `u` and `v` differ.
pub fn hamming_distance(u: &Vertex, v: &Vertex) -> usize {
    debug_assert_eq!(u.len(), v.len(), "vertices of different length");
    u.symbols()
        .iter()
        .zip(v.symbols())
        .filter(|(a, b)| a != b)
        .count()
}

/// `true` iff `u` and `v` differ in exactly one position.
pub fn is_neighbor(u: &Vertex, v: &Vertex) -> bool {
    hamming_distance(u, v) == 1
}

/// Weighted Hamming distance between `u` and `v`.
///
/// Sums `FRONT_WEIGHT` for every differing position in the first half and
/// `BACK_WEIGHT` for every differing position in the second half. For true
/// neighbors this is exactly 1.0 or 0.5.
///
/// # Examples
/// ```
/// use pile_search::adjacency::edge_cost;
/// use pile_search::space::Vertex;
/// let a = Vertex::parse("AB01").unwrap();
/// let b = Vertex::parse("AC02").unwrap();
/// assert_eq!(edge_cost(&a, &b), 1.5);
/// ```
pub fn edge_cost(u: &Vertex, v: &Vertex) -> f64 {
    debug_assert_eq!(u.len(), v.len(), "vertices of different length");
    let half = u.len() / 2;
    u.symbols()
        .iter()
        .zip(v.symbols())
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, _)| if i < half { FRONT_WEIGHT } else { BACK_WEIGHT })
        .sum()
}

/// A* estimate of the remaining cost from `from` to `goal`.
pub fn heuristic(from: &Vertex, goal: &Vertex) -> f64 {
    edge_cost(from, goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Vertex {
        Vertex::parse(s).unwrap()
    }

    #[test]
    fn test_hamming_distance() {
        assert_eq!(hamming_distance(&v("AB01"), &v("AB01")), 0);
        assert_eq!(hamming_distance(&v("AB01"), &v("BB01")), 1);
        assert_eq!(hamming_distance(&v("AB01"), &v("BA10")), 4);
    }

    #[test]
    fn test_is_neighbor_is_symmetric() {
        let vertices = ["AA00", "AB00", "AB01", "BA10", "AA01"].map(v);
        for a in &vertices {
            assert!(!is_neighbor(a, a));
            for b in &vertices {
                assert_eq!(is_neighbor(a, b), is_neighbor(b, a));
            }
        }
    }

    #[test]
    fn test_edge_cost_between_neighbors() {
        assert_eq!(edge_cost(&v("A0"), &v("B0")), 1.0);
        assert_eq!(edge_cost(&v("A0"), &v("A1")), 0.5);
        assert_eq!(edge_cost(&v("AB12"), &v("AC12")), 1.0);
        assert_eq!(edge_cost(&v("AB12"), &v("AB13")), 0.5);
    }

    #[test]
    fn test_edge_cost_sums_all_differences() {
        assert_eq!(edge_cost(&v("A0"), &v("B1")), 1.5);
        assert_eq!(edge_cost(&v("AB12"), &v("BA21")), 3.0);
        assert_eq!(edge_cost(&v("AB12"), &v("AB12")), 0.0);
        assert_eq!(heuristic(&v("AB12"), &v("AB21")), 1.0);
    }
}
