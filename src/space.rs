//! Vertices and the random state space they are drawn from.
//!
//! A `Vertex` is a fixed-length vector of symbols: capital letters in the
//! first half, decimal digits in the second. A `StateSpace` is a fixed set of
//! pairwise-distinct vertices; together with the rule in `adjacency` it
//! defines the implicit graph searched by `search`.
use crate::adjacency::{edge_cost, is_neighbor};
use crate::config::SpaceConfig;
use crate::error::{Error, Result};
use rand::Rng;
use std::collections::HashSet;
use std::fmt;

/// Index of a vertex inside its `StateSpace`.
pub type VertexId = usize;

/// A symbol vector such as `AB01`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    symbols: Box<[u8]>,
}

impl Vertex {
    /// Draws a vertex uniformly: letters from the first `config.letters()`
    /// capitals, digits from the first `config.digits()` decimals.
    pub fn random(config: &SpaceConfig, rng: &mut impl Rng) -> Self {
        let half = config.length() / 2;
        let symbols = (0..config.length())
            .map(|i| {
                if i < half {
                    b'A' + rng.gen_range(0..config.letters())
                } else {
                    b'0' + rng.gen_range(0..config.digits())
                }
            })
            .collect();
        Vertex { symbols }
    }

    /// Parses a vertex from text, ignoring whitespace between symbols.
    ///
    /// The vertex must have an even, non-zero number of symbols, letters
    /// `A`-`I` in the first half and digits `0`-`8` in the second.
    ///
    /// # Examples
    /// ```
    /// use pile_search::space::Vertex;
    /// let v = Vertex::parse("A B 0 1").unwrap();
    /// assert_eq!(v.to_string(), "AB01");
    /// assert!(Vertex::parse("A0B1").is_err()); // digit in the letter half
    /// assert!(Vertex::parse("AB0").is_err());  // odd length
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let symbols: Vec<u8> = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                u8::try_from(c).map_err(|_| Error::InvalidVertex {
                    text: text.to_string(),
                    reason: format!("unrecognized symbol '{}'", c),
                })
            })
            .collect::<Result<_>>()?;
        if symbols.is_empty() || symbols.len() % 2 != 0 {
            return Err(Error::InvalidVertex {
                text: text.to_string(),
                reason: format!("expected an even, non-zero length, found {}", symbols.len()),
            });
        }
        let half = symbols.len() / 2;
        for (i, &s) in symbols.iter().enumerate() {
            let valid = if i < half {
                (b'A'..=b'I').contains(&s)
            } else {
                (b'0'..=b'8').contains(&s)
            };
            if !valid {
                return Err(Error::InvalidVertex {
                    text: text.to_string(),
                    reason: format!("unexpected symbol '{}' at position {}", s as char, i),
                });
            }
        }
        Ok(Vertex {
            symbols: symbols.into_boxed_slice(),
        })
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of letters needed to spell this vertex (highest letter + 1).
    fn letters_used(&self) -> u8 {
        let half = self.len() / 2;
        self.symbols[..half].iter().map(|s| s - b'A' + 1).max().unwrap_or(0)
    }

    /// Number of digits needed to spell this vertex (highest digit + 1).
    fn digits_used(&self) -> u8 {
        let half = self.len() / 2;
        self.symbols[half..].iter().map(|s| s - b'0' + 1).max().unwrap_or(0)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &s in self.symbols.iter() {
            write!(f, "{}", s as char)?;
        }
        Ok(())
    }
}

/// An undirected edge of the implicit graph, `from < to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub cost: f64,
}

/// A fixed collection of pairwise-distinct vertices.
///
/// Vertex ids are positions in generation order and never change for the
/// lifetime of the space.
#[derive(Clone, Debug)]
pub struct StateSpace {
    config: SpaceConfig,
    vertices: Vec<Vertex>,
}

impl StateSpace {
    /// Draws `config.size()` distinct random vertices.
    ///
    /// A vertex that collides with one already accepted is discarded and
    /// redrawn as a whole. `SpaceConfig` guarantees the alphabet can hold
    /// `size` distinct vertices, so this terminates (slowly, when `size`
    /// equals the capacity).
    ///
    /// # Returns
    /// * `Ok(StateSpace)` with exactly `config.size()` vertices.
    /// * `Err(Error::ResourceExhaustion)` if the vertex array cannot be allocated.
    pub fn generate(config: &SpaceConfig, rng: &mut impl Rng) -> Result<Self> {
        let mut vertices = Vec::new();
        vertices
            .try_reserve_exact(config.size())
            .map_err(|_| Error::ResourceExhaustion {
                operation: "allocating the state space",
            })?;
        let mut seen = HashSet::with_capacity(config.size());
        let mut redraws = 0u64;
        while vertices.len() < config.size() {
            let vertex = Vertex::random(config, rng);
            if seen.insert(vertex.clone()) {
                vertices.push(vertex);
            } else {
                redraws += 1;
            }
        }
        log::debug!(
            "generated {} vertices of length {} ({} redraws)",
            vertices.len(),
            config.length(),
            redraws
        );
        Ok(StateSpace {
            config: *config,
            vertices,
        })
    }

    /// Builds a space from explicit vertices, inferring its configuration.
    ///
    /// The alphabet is the smallest one that spells every vertex. Fails if the
    /// vertices differ in length, repeat, or are too few for a valid space.
    pub fn from_vertices(vertices: Vec<Vertex>) -> Result<Self> {
        let length = vertices.first().map_or(0, Vertex::len);
        let mut seen = HashSet::with_capacity(vertices.len());
        for vertex in &vertices {
            if vertex.len() != length {
                return Err(Error::InvalidVertex {
                    text: vertex.to_string(),
                    reason: format!("expected length {}, found {}", length, vertex.len()),
                });
            }
            if !seen.insert(vertex) {
                return Err(Error::DuplicateVertex(vertex.to_string()));
            }
        }
        let letters = vertices.iter().map(Vertex::letters_used).max().unwrap_or(0);
        let digits = vertices.iter().map(Vertex::digits_used).max().unwrap_or(0);
        let config = SpaceConfig::new(letters, digits, length, vertices.len())?;
        Ok(StateSpace { config, vertices })
    }

    pub fn config(&self) -> &SpaceConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the vertex with the given id, or `Error::UnknownVertex`.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex> {
        self.vertices.get(id).ok_or(Error::UnknownVertex {
            index: id,
            size: self.vertices.len(),
        })
    }

    /// Id of `vertex` in this space, if present.
    pub fn position(&self, vertex: &Vertex) -> Option<VertexId> {
        self.vertices.iter().position(|v| v == vertex)
    }

    /// Ids of all vertices at Hamming distance 1 from `id`, in id order.
    ///
    /// # Panics
    /// Panics if `id` is out of range.
    pub fn neighbors(&self, id: VertexId) -> Vec<VertexId> {
        let vertex = &self.vertices[id];
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, other)| is_neighbor(vertex, other))
            .map(|(j, _)| j)
            .collect()
    }

    /// Every neighbor pair with its edge cost.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for (i, u) in self.vertices.iter().enumerate() {
            for (j, v) in self.vertices.iter().enumerate().skip(i + 1) {
                if is_neighbor(u, v) {
                    edges.push(Edge {
                        from: i,
                        to: j,
                        cost: edge_cost(u, v),
                    });
                }
            }
        }
        edges
    }

    /// Renders the neighbor graph as a Graphviz `strict graph`.
    ///
    /// Vertices are labelled with their 1-based listing number, edges with
    /// their cost. Isolated vertices are listed on their own.
    pub fn to_dot(&self) -> String {
        let label = |id: VertexId| format!("\"{}: {}\"", id + 1, self.vertices[id]);
        let mut output = String::from("strict graph {\n");
        for id in 0..self.vertices.len() {
            output.push_str(&format!("  {}\n", label(id)));
        }
        for edge in self.edges() {
            output.push_str(&format!(
                "  {} -- {} [label=\"{:.1}\"]\n",
                label(edge.from),
                label(edge.to),
                edge.cost
            ));
        }
        output.push_str("}\n");
        output
    }
}

impl fmt::Display for StateSpace {
    /// Numbered listing, one vertex per line with space-separated symbols.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, vertex) in self.vertices.iter().enumerate() {
            write!(f, "{:<4}:", i + 1)?;
            for &s in vertex.symbols() {
                write!(f, " {}", s as char)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
