use std::fmt;

use itertools::Itertools;
use tracing::debug;

/// Weighted graph stored as a dense adjacency matrix.
///
/// A nonzero entry `adj[u][v]` is a directed edge `u -> v` carrying that
/// weight. Undirected graphs are encoded as symmetric matrices; symmetry is
/// not enforced. The diagonal is always zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    /// Adjacency matrix: adj[i][j] = weight of the edge from vertex i to vertex j
    adj: Vec<Vec<i32>>,
}

impl Graph {
    /// Creates an empty graph with no vertices.
    pub fn new() -> Self {
        Graph { adj: Vec::new() }
    }

    /// Builds a graph from an adjacency matrix, validating it like [`Graph::load`].
    pub fn from_matrix(adj: Vec<Vec<i32>>) -> Result<Self> {
        let mut graph = Graph::new();
        graph.load(adj)?;
        Ok(graph)
    }

    /// Replaces the owned matrix.
    ///
    /// Fails without touching the current matrix when the input is not
    /// square or has a nonzero diagonal entry.
    pub fn load(&mut self, adj: Vec<Vec<i32>>) -> Result<()> {
        let n = adj.len();
        for (i, row) in adj.iter().enumerate() {
            if row.len() != n {
                return Err(GraphError::NotSquare {
                    row: i,
                    expected: n,
                    found: row.len(),
                });
            }
            if row[i] != 0 {
                return Err(GraphError::NonZeroDiagonal {
                    vertex: i,
                    weight: row[i],
                });
            }
        }
        self.adj = adj;
        debug!(
            vertices = self.num_vertices(),
            edges = self.num_edges(),
            "loaded graph"
        );
        Ok(())
    }

    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    /// Number of nonzero entries halved, truncating.
    ///
    /// Counts each undirected edge once; a one-directional entry only
    /// counts as half an edge.
    pub fn num_edges(&self) -> usize {
        self.adj
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&w| w != 0)
            .count()
            / 2
    }

    /// # Panics
    ///
    /// Panics if `u` or `v` is not a vertex of the graph.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adj[u][v] != 0
    }

    /// Weight of the edge `u -> v`, or 0 when absent.
    ///
    /// # Panics
    ///
    /// Panics if `u` or `v` is not a vertex of the graph.
    pub fn weight(&self, u: usize, v: usize) -> i32 {
        self.adj[u][v]
    }

    /// Out-neighbors of `u` in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `u` is not a vertex of the graph.
    pub fn neighbors(&self, u: usize) -> Vec<usize> {
        (0..self.num_vertices())
            .filter(|&v| self.has_edge(u, v))
            .collect()
    }

    /// Returns an error unless `v` is a vertex of the graph.
    pub fn check_vertex(&self, v: usize) -> Result<()> {
        if v < self.num_vertices() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex: v,
                num_vertices: self.num_vertices(),
            })
        }
    }

    pub fn matrix(&self) -> &[Vec<i32>] {
        &self.adj
    }

    /// One-line description, e.g. `Graph with 3 vertices and 2 edges.`
    pub fn summary(&self) -> String {
        format!(
            "Graph with {} vertices and {} edges.",
            self.num_vertices(),
            self.num_edges()
        )
    }
}

/// Renders the matrix as `[[0, 1], [1, 0]]`.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .adj
            .iter()
            .map(|row| format!("[{}]", row.iter().join(", ")))
            .join(", ");
        write!(f, "[{}]", rows)
    }
}

// Module declarations
pub mod algorithms;
pub mod error;
pub mod ops;
pub mod parser;

pub use error::{GraphError, Result};
