use thiserror::Error;

/// Errors reported by graph loading, the algebraic operators and the
/// algorithms that take vertex arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A row's length differs from the number of rows.
    #[error("matrix is not square: row {row} has {found} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A self-loop was encoded on the diagonal.
    #[error("matrix diagonal must be zero: vertex {vertex} has weight {weight}")]
    NonZeroDiagonal { vertex: usize, weight: i32 },

    /// Binary operator applied to graphs with different vertex counts.
    #[error("graphs must be of the same size: {left} vs {right} vertices")]
    SizeMismatch { left: usize, right: usize },

    #[error("vertex {vertex} is out of range for a graph with {num_vertices} vertices")]
    VertexOutOfRange { vertex: usize, num_vertices: usize },

    /// Malformed matrix text.
    #[error("parse error: {0}")]
    Parse(String),
}

impl GraphError {
    /// True for the errors `Graph::load` raises on a malformed matrix.
    pub fn is_invalid_structure(&self) -> bool {
        matches!(
            self,
            GraphError::NotSquare { .. } | GraphError::NonZeroDiagonal { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
