//! Error types for graph construction, loading and result verification.

use std::io;

/// Errors raised while building, loading or validating a graph.
///
/// Malformed adjacency (self-loops, asymmetric neighbour lists, dangling indices) is a caller
/// input defect; enumeration refuses to start on such a graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// `v` lists itself as a neighbour.
    #[error("self-loop detected at vertex {vertex}")]
    SelfLoop {
        /// The vertex with a self-loop.
        vertex: usize,
    },
    /// `to` is a neighbour of `from` but not the other way around.
    #[error("adjacency is not symmetric: {to} is a neighbour of {from}, but {from} is not a neighbour of {to}")]
    NotSymmetric {
        /// Vertex whose neighbour list contains `to`.
        from: usize,
        /// Vertex missing `from` in its neighbour list.
        to: usize,
    },
    /// A neighbour index does not name a vertex of the graph.
    #[error("vertex {vertex} out of range for a graph with {n} vertices")]
    VertexOutOfRange {
        /// Offending index.
        vertex: usize,
        /// Number of vertices in the graph.
        n: usize,
    },
    /// No non-empty rows were found.
    #[error("graph description is empty")]
    Empty,
    /// Adjacency matrix is not square.
    #[error("adjacency matrix is not square: row {row} has length {got}, expected {expected}")]
    NonSquare {
        /// The row index with wrong length.
        row: usize,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// Encountered a non `0/1` character in a matrix row.
    #[error("invalid character at ({row}, {col}): {ch:?} (expected '0' or '1')")]
    InvalidChar {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The invalid character.
        ch: char,
    },
    /// An edge-list line could not be read as a vertex count or a `u v` pair.
    #[error("invalid edge list line {line}: {text:?}")]
    InvalidEdgeLine {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },
    /// I/O error while reading a graph file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A produced set (or family of sets) fails a clique / independent-set check.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// Two members of a supposed clique are not adjacent.
    #[error("{set} is not a clique: {u} and {v} are not adjacent")]
    NotClique {
        /// The offending set, formatted.
        set: String,
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
    },
    /// Two members of a supposed independent set are adjacent.
    #[error("{set} is not independent: {u} and {v} are adjacent")]
    NotIndependent {
        /// The offending set, formatted.
        set: String,
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
    },
    /// The set can be extended by `vertex` without breaking its property.
    #[error("{set} is not maximal: vertex {vertex} can be added")]
    NotMaximal {
        /// The offending set, formatted.
        set: String,
        /// A vertex that extends it.
        vertex: usize,
    },
    /// The same set appears more than once in a family.
    #[error("{set} was produced more than once")]
    Duplicate {
        /// The repeated set, formatted.
        set: String,
    },
    /// A set contains a vertex the graph does not have.
    #[error("{set} mentions vertex {vertex}, but the graph has {n} vertices")]
    ForeignVertex {
        /// The offending set, formatted.
        set: String,
        /// The unknown vertex.
        vertex: usize,
        /// Number of vertices in the graph.
        n: usize,
    },
}
