//! Undirected simple graphs over dense vertex indices, plus the adjacency contract consumed by
//! the enumerators.

use crate::bitset::VertexSet;
use crate::error::GraphError;
use std::fs;
use std::path::Path;

// ============================================================================
// Adjacency contract
// ============================================================================

/// Read-only view of an undirected graph on vertices `0..vertex_count()`.
///
/// Implementations are expected to be symmetric and loop-free; the enumerators check both and
/// reject the graph otherwise. Repeated entries in a neighbour list are harmless.
pub trait Adjacency {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Neighbours of `v`.
    fn neighbours(&self, v: usize) -> impl Iterator<Item = usize> + '_;
}

impl Adjacency for [Vec<usize>] {
    fn vertex_count(&self) -> usize {
        self.len()
    }

    fn neighbours(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self[v].iter().copied()
    }
}

impl Adjacency for Vec<Vec<usize>> {
    fn vertex_count(&self) -> usize {
        self.len()
    }

    fn neighbours(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self[v].iter().copied()
    }
}

// ============================================================================
// Graph
// ============================================================================

/// A validated simple undirected graph stored as one neighbour bitset per vertex.
///
/// Every constructor checks that the relation is irreflexive and symmetric, so a `Graph` value
/// always satisfies both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    rows: Vec<VertexSet>,
}

impl Graph {
    /// Graph with `n` vertices and no edges.
    pub fn empty(n: usize) -> Self {
        Self {
            rows: vec![VertexSet::new(n); n],
        }
    }

    /// Complete graph `K_n`.
    pub fn complete(n: usize) -> Self {
        let rows = (0..n)
            .map(|v| {
                let mut row = VertexSet::full(n);
                row.remove(v);
                row
            })
            .collect();
        Self { rows }
    }

    /// Builds a graph from an undirected edge list. Repeated edges are merged.
    ///
    /// # Errors
    /// Returns an error if an endpoint is `>= n` or an edge joins a vertex to itself.
    pub fn from_edges<I>(n: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::empty(n);
        for (u, v) in edges {
            for vertex in [u, v] {
                if vertex >= n {
                    return Err(GraphError::VertexOutOfRange { vertex, n });
                }
            }
            if u == v {
                return Err(GraphError::SelfLoop { vertex: u });
            }
            graph.rows[u].insert(v);
            graph.rows[v].insert(u);
        }
        Ok(graph)
    }

    /// Copies any [`Adjacency`] into a checked bitset graph.
    ///
    /// # Errors
    /// Returns an error on a dangling neighbour index, a self-loop, or an asymmetric pair.
    /// Checks run in vertex order, so the first offending vertex is reported.
    pub fn from_adjacency<A>(adjacency: &A) -> Result<Self, GraphError>
    where
        A: Adjacency + ?Sized,
    {
        let n = adjacency.vertex_count();
        let mut rows = Vec::with_capacity(n);
        for v in 0..n {
            let mut row = VertexSet::new(n);
            for w in adjacency.neighbours(v) {
                if w >= n {
                    return Err(GraphError::VertexOutOfRange { vertex: w, n });
                }
                if w == v {
                    return Err(GraphError::SelfLoop { vertex: v });
                }
                row.insert(w);
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Builds a graph from neighbour bitsets, one per vertex.
    ///
    /// # Errors
    /// Returns an error if a row lives in the wrong universe, contains its own vertex, or the
    /// rows are not symmetric.
    pub fn from_rows(rows: Vec<VertexSet>) -> Result<Self, GraphError> {
        let n = rows.len();
        for (v, row) in rows.iter().enumerate() {
            if row.universe() != n {
                return Err(GraphError::NonSquare {
                    row: v,
                    expected: n,
                    got: row.universe(),
                });
            }
            if row.contains(v) {
                return Err(GraphError::SelfLoop { vertex: v });
            }
        }
        for (v, row) in rows.iter().enumerate() {
            for w in row {
                if !rows[w].contains(v) {
                    return Err(GraphError::NotSymmetric { from: v, to: w });
                }
            }
        }
        Ok(Self { rows })
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.rows.len()
    }

    /// The set of all vertices.
    #[inline]
    pub fn vertices(&self) -> VertexSet {
        VertexSet::full(self.vertex_count())
    }

    /// Neighbour set `N(v)`.
    ///
    /// # Panics
    /// Panics if `v` is not a vertex.
    #[inline(always)]
    pub fn neighbours(&self, v: usize) -> &VertexSet {
        &self.rows[v]
    }

    /// Returns whether the edge `(u, v)` exists.
    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.rows.get(u).is_some_and(|row| row.contains(v))
    }

    /// Degree of `v`.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.rows[v].len()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(VertexSet::len).sum::<usize>() / 2
    }

    /// Complement graph: `u ~ v` iff `u != v` and `u, v` are not adjacent here.
    pub fn complement(&self) -> Self {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(v, row)| {
                let mut comp = row.complement();
                comp.remove(v);
                comp
            })
            .collect();
        Self { rows }
    }

    /// Returns `true` if every two distinct members of `set` are adjacent.
    pub fn is_clique(&self, set: &VertexSet) -> bool {
        set.iter().all(|v| {
            let mut others = set.clone();
            others.remove(v);
            others.is_subset(&self.rows[v])
        })
    }

    /// Returns `true` if no two members of `set` are adjacent.
    pub fn is_independent(&self, set: &VertexSet) -> bool {
        set.iter().all(|v| set.is_disjoint(&self.rows[v]))
    }

    /// Loads a graph file, detecting the format from its content (see [`parse_graph`]).
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or does not describe a valid graph.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let graph = parse_graph(&text)?;
        tracing::debug!(
            path = %path.display(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "loaded graph"
        );
        Ok(graph)
    }
}

impl Adjacency for Graph {
    fn vertex_count(&self) -> usize {
        self.rows.len()
    }

    fn neighbours(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.rows[v].iter()
    }
}

// ============================================================================
// Parsing
// ============================================================================

fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
}

/// Parses either an adjacency matrix or an edge list.
///
/// The text is read as a matrix when every non-blank, non-comment line is a `0/1` string whose
/// length equals the number of such lines; otherwise it is read as an edge list. A lone line
/// that reads as a number is always a vertex count, so `0` and `1` are the edgeless graphs on
/// zero and one vertex, not 1×1 matrices.
///
/// # Errors
/// Propagates the error of the chosen parser.
pub fn parse_graph(text: &str) -> Result<Graph, GraphError> {
    let lines: Vec<&str> = content_lines(text).map(|(_, l)| l).collect();
    let vertex_count_only = lines.len() == 1 && lines[0].parse::<usize>().is_ok();
    let looks_like_matrix = !lines.is_empty()
        && !vertex_count_only
        && lines
            .iter()
            .all(|l| l.len() == lines.len() && l.bytes().all(|b| b == b'0' || b == b'1'));
    if looks_like_matrix {
        parse_adjacency_matrix(text)
    } else {
        parse_edge_list(text)
    }
}

/// Parses a `0/1` adjacency matrix.
///
/// Rules:
/// - Blank lines and `#` comment lines are ignored.
/// - The matrix must be square, symmetric, and have a zero diagonal.
///
/// # Errors
/// Returns an error if the input is empty, non-square, contains invalid characters,
/// has self-loops, or is not symmetric.
pub fn parse_adjacency_matrix(text: &str) -> Result<Graph, GraphError> {
    let lines: Vec<&str> = content_lines(text).map(|(_, l)| l).collect();
    if lines.is_empty() {
        return Err(GraphError::Empty);
    }
    let n = lines.len();

    let mut rows = Vec::with_capacity(n);
    for (i, line) in lines.iter().enumerate() {
        let bytes = line.as_bytes();
        if bytes.len() != n {
            return Err(GraphError::NonSquare {
                row: i,
                expected: n,
                got: bytes.len(),
            });
        }
        let mut row = VertexSet::new(n);
        for (j, &b) in bytes.iter().enumerate() {
            match b {
                b'0' => {}
                b'1' => {
                    row.insert(j);
                }
                _ => {
                    return Err(GraphError::InvalidChar {
                        row: i,
                        col: j,
                        ch: b as char,
                    })
                }
            }
        }
        rows.push(row);
    }

    Graph::from_rows(rows)
}

/// Parses an edge list: the first content line holds the vertex count, each further line one
/// edge `u v` separated by whitespace.
///
/// # Errors
/// Returns an error for an empty input, an unreadable line, or an invalid edge.
pub fn parse_edge_list(text: &str) -> Result<Graph, GraphError> {
    let mut lines = content_lines(text);
    let (header_line, header) = lines.next().ok_or(GraphError::Empty)?;
    let n: usize = header.parse().map_err(|_| GraphError::InvalidEdgeLine {
        line: header_line,
        text: header.to_string(),
    })?;

    let mut edges = Vec::new();
    for (line, l) in lines {
        let bad = || GraphError::InvalidEdgeLine {
            line,
            text: l.to_string(),
        };
        let mut parts = l.split_whitespace();
        let u = parts.next().and_then(|t| t.parse().ok()).ok_or_else(bad)?;
        let v = parts.next().and_then(|t| t.parse().ok()).ok_or_else(bad)?;
        if parts.next().is_some() {
            return Err(bad());
        }
        edges.push((u, v));
    }
    Graph::from_edges(n, edges)
}

// ============================================================================
// Tests
// ============================================================================
