//! # maxsets
//!
//! Exhaustive, duplicate-free enumeration of the maximal cliques and maximal independent sets
//! of a finite simple undirected graph.
//!
//! This crate provides:
//! - A word-packed [`VertexSet`] bitset over dense vertex indices.
//! - A validated bitset [`Graph`] and the [`Adjacency`] contract any graph type can implement.
//! - Lazy Bron–Kerbosch enumerators for maximal cliques and maximal independent sets, with
//!   optional Tomita pivoting.
//! - A rayon-parallel driver that splits the search at the top level.
//! - Independent verification of produced sets.
//!
//! ## Quick Start
//!
//! ```
//! use maxsets::{enumerate_maximal_cliques, enumerate_maximal_independent_sets, Graph};
//!
//! // Path 0-1-2
//! let graph = Graph::from_edges(3, [(0, 1), (1, 2)]).unwrap();
//!
//! let cliques: Vec<Vec<usize>> = enumerate_maximal_cliques(&graph)
//!     .unwrap()
//!     .map(|s| s.to_vec())
//!     .collect();
//! assert_eq!(cliques, vec![vec![0, 1], vec![1, 2]]);
//!
//! let mut isets: Vec<Vec<usize>> = enumerate_maximal_independent_sets(&graph)
//!     .unwrap()
//!     .map(|s| s.to_vec())
//!     .collect();
//! isets.sort();
//! assert_eq!(isets, vec![vec![0, 2], vec![1]]);
//! ```
//!
//! ## Plain adjacency lists
//!
//! Anything implementing [`Adjacency`] can be enumerated; it is validated first.
//!
//! ```
//! use maxsets::{enumerate_maximal_cliques, GraphError};
//!
//! let lists: Vec<Vec<usize>> = vec![vec![1], vec![]]; // 0 -> 1 but not 1 -> 0
//! assert!(matches!(
//!     enumerate_maximal_cliques(&lists),
//!     Err(GraphError::NotSymmetric { from: 0, to: 1 })
//! ));
//! ```
//!
//! ## Modules
//!
//! - [`bitset`]: Vertex bitsets.
//! - [`graph`]: Graph type, adjacency contract and text loaders.
//! - [`enumerate`]: The sequential enumerators.
//! - [`parallel`]: Parallel top-level fan-out.
//! - [`verify`]: Validity, maximality and uniqueness checks.
//!
//! ## Performance Notes
//!
//! - Output size is exponential in the worst case (`3^(n/3)` maximal independent sets for
//!   disjoint triangles), so is the running time.
//! - [`PivotRule::Tomita`] prunes branches without changing the produced family.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::inline_always)] // Intentional for hot-path code
#![allow(clippy::doc_markdown)]

pub mod bitset;
pub mod enumerate;
pub mod error;
pub mod graph;
pub mod parallel;
pub mod verify;

pub use bitset::VertexSet;
pub use enumerate::{
    enumerate, enumerate_maximal_cliques, enumerate_maximal_independent_sets, EnumerateConfig,
    MaximalSets, PivotRule, SetKind,
};
pub use error::{GraphError, VerifyError};
pub use graph::{Adjacency, Graph};
pub use parallel::{par_enumerate, par_maximal_cliques, par_maximal_independent_sets};

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::bitset::VertexSet;
    pub use crate::enumerate::{
        enumerate, enumerate_maximal_cliques, enumerate_maximal_independent_sets,
        EnumerateConfig, PivotRule, SetKind,
    };
    pub use crate::graph::{parse_adjacency_matrix, parse_edge_list, Adjacency, Graph};
    pub use crate::parallel::par_enumerate;
    pub use crate::verify::{check_family, check_set};
}
