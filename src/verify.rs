//! Deterministic checks for produced sets.
//!
//! These are independent of the search: they test the pairwise property and maximality
//! directly against the graph, so they can audit any producer of maximal sets.

use crate::bitset::VertexSet;
use crate::enumerate::SetKind;
use crate::error::VerifyError;
use crate::graph::Graph;
use std::collections::HashSet;

// ============================================================================
// Public API
// ============================================================================

/// Checks that `set` is a maximal clique of `graph`.
///
/// # Errors
/// Returns the first violation found: a foreign vertex, a non-adjacent pair, or a vertex that
/// extends the clique.
pub fn check_maximal_clique(graph: &Graph, set: &VertexSet) -> Result<(), VerifyError> {
    check_set(graph, SetKind::Clique, set)
}

/// Checks that `set` is a maximal independent set of `graph`.
///
/// # Errors
/// Returns the first violation found: a foreign vertex, an adjacent pair, or a vertex that
/// extends the set.
pub fn check_maximal_independent_set(graph: &Graph, set: &VertexSet) -> Result<(), VerifyError> {
    check_set(graph, SetKind::IndependentSet, set)
}

/// Checks that `set` is a maximal set of `kind` in `graph`.
///
/// # Errors
/// See [`check_maximal_clique`] and [`check_maximal_independent_set`].
pub fn check_set(graph: &Graph, kind: SetKind, set: &VertexSet) -> Result<(), VerifyError> {
    let n = graph.vertex_count();
    if let Some(vertex) = set.iter().find(|&v| v >= n) {
        return Err(VerifyError::ForeignVertex {
            set: set.to_string(),
            vertex,
            n,
        });
    }
    let set = VertexSet::from_indices(n, set.iter());

    let members = set.to_vec();
    for (i, &u) in members.iter().enumerate() {
        for &v in &members[i + 1..] {
            match (kind, graph.has_edge(u, v)) {
                (SetKind::Clique, false) => {
                    return Err(VerifyError::NotClique {
                        set: set.to_string(),
                        u,
                        v,
                    })
                }
                (SetKind::IndependentSet, true) => {
                    return Err(VerifyError::NotIndependent {
                        set: set.to_string(),
                        u,
                        v,
                    })
                }
                _ => {}
            }
        }
    }

    let outside = set.complement();
    for w in &outside {
        let extends = match kind {
            SetKind::Clique => set.is_subset(graph.neighbours(w)),
            SetKind::IndependentSet => set.is_disjoint(graph.neighbours(w)),
        };
        if extends {
            return Err(VerifyError::NotMaximal {
                set: set.to_string(),
                vertex: w,
            });
        }
    }

    Ok(())
}

/// Checks a whole family: every set is a maximal set of `kind` and none repeats.
///
/// Returns the number of sets checked.
///
/// # Errors
/// Returns the first violation found.
pub fn check_family<'a, I>(graph: &Graph, kind: SetKind, sets: I) -> Result<usize, VerifyError>
where
    I: IntoIterator<Item = &'a VertexSet>,
{
    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    let mut count = 0usize;
    for set in sets {
        check_set(graph, kind, set)?;
        if !seen.insert(set.to_vec()) {
            return Err(VerifyError::Duplicate {
                set: set.to_string(),
            });
        }
        count += 1;
    }
    Ok(count)
}

// ============================================================================
// Tests
// ============================================================================
