//! Parallel enumeration driver.
//!
//! The top level of the search is split into one subtree per branch seed. Each subtree gets its
//! own `rest`/`exclude` pools, derived before it starts, so subtrees never share mutable state;
//! only the validated graph is shared. Subtrees run on the rayon pool and their results are
//! concatenated in seed order, which reproduces the sequential output order exactly.

use crate::bitset::VertexSet;
use crate::enumerate::{root_partitions, EnumerateConfig, MaximalSets, SetKind};
use crate::error::GraphError;
use crate::graph::{Adjacency, Graph};
use rayon::prelude::*;
use std::sync::Arc;

/// Collects every maximal set of `kind` in `graph`, enumerating top-level subtrees in parallel.
///
/// # Errors
/// Returns an error if `graph` is not a simple undirected graph.
pub fn par_enumerate<A>(
    graph: &A,
    kind: SetKind,
    config: &EnumerateConfig,
) -> Result<Vec<VertexSet>, GraphError>
where
    A: Adjacency + ?Sized,
{
    let graph = Arc::new(Graph::from_adjacency(graph)?);
    if graph.vertex_count() == 0 {
        return Ok(vec![VertexSet::new(0)]);
    }

    let roots = root_partitions(&graph, kind, config.pivot);
    tracing::debug!(
        vertices = graph.vertex_count(),
        subtrees = roots.len(),
        ?kind,
        pivot = ?config.pivot,
        threads = rayon::current_num_threads(),
        "starting parallel enumeration"
    );

    let batches: Vec<Vec<VertexSet>> = roots
        .into_par_iter()
        .map(|(include, rest, exclude)| {
            MaximalSets::with_root(graph.clone(), kind, config.pivot, include, rest, exclude)
                .collect()
        })
        .collect();

    let total = batches.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(total);
    for batch in batches {
        out.extend(batch);
    }
    tracing::debug!(?kind, sets = total, "parallel enumeration finished");
    Ok(out)
}

/// Parallel counterpart of [`enumerate_maximal_cliques`](crate::enumerate_maximal_cliques).
///
/// # Errors
/// Returns an error if `graph` is not a simple undirected graph.
pub fn par_maximal_cliques<A>(graph: &A) -> Result<Vec<VertexSet>, GraphError>
where
    A: Adjacency + ?Sized,
{
    par_enumerate(graph, SetKind::Clique, &EnumerateConfig::default())
}

/// Parallel counterpart of
/// [`enumerate_maximal_independent_sets`](crate::enumerate_maximal_independent_sets).
///
/// # Errors
/// Returns an error if `graph` is not a simple undirected graph.
pub fn par_maximal_independent_sets<A>(graph: &A) -> Result<Vec<VertexSet>, GraphError>
where
    A: Adjacency + ?Sized,
{
    par_enumerate(graph, SetKind::IndependentSet, &EnumerateConfig::default())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::{enumerate, PivotRule};
    use rand::Rng;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn parallel_matches_sequential_order() {
        let mut rng = XorShiftRng::seed_from_u64(0xDEADBEEF);
        for case in 0..12 {
            let n = 8 + case;
            let mut edges = Vec::new();
            for i in 0..n {
                for j in (i + 1)..n {
                    if rng.random_bool(0.45) {
                        edges.push((i, j));
                    }
                }
            }
            let g = Graph::from_edges(n, edges).unwrap();
            for kind in [SetKind::Clique, SetKind::IndependentSet] {
                for pivot in [PivotRule::None, PivotRule::Tomita] {
                    let config = EnumerateConfig { pivot };
                    let sequential: Vec<_> = enumerate(&g, kind, &config).unwrap().collect();
                    let parallel = par_enumerate(&g, kind, &config).unwrap();
                    assert_eq!(sequential, parallel, "{kind:?}/{pivot:?} differs on n={n}");
                }
            }
        }
    }

    #[test]
    fn parallel_empty_graph() {
        let g = Graph::empty(0);
        assert_eq!(par_maximal_cliques(&g).unwrap(), vec![VertexSet::new(0)]);
        assert_eq!(par_maximal_independent_sets(&g).unwrap(), vec![VertexSet::new(0)]);
    }

    #[test]
    fn parallel_rejects_malformed_graph() {
        let looped: Vec<Vec<usize>> = vec![vec![0]];
        assert!(matches!(
            par_maximal_cliques(&looped),
            Err(GraphError::SelfLoop { vertex: 0 })
        ));
    }
}
