//! Bron–Kerbosch enumeration of maximal cliques and maximal independent sets.
//!
//! Both enumerators share one search skeleton over the partition `(include, rest, exclude)`:
//! `include` is the set built so far, `rest` the candidates that may still extend it, and
//! `exclude` the candidates already used to seed a sibling branch. A frame emits `include`
//! exactly when `rest` and `exclude` are both empty. The two kinds differ only in how a branch
//! on `v` restricts the pools:
//!
//! | kind            | `rest'`                 | `exclude'`        |
//! |-----------------|-------------------------|-------------------|
//! | clique          | `rest ∩ N(v)`           | `exclude ∩ N(v)`  |
//! | independent set | `rest \ (N(v) ∪ {v})`   | `exclude \ N(v)`  |
//!
//! The search runs on an explicit frame stack, so [`MaximalSets`] is a plain pull-based
//! iterator: each `next` resumes the suspended search, and dropping it abandons the rest.

use crate::bitset::VertexSet;
use crate::error::GraphError;
use crate::graph::{Adjacency, Graph};
use std::iter::FusedIterator;
use std::ops::ControlFlow;
use std::sync::Arc;

// ============================================================================
// Configuration
// ============================================================================

/// Which family of maximal sets to enumerate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetKind {
    /// Maximal cliques (pairwise adjacent).
    Clique,
    /// Maximal independent sets (pairwise non-adjacent).
    IndependentSet,
}

/// Branch-pruning rule applied at every search frame.
///
/// The rule never changes which sets are produced, only their order and how many frames the
/// search visits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PivotRule {
    /// Branch on every candidate in `rest`.
    #[default]
    None,
    /// Pick the vertex of `rest ∪ exclude` covering the most candidates and skip the candidates
    /// it covers (Tomita et al.).
    Tomita,
}

/// Enumeration options.
#[derive(Clone, Debug, Default)]
pub struct EnumerateConfig {
    /// Pivot selection rule.
    pub pivot: PivotRule,
}

impl SetKind {
    /// Pools for the branch that adds `v` to `include`.
    #[inline]
    fn restrict(
        self,
        graph: &Graph,
        rest: &VertexSet,
        exclude: &VertexSet,
        v: usize,
    ) -> (VertexSet, VertexSet) {
        let nv = graph.neighbours(v);
        match self {
            SetKind::Clique => (rest & nv, exclude & nv),
            SetKind::IndependentSet => {
                let mut next_rest = rest - nv;
                next_rest.remove(v);
                (next_rest, exclude - nv)
            }
        }
    }

    /// Candidates of `rest` that `u` makes redundant as branch seeds, counted.
    #[inline]
    fn covered_len(self, graph: &Graph, rest: &VertexSet, u: usize) -> usize {
        let nu = graph.neighbours(u);
        match self {
            SetKind::Clique => rest.intersection_len(nu),
            SetKind::IndependentSet => rest.difference_len(nu) - usize::from(rest.contains(u)),
        }
    }

    /// `rest` minus the candidates covered by pivot `u`.
    #[inline]
    fn uncovered(self, graph: &Graph, rest: &VertexSet, u: usize) -> VertexSet {
        let nu = graph.neighbours(u);
        match self {
            SetKind::Clique => rest - nu,
            SetKind::IndependentSet => {
                let mut out = rest & nu;
                if rest.contains(u) {
                    out.insert(u);
                }
                out
            }
        }
    }

    /// Returns `true` if `set` has the pairwise property of this kind in `graph`.
    pub fn holds(self, graph: &Graph, set: &VertexSet) -> bool {
        match self {
            SetKind::Clique => graph.is_clique(set),
            SetKind::IndependentSet => graph.is_independent(set),
        }
    }
}

/// Branch seeds for a frame: a snapshot of `rest`, thinned by the pivot rule.
fn branch_seeds(
    kind: SetKind,
    pivot: PivotRule,
    graph: &Graph,
    rest: &VertexSet,
    exclude: &VertexSet,
) -> VertexSet {
    match pivot {
        PivotRule::None => rest.clone(),
        PivotRule::Tomita => {
            let best = rest
                .iter()
                .chain(exclude.iter())
                .max_by_key(|&u| kind.covered_len(graph, rest, u));
            match best {
                Some(u) => kind.uncovered(graph, rest, u),
                None => rest.clone(),
            }
        }
    }
}

// ============================================================================
// Search frames
// ============================================================================

#[derive(Clone, Debug)]
struct Frame {
    include: VertexSet,
    rest: VertexSet,
    exclude: VertexSet,
    /// Seeds not yet branched on, fixed when the frame is entered.
    seeds: VertexSet,
    fresh: bool,
}

impl Frame {
    fn new(
        kind: SetKind,
        pivot: PivotRule,
        graph: &Graph,
        include: VertexSet,
        rest: VertexSet,
        exclude: VertexSet,
    ) -> Self {
        debug_assert!(include.is_disjoint(&rest), "include and rest overlap");
        debug_assert!(include.is_disjoint(&exclude), "include and exclude overlap");
        debug_assert!(rest.is_disjoint(&exclude), "rest and exclude overlap");
        debug_assert!(
            graph.vertex_count() == 0
                || !(include.is_empty() && rest.is_empty() && exclude.is_empty()),
            "empty partition on a non-empty graph"
        );
        debug_assert!(kind.holds(graph, &include), "include lost its {kind:?} property");

        let seeds = branch_seeds(kind, pivot, graph, &rest, &exclude);
        Self {
            include,
            rest,
            exclude,
            seeds,
            fresh: true,
        }
    }

    #[inline]
    fn is_maximal(&self) -> bool {
        self.rest.is_empty() && self.exclude.is_empty()
    }
}

/// Top-level branches of the search, in the order the sequential search takes them.
///
/// Each entry is the `(include, rest, exclude)` partition of one independent subtree, derived
/// before the subtree starts. Empty for the zero-vertex graph.
pub(crate) fn root_partitions(
    graph: &Graph,
    kind: SetKind,
    pivot: PivotRule,
) -> Vec<(VertexSet, VertexSet, VertexSet)> {
    let n = graph.vertex_count();
    let mut rest = graph.vertices();
    let mut exclude = VertexSet::new(n);
    let seeds = branch_seeds(kind, pivot, graph, &rest, &exclude);

    let mut out = Vec::with_capacity(seeds.len());
    for v in &seeds {
        let (next_rest, next_exclude) = kind.restrict(graph, &rest, &exclude, v);
        out.push((VertexSet::from_indices(n, [v]), next_rest, next_exclude));
        rest.remove(v);
        exclude.insert(v);
    }
    out
}

// ============================================================================
// MaximalSets
// ============================================================================

/// Lazy iterator over the maximal cliques or maximal independent sets of a graph.
///
/// Every maximal set is yielded exactly once. Sets are yielded in discovery order, which
/// depends on the vertex order and the [`PivotRule`]. The iterator owns a snapshot of the
/// graph, so it does not borrow the caller's graph.
#[derive(Clone, Debug)]
pub struct MaximalSets {
    graph: Arc<Graph>,
    kind: SetKind,
    pivot: PivotRule,
    stack: Vec<Frame>,
    frames_visited: u64,
}

impl MaximalSets {
    /// Starts a search from the full partition `(∅, V, ∅)`.
    pub(crate) fn new(graph: Arc<Graph>, kind: SetKind, pivot: PivotRule) -> Self {
        let n = graph.vertex_count();
        Self::with_root(
            graph,
            kind,
            pivot,
            VertexSet::new(n),
            VertexSet::full(n),
            VertexSet::new(n),
        )
    }

    /// Starts a search confined to the subtree rooted at the given partition.
    pub(crate) fn with_root(
        graph: Arc<Graph>,
        kind: SetKind,
        pivot: PivotRule,
        include: VertexSet,
        rest: VertexSet,
        exclude: VertexSet,
    ) -> Self {
        let root = Frame::new(kind, pivot, &graph, include, rest, exclude);
        let mut stack = Vec::with_capacity(graph.vertex_count() + 1);
        stack.push(root);
        Self {
            graph,
            kind,
            pivot,
            stack,
            frames_visited: 1,
        }
    }

    /// Which family this iterator enumerates.
    pub fn kind(&self) -> SetKind {
        self.kind
    }

    /// Number of vertices of the underlying graph.
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Number of search frames entered so far (a measure of search effort).
    pub fn frames_visited(&self) -> u64 {
        self.frames_visited
    }

    /// Push-style drain: feeds every remaining set to `f` until it breaks.
    ///
    /// Returns `ControlFlow::Break(())` if `f` stopped the enumeration early.
    pub fn for_each_set<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(VertexSet) -> ControlFlow<()>,
    {
        for set in self {
            f(set)?;
        }
        ControlFlow::Continue(())
    }
}

impl Iterator for MaximalSets {
    type Item = VertexSet;

    fn next(&mut self) -> Option<VertexSet> {
        loop {
            let frame = self.stack.last_mut()?;

            if frame.fresh {
                frame.fresh = false;
                if frame.is_maximal() {
                    let include = self.stack.pop()?.include;
                    tracing::trace!(kind = ?self.kind, set = %include, "maximal set");
                    return Some(include);
                }
            }

            let Some(v) = frame.seeds.pop_first() else {
                self.stack.pop();
                continue;
            };

            let (rest, exclude) = self.kind.restrict(&self.graph, &frame.rest, &frame.exclude, v);
            let mut include = frame.include.clone();
            include.insert(v);
            frame.rest.remove(v);
            frame.exclude.insert(v);

            let child = Frame::new(self.kind, self.pivot, &self.graph, include, rest, exclude);
            self.stack.push(child);
            self.frames_visited += 1;
            debug_assert!(self.stack.len() <= self.graph.vertex_count() + 1);
        }
    }
}

impl FusedIterator for MaximalSets {}

// ============================================================================
// Public API
// ============================================================================

/// Enumerates the maximal sets of `kind` in `graph`.
///
/// The graph is validated and copied before the search starts; the returned iterator is lazy.
///
/// # Errors
/// Returns an error if `graph` has a self-loop, an asymmetric neighbour pair, or a neighbour
/// index outside `0..vertex_count()`. No set is produced for a malformed graph.
pub fn enumerate<A>(
    graph: &A,
    kind: SetKind,
    config: &EnumerateConfig,
) -> Result<MaximalSets, GraphError>
where
    A: Adjacency + ?Sized,
{
    let graph = Graph::from_adjacency(graph)?;
    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        ?kind,
        pivot = ?config.pivot,
        "starting enumeration"
    );
    Ok(MaximalSets::new(Arc::new(graph), kind, config.pivot))
}

/// Enumerates every maximal clique of `graph` exactly once.
///
/// A graph with no vertices yields a single empty set.
///
/// # Errors
/// Returns an error if `graph` is not a simple undirected graph (see [`enumerate`]).
pub fn enumerate_maximal_cliques<A>(graph: &A) -> Result<MaximalSets, GraphError>
where
    A: Adjacency + ?Sized,
{
    enumerate(graph, SetKind::Clique, &EnumerateConfig::default())
}

/// Enumerates every maximal independent set of `graph` exactly once.
///
/// A graph with no vertices yields a single empty set.
///
/// # Errors
/// Returns an error if `graph` is not a simple undirected graph (see [`enumerate`]).
pub fn enumerate_maximal_independent_sets<A>(graph: &A) -> Result<MaximalSets, GraphError>
where
    A: Adjacency + ?Sized,
{
    enumerate(graph, SetKind::IndependentSet, &EnumerateConfig::default())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;
    use std::collections::BTreeSet;

    fn random_graph<R: Rng>(rng: &mut R, n: usize, p: f64) -> Graph {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.random_bool(p) {
                    edges.push((i, j));
                }
            }
        }
        Graph::from_edges(n, edges).unwrap()
    }

    fn family(sets: impl IntoIterator<Item = VertexSet>) -> BTreeSet<Vec<usize>> {
        let mut out = BTreeSet::new();
        for s in sets {
            let v = s.to_vec();
            assert!(out.insert(v.clone()), "set {v:?} produced twice");
        }
        out
    }

    fn collect(graph: &Graph, kind: SetKind, pivot: PivotRule) -> BTreeSet<Vec<usize>> {
        family(enumerate(graph, kind, &EnumerateConfig { pivot }).unwrap())
    }

    /// Exhaustive subset scan; only for small `n`.
    fn brute_force(graph: &Graph, kind: SetKind) -> BTreeSet<Vec<usize>> {
        let n = graph.vertex_count();
        let mut out = BTreeSet::new();
        for mask in 0u32..(1u32 << n) {
            let set = VertexSet::from_indices(n, (0..n).filter(|&v| mask & (1 << v) != 0));
            if !kind.holds(graph, &set) {
                continue;
            }
            let maximal = (0..n).filter(|v| !set.contains(*v)).all(|w| {
                let mut bigger = set.clone();
                bigger.insert(w);
                !kind.holds(graph, &bigger)
            });
            if maximal {
                out.insert(set.to_vec());
            }
        }
        out
    }

    fn sets(items: &[&[usize]]) -> BTreeSet<Vec<usize>> {
        items.iter().map(|s| s.to_vec()).collect()
    }

    // -------------------------------------------------------------------------
    // Small fixed graphs
    // -------------------------------------------------------------------------

    #[test]
    fn empty_graph_yields_one_empty_set() {
        let g = Graph::empty(0);
        for kind in [SetKind::Clique, SetKind::IndependentSet] {
            let all: Vec<_> = enumerate(&g, kind, &EnumerateConfig::default()).unwrap().collect();
            assert_eq!(all.len(), 1);
            assert!(all[0].is_empty());
        }
    }

    #[test]
    fn single_vertex() {
        let g = Graph::empty(1);
        assert_eq!(collect(&g, SetKind::Clique, PivotRule::None), sets(&[&[0]]));
        assert_eq!(collect(&g, SetKind::IndependentSet, PivotRule::None), sets(&[&[0]]));
    }

    #[test]
    fn single_edge() {
        let g = Graph::from_edges(2, [(0, 1)]).unwrap();
        assert_eq!(collect(&g, SetKind::Clique, PivotRule::None), sets(&[&[0, 1]]));
        assert_eq!(
            collect(&g, SetKind::IndependentSet, PivotRule::None),
            sets(&[&[0], &[1]])
        );
    }

    #[test]
    fn path_of_three() {
        // Path: 0-1-2
        let g = Graph::from_edges(3, [(0, 1), (1, 2)]).unwrap();
        assert_eq!(
            collect(&g, SetKind::Clique, PivotRule::None),
            sets(&[&[0, 1], &[1, 2]])
        );
        assert_eq!(
            collect(&g, SetKind::IndependentSet, PivotRule::None),
            sets(&[&[0, 2], &[1]])
        );
    }

    #[test]
    fn complete_graph() {
        for n in 1..=7 {
            let g = Graph::complete(n);
            let cliques = collect(&g, SetKind::Clique, PivotRule::None);
            assert_eq!(cliques, BTreeSet::from([(0..n).collect::<Vec<_>>()]));
            let isets = collect(&g, SetKind::IndependentSet, PivotRule::None);
            assert_eq!(isets, (0..n).map(|v| vec![v]).collect::<BTreeSet<_>>());
        }
    }

    #[test]
    fn five_cycle() {
        let g = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap();
        assert_eq!(
            collect(&g, SetKind::Clique, PivotRule::None),
            sets(&[&[0, 1], &[1, 2], &[2, 3], &[3, 4], &[0, 4]])
        );
        assert_eq!(
            collect(&g, SetKind::IndependentSet, PivotRule::None),
            sets(&[&[0, 2], &[0, 3], &[1, 3], &[1, 4], &[2, 4]])
        );
    }

    #[test]
    fn disjoint_triangles_hit_moon_moser_bound() {
        // k disjoint triangles: 3^k maximal independent sets, k maximal cliques.
        for k in 1..=4 {
            let n = 3 * k;
            let edges = (0..k).flat_map(|t| {
                let b = 3 * t;
                [(b, b + 1), (b + 1, b + 2), (b, b + 2)]
            });
            let g = Graph::from_edges(n, edges).unwrap();
            for pivot in [PivotRule::None, PivotRule::Tomita] {
                let isets = collect(&g, SetKind::IndependentSet, pivot);
                assert_eq!(isets.len(), 3usize.pow(k as u32));
                let cliques = collect(&g, SetKind::Clique, pivot);
                assert_eq!(cliques.len(), k);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Randomised cross-checks
    // -------------------------------------------------------------------------

    #[test]
    fn matches_bruteforce_small_graphs() {
        let mut rng = XorShiftRng::seed_from_u64(0xB10C);
        for case in 0..60 {
            let n = rng.random_range(0..=10);
            let p = [0.1, 0.3, 0.5, 0.7, 0.9][case % 5];
            let g = random_graph(&mut rng, n, p);
            for kind in [SetKind::Clique, SetKind::IndependentSet] {
                let expect = brute_force(&g, kind);
                for pivot in [PivotRule::None, PivotRule::Tomita] {
                    let got = collect(&g, kind, pivot);
                    assert_eq!(got, expect, "mismatch for {kind:?}/{pivot:?} on n={n} p={p}");
                }
            }
        }
    }

    #[test]
    fn cliques_of_complement_are_independent_sets() {
        let mut rng = XorShiftRng::seed_from_u64(0xAAAA);
        for _ in 0..30 {
            let g = random_graph(&mut rng, 12, 0.5);
            let comp = g.complement();
            assert_eq!(
                collect(&comp, SetKind::Clique, PivotRule::None),
                collect(&g, SetKind::IndependentSet, PivotRule::None)
            );
        }
    }

    #[test]
    fn every_yield_is_valid_and_maximal() {
        let mut rng = XorShiftRng::seed_from_u64(0xFACE);
        for _ in 0..20 {
            let g = random_graph(&mut rng, 24, 0.4);
            for kind in [SetKind::Clique, SetKind::IndependentSet] {
                for set in enumerate(&g, kind, &EnumerateConfig::default()).unwrap() {
                    assert!(kind.holds(&g, &set), "{set} is not a {kind:?}");
                    for w in 0..g.vertex_count() {
                        if set.contains(w) {
                            continue;
                        }
                        let mut bigger = set.clone();
                        bigger.insert(w);
                        assert!(!kind.holds(&g, &bigger), "{set} extends by {w}");
                    }
                }
            }
        }
    }

    #[test]
    fn tomita_never_visits_more_frames() {
        // Every frame holds a distinct `include`, and the plain search enters one frame per
        // clique / independent set, so a pivoted search can only visit fewer.
        let mut rng = XorShiftRng::seed_from_u64(0x5EED);
        let mut plain_frames = 0u64;
        let mut pivoted_frames = 0u64;
        for case in 0..60 {
            let n = 4 + case % 17;
            let p = [0.2, 0.5, 0.8][case % 3];
            let g = random_graph(&mut rng, n, p);
            for kind in [SetKind::Clique, SetKind::IndependentSet] {
                let mut plain = enumerate(&g, kind, &EnumerateConfig::default()).unwrap();
                let plain_count = plain.by_ref().count();
                let mut pivoted =
                    enumerate(&g, kind, &EnumerateConfig { pivot: PivotRule::Tomita }).unwrap();
                let pivoted_count = pivoted.by_ref().count();
                assert_eq!(plain_count, pivoted_count);
                assert!(
                    pivoted.frames_visited() <= plain.frames_visited(),
                    "{kind:?} on n={n} p={p}: tomita visited {} frames, plain {}",
                    pivoted.frames_visited(),
                    plain.frames_visited()
                );
                plain_frames += plain.frames_visited();
                pivoted_frames += pivoted.frames_visited();
            }
        }
        assert!(
            pivoted_frames < plain_frames,
            "tomita visited {pivoted_frames} frames, plain {plain_frames}"
        );
    }

    // -------------------------------------------------------------------------
    // Laziness and contract checks
    // -------------------------------------------------------------------------

    #[test]
    fn early_stop_leaves_search_suspended() {
        let g = Graph::empty(16); // single maximal IS of size 16, 16 singleton cliques
        let mut it = enumerate_maximal_cliques(&g).unwrap();
        let first = it.next().unwrap();
        assert_eq!(first.to_vec(), vec![0]);
        let visited_after_one = it.frames_visited();
        assert!(visited_after_one < 16);
        assert_eq!(it.count(), 15);
    }

    #[test]
    fn iterator_is_fused() {
        let g = Graph::from_edges(2, [(0, 1)]).unwrap();
        let mut it = enumerate_maximal_independent_sets(&g).unwrap();
        assert!(it.next().is_some());
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn for_each_set_can_break() {
        let g = Graph::empty(6);
        let mut seen = 0;
        let flow = enumerate_maximal_cliques(&g).unwrap().for_each_set(|_| {
            seen += 1;
            if seen == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(seen, 3);

        let flow = enumerate_maximal_cliques(&g)
            .unwrap()
            .for_each_set(|_| ControlFlow::Continue(()));
        assert_eq!(flow, ControlFlow::Continue(()));
    }

    #[test]
    fn malformed_adjacency_is_rejected() {
        let looped: Vec<Vec<usize>> = vec![vec![1], vec![0, 1]];
        assert!(matches!(
            enumerate_maximal_cliques(&looped),
            Err(GraphError::SelfLoop { vertex: 1 })
        ));
        let asymmetric: Vec<Vec<usize>> = vec![vec![1, 2], vec![0], vec![]];
        assert!(matches!(
            enumerate_maximal_independent_sets(&asymmetric),
            Err(GraphError::NotSymmetric { from: 0, to: 2 })
        ));
    }

    #[test]
    fn adjacency_lists_are_accepted() {
        // Path: 0-1-2 as plain lists
        let lists: Vec<Vec<usize>> = vec![vec![1], vec![0, 2], vec![1]];
        let got = family(enumerate_maximal_independent_sets(&lists).unwrap());
        assert_eq!(got, sets(&[&[0, 2], &[1]]));
        let it = enumerate_maximal_cliques(lists.as_slice()).unwrap();
        assert_eq!(it.kind(), SetKind::Clique);
        assert_eq!(it.vertex_count(), 3);
    }

    #[test]
    fn root_partitions_cover_sequential_order() {
        let mut rng = XorShiftRng::seed_from_u64(0xC0FFEE);
        let g = Arc::new(random_graph(&mut rng, 14, 0.45));
        for kind in [SetKind::Clique, SetKind::IndependentSet] {
            for pivot in [PivotRule::None, PivotRule::Tomita] {
                let sequential: Vec<_> = MaximalSets::new(g.clone(), kind, pivot).collect();
                let stitched: Vec<_> = root_partitions(&g, kind, pivot)
                    .into_iter()
                    .flat_map(|(i, r, x)| MaximalSets::with_root(g.clone(), kind, pivot, i, r, x))
                    .collect();
                assert_eq!(sequential, stitched);
            }
        }
    }
}
