//! Fixed-universe vertex bitsets.
//!
//! Vertices are dense indices `0..n`. A [`VertexSet`] stores membership in `u64` words, so
//! union, intersection and difference are word-wise operations and iteration walks set bits
//! with `trailing_zeros`.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

const WORD_BITS: usize = 64;

#[inline(always)]
const fn words_for(universe: usize) -> usize {
    universe.div_ceil(WORD_BITS)
}

#[inline(always)]
const fn bit(v: usize) -> u64 {
    1u64 << (v % WORD_BITS)
}

// ============================================================================
// VertexSet
// ============================================================================

/// A set of vertices drawn from the universe `0..universe`.
///
/// Two sets only compare equal when they share a universe; mixing universes in a binary
/// operation is a logic error and trips a debug assertion.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VertexSet {
    words: Vec<u64>,
    universe: usize,
}

impl VertexSet {
    /// Creates an empty set over `0..universe`.
    pub fn new(universe: usize) -> Self {
        Self {
            words: vec![0u64; words_for(universe)],
            universe,
        }
    }

    /// Creates the set containing every vertex of `0..universe`.
    pub fn full(universe: usize) -> Self {
        let mut set = Self {
            words: vec![u64::MAX; words_for(universe)],
            universe,
        };
        set.clear_tail();
        set
    }

    /// Builds a set from vertex indices.
    ///
    /// # Panics
    /// Panics if an index is `>= universe`.
    pub fn from_indices<I>(universe: usize, vertices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = Self::new(universe);
        for v in vertices {
            set.insert(v);
        }
        set
    }

    /// Size of the universe this set lives in.
    #[inline]
    pub fn universe(&self) -> usize {
        self.universe
    }

    /// Adds `v`; returns `true` if it was not already present.
    ///
    /// # Panics
    /// Panics if `v >= universe`.
    #[inline]
    pub fn insert(&mut self, v: usize) -> bool {
        assert!(v < self.universe, "vertex {v} outside universe 0..{}", self.universe);
        let word = &mut self.words[v / WORD_BITS];
        let fresh = *word & bit(v) == 0;
        *word |= bit(v);
        fresh
    }

    /// Removes `v`; returns `true` if it was present.
    #[inline]
    pub fn remove(&mut self, v: usize) -> bool {
        if v >= self.universe {
            return false;
        }
        let word = &mut self.words[v / WORD_BITS];
        let present = *word & bit(v) != 0;
        *word &= !bit(v);
        present
    }

    /// Returns whether `v` is a member.
    #[inline(always)]
    pub fn contains(&self, v: usize) -> bool {
        v < self.universe && self.words[v / WORD_BITS] & bit(v) != 0
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if the set has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Smallest member, if any.
    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|(_, &w)| w != 0)
            .map(|(i, &w)| i * WORD_BITS + w.trailing_zeros() as usize)
    }

    /// Removes and returns the smallest member.
    #[inline]
    pub fn pop_first(&mut self) -> Option<usize> {
        let v = self.first()?;
        self.words[v / WORD_BITS] &= !bit(v);
        Some(v)
    }

    /// Size of `self ∩ other` without allocating.
    #[inline]
    pub fn intersection_len(&self, other: &Self) -> usize {
        self.debug_check_universe(other);
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// Size of `self \ other` without allocating.
    #[inline]
    pub fn difference_len(&self, other: &Self) -> usize {
        self.debug_check_universe(other);
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & !b).count_ones() as usize)
            .sum()
    }

    /// Returns `true` if the two sets share no member.
    #[inline]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection_len(other) == 0
    }

    /// Returns `true` if every member of `self` is in `other`.
    #[inline]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.difference_len(other) == 0
    }

    /// The set of vertices of the universe not in `self`.
    pub fn complement(&self) -> Self {
        let mut out = Self {
            words: self.words.iter().map(|w| !w).collect(),
            universe: self.universe,
        };
        out.clear_tail();
        out
    }

    /// Iterates members in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Collects members in ascending order.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    fn clear_tail(&mut self) {
        let tail = self.universe % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << tail) - 1;
            }
        }
    }

    #[inline(always)]
    fn debug_check_universe(&self, other: &Self) {
        debug_assert_eq!(
            self.universe, other.universe,
            "vertex sets over different universes"
        );
    }
}

impl fmt::Debug for VertexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for VertexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "}}")
    }
}

// ============================================================================
// Iteration
// ============================================================================

/// Ascending iterator over the members of a [`VertexSet`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    words: &'a [u64],
    index: usize,
    current: u64,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            self.index += 1;
            self.current = *self.words.get(self.index)?;
        }
        let v = self.index * WORD_BITS + self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        Some(v)
    }
}

impl<'a> IntoIterator for &'a VertexSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

// ============================================================================
// Set algebra
// ============================================================================

macro_rules! word_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl $assign_trait<&VertexSet> for VertexSet {
            #[inline]
            fn $assign_method(&mut self, rhs: &VertexSet) {
                self.debug_check_universe(rhs);
                for ($a, &$b) in self.words.iter_mut().zip(&rhs.words) {
                    *$a = $body;
                }
            }
        }

        impl $trait<&VertexSet> for &VertexSet {
            type Output = VertexSet;

            #[inline]
            fn $method(self, rhs: &VertexSet) -> VertexSet {
                let mut out = self.clone();
                $assign_trait::$assign_method(&mut out, rhs);
                out
            }
        }
    };
}

word_op!(BitAnd, bitand, BitAndAssign, bitand_assign, |a, b| *a & b);
word_op!(BitOr, bitor, BitOrAssign, bitor_assign, |a, b| *a | b);
word_op!(Sub, sub, SubAssign, sub_assign, |a, b| *a & !b);

// ============================================================================
// Tests
// ============================================================================
