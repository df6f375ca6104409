//! Candidate symbols for a single cell.
//!
//! This module provides [`SymbolSet`], a fixed-capacity bitset over the
//! positions of an [`Alphabet`](crate::Alphabet). Bit `i` is set when the
//! `i`-th symbol of the alphabet is still possible for the cell.
//!
//! `SymbolSet` is a plain `Copy` value: every operation returns a new set,
//! and the search clones grids of sets rather than mutating shared ones.
//!
//! # Examples
//!
//! ```
//! use gridsolve_core::SymbolSet;
//!
//! let a = SymbolSet::from_indices([0, 2, 5]);
//! let b = SymbolSet::from_indices([2, 3]);
//!
//! assert_eq!(a | b, SymbolSet::from_indices([0, 2, 3, 5]));
//! assert_eq!(a & b, SymbolSet::single(2));
//! assert_eq!(a - b, SymbolSet::from_indices([0, 5]));
//!
//! // `nth` extracts the k-th least significant member as a singleton.
//! assert_eq!(a.nth(1), SymbolSet::single(2));
//! ```

use std::{
    fmt,
    iter::FusedIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub, SubAssign},
};

/// A set of alphabet positions, stored as a 64-bit mask.
///
/// The set never holds more than [`SymbolSet::CAPACITY`] members. Which
/// symbol a bit stands for is decided by the [`Alphabet`](crate::Alphabet)
/// the set was built from.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SymbolSet {
    bits: u64,
}

impl SymbolSet {
    /// Maximum number of distinct symbols a set can hold.
    pub const CAPACITY: usize = 64;

    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Creates an empty set.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set directly from its bit representation.
    #[must_use]
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Returns the underlying bit representation.
    #[must_use]
    #[inline]
    pub const fn bits(self) -> u64 {
        self.bits
    }

    /// Creates a set containing the first `len` positions.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds [`SymbolSet::CAPACITY`].
    #[must_use]
    #[inline]
    pub const fn full(len: usize) -> Self {
        assert!(len <= Self::CAPACITY, "symbol set capacity exceeded");
        if len == Self::CAPACITY {
            Self { bits: u64::MAX }
        } else {
            Self {
                bits: (1 << len) - 1,
            }
        }
    }

    /// Creates a set containing only `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`SymbolSet::CAPACITY`].
    #[must_use]
    #[inline]
    pub const fn single(index: usize) -> Self {
        assert!(index < Self::CAPACITY, "symbol index out of range");
        Self { bits: 1 << index }
    }

    /// Creates a set from an iterator of positions.
    ///
    /// # Panics
    ///
    /// Panics if any position is not below [`SymbolSet::CAPACITY`].
    #[must_use]
    pub fn from_indices<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        indices
            .into_iter()
            .fold(Self::EMPTY, |set, index| set | Self::single(index))
    }

    /// Returns `true` if `index` is a member.
    #[must_use]
    #[inline]
    pub const fn contains(self, index: usize) -> bool {
        index < Self::CAPACITY && (self.bits >> index) & 1 == 1
    }

    /// Adds `index` to the set.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`SymbolSet::CAPACITY`].
    #[inline]
    pub fn insert(&mut self, index: usize) {
        self.bits |= Self::single(index).bits;
    }

    /// Removes `index` from the set.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`SymbolSet::CAPACITY`].
    #[inline]
    pub fn remove(&mut self, index: usize) {
        self.bits &= !Self::single(index).bits;
    }

    /// Returns the singleton holding the `k`-th least significant member.
    ///
    /// Only meaningful for `k < self.len()`; for larger `k` the empty set is
    /// returned.
    #[must_use]
    #[inline]
    pub const fn nth(self, k: usize) -> Self {
        let mut bits = self.bits;
        let mut k = k;
        while k > 0 {
            bits &= bits.wrapping_sub(1);
            k -= 1;
        }
        Self {
            bits: bits & bits.wrapping_neg(),
        }
    }

    /// Returns the number of members.
    #[must_use]
    #[inline]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if the set has exactly one member.
    #[must_use]
    #[inline]
    pub const fn is_single(self) -> bool {
        self.bits != 0 && self.bits & self.bits.wrapping_sub(1) == 0
    }

    /// Returns `true` if the set has two or more members.
    #[must_use]
    #[inline]
    pub const fn has_multiple(self) -> bool {
        self.bits & self.bits.wrapping_sub(1) != 0
    }

    /// Returns the only member if the set is a singleton.
    #[must_use]
    #[inline]
    pub const fn as_single(self) -> Option<usize> {
        if self.is_single() {
            Some(self.bits.trailing_zeros() as usize)
        } else {
            None
        }
    }

    /// Returns the union of two sets.
    #[must_use]
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns the intersection of two sets.
    #[must_use]
    #[inline]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Returns the members of `self` that are not in `other`.
    #[must_use]
    #[inline]
    pub const fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Returns the members that are in exactly one of the two sets.
    #[must_use]
    #[inline]
    pub const fn symmetric_difference(self, other: Self) -> Self {
        Self {
            bits: self.bits ^ other.bits,
        }
    }

    /// Returns every position up to [`SymbolSet::CAPACITY`] that is not a member.
    #[must_use]
    #[inline]
    pub const fn complement(self) -> Self {
        Self { bits: !self.bits }
    }

    /// Returns `true` if every member of `self` is also in `other`.
    #[must_use]
    #[inline]
    pub const fn is_subset(self, other: Self) -> bool {
        self.bits | other.bits == other.bits
    }

    /// Returns `true` if every member of `other` is also in `self`.
    #[must_use]
    #[inline]
    pub const fn is_superset(self, other: Self) -> bool {
        other.is_subset(self)
    }

    /// Returns an iterator over the members in ascending order.
    #[must_use]
    #[inline]
    pub const fn iter(self) -> Iter {
        Iter { bits: self.bits }
    }
}

impl fmt::Debug for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<usize> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::from_indices(iter)
    }
}

impl IntoIterator for SymbolSet {
    type Item = usize;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the members of a [`SymbolSet`].
#[derive(Debug, Clone)]
pub struct Iter {
    bits: u64,
}

impl Iterator for Iter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let index = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Iter {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let index = 63 - self.bits.leading_zeros() as usize;
        self.bits &= !(1 << index);
        Some(index)
    }
}

impl ExactSizeIterator for Iter {}
impl FusedIterator for Iter {}

impl BitOr for SymbolSet {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOrAssign for SymbolSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for SymbolSet {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl BitAndAssign for SymbolSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersection(rhs);
    }
}

impl BitXor for SymbolSet {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        self.symmetric_difference(rhs)
    }
}

impl BitXorAssign for SymbolSet {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = self.symmetric_difference(rhs);
    }
}

impl Sub for SymbolSet {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl SubAssign for SymbolSet {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.difference(rhs);
    }
}

impl Not for SymbolSet {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        self.complement()
    }
}
