//! Fixed-capacity set of button indices.

use crate::types::ButtonIndex;
use heapless::Vec;

/// Why an index could not be added to a [`ButtonSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InsertError {
    /// Index is not below the set's bound.
    OutOfRange,

    /// Index is already in the set.
    Duplicate,

    /// Set is at capacity.
    Full,
}

/// Duplicate-free set of button indices in insertion order.
///
/// Indices must be below `N`, so the set can never hold more than `N`
/// entries. Order only matters for diagnostics; set operations ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ButtonSet<const N: usize> {
    items: Vec<ButtonIndex, N>,
}

impl<const N: usize> ButtonSet<N> {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds `idx` to the set.
    pub fn insert(&mut self, idx: ButtonIndex) -> Result<(), InsertError> {
        if idx as usize >= N {
            return Err(InsertError::OutOfRange);
        }
        if self.contains(idx) {
            return Err(InsertError::Duplicate);
        }
        self.items.push(idx).map_err(|_| InsertError::Full)
    }

    /// Builds a set from a slice, failing on the first rejected index.
    pub fn from_slice(indices: &[ButtonIndex]) -> Result<Self, (ButtonIndex, InsertError)> {
        let mut set = Self::new();
        for &idx in indices {
            set.insert(idx).map_err(|err| (idx, err))?;
        }
        Ok(set)
    }

    #[inline]
    pub fn contains(&self, idx: ButtonIndex) -> bool {
        self.items.contains(&idx)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Indices in insertion order.
    #[inline]
    pub fn as_slice(&self) -> &[ButtonIndex] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = ButtonIndex> + '_ {
        self.items.iter().copied()
    }
}
