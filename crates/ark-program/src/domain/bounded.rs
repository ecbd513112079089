//! # Bounded List
//!
//! Fixed-capacity, append-only sequence backing the membership lists.
//! The capacity is declared when the list is created and travels with it,
//! so the account it lives in never needs to grow.

use serde::{Deserialize, Serialize};

/// Bytes used by the encoded list header: `capacity: u32` + `len: u64`.
pub const LIST_HEADER_LEN: usize = 4 + 8;

/// Returned by [`BoundedList::try_push`] when the list is at capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListFull {
    /// Declared capacity of the list.
    pub capacity: u32,
}

/// An ordered sequence that never holds more than `capacity` entries.
///
/// Entries are only ever appended; there is no removal or reordering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedList<T> {
    capacity: u32,
    items: Vec<T>,
}

impl<T> BoundedList<T> {
    /// Creates an empty list with a fixed capacity.
    #[must_use]
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity as usize),
        }
    }

    /// Declared maximum length.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no entry has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if another append would fail.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity as usize
    }

    /// Free slots left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.items.len())
    }

    /// Appends an entry, returning its index.
    ///
    /// # Errors
    ///
    /// Returns [`ListFull`] and leaves the list untouched when at capacity.
    pub fn try_push(&mut self, item: T) -> Result<usize, ListFull> {
        if self.is_full() {
            return Err(ListFull {
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Live entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns true if `other` holds this list's entries as a prefix,
    /// i.e. `other` only appended to `self`.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool
    where
        T: PartialEq,
    {
        other.items.len() >= self.items.len() && other.items[..self.items.len()] == self.items[..]
    }
}

impl<T: PartialEq> BoundedList<T> {
    /// Returns true if `item` was already appended.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }
}

impl<'a, T> IntoIterator for &'a BoundedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> std::ops::Index<usize> for BoundedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

/// Encoded size of a full list of `capacity` fixed-size entries.
#[must_use]
pub const fn max_encoded_len(capacity: u32, entry_len: usize) -> usize {
    LIST_HEADER_LEN + capacity as usize * entry_len
}
