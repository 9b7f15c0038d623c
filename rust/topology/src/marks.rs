// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Call-scoped transient marks.
//!
//! Partitioning algorithms need one scratch bit per element while they run
//! ("visited", "pending", "guarded"). Those bits live in a [`Marks`] value
//! owned by the call instead of on the mesh, so they are released on every
//! exit path and never leak into the next call.

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// A set of marked element keys.
#[derive(Debug, Clone)]
pub struct Marks<K> {
    marked: FxHashSet<K>,
}

impl<K: Copy + Eq + Hash> Marks<K> {
    /// Creates an empty mark set.
    pub fn new() -> Self {
        Self {
            marked: FxHashSet::default(),
        }
    }

    /// Marks `key`. Returns `true` if it was not marked before.
    pub fn mark(&mut self, key: K) -> bool {
        self.marked.insert(key)
    }

    /// Clears the mark on `key`. Returns `true` if it was marked.
    pub fn unmark(&mut self, key: K) -> bool {
        self.marked.remove(&key)
    }

    /// Sets the mark on `key` to `value`.
    pub fn set(&mut self, key: K, value: bool) {
        if value {
            self.marked.insert(key);
        } else {
            self.marked.remove(&key);
        }
    }

    pub fn is_marked(&self, key: K) -> bool {
        self.marked.contains(&key)
    }

    /// Returns the number of marked keys.
    pub fn len(&self) -> usize {
        self.marked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// Clears every mark.
    pub fn clear(&mut self) {
        self.marked.clear();
    }
}

impl<K: Copy + Eq + Hash> Default for Marks<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_unmark() {
        let mut marks = Marks::new();
        assert!(marks.mark(3u32));
        assert!(!marks.mark(3));
        assert!(marks.is_marked(3));
        assert!(marks.unmark(3));
        assert!(!marks.unmark(3));
        assert!(marks.is_empty());
    }

    #[test]
    fn set_false_clears() {
        let mut marks = Marks::new();
        marks.set(1u32, true);
        marks.set(2, true);
        marks.set(1, false);
        assert_eq!(marks.len(), 1);
        marks.clear();
        assert!(marks.is_empty());
    }
}
