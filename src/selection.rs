//! Selected file indices and the controls they enable.
//!
//! A [`Selection`] is an ascending set of indices into the file list, built
//! from whatever order (and with whatever duplicates) the caller supplies.
//! It is valid only until the next mutation of the list; callers drop it
//! after every move, removal, or reconciliation.

use std::collections::BTreeSet;

/// Ascending set of selected indices into the file list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: BTreeSet<usize>,
}

impl Selection {
    /// Build a selection from arbitrary indices.
    ///
    /// Duplicates collapse and ordering is normalized to ascending.
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    /// Number of selected indices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Smallest selected index, if any.
    pub fn min(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    /// Largest selected index, if any.
    pub fn max(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Check whether `index` is selected.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Selected indices in ascending order.
    pub fn ascending(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Selected indices in descending order.
    pub fn descending(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().rev().copied()
    }
}

impl FromIterator<usize> for Selection {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Enabled/disabled state of the list controls, derived from the current
/// selection and list length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// Move-up is possible: something is selected and none of it is already
    /// at the top.
    pub move_up: bool,
    /// Move-down is possible: something is selected and none of it is
    /// already at the bottom.
    pub move_down: bool,
    /// Remove-selected is possible: something is selected.
    pub remove: bool,
    /// Clear-all is possible: the list is non-empty.
    pub clear: bool,
    /// Merge is possible: the list is non-empty.
    pub merge: bool,
}

impl Controls {
    /// Derive control states for a list of `len` files.
    pub fn for_list(selection: &Selection, len: usize) -> Self {
        Self {
            move_up: is_move_up_enabled(selection),
            move_down: is_move_down_enabled(selection, len),
            remove: is_remove_enabled(selection),
            clear: len > 0,
            merge: len > 0,
        }
    }
}

/// True iff the selection is non-empty and its minimum index is above 0.
pub fn is_move_up_enabled(selection: &Selection) -> bool {
    selection.min().is_some_and(|min| min > 0)
}

/// True iff the selection is non-empty and its maximum index is above the
/// last position.
pub fn is_move_down_enabled(selection: &Selection, len: usize) -> bool {
    selection.max().is_some_and(|max| max + 1 < len)
}

/// True iff the selection is non-empty.
pub fn is_remove_enabled(selection: &Selection) -> bool {
    !selection.is_empty()
}
