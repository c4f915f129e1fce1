//! Batch move and removal planning over the file list.
//!
//! Moves and removals operate on a whole selection at once while preserving
//! the relative order of selected and unselected items alike. The
//! processing order of the selected indices is what makes that work:
//!
//! - **Move up** walks the selection in ascending order. Each selected index
//!   `i > 0` exchanges positions `i-1` and `i`. Ascending order guarantees
//!   that an item already moved never blocks a later move, so a contiguous
//!   selected block shifts up by exactly one position.
//! - **Move down** is symmetric and walks the selection in descending order,
//!   exchanging `i` and `i+1` for `i < len-1`.
//! - **Removal** walks the selection in descending order so that removing a
//!   lower index never invalidates a higher index still pending.
//!
//! An index at the list boundary (0 for move-up, `len-1` for move-down) is a
//! no-op for that item, not an error; the rest of the selection still moves.
//!
//! Planning is pure: the functions here produce swap sequences and removal
//! orders without touching the store, so the laws (move-up then move-down is
//! the identity away from boundaries, blocks keep their internal order) are
//! testable without any I/O.

use crate::error::{Error, Result};
use crate::selection::Selection;
use crate::store::FileStore;

/// A single exchange of two adjacent positions.
pub type Swap = (usize, usize);

/// Plan the swaps for moving a selection up by one position.
///
/// Returns an empty plan when nothing can move (empty selection, or only
/// index 0 selected); callers use that to skip the network round-trip.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if any selected index is outside the list.
pub fn plan_move_up(selection: &Selection, len: usize) -> Result<Vec<Swap>> {
    check_bounds(selection, len)?;
    Ok(selection
        .ascending()
        .filter(|&i| i > 0)
        .map(|i| (i - 1, i))
        .collect())
}

/// Plan the swaps for moving a selection down by one position.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if any selected index is outside the list.
pub fn plan_move_down(selection: &Selection, len: usize) -> Result<Vec<Swap>> {
    check_bounds(selection, len)?;
    Ok(selection
        .descending()
        .filter(|&i| i + 1 < len)
        .map(|i| (i, i + 1))
        .collect())
}

/// The order in which selected indices are removed: descending, so each
/// removal leaves every still-pending index valid.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if any selected index is outside the list.
pub fn removal_order(selection: &Selection, len: usize) -> Result<Vec<usize>> {
    check_bounds(selection, len)?;
    Ok(selection.descending().collect())
}

/// Apply a planned swap sequence to the store, in plan order.
pub fn apply_swaps(store: &mut FileStore, swaps: &[Swap]) -> Result<()> {
    for &(i, j) in swaps {
        store.swap(i, j)?;
    }
    Ok(())
}

/// Undo a previously applied swap sequence.
///
/// Each swap is its own inverse, so replaying the plan in reverse order
/// restores the list exactly. Used to roll back an optimistic reorder whose
/// push to the service failed.
pub fn revert_swaps(store: &mut FileStore, swaps: &[Swap]) -> Result<()> {
    for &(i, j) in swaps.iter().rev() {
        store.swap(i, j)?;
    }
    Ok(())
}

fn check_bounds(selection: &Selection, len: usize) -> Result<()> {
    match selection.max() {
        Some(max) if max >= len => Err(Error::OutOfRange { index: max, len }),
        _ => Ok(()),
    }
}
