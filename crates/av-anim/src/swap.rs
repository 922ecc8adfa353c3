//! Swap detection between consecutive recorded steps

use av_data::Step;

/// A detected exchange of two array positions
///
/// The indices are recorded in ascending scan order; the swap is
/// symmetric, so no source/destination designation exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swap {
    pub lo: usize,
    pub hi: usize,
}

/// Indices at which two snapshots differ, in ascending order
///
/// Positions present in only one snapshot count as differing.
pub fn differing_indices(previous: &Step, current: &Step) -> Vec<usize> {
    let len = previous.len().max(current.len());
    (0..len)
        .filter(|&i| previous.value(i) != current.value(i))
        .collect()
}

/// Classify the transition between two consecutive snapshots
///
/// Exactly two differing positions classify as a swap. Any other count
/// is not modelled as an animation step and yields `None`; multi-element
/// permutations are not decomposed into pairwise swaps.
pub fn detect_swap(previous: &Step, current: &Step) -> Option<Swap> {
    match differing_indices(previous, current).as_slice() {
        &[lo, hi] => Some(Swap { lo, hi }),
        _ => None,
    }
}
