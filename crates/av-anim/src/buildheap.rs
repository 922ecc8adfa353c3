//! Build-heap animation construction
//!
//! Converts the recorded step sequence of one submission into driver
//! instructions: two views created from the first snapshot, then a
//! highlight phase and an exchange phase for every detected swap.

use crate::driver::AnimationDriver;
use crate::layout::HeapLayout;
use crate::swap::differing_indices;
use crate::{AnimationError, Swap};
use av_data::{CellValue, Submission};
use tracing::debug;

/// Counters describing a built animation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationStats {
    /// Number of recorded steps in the submission
    pub recorded_steps: usize,
    /// Number of pairwise swaps animated
    pub swap_count: usize,
}

/// Build the swap-replay animation for one build-heap submission
///
/// Deterministic in the step sequence; produces no side effects beyond
/// the instructions emitted to the driver. Transitions in which the
/// number of differing positions is not exactly two are skipped without
/// an instruction; multi-element permutations are not decomposed.
pub fn build_heap_animation(
    driver: &mut dyn AnimationDriver,
    submission: &Submission,
) -> Result<AnimationStats, AnimationError> {
    let steps = submission.steps();
    let first = steps.first().ok_or(AnimationError::EmptyRecording)?;

    // The exercise's input array, kept current as swaps are applied
    let mut values: Vec<CellValue> = first.values().cloned().collect();

    let array_view = driver.create_array_view(&values);
    let layout = HeapLayout::from_values(&values);
    let tree_view = driver.create_tree_view(&layout);
    driver.display_init();

    let mut stats = AnimationStats {
        recorded_steps: steps.len(),
        swap_count: 0,
    };

    for pair in steps.windows(2) {
        let differing = differing_indices(&pair[0], &pair[1]);
        let swap = match differing.as_slice() {
            &[lo, hi] => Swap { lo, hi },
            &[] => continue,
            _ => {
                debug!(positions = ?differing, "transition is not a pairwise swap, skipping");
                continue;
            }
        };
        let positions = [swap.lo, swap.hi];

        // First highlight the elements that will be swapped.
        driver.step();
        driver.add_highlight(array_view, &positions);
        driver.add_highlight(tree_view, &positions);

        // Then move the elements and remove the highlight.
        driver.step();
        values.swap(swap.lo, swap.hi);
        for view in [array_view, tree_view] {
            driver.set_value(view, swap.lo, values[swap.lo].clone());
            driver.set_value(view, swap.hi, values[swap.hi].clone());
        }
        driver.remove_highlight(array_view, &positions);
        driver.remove_highlight(tree_view, &positions);

        stats.swap_count += 1;
    }

    driver.recorded();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{AnimationInstruction, ScriptDriver};
    use av_data::model::IndexedValue;
    use av_data::Step;

    fn submission(steps: &[&[i64]]) -> Submission {
        Submission {
            id: 1,
            points: 7.0,
            max_points: 10.0,
            recording: steps
                .iter()
                .map(|values| Step {
                    indexed_values: values
                        .iter()
                        .map(|&v| IndexedValue { value: v.into() })
                        .collect(),
                })
                .collect(),
        }
    }

    fn swaps_in(script: &[AnimationInstruction]) -> Vec<Vec<usize>> {
        script
            .iter()
            .filter_map(|instruction| match instruction {
                AnimationInstruction::AddHighlight { positions, .. } => Some(positions.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_swap_emits_two_phases() {
        let submission = submission(&[&[98, 16, 97], &[97, 16, 98]]);
        let mut driver = ScriptDriver::new();

        let stats = build_heap_animation(&mut driver, &submission).unwrap();
        assert_eq!(stats.swap_count, 1);
        assert_eq!(stats.recorded_steps, 2);

        let script = driver.into_script();

        // Both views highlight the same pair, in ascending index order
        assert_eq!(swaps_in(&script), vec![vec![0, 2], vec![0, 2]]);

        // Two step boundaries per swap: highlight phase, exchange phase
        let boundaries = script
            .iter()
            .filter(|i| matches!(i, AnimationInstruction::Step))
            .count();
        assert_eq!(boundaries, 2);

        // The exchange writes the swapped values back
        let writes: Vec<(usize, &CellValue)> = script
            .iter()
            .filter_map(|instruction| match instruction {
                AnimationInstruction::SetValue { position, value, .. } => Some((*position, value)),
                _ => None,
            })
            .collect();
        assert_eq!(writes.len(), 4);
        assert!(writes.contains(&(0, &CellValue::Int(97))));
        assert!(writes.contains(&(2, &CellValue::Int(98))));

        assert!(matches!(script.last(), Some(AnimationInstruction::Recorded)));
    }

    #[test]
    fn test_views_created_from_first_snapshot() {
        let submission = submission(&[&[3, 1, 2], &[1, 3, 2]]);
        let mut driver = ScriptDriver::new();
        build_heap_animation(&mut driver, &submission).unwrap();

        let script = driver.instructions();
        assert!(matches!(
            &script[0],
            AnimationInstruction::CreateArrayView { values, .. } if values.len() == 3
        ));
        assert!(matches!(
            &script[1],
            AnimationInstruction::CreateTreeView { node_count: 3, .. }
        ));
        assert!(matches!(script[2], AnimationInstruction::DisplayInit));
    }

    #[test]
    fn test_identical_steps_emit_nothing() {
        let submission = submission(&[&[1, 2, 3], &[1, 2, 3], &[1, 2, 3]]);
        let mut driver = ScriptDriver::new();

        let stats = build_heap_animation(&mut driver, &submission).unwrap();
        assert_eq!(stats.swap_count, 0);
        assert!(swaps_in(driver.instructions()).is_empty());
    }

    #[test]
    fn test_non_swap_transition_emits_nothing() {
        // Three positions change at once; the transition is skipped
        let submission = submission(&[&[1, 2, 3], &[3, 1, 2]]);
        let mut driver = ScriptDriver::new();

        let stats = build_heap_animation(&mut driver, &submission).unwrap();
        assert_eq!(stats.swap_count, 0);
        assert!(swaps_in(driver.instructions()).is_empty());
    }

    #[test]
    fn test_swap_sequence_replays_in_order() {
        // 5,1,4 -> 5,4,1 (swap 1,2) -> 4,5,1 (swap 0,1)
        let submission = submission(&[&[5, 1, 4], &[5, 4, 1], &[4, 5, 1]]);
        let mut driver = ScriptDriver::new();

        let stats = build_heap_animation(&mut driver, &submission).unwrap();
        assert_eq!(stats.swap_count, 2);
        assert_eq!(
            swaps_in(driver.instructions()),
            vec![vec![1, 2], vec![1, 2], vec![0, 1], vec![0, 1]]
        );
    }

    #[test]
    fn test_empty_recording_is_an_error() {
        let submission = submission(&[]);
        let mut driver = ScriptDriver::new();
        assert!(matches!(
            build_heap_animation(&mut driver, &submission),
            Err(AnimationError::EmptyRecording)
        ));
    }
}
