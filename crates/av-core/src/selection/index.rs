//! Index from submission id to position for fast jump-by-id lookup

use ahash::AHashMap;

/// Index mapping submission ids to their 0-based position in the file
///
/// Built once per loaded recording. Duplicate ids are not defended
/// against; the last occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct SubmissionIndex {
    by_id: AHashMap<i64, usize>,
}

impl SubmissionIndex {
    /// Build the index from submission ids in file order
    pub fn from_ordered_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let by_id = ids
            .into_iter()
            .enumerate()
            .map(|(position, id)| (id, position))
            .collect();
        Self { by_id }
    }

    /// Position of the submission with the given id, if present
    pub fn position_of(&self, id: i64) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_entry_per_submission() {
        let ids = vec![1034, 17, 922];
        let index = SubmissionIndex::from_ordered_ids(ids.iter().copied());

        assert_eq!(index.len(), 3);
        for (position, id) in ids.iter().enumerate() {
            assert_eq!(index.position_of(*id), Some(position));
        }
    }

    #[test]
    fn test_unknown_id() {
        let index = SubmissionIndex::from_ordered_ids([5, 6]);
        assert_eq!(index.position_of(7), None);
    }

    #[test]
    fn test_empty() {
        let index = SubmissionIndex::from_ordered_ids([]);
        assert!(index.is_empty());
        assert_eq!(index.position_of(0), None);
    }

    #[test]
    fn test_noncontiguous_ids() {
        // Ids are unique but not contiguous in real files
        let index = SubmissionIndex::from_ordered_ids([90210, 3, 40000]);
        assert_eq!(index.position_of(40000), Some(2));
        assert_eq!(index.position_of(4), None);
    }
}
