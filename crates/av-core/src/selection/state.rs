use serde::{Deserialize, Serialize};

/// Current position within the submissions of a loaded recording
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SelectionState {
    /// 0-based index of the open submission
    pub position: usize,
    /// Number of submissions in the recording
    pub submission_count: usize,
}

impl SelectionState {
    /// Whether the previous-submission control is enabled
    pub fn can_go_previous(&self) -> bool {
        self.position > 0
    }

    /// Whether the next-submission control is enabled
    pub fn can_go_next(&self) -> bool {
        self.position + 1 < self.submission_count
    }

    /// 1-based number shown in the submission-number field
    pub fn display_number(&self) -> usize {
        self.position + 1
    }
}

/// Score summary of a single submission
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SubmissionSummary {
    pub id: i64,
    pub points: f64,
    pub max_points: f64,
}

impl SubmissionSummary {
    /// Percentage of the maximum score, truncated to an integer
    pub fn score_percent(&self) -> i64 {
        if self.max_points == 0.0 {
            return 0;
        }
        (self.points / self.max_points * 100.0) as i64
    }

    /// Score line shown next to the open submission
    pub fn score_line(&self) -> String {
        format!(
            "score: {}/{} ({}%)",
            self.points,
            self.max_points,
            self.score_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_percent_truncates() {
        let summary = SubmissionSummary {
            id: 1,
            points: 7.0,
            max_points: 10.0,
        };
        assert_eq!(summary.score_percent(), 70);
        assert_eq!(summary.score_line(), "score: 7/10 (70%)");

        let partial = SubmissionSummary {
            id: 2,
            points: 2.0,
            max_points: 3.0,
        };
        assert_eq!(partial.score_percent(), 66);
    }

    #[test]
    fn test_score_percent_zero_max() {
        let summary = SubmissionSummary {
            id: 1,
            points: 0.0,
            max_points: 0.0,
        };
        assert_eq!(summary.score_percent(), 0);
    }

    #[test]
    fn test_control_enablement() {
        let empty = SelectionState {
            position: 0,
            submission_count: 0,
        };
        assert!(!empty.can_go_previous());
        assert!(!empty.can_go_next());

        let single = SelectionState {
            position: 0,
            submission_count: 1,
        };
        assert!(!single.can_go_previous());
        assert!(!single.can_go_next());

        let middle = SelectionState {
            position: 1,
            submission_count: 3,
        };
        assert!(middle.can_go_previous());
        assert!(middle.can_go_next());
    }
}
