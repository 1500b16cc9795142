use serde::{Deserialize, Serialize};

/// Outcome of a step or hook as reported by the test runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
    Skipped,
    Pending,
    Undefined,
    Ambiguous,
}

impl Status {
    /// All statuses, in the order used for summaries
    pub const ALL: [Status; 6] = [
        Status::Passed,
        Status::Failed,
        Status::Skipped,
        Status::Pending,
        Status::Undefined,
        Status::Ambiguous,
    ];

    /// Lenient parse of a runner status. Unknown values are `Undefined`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "passed" => Status::Passed,
            "failed" => Status::Failed,
            "skipped" => Status::Skipped,
            "pending" => Status::Pending,
            "ambiguous" => Status::Ambiguous,
            _ => Status::Undefined,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::Failed => "failed",
            Status::Skipped => "skipped",
            Status::Pending => "pending",
            Status::Undefined => "undefined",
            Status::Ambiguous => "ambiguous",
        }
    }

    /// Whether this status makes the owning scenario fail
    pub fn is_failing(&self) -> bool {
        matches!(
            self,
            Status::Failed | Status::Pending | Status::Undefined | Status::Ambiguous
        )
    }

    /// Derive an aggregate status from member statuses.
    ///
    /// - any failing member → `Failed`
    /// - every member passed (or no members) → `Passed`
    /// - otherwise (all skipped, or passed mixed with skipped) → `Skipped`
    pub fn derive<I>(statuses: I) -> Status
    where
        I: IntoIterator<Item = Status>,
    {
        let mut all_passed = true;
        for status in statuses {
            if status.is_failing() {
                return Status::Failed;
            }
            if status != Status::Passed {
                all_passed = false;
            }
        }

        if all_passed {
            Status::Passed
        } else {
            Status::Skipped
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Status::from_str("PASSED"), Status::Passed);
        assert_eq!(Status::from_str(" Failed "), Status::Failed);
        assert_eq!(Status::from_str("ambiguous"), Status::Ambiguous);
    }

    #[test]
    fn unknown_status_is_undefined() {
        assert_eq!(Status::from_str("exploded"), Status::Undefined);
        assert_eq!(Status::from_str(""), Status::Undefined);
    }

    #[test]
    fn derive_empty_is_passed() {
        assert_eq!(Status::derive(Vec::new()), Status::Passed);
    }

    #[test]
    fn derive_all_passed() {
        assert_eq!(Status::derive([Status::Passed, Status::Passed]), Status::Passed);
    }

    #[test]
    fn derive_any_failing_wins() {
        for failing in [Status::Failed, Status::Pending, Status::Undefined, Status::Ambiguous] {
            assert_eq!(
                Status::derive([Status::Passed, failing, Status::Skipped]),
                Status::Failed,
                "{failing} should fail the aggregate"
            );
        }
    }

    #[test]
    fn derive_skipped_and_mixed() {
        assert_eq!(Status::derive([Status::Skipped, Status::Skipped]), Status::Skipped);
        assert_eq!(Status::derive([Status::Passed, Status::Skipped]), Status::Skipped);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Status::Undefined).unwrap();
        assert_eq!(json, "\"undefined\"");
    }
}
