use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A GitHub label object. Only `name` is consumed; the rest is dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    pub name: String,
}

/// Snapshot of a remote issue as returned by the GitHub issues API.
///
/// The fields the tool consumes are typed; everything else in the payload
/// is kept verbatim in `extra` so the stored snapshot round-trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteIssue {
    pub number: i64,
    pub title: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RemoteIssue {
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.name.as_str())
    }
}

/// Assignment status of a tracked issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentState {
    Unassigned,
    Assigned,
    Reported,
}

/// Local tracking record for one issue: the cached snapshot plus the
/// assignment and reporting state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRecord {
    pub issue: RemoteIssue,
    pub assignee: Option<String>,
    pub assign_date: Option<NaiveDate>,
    pub report_date: Option<NaiveDate>,
}

impl IssueRecord {
    /// A fresh record for a newly fetched issue, nothing assigned yet.
    pub fn new(issue: RemoteIssue) -> Self {
        IssueRecord {
            issue,
            assignee: None,
            assign_date: None,
            report_date: None,
        }
    }

    pub fn number(&self) -> i64 {
        self.issue.number
    }

    pub fn state(&self) -> AssignmentState {
        if self.report_date.is_some() {
            AssignmentState::Reported
        } else if self.assignee.is_some() {
            AssignmentState::Assigned
        } else {
            AssignmentState::Unassigned
        }
    }

    /// True when the issue carries at least one of the given labels.
    pub fn matches_labels(&self, filter: &[String]) -> bool {
        self.issue
            .label_names()
            .any(|name| filter.iter().any(|f| f == name))
    }

    /// Days elapsed since the claim was made, if there is one.
    pub fn claim_age_days(&self, today: NaiveDate) -> Option<i64> {
        self.assign_date.map(|d| (today - d).num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(number: i64, labels: &[&str]) -> RemoteIssue {
        RemoteIssue {
            number,
            title: format!("Issue {}", number),
            labels: labels
                .iter()
                .map(|l| Label {
                    name: (*l).to_string(),
                })
                .collect(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_fresh_record_is_unassigned() {
        let record = IssueRecord::new(issue(1, &[]));
        assert_eq!(record.state(), AssignmentState::Unassigned);
        assert!(record.assignee.is_none());
        assert!(record.assign_date.is_none());
        assert!(record.report_date.is_none());
    }

    #[test]
    fn test_state_transitions() {
        let mut record = IssueRecord::new(issue(1, &[]));
        record.assignee = Some("alice".to_string());
        record.assign_date = NaiveDate::from_ymd_opt(2015, 10, 1);
        assert_eq!(record.state(), AssignmentState::Assigned);

        record.report_date = NaiveDate::from_ymd_opt(2015, 10, 5);
        assert_eq!(record.state(), AssignmentState::Reported);
    }

    #[test]
    fn test_reported_without_assignee_is_still_reported() {
        let mut record = IssueRecord::new(issue(1, &[]));
        record.report_date = NaiveDate::from_ymd_opt(2015, 10, 5);
        assert_eq!(record.state(), AssignmentState::Reported);
    }

    #[test]
    fn test_matches_labels_intersection() {
        let record = IssueRecord::new(issue(1, &["bug", "help wanted"]));
        assert!(record.matches_labels(&["bug".to_string()]));
        assert!(record.matches_labels(&["docs".to_string(), "bug".to_string()]));
        assert!(!record.matches_labels(&["docs".to_string()]));
        assert!(!record.matches_labels(&[]));
    }

    #[test]
    fn test_claim_age_days() {
        let today = NaiveDate::from_ymd_opt(2015, 10, 21).unwrap();
        let mut record = IssueRecord::new(issue(1, &[]));
        assert_eq!(record.claim_age_days(today), None);

        record.assign_date = NaiveDate::from_ymd_opt(2015, 10, 1);
        assert_eq!(record.claim_age_days(today), Some(20));
    }

    #[test]
    fn test_snapshot_round_trips_unknown_fields() {
        let json = r#"{
            "number": 42,
            "title": "Broken layout",
            "labels": [{"name": "bug"}],
            "state": "open",
            "html_url": "https://github.com/o/r/issues/42"
        }"#;
        let issue: RemoteIssue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.number, 42);
        assert_eq!(issue.labels[0].name, "bug");

        let back = serde_json::to_value(&issue).unwrap();
        assert_eq!(back["state"], "open");
        assert_eq!(back["html_url"], "https://github.com/o/r/issues/42");
    }
}
