use anyhow::Result;

use crate::db::Store;
use crate::models::IssueRecord;

/// Records matching the filters, in ascending issue-number order.
///
/// A record matches when its assignee equals `user` (if given) and its
/// labels intersect `labels` (if non-empty).
pub fn select(store: &Store, user: Option<&str>, labels: &[String]) -> Result<Vec<IssueRecord>> {
    let records = store
        .records()?
        .into_iter()
        .filter(|r| user.is_none_or(|u| r.assignee.as_deref() == Some(u)))
        .filter(|r| labels.is_empty() || r.matches_labels(labels))
        .collect();
    Ok(records)
}

pub fn run(store: &Store, user: Option<&str>, labels: &[String]) -> Result<()> {
    let records = select(store, user, labels)?;

    if records.is_empty() {
        println!("No matching issues.");
        return Ok(());
    }

    for record in records {
        println!("{}", format_row(&record));
    }

    Ok(())
}

/// One line per record: reported flag, number, truncated assignee, the two
/// dates (blank columns when unset), then the title.
fn format_row(record: &IssueRecord) -> String {
    let flag = if record.report_date.is_some() { 'X' } else { ' ' };
    let assignee: String = record
        .assignee
        .as_deref()
        .unwrap_or("")
        .chars()
        .take(8)
        .collect();
    let assign_date = match record.assign_date {
        Some(d) => format!(" {}", d.format("%Y-%m-%d")),
        None => " ".repeat(11),
    };
    let report_date = match record.report_date {
        Some(d) => format!(" {}", d.format("%Y-%m-%d")),
        None => " ".repeat(11),
    };

    format!(
        "[{}] #{:<4} ({:8},{},{}): {}",
        flag,
        record.number(),
        assignee,
        assign_date,
        report_date,
        record.issue.title
    )
}
