use anyhow::Result;
use chrono::NaiveDate;

use crate::db::Store;
use crate::models::AssignmentState;

/// Marks the given issues as verified by the user.
///
/// The assignee is reaffirmed on each record, so a report also takes the
/// record over when someone else held the claim. Unknown numbers are skipped
/// with a warning; re-reporting an already-reported record warns first and
/// then overwrites (last write wins).
pub fn apply(store: &Store, user: &str, numbers: &[i64], today: NaiveDate) -> Result<Vec<i64>> {
    let mut reported = Vec::new();

    for &number in numbers {
        let record = match store.get(number)? {
            Some(record) => record,
            None => {
                eprintln!("Skipping #{}: not in the database (run build_db first?)", number);
                continue;
            }
        };

        if record.state() == AssignmentState::Reported {
            eprintln!("Warning: #{} was already reported, overwriting", number);
        }

        store.report(number, user, today)?;
        reported.push(number);
    }

    Ok(reported)
}

/// Issues still assigned to the user and awaiting a report, ascending.
pub fn pending_for(store: &Store, user: &str) -> Result<Vec<i64>> {
    Ok(store
        .records()?
        .iter()
        .filter(|r| r.assignee.as_deref() == Some(user) && r.report_date.is_none())
        .map(|r| r.number())
        .collect())
}

/// Total issues the user has reported over the whole campaign.
pub fn total_for(store: &Store, user: &str) -> Result<usize> {
    Ok(store
        .records()?
        .iter()
        .filter(|r| r.assignee.as_deref() == Some(user) && r.report_date.is_some())
        .count())
}

pub fn run(store: &Store, user: &str, numbers: &[i64], today: NaiveDate) -> Result<()> {
    let reported = apply(store, user, numbers, today)?;
    let total = total_for(store, user)?;
    let pending = pending_for(store, user)?;

    println!();
    println!("------- MESSAGE IS FOLLOWING -------");
    println!();
    println!(
        "@{} Thank you very much for helping with issues cleanup :-) :+1:",
        user
    );
    println!(
        "You verified {} issues this time, and {} in total.",
        reported.len(),
        total
    );
    if !pending.is_empty() {
        println!("These issues are still waiting for reporting from your part:");
        for number in &pending {
            println!("- #{}", number);
        }
    }
    println!();

    Ok(())
}
