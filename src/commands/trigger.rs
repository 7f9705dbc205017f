use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::db::Store;

/// Sweeps the store and releases stale, unreported claims.
///
/// A claim is stale when it is older than `stale_after_days`. Reported
/// records are never freed, regardless of age. Records are visited in
/// ascending issue-number order so output is reproducible.
pub fn sweep(store: &Store, stale_after_days: i64, today: NaiveDate) -> Result<Vec<(i64, String)>> {
    let mut freed = Vec::new();

    for record in store.records()? {
        if record.report_date.is_some() {
            continue;
        }
        let stale = record
            .claim_age_days(today)
            .is_some_and(|age| age > stale_after_days);
        if stale {
            let number = record.number();
            let user = record.assignee.clone().unwrap_or_default();
            store.free(number)?;
            debug!(number, user = %user, "Freed stale claim");
            freed.push((number, user));
        }
    }

    Ok(freed)
}

pub fn run(store: &Store, stale_after_days: i64, today: NaiveDate) -> Result<()> {
    let freed = sweep(store, stale_after_days, today)?;

    if freed.is_empty() {
        println!("No stale claims to free.");
        return Ok(());
    }

    for (number, user) in &freed {
        println!("Freeing #{} ({})", number, user);
    }

    Ok(())
}
