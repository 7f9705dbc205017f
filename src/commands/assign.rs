use anyhow::Result;
use chrono::NaiveDate;

use crate::config::Config;
use crate::db::Store;
use crate::models::AssignmentState;

/// Claims the given issues for a user. Unconditional, last writer wins.
///
/// Unknown issue numbers are skipped with a warning instead of aborting the
/// whole batch; overwriting an already-reported record also warns first.
/// Returns the numbers that were actually assigned.
pub fn apply(store: &Store, user: &str, numbers: &[i64], today: NaiveDate) -> Result<Vec<i64>> {
    let mut assigned = Vec::new();

    for &number in numbers {
        let record = match store.get(number)? {
            Some(record) => record,
            None => {
                eprintln!("Skipping #{}: not in the database (run build_db first?)", number);
                continue;
            }
        };

        if record.state() == AssignmentState::Reported {
            eprintln!(
                "Warning: #{} was already reported, assigning it to {} anyway",
                number, user
            );
        }

        store.assign(number, user, today)?;
        assigned.push(number);
    }

    Ok(assigned)
}

pub fn run(
    store: &Store,
    config: &Config,
    user: &str,
    numbers: &[i64],
    today: NaiveDate,
) -> Result<()> {
    let assigned = apply(store, user, numbers, today)?;

    println!("Assigned {} issue(s) to {}.", assigned.len(), user);
    if assigned.is_empty() {
        return Ok(());
    }

    // Paste-ready reporting canvas for the volunteer.
    println!();
    println!("------- MESSAGE IS FOLLOWING -------");
    println!();
    println!("@{} Here is the canvas you can use for reporting:", user);
    println!("```");
    for number in &assigned {
        println!("- [ ] #{} Not verified", number);
    }
    println!("```");
    println!(
        "Once checked, please report them [here]({}) by changing the issue's \
         flag from `Not verified` to [the appropriate one]({}).",
        config.report_url(),
        config.flags_url()
    );
    println!();

    Ok(())
}
