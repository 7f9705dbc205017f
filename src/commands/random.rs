use anyhow::Result;
use rand::seq::SliceRandom;

use crate::config::Config;
use crate::db::Store;
use crate::models::IssueRecord;

/// Draws up to `count` issues uniformly at random, without replacement,
/// from the unassigned (and label-filtered) records. Returns fewer when
/// the candidate pool is smaller. Read-only: the store is not touched.
pub fn sample(store: &Store, labels: &[String], count: usize) -> Result<Vec<IssueRecord>> {
    let candidates: Vec<IssueRecord> = store
        .records()?
        .into_iter()
        .filter(|r| r.assignee.is_none())
        .filter(|r| labels.is_empty() || r.matches_labels(labels))
        .collect();

    let mut rng = rand::thread_rng();
    let mut chosen: Vec<IssueRecord> = candidates
        .choose_multiple(&mut rng, count)
        .cloned()
        .collect();
    chosen.sort_by_key(IssueRecord::number);

    Ok(chosen)
}

pub fn run(
    store: &Store,
    config: &Config,
    program: &str,
    user: &str,
    labels: &[String],
    count: usize,
) -> Result<()> {
    let chosen = sample(store, labels, count)?;

    if chosen.is_empty() {
        println!("No unassigned issues match.");
        return Ok(());
    }

    // Follow-up command, ready for copy-paste once the volunteer confirms.
    let numbers: Vec<String> = chosen.iter().map(|r| r.number().to_string()).collect();
    println!("{} assign -u {} -i {}", program, user, numbers.join(" "));

    println!();
    println!("------- MESSAGE IS FOLLOWING -------");
    println!();
    println!("@{} Here are some issues for you:", user);
    println!();
    for record in &chosen {
        let labels: Vec<&str> = record.issue.label_names().collect();
        if labels.is_empty() {
            println!("- #{} **{}**", record.number(), record.issue.title);
        } else {
            println!(
                "- #{} **{}** *{}*",
                record.number(),
                record.issue.title,
                labels.join(" | ")
            );
        }
    }
    println!();
    println!(
        "Please confirm you take them, so I can block those ones for the \
         next {} days :-)",
        config.stale_after_days
    );
    println!();

    Ok(())
}
