use anyhow::Result;
use std::collections::HashMap;

use crate::config::Config;
use crate::db::Store;

/// Aggregate campaign progress.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignStats {
    /// Reported-issue count per assignee, sorted by count descending
    /// (ties broken by name for stable output).
    pub per_user: Vec<(String, usize)>,
    /// Total reported records.
    pub reported: usize,
    /// Total tracked records.
    pub total: usize,
}

impl CampaignStats {
    /// Share of all reported issues credited to this count. Defined as 0
    /// when nothing has been reported yet.
    pub fn share(&self, count: usize) -> f64 {
        if self.reported == 0 {
            0.0
        } else {
            count as f64 / self.reported as f64
        }
    }

    /// Overall reported/total ratio; 0 for an empty store.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.reported as f64 / self.total as f64
        }
    }
}

pub fn compute(store: &Store) -> Result<CampaignStats> {
    let records = store.records()?;
    let total = records.len();

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut reported = 0;
    for record in &records {
        if record.report_date.is_some() {
            reported += 1;
            let user = record.assignee.clone().unwrap_or_default();
            *counts.entry(user).or_insert(0) += 1;
        }
    }

    let mut per_user: Vec<(String, usize)> = counts.into_iter().collect();
    per_user.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(CampaignStats {
        per_user,
        reported,
        total,
    })
}

pub fn run(store: &Store, config: &Config) -> Result<()> {
    let stats = compute(store)?;

    println!();
    println!(
        "Some statistics about the [{}]({}) progress:",
        config.campaign_page.replace('-', " "),
        config.info_url()
    );
    println!();
    println!("Contributions:");
    for (user, count) in &stats.per_user {
        println!(
            "- {}: {} ({:.2}%)",
            user,
            count,
            stats.share(*count) * 100.0
        );
    }
    println!();
    println!(
        "Overall progress: {}/{} ({:.2}%)",
        stats.reported,
        stats.total,
        stats.progress() * 100.0
    );
    println!();
    println!("Go read the description page if you want to be part of it :-)");
    println!();

    Ok(())
}
