use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use tracing::debug;

use crate::models::RemoteIssue;

/// GitHub rejects requests without a User-Agent header.
const USER_AGENT: &str = concat!("sweep/", env!("CARGO_PKG_VERSION"));

pub fn client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// Fetches every open issue from the paginated listing endpoint.
///
/// Pages are requested sequentially starting at 1 and the loop stops on the
/// first empty page or at `max_pages`, whichever comes first. Any non-success
/// response aborts the whole fetch; partial results are never returned.
pub fn fetch_open_issues(
    client: &Client,
    api_url: &str,
    page_size: u32,
    max_pages: u32,
) -> Result<Vec<RemoteIssue>> {
    let mut all = Vec::new();

    for page in 1..=max_pages {
        let response = client
            .get(api_url)
            .query(&[("page", page.to_string()), ("per_page", page_size.to_string())])
            .send()
            .with_context(|| format!("Request for page {} failed", page))?;

        if !response.status().is_success() {
            bail!(
                "Issue listing request failed with status {} (page {})",
                response.status(),
                page
            );
        }

        let issues: Vec<RemoteIssue> = response
            .json()
            .with_context(|| format!("Malformed issue listing on page {}", page))?;

        debug!(page, count = issues.len(), "Fetched issue page");

        if issues.is_empty() {
            break;
        }
        all.extend(issues);
    }

    Ok(all)
}
