use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::db::Store;
use crate::github;

/// Fetches all open issues and rebuilds the database from scratch.
/// Destructive: existing assignment and report history is replaced.
pub fn run(store: &mut Store, config: &Config) -> Result<()> {
    rebuild_from(store, &config.api_url(), config)
}

pub fn rebuild_from(store: &mut Store, api_url: &str, config: &Config) -> Result<()> {
    let client = github::client()?;
    let issues = github::fetch_open_issues(&client, api_url, config.page_size, config.max_pages)?;

    info!(count = issues.len(), "Fetched open issues");
    store.rebuild(&issues)?;

    println!(
        "Tracking {} open issues from {}/{}.",
        issues.len(),
        config.owner,
        config.repo
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn test_rebuild_replaces_store_contents() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/issues")
            .match_query(mockito::Matcher::UrlEncoded("page".into(), "1".into()))
            .with_header("content-type", "application/json")
            .with_body(r#"[{"number": 12, "title": "Twelve", "labels": []}]"#)
            .create();
        server
            .mock("GET", "/issues")
            .match_query(mockito::Matcher::UrlEncoded("page".into(), "2".into()))
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create();

        let dir = tempdir().unwrap();
        let mut store = Store::open(&dir.path().join("test.db")).unwrap();
        store
            .rebuild(&[crate::models::RemoteIssue {
                number: 1,
                title: "Old".to_string(),
                labels: vec![],
                extra: serde_json::Map::new(),
            }])
            .unwrap();
        store
            .assign(1, "alice", NaiveDate::from_ymd_opt(2015, 10, 1).unwrap())
            .unwrap();

        let url = format!("{}/issues", server.url());
        rebuild_from(&mut store, &url, &config()).unwrap();

        assert!(store.get(1).unwrap().is_none());
        let record = store.get(12).unwrap().unwrap();
        assert_eq!(record.issue.title, "Twelve");
        assert!(record.assignee.is_none());
    }

    #[test]
    fn test_transport_failure_leaves_store_untouched() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/issues")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create();

        let dir = tempdir().unwrap();
        let mut store = Store::open(&dir.path().join("test.db")).unwrap();
        store
            .rebuild(&[crate::models::RemoteIssue {
                number: 1,
                title: "Old".to_string(),
                labels: vec![],
                extra: serde_json::Map::new(),
            }])
            .unwrap();

        let url = format!("{}/issues", server.url());
        assert!(rebuild_from(&mut store, &url, &config()).is_err());

        // no partial results: the old record is still there
        assert!(store.get(1).unwrap().is_some());
        assert_eq!(store.len().unwrap(), 1);
    }
}
