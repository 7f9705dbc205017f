use std::path::PathBuf;

/// Campaign configuration, built once in `main` and passed to every
/// operation that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Repository owner on GitHub.
    pub owner: String,
    /// Repository name on GitHub.
    pub repo: String,
    /// Path to the local tracking database.
    pub db_path: PathBuf,
    /// Issues requested per page.
    pub page_size: u32,
    /// Hard ceiling on pagination. Unauthenticated GitHub access allows 60
    /// requests per hour, so the fetch must never loop unbounded.
    pub max_pages: u32,
    /// Days a claim stays valid before `trigger_db` frees it.
    pub stale_after_days: i64,
    /// Issue where volunteers post their verification reports.
    pub report_issue: i64,
    /// Campaign wiki page linked from generated messages.
    pub campaign_page: String,
}

impl Config {
    pub fn new(owner: String, repo: String, db_path: PathBuf) -> Self {
        Config {
            owner,
            repo,
            db_path,
            page_size: 100,
            max_pages: 10,
            stale_after_days: 14,
            report_issue: 3549,
            campaign_page: "Autumnal-Cleanup-2015".to_string(),
        }
    }

    /// Paginated issues listing endpoint.
    pub fn api_url(&self) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/issues",
            self.owner, self.repo
        )
    }

    /// Web URL of the reporting issue.
    pub fn report_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/issues/{}",
            self.owner, self.repo, self.report_issue
        )
    }

    /// Web URL of the campaign description page.
    pub fn info_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/wiki/{}",
            self.owner, self.repo, self.campaign_page
        )
    }

    /// Anchor into the campaign page describing the report flags.
    pub fn flags_url(&self) -> String {
        format!("{}#flags", self.info_url())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(
            "syl20bnr".to_string(),
            "spacemacs".to_string(),
            PathBuf::from("sweep.db"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = Config::default();
        assert_eq!(
            config.api_url(),
            "https://api.github.com/repos/syl20bnr/spacemacs/issues"
        );
        assert_eq!(
            config.report_url(),
            "https://github.com/syl20bnr/spacemacs/issues/3549"
        );
        assert!(config.flags_url().ends_with("#flags"));
        assert!(config.flags_url().starts_with(&config.info_url()));
    }

    #[test]
    fn test_pagination_ceiling_is_bounded() {
        let config = Config::default();
        assert!(config.max_pages >= 1);
        assert_eq!(config.stale_after_days, 14);
    }
}
