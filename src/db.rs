use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::models::{IssueRecord, RemoteIssue};

const SCHEMA_VERSION: i32 = 1;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Durable mapping from issue number to its tracking record.
///
/// One process opens the store exclusively for the duration of one command
/// invocation. Every mutation is written through immediately, so there is
/// no separate flush step.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open database")?;
        let store = Store { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let version: i32 = self
            .conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM pragma_user_version", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        if version < SCHEMA_VERSION {
            self.conn.execute_batch(
                r#"
                -- One row per tracked issue; `issue` is the verbatim JSON
                -- snapshot of the remote payload at last fetch.
                CREATE TABLE IF NOT EXISTS records (
                    number INTEGER PRIMARY KEY,
                    issue TEXT NOT NULL,
                    assignee TEXT,
                    assign_date TEXT,
                    report_date TEXT
                );
                "#,
            )?;

            self.conn
                .execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;
        }

        Ok(())
    }

    /// Replaces the entire store contents with fresh records for the given
    /// issues. Destructive: prior assignment and report history is lost.
    pub fn rebuild(&mut self, issues: &[RemoteIssue]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM records", [])?;
        for issue in issues {
            let snapshot =
                serde_json::to_string(issue).context("Failed to serialize issue snapshot")?;
            tx.execute(
                "INSERT OR REPLACE INTO records (number, issue) VALUES (?1, ?2)",
                params![issue.number, snapshot],
            )?;
        }
        tx.commit()?;
        tracing::debug!(count = issues.len(), "Rebuilt record store");
        Ok(())
    }

    pub fn get(&self, number: i64) -> Result<Option<IssueRecord>> {
        let row: Option<(String, Option<String>, Option<String>, Option<String>)> = self
            .conn
            .query_row(
                "SELECT issue, assignee, assign_date, report_date FROM records WHERE number = ?1",
                [number],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;

        row.map(|(snapshot, assignee, assign_date, report_date)| {
            build_record(number, &snapshot, assignee, assign_date, report_date)
        })
        .transpose()
    }

    /// All records in ascending issue-number order.
    pub fn records(&self) -> Result<Vec<IssueRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT number, issue, assignee, assign_date, report_date FROM records ORDER BY number",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(number, snapshot, assignee, assign_date, report_date)| {
                build_record(number, &snapshot, assignee, assign_date, report_date)
            })
            .collect()
    }

    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn contains(&self, number: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM records WHERE number = ?1",
            [number],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Claims the issue for a user. Unconditional, last writer wins.
    pub fn assign(&self, number: i64, user: &str, date: NaiveDate) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE records SET assignee = ?1, assign_date = ?2 WHERE number = ?3",
            params![user, date.format(DATE_FORMAT).to_string(), number],
        )?;
        Ok(rows > 0)
    }

    /// Marks the issue as verified by the user. The assignee is reaffirmed
    /// so a report from someone else takes the record over.
    pub fn report(&self, number: i64, user: &str, date: NaiveDate) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE records SET assignee = ?1, report_date = ?2 WHERE number = ?3",
            params![user, date.format(DATE_FORMAT).to_string(), number],
        )?;
        Ok(rows > 0)
    }

    /// Releases a claim: assignee and assign date are cleared together.
    pub fn free(&self, number: i64) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE records SET assignee = NULL, assign_date = NULL WHERE number = ?1",
            [number],
        )?;
        Ok(rows > 0)
    }
}

fn build_record(
    number: i64,
    snapshot: &str,
    assignee: Option<String>,
    assign_date: Option<String>,
    report_date: Option<String>,
) -> Result<IssueRecord> {
    let issue: RemoteIssue = serde_json::from_str(snapshot)
        .with_context(|| format!("Corrupt issue snapshot for record #{}", number))?;

    Ok(IssueRecord {
        issue,
        assignee,
        assign_date: parse_date(assign_date.as_deref(), number)?,
        report_date: parse_date(report_date.as_deref(), number)?,
    })
}

fn parse_date(value: Option<&str>, number: i64) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .with_context(|| format!("Corrupt date '{}' for record #{}", s, number))
        })
        .transpose()
}
