use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

use super::{
    dates::{days_between, parse_timestamp},
    error::{ExportError, ExportResult},
};

/// Output schema, in column order. Matches the field order of [`IssueRow`].
pub const ISSUE_COLUMNS: [&str; 12] = [
    "url",
    "title",
    "user",
    "is_pr",
    "labels",
    "created_at",
    "updated_at",
    "days_open",
    "days_active",
    "days_inactive",
    "comments",
    "reactions",
];

const LABEL_SEPARATOR: &str = ", ";

/// One flattened issue (or pull request) as written to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRow {
    pub url: String,
    pub title: String,
    pub user: String,
    pub is_pr: bool,
    pub labels: String,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    pub days_open: u64,
    pub days_active: u64,
    pub days_inactive: u64,
    pub comments: u64,
    pub reactions: u64,
}

/// Builds a row from a raw issue payload.
///
/// A field that is absent, `null` or of the wrong JSON type counts as missing.
/// The only exception is `pull_request`, whose mere presence marks a PR.
pub fn synthesize(raw: &Value, now: DateTime<Utc>) -> ExportResult<IssueRow> {
    let url = str_at(raw, "html_url")?;
    let title = str_at(raw, "title")?;
    let user = str_at(raw, "user.login")?;
    let is_pr = raw.get("pull_request").is_some();
    let labels = joined_labels(raw)?;

    let created_at = parse_timestamp(str_at(raw, "created_at")?)?;
    let updated_at = parse_timestamp(str_at(raw, "updated_at")?)?;

    Ok(IssueRow {
        url: url.to_string(),
        title: title.to_string(),
        user: user.to_string(),
        is_pr,
        labels,
        created_at: created_at.date_naive(),
        updated_at: updated_at.date_naive(),
        days_open: clamped_days(created_at, now),
        days_active: clamped_days(created_at, updated_at),
        days_inactive: clamped_days(updated_at, now),
        comments: u64_at(raw, "comments")?,
        reactions: u64_at(raw, "reactions.total_count")?,
    })
}

fn clamped_days(earlier: DateTime<Utc>, later: DateTime<Utc>) -> u64 {
    days_between(earlier, later).max(0).unsigned_abs()
}

fn joined_labels(raw: &Value) -> ExportResult<String> {
    let labels = lookup(raw, "labels")?
        .as_array()
        .ok_or_else(|| ExportError::missing_field("labels"))?;

    let names = labels
        .iter()
        .map(|label| {
            label
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| ExportError::missing_field("labels.name"))
        })
        .collect::<ExportResult<Vec<_>>>()?;

    Ok(names.join(LABEL_SEPARATOR))
}

fn lookup<'a>(raw: &'a Value, path: &str) -> ExportResult<&'a Value> {
    path.split('.')
        .try_fold(raw, |node, key| node.get(key))
        .filter(|value| !value.is_null())
        .ok_or_else(|| ExportError::missing_field(path))
}

fn str_at<'a>(raw: &'a Value, path: &str) -> ExportResult<&'a str> {
    lookup(raw, path)?
        .as_str()
        .ok_or_else(|| ExportError::missing_field(path))
}

fn u64_at(raw: &Value, path: &str) -> ExportResult<u64> {
    lookup(raw, path)?
        .as_u64()
        .ok_or_else(|| ExportError::missing_field(path))
}
