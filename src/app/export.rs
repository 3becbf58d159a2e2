use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use futures_util::{future, Stream, TryStreamExt};
use serde_json::Value;
use tracing::info;

use crate::{
    app::fetch_issues::fetch_all_issues,
    domain::{
        error::ExportResult,
        issue_row::{synthesize, IssueRow, ISSUE_COLUMNS},
    },
    infra::csv_writer::write_table,
    ports::{ClockPort, ForgeClientPort},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub rows: usize,
}

/// `owner/name` exported on `today` lands in `owner-name-issues-YYYY-MM-DD.csv`.
pub fn output_filename(repo: &str, today: NaiveDate) -> String {
    format!(
        "{}-issues-{}.csv",
        repo.replace('/', "-"),
        today.format("%Y-%m-%d")
    )
}

pub fn synthesize_all<S>(
    raw_issues: S,
    now: DateTime<Utc>,
) -> impl Stream<Item = ExportResult<IssueRow>>
where
    S: Stream<Item = ExportResult<Value>>,
{
    raw_issues.and_then(move |raw| future::ready(synthesize(&raw, now)))
}

pub async fn export_issues<C, K>(
    client: &C,
    clock: &K,
    api_base_url: &str,
    repo: &str,
    dir: &Path,
) -> ExportResult<ExportOutcome>
where
    C: ForgeClientPort + ?Sized,
    K: ClockPort + ?Sized,
{
    let now = clock.now();
    let path = dir.join(output_filename(repo, clock.today()));

    let rows = synthesize_all(fetch_all_issues(client, api_base_url, repo), now);
    let written = write_table(&path, &ISSUE_COLUMNS, rows).await?;
    info!(repo = %repo, rows = written, path = %path.display(), "export finished");

    Ok(ExportOutcome {
        path,
        rows: written,
    })
}
