use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::domain::error::ExportResult;

/// Media type that makes the forge include `reactions` in issue payloads.
pub const REACTIONS_PREVIEW_ACCEPT: &str = "application/vnd.github.squirrel-girl-preview";

#[async_trait]
pub trait ForgeClientPort: Send + Sync {
    /// GETs `url` and decodes the body as JSON.
    async fn fetch_json(&self, url: &str) -> ExportResult<Value>;
}

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date in the user's local zone, used to name output files.
    fn today(&self) -> NaiveDate;
}
