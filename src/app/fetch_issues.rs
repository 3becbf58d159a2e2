use futures_util::{stream, Stream, TryStreamExt};
use serde_json::Value;
use tracing::debug;

use crate::{
    domain::error::{ExportError, ExportResult},
    ports::ForgeClientPort,
};

pub const PAGE_SIZE: usize = 100;

pub fn issues_page_url(api_base_url: &str, repo: &str, page: u32) -> String {
    format!(
        "{}/repos/{repo}/issues?per_page={PAGE_SIZE}&page={page}",
        api_base_url.trim_end_matches('/')
    )
}

/// Streams every issue of `repo`, page by page, starting at page 0.
///
/// A page is only requested once the previous one has been drained, and the
/// first empty page ends the stream. Errors end it as well.
pub fn fetch_all_issues<'a, C>(
    client: &'a C,
    api_base_url: &'a str,
    repo: &'a str,
) -> impl Stream<Item = ExportResult<Value>> + 'a
where
    C: ForgeClientPort + ?Sized,
{
    stream::try_unfold(0u32, move |page| async move {
        let url = issues_page_url(api_base_url, repo, page);
        fetch_page(client, &url)
            .await
            .map(|items| (!items.is_empty()).then(|| (items, page + 1)))
    })
    .map_ok(|items| stream::iter(items.into_iter().map(Ok::<_, ExportError>)))
    .try_flatten()
}

async fn fetch_page<C>(client: &C, url: &str) -> ExportResult<Vec<Value>>
where
    C: ForgeClientPort + ?Sized,
{
    let payload = client.fetch_json(url).await?;
    let items: Vec<Value> =
        serde_json::from_value(payload).map_err(|source| ExportError::Decode {
            url: url.to_string(),
            source,
        })?;
    debug!(url = %url, items = items.len(), "fetched issues page");
    Ok(items)
}
