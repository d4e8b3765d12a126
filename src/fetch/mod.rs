use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{HurricaneError, Result};

/// Fetch the raw hurricane table and hand the response body back as a lazy
/// chunk stream for the parser to fold over.
///
/// Request failures and non-success statuses surface as
/// [`HurricaneError::Fetch`] carrying the cause message; there are no
/// retries. Transport errors that appear mid-body surface from the returned
/// stream as [`HurricaneError::Stream`].
pub async fn fetch_table(
    client: &Client,
    url_str: &str,
) -> Result<impl Stream<Item = Result<Bytes>>> {
    let url = Url::parse(url_str).map_err(|e| HurricaneError::Fetch {
        url: url_str.to_string(),
        reason: e.to_string(),
    })?;

    debug!(url = %url, "requesting hurricane table");
    let resp = client
        .get(url.as_str())
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| HurricaneError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    Ok(resp
        .bytes_stream()
        .map_err(|e| HurricaneError::Stream(e.to_string())))
}
