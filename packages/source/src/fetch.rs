//! CSV download.
//!
//! A single GET of the spreadsheet export. There is no retry and no local
//! cache: if the download fails the run is over.

use std::time::Duration;

use crate::SourceError;

/// Per-request timeout for the spreadsheet download.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Downloads the raw CSV bytes from `url`.
///
/// # Errors
///
/// Returns [`SourceError::SourceUnavailable`] if the client cannot be
/// built, the request fails, the server answers with a non-success status,
/// or the body cannot be read.
pub async fn fetch_csv(url: &str) -> Result<Vec<u8>, SourceError> {
    let unavailable = |source: reqwest::Error| SourceError::SourceUnavailable {
        url: url.to_owned(),
        source,
    };

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(unavailable)?;

    let response = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(unavailable)?;

    let bytes = response.bytes().await.map_err(unavailable)?;

    log::debug!("Downloaded {} bytes from {url}", bytes.len());
    Ok(bytes.to_vec())
}
