//! HTTP client for a Google Sheets "publish to web" CSV export.

use std::time::Duration;

use actcol_core::{normalize_rows, parse_csv, SheetRecord};
use reqwest::{Client, Url};

use crate::error::SheetsError;

/// Fetches the CSV export of a published sheet.
///
/// Every call is a single request: no retries, no caching. Callers that want
/// a revalidation window use [`crate::BrandCatalog`].
pub struct SheetsClient {
    client: Client,
}

impl SheetsClient {
    /// Creates a client with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Downloads the raw CSV text for `published_url`.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::InvalidSourceUrl`] if the URL cannot be parsed.
    /// - [`SheetsError::UnexpectedStatus`] for any non-2xx response.
    /// - [`SheetsError::Http`] on network or TLS failure.
    pub async fn fetch_csv(&self, published_url: &str) -> Result<String, SheetsError> {
        let url = build_csv_url(published_url)?;
        tracing::debug!(host = url.host_str().unwrap_or_default(), "fetching published sheet");

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "text/csv,text/plain;q=0.9,*/*;q=0.8")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "sheet publish endpoint returned an error");
            return Err(SheetsError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Downloads and normalizes the sheet into header-keyed records.
    ///
    /// # Errors
    ///
    /// Same as [`SheetsClient::fetch_csv`]. An empty or header-less sheet is
    /// not an error and yields no records.
    pub async fn fetch_sheet_records(
        &self,
        published_url: &str,
    ) -> Result<Vec<SheetRecord>, SheetsError> {
        let text = self.fetch_csv(published_url).await?;
        let rows = parse_csv(&text);
        Ok(normalize_rows(&rows))
    }
}

/// Points a published-sheet link at its CSV export.
///
/// A `/pubhtml` path becomes `/pub`; any other path not already ending in
/// `/pub` has one trailing slash removed and `/pub` appended. `output=csv`
/// is added unless an `output` parameter is already present.
///
/// # Errors
///
/// Returns [`SheetsError::InvalidSourceUrl`] if `raw` is not an absolute
/// hierarchical URL.
pub fn build_csv_url(raw: &str) -> Result<Url, SheetsError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| SheetsError::InvalidSourceUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(SheetsError::InvalidSourceUrl {
            url: raw.to_owned(),
            reason: "URL has no path to publish from".to_owned(),
        });
    }

    let mut path = url.path().to_owned();
    if let Some(prefix) = path.strip_suffix("/pubhtml") {
        path = format!("{prefix}/pub");
    }
    if !path.ends_with("/pub") {
        let base = path.strip_suffix('/').unwrap_or(&path);
        path = format!("{base}/pub");
    }
    url.set_path(&path);

    if !url.query_pairs().any(|(key, _)| key == "output") {
        url.query_pairs_mut().append_pair("output", "csv");
    }

    Ok(url)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
