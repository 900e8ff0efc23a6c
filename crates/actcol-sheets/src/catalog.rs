//! Revalidating brand catalog over a published sheet.
//!
//! The catalog keeps the latest [`SheetSnapshot`] and serves it until the
//! revalidation window passes. Requests that find a stale snapshot each fetch
//! independently (there is no single-flight guard); whichever finishes last
//! replaces the cached snapshot. A failed fetch leaves the previous snapshot
//! in place but is still reported to the caller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actcol_core::app_config::source_label;
use actcol_core::{build_brands, AppConfig, AssetConfig, Brand, SheetRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::client::SheetsClient;
use crate::error::SheetsError;

/// Number of brands included in [`SheetSummary::sample`].
const SUMMARY_SAMPLE_SIZE: usize = 3;

/// Where the sheet lives and how ingestion behaves.
#[derive(Clone)]
pub struct SheetSourceConfig {
    /// Published sheet link. `None` makes every ingestion fail with
    /// [`SheetsError::MissingSourceUrl`] before any request is sent.
    pub published_url: Option<String>,
    pub sheet_name: String,
    pub revalidate: Duration,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub assets: AssetConfig,
}

impl SheetSourceConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            published_url: config.sheet_url.clone(),
            sheet_name: config.sheet_name.clone(),
            revalidate: Duration::from_secs(config.revalidate_secs),
            request_timeout_secs: config.sheet_request_timeout_secs,
            user_agent: config.sheet_user_agent.clone(),
            assets: config.assets.clone(),
        }
    }
}

impl std::fmt::Debug for SheetSourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetSourceConfig")
            .field(
                "published_url",
                &self.published_url.as_ref().map(|_| "[redacted]"),
            )
            .field("sheet_name", &self.sheet_name)
            .field("revalidate", &self.revalidate)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("assets", &self.assets)
            .finish()
    }
}

/// One ingestion cycle's output. Brands are built once per snapshot so that
/// random fallback slugs stay stable for the life of the snapshot.
#[derive(Debug)]
pub struct SheetSnapshot {
    pub records: Vec<SheetRecord>,
    pub brands: Vec<Brand>,
    pub fetched_at: DateTime<Utc>,
    loaded_at: Instant,
}

impl SheetSnapshot {
    fn is_fresh(&self, window: Duration) -> bool {
        self.loaded_at.elapsed() < window
    }

    /// First brand whose slug equals `slug`. Duplicate slugs are not
    /// rejected at ingestion, so later rows with the same slug are shadowed.
    #[must_use]
    pub fn brand_by_slug(&self, slug: &str) -> Option<&Brand> {
        self.brands.iter().find(|b| b.slug == slug)
    }
}

/// Diagnostic view of the current sheet: what headers were found and how
/// many brands survived normalization.
#[derive(Debug, Clone, Serialize)]
pub struct SheetSummary {
    pub count: usize,
    pub sample: Vec<Brand>,
    pub headers: Vec<String>,
    pub first_row: Option<SheetRecord>,
    pub sheet_name: String,
    pub source_label: String,
    pub fetched_at: DateTime<Utc>,
}

pub struct BrandCatalog {
    client: SheetsClient,
    source: SheetSourceConfig,
    cache: RwLock<Option<Arc<SheetSnapshot>>>,
}

impl BrandCatalog {
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the HTTP client cannot be built.
    pub fn new(source: SheetSourceConfig) -> Result<Self, SheetsError> {
        let client = SheetsClient::new(source.request_timeout_secs, &source.user_agent)?;
        Ok(Self {
            client,
            source,
            cache: RwLock::new(None),
        })
    }

    #[must_use]
    pub fn source(&self) -> &SheetSourceConfig {
        &self.source
    }

    /// Current snapshot, refetching when the cached one is older than the
    /// revalidation window.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::MissingSourceUrl`] when no sheet URL is configured.
    /// - Any fetch error from [`SheetsClient::fetch_sheet_records`].
    pub async fn snapshot(&self) -> Result<Arc<SheetSnapshot>, SheetsError> {
        let cached = self
            .cache
            .read()
            .await
            .as_ref()
            .filter(|s| s.is_fresh(self.source.revalidate))
            .cloned();
        if let Some(snapshot) = cached {
            return Ok(snapshot);
        }

        let snapshot = Arc::new(self.load().await?);
        *self.cache.write().await = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    async fn load(&self) -> Result<SheetSnapshot, SheetsError> {
        let url = self
            .source
            .published_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(SheetsError::MissingSourceUrl)?;

        let started = Instant::now();
        let records = self.client.fetch_sheet_records(url).await?;
        let brands = build_brands(&records, &self.source.assets);

        tracing::info!(
            sheet = %self.source.sheet_name,
            records = records.len(),
            brands = brands.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "ingested brand sheet"
        );

        Ok(SheetSnapshot {
            records,
            brands,
            fetched_at: Utc::now(),
            loaded_at: Instant::now(),
        })
    }

    /// Drops the cached snapshot so the next read refetches.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    /// Header-keyed records of the current sheet.
    ///
    /// # Errors
    ///
    /// See [`BrandCatalog::snapshot`].
    pub async fn fetch_sheet_records(&self) -> Result<Vec<SheetRecord>, SheetsError> {
        Ok(self.snapshot().await?.records.clone())
    }

    /// Every brand the current sheet produces, in sheet order.
    ///
    /// # Errors
    ///
    /// See [`BrandCatalog::snapshot`].
    pub async fn get_brands(&self) -> Result<Vec<Brand>, SheetsError> {
        Ok(self.snapshot().await?.brands.clone())
    }

    /// First brand with exactly this slug.
    ///
    /// # Errors
    ///
    /// See [`BrandCatalog::snapshot`].
    pub async fn get_brand_by_slug(&self, slug: &str) -> Result<Option<Brand>, SheetsError> {
        Ok(self.snapshot().await?.brand_by_slug(slug).cloned())
    }

    /// # Errors
    ///
    /// See [`BrandCatalog::snapshot`].
    pub async fn summary(&self) -> Result<SheetSummary, SheetsError> {
        let snapshot = self.snapshot().await?;
        let first_row = snapshot.records.first().cloned();
        let headers = first_row
            .as_ref()
            .map(|r| r.headers().map(str::to_string).collect())
            .unwrap_or_default();

        Ok(SheetSummary {
            count: snapshot.brands.len(),
            sample: snapshot
                .brands
                .iter()
                .take(SUMMARY_SAMPLE_SIZE)
                .cloned()
                .collect(),
            headers,
            first_row,
            sheet_name: self.source.sheet_name.clone(),
            source_label: source_label(self.source.published_url.as_deref()),
            fetched_at: snapshot.fetched_at,
        })
    }
}
