//! Published-spreadsheet ingestion for the brand catalog.
//!
//! [`SheetsClient`] fetches the CSV export of a published sheet;
//! [`BrandCatalog`] turns it into brands and keeps the latest snapshot for a
//! fixed revalidation window.

pub mod catalog;
pub mod client;
pub mod error;

pub use catalog::{BrandCatalog, SheetSnapshot, SheetSourceConfig, SheetSummary};
pub use client::{build_csv_url, SheetsClient};
pub use error::SheetsError;
