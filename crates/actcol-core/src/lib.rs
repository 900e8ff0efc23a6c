//! Domain core for the Active Collection brand catalog.
//!
//! Everything here is pure and synchronous: CSV text goes in, typed
//! [`Brand`]s, filter options and match decisions come out. Fetching the
//! sheet lives in `actcol-sheets`.

pub mod app_config;
pub mod brand;
pub mod config;
pub mod csv;
pub mod detail;
pub mod filters;
pub mod sheet;
pub mod tokens;

use thiserror::Error;

pub use app_config::{AppConfig, AssetConfig, Environment};
pub use brand::{build_brand, build_brands, slugify, Brand, BrandAssets};
pub use config::{load_app_config, load_app_config_from_env};
pub use crate::csv::parse_csv;
pub use detail::{value_or_missing, BrandDetail, GlanceItem};
pub use filters::{
    brand_matches_selected, build_filter_options, category, FilterCategory, FilterId,
    FilterOptionsMap, SelectedFilters, FILTER_CATEGORIES,
};
pub use sheet::{normalize_rows, sanitize, SheetRecord};
pub use tokens::{brand_tokens, FilterToken};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
