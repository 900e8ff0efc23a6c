use serde::Serialize;
use uuid::Uuid;

use crate::app_config::AssetConfig;
use crate::sheet::SheetRecord;

const NAME_FIELDS: &[&str] = &["Brand Name", "Brand", "Name"];
const TAGLINE_FIELDS: &[&str] = &["Tagline", "Summary", "Description", "Tag Line"];
const SLUG_FIELDS: &[&str] = &["Slug", "slug", "ID", "Id"];
const ID_FIELDS: &[&str] = &["ID", "Id"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandAssets {
    pub icon: String,
    pub background: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Brand {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    pub assets: BrandAssets,
    /// The full sheet row, for fields the canonical model does not promote.
    pub columns: SheetRecord,
}

/// Generate a URL-safe slug: lowercase, runs of anything other than `a-z0-9`
/// collapsed to one `-`, no leading or trailing `-`.
///
/// When nothing survives (empty input, or only punctuation / non-ASCII
/// text) a random UUID is returned instead, so the result is never empty
/// but is not stable across calls for such input.
#[must_use]
pub fn slugify(value: &str) -> String {
    let lower = value.trim().to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut pending_dash = false;

    for c in lower.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        let fallback = Uuid::new_v4().to_string();
        tracing::warn!(source = value, slug = %fallback, "slug source has no usable characters; using random slug");
        return fallback;
    }
    slug
}

/// Derive a [`Brand`] from one sheet record.
///
/// Returns `None` when no name-like column holds a value; such rows are sheet
/// noise, not errors.
#[must_use]
pub fn build_brand(record: &SheetRecord, assets: &AssetConfig) -> Option<Brand> {
    let Some(name) = record.pick_first(NAME_FIELDS) else {
        tracing::debug!(columns = record.len(), "skipping sheet row without a brand name");
        return None;
    };

    let slug = slugify(record.pick_first(SLUG_FIELDS).unwrap_or(name));
    let id = record
        .pick_first(ID_FIELDS)
        .map_or_else(|| slug.clone(), str::to_string);
    let tagline = record.pick_first(TAGLINE_FIELDS).map(str::to_string);

    Some(Brand {
        id,
        assets: BrandAssets {
            icon: assets.icon_path(&slug),
            background: assets.image_path(&slug),
        },
        slug,
        name: name.to_string(),
        tagline,
        columns: record.clone(),
    })
}

/// Build every brand the records can produce, preserving sheet order.
#[must_use]
pub fn build_brands(records: &[SheetRecord], assets: &AssetConfig) -> Vec<Brand> {
    let brands: Vec<Brand> = records
        .iter()
        .filter_map(|record| build_brand(record, assets))
        .collect();

    let skipped = records.len() - brands.len();
    if skipped > 0 {
        tracing::info!(skipped, kept = brands.len(), "dropped sheet rows without a brand name");
    }
    brands
}

#[cfg(test)]
#[path = "brand_test.rs"]
mod tests;
