//! Catalog command handlers for the CLI.
//!
//! Output is pretty-printed JSON on stdout so it can be piped into `jq`;
//! logs go to stderr.

use actcol_core::{
    brand_matches_selected, build_filter_options, category, BrandDetail, SelectedFilters,
};
use actcol_sheets::BrandCatalog;
use serde_json::json;

/// Print brands matching every `category=value,...` filter.
///
/// # Errors
///
/// Returns an error if a filter names an unknown category or the sheet
/// cannot be ingested.
pub(crate) async fn run_list(
    catalog: &BrandCatalog,
    filters: &[(String, String)],
) -> anyhow::Result<()> {
    let selected = SelectedFilters::from_pairs(
        filters
            .iter()
            .map(|(category, values)| (category.as_str(), values.as_str())),
    )
    .map_err(anyhow::Error::msg)?;

    let brands = catalog.get_brands().await?;
    let matched: Vec<_> = brands
        .iter()
        .filter(|brand| brand_matches_selected(brand, &selected))
        .map(|brand| {
            json!({
                "slug": brand.slug,
                "name": brand.name,
                "tagline": brand.tagline,
            })
        })
        .collect();

    tracing::debug!(
        total = brands.len(),
        matched = matched.len(),
        active_filters = selected.active_count(),
        "filtered brand list"
    );
    println!("{}", serde_json::to_string_pretty(&matched)?);
    Ok(())
}

/// Print the detail view for `slug`.
///
/// # Errors
///
/// Returns an error if no brand has this slug or the sheet cannot be
/// ingested.
pub(crate) async fn run_show(catalog: &BrandCatalog, slug: &str) -> anyhow::Result<()> {
    let brand = catalog
        .get_brand_by_slug(slug)
        .await?
        .ok_or_else(|| anyhow::anyhow!("brand '{slug}' not found"))?;
    let detail = BrandDetail::from_brand(&brand);

    let output = json!({
        "title": detail.page_title(),
        "description": detail.page_description(),
        "at_a_glance": detail.at_a_glance(),
        "recommended": detail.recommended(),
        "assets": brand.assets,
        "detail": detail,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// # Errors
///
/// Returns an error if the sheet cannot be ingested.
pub(crate) async fn run_filters(catalog: &BrandCatalog) -> anyhow::Result<()> {
    let brands = catalog.get_brands().await?;
    let categories: Vec<_> = build_filter_options(&brands)
        .into_iter()
        .map(|(id, options)| {
            json!({
                "id": id,
                "label": category(id).label,
                "options": options,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&categories)?);
    Ok(())
}
