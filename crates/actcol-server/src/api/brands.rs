use std::collections::BTreeMap;

use actcol_core::{
    brand_matches_selected, brand_tokens, Brand, BrandAssets, BrandDetail, FilterId, FilterToken,
    GlanceItem, SelectedFilters, FILTER_CATEGORIES,
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Serialize;

use super::{map_sheets_error, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
pub(super) struct BrandListItem {
    id: String,
    slug: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tagline: Option<String>,
    assets: BrandAssets,
    tokens: BTreeMap<FilterId, Vec<FilterToken>>,
}

impl From<&Brand> for BrandListItem {
    fn from(brand: &Brand) -> Self {
        let tokens = FILTER_CATEGORIES
            .iter()
            .map(|category| (category.id, brand_tokens(brand, category)))
            .filter(|(_, tokens)| !tokens.is_empty())
            .collect();
        Self {
            id: brand.id.clone(),
            slug: brand.slug.clone(),
            name: brand.name.clone(),
            tagline: brand.tagline.clone(),
            assets: brand.assets.clone(),
            tokens,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct BrandDetailResponse {
    brand: Brand,
    detail: BrandDetail,
    at_a_glance: Vec<GlanceItem>,
    recommended: Vec<String>,
    page_title: String,
    page_description: String,
}

/// Query pairs are `category=value[,value...]`. A category may repeat; its
/// values are merged.
pub(super) async fn list_brands(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<Vec<BrandListItem>>>, ApiError> {
    let selected = SelectedFilters::from_pairs(
        query.iter().map(|(key, value)| (key.as_str(), value.as_str())),
    )
    .map_err(|message| ApiError::new(req_id.0.clone(), "bad_request", message))?;

    let snapshot = state
        .catalog
        .snapshot()
        .await
        .map_err(|e| map_sheets_error(req_id.0.clone(), &e))?;

    let items = snapshot
        .brands
        .iter()
        .filter(|brand| brand_matches_selected(brand, &selected))
        .map(BrandListItem::from)
        .collect();

    Ok(Json(ApiResponse::new(items, req_id.0)))
}

pub(super) async fn get_brand(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<BrandDetailResponse>>, ApiError> {
    let brand = state
        .catalog
        .get_brand_by_slug(&slug)
        .await
        .map_err(|e| map_sheets_error(req_id.0.clone(), &e))?
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("brand '{slug}' not found"),
            )
        })?;

    let detail = BrandDetail::from_brand(&brand);
    if let Some(field) = detail.first_missing_required() {
        tracing::warn!(slug = %slug, field, "brand row is missing a required detail field");
    }

    let response = BrandDetailResponse {
        at_a_glance: detail.at_a_glance(),
        recommended: detail.recommended().to_vec(),
        page_title: detail.page_title(),
        page_description: detail.page_description(),
        brand,
        detail,
    };
    Ok(Json(ApiResponse::new(response, req_id.0)))
}
