use actcol_core::{build_filter_options, category, FilterId, FilterToken};
use axum::{extract::State, Extension, Json};
use serde::Serialize;

use super::{map_sheets_error, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
pub(super) struct FilterCategoryItem {
    id: FilterId,
    label: &'static str,
    options: Vec<FilterToken>,
}

pub(super) async fn list_filters(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<FilterCategoryItem>>>, ApiError> {
    let snapshot = state
        .catalog
        .snapshot()
        .await
        .map_err(|e| map_sheets_error(req_id.0.clone(), &e))?;

    let items = build_filter_options(&snapshot.brands)
        .into_iter()
        .map(|(id, options)| FilterCategoryItem {
            id,
            label: category(id).label,
            options,
        })
        .collect();

    Ok(Json(ApiResponse::new(items, req_id.0)))
}
