use actcol_sheets::SheetSummary;
use axum::{extract::State, Extension, Json};

use super::{map_sheets_error, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

/// Sheet diagnostics for whoever maintains the spreadsheet.
pub(super) async fn sheet_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<SheetSummary>>, ApiError> {
    let summary = state
        .catalog
        .summary()
        .await
        .map_err(|e| map_sheets_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(summary, req_id.0)))
}
