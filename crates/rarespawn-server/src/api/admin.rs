use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ReloadResult {
    output_format: String,
    default_label: String,
    set_label_command: String,
}

/// POST /api/v1/admin/reload: re-read the format file and swap the template.
pub(super) async fn reload_format(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<ReloadResult>>, ApiError> {
    if let Err(e) = state.pipeline.reload() {
        tracing::error!(error = %e, "format reload failed; keeping current format");
        return Err(ApiError::new(req_id.0, "config_error", e.to_string()));
    }

    let format = state.pipeline.format();
    Ok(Json(ApiResponse {
        data: ReloadResult {
            output_format: format.template.source().to_string(),
            default_label: format.default_label.clone(),
            set_label_command: format.set_label_command.clone(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
