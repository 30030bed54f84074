use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct MessageRequest {
    pub identity: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub(super) struct MessageReply {
    reply: String,
}

pub(super) async fn post_message(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<MessageRequest>,
) -> Result<Json<ApiResponse<MessageReply>>, ApiError> {
    let identity = body.identity.trim();
    if identity.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "identity must not be empty",
        ));
    }

    let reply = state.pipeline.handle(identity, &body.text).await;

    Ok(Json(ApiResponse {
        data: MessageReply { reply },
        meta: ResponseMeta::new(req_id.0),
    }))
}
