//! LINE relay endpoint: one reply per inbound text event.
//!
//! LINE itself does not call this route. A relay in front of the service
//! receives the LINE webhook and verifies `x-line-signature`. It then forwards
//! the same event envelope here with a bearer token. Finally it sends each
//! returned `{reply_token, text}` to LINE's reply API.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct LineEnvelope {
    #[serde(default)]
    pub events: Vec<LineEvent>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LineEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "replyToken")]
    pub reply_token: Option<String>,
    pub source: Option<LineSource>,
    pub message: Option<LineMessage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LineSource {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LineMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct LineReply {
    reply_token: Option<String>,
    identity: String,
    text: String,
}

#[derive(Debug, Serialize)]
pub(super) struct LineReplies {
    replies: Vec<LineReply>,
}

impl LineEvent {
    /// `(identity, text)` for text message events from an identified user.
    fn text_message(&self) -> Option<(&str, &str)> {
        if self.kind != "message" {
            return None;
        }
        let message = self.message.as_ref().filter(|m| m.kind == "text")?;
        let identity = self.source.as_ref()?.user_id.as_deref()?;
        Some((identity, message.text.as_deref()?))
    }
}

pub(super) async fn line_relay(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<LineEnvelope>,
) -> Result<Json<ApiResponse<LineReplies>>, ApiError> {
    let mut replies = Vec::new();

    for event in &body.events {
        let Some((identity, text)) = event.text_message() else {
            tracing::debug!(kind = %event.kind, "skipping non-text LINE event");
            continue;
        };
        replies.push(LineReply {
            reply_token: event.reply_token.clone(),
            identity: identity.to_string(),
            text: state.pipeline.handle(identity, text).await,
        });
    }

    tracing::info!(
        events = body.events.len(),
        replies = replies.len(),
        "LINE relay batch handled"
    );

    Ok(Json(ApiResponse {
        data: LineReplies { replies },
        meta: ResponseMeta::new(req_id.0),
    }))
}
