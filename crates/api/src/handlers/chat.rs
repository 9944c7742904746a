//! Streaming chat handler.
//!
//! Proxies the upstream streaming completion as Server-Sent Events: one
//! `data` event per incremental fragment, JSON-encoded so whitespace
//! survives the wire exactly as the historical API delivered it.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::{Stream, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub user_message: String,
    #[serde(default)]
    pub system_prompt: String,
}

/// POST /api/chat
///
/// Upstream failure before the first chunk surfaces as a plain 500 JSON
/// error. Once streaming has started the status is committed; a
/// mid-stream failure is delivered as a final `error` event and the
/// stream closes.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    if req.user_message.is_empty() {
        return Err(AppError::BadRequest("userMessage is required".to_string()));
    }

    let ai = state.ai()?;
    let rx = ai.chat_stream(&req.system_prompt, &req.user_message).await?;

    let stream = ReceiverStream::new(rx).map(|fragment| {
        Ok(match fragment {
            Ok(text) => Event::default().data(serde_json::Value::String(text).to_string()),
            Err(err) => Event::default().event("error").data(err.to_string()),
        })
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
