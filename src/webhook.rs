//! The webhook delivery surface: receives platform callbacks, hands the text
//! to the interpreter, and relays the reply.

use axum::{
    Form, Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Deserialize;

use crate::Interpreter;

/// The user assigned to webhook messages that do not carry an identifier.
const DEMO_USER_ID: &str = "demo_user";

/// State shared by the webhook endpoints.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The command interpreter that produces a reply for each message.
    pub interpreter: Interpreter,
}

/// An inbound message from the chat platform.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    /// The sender. Messages without one are treated as the demo user.
    pub user_id: Option<String>,
    /// The raw command text.
    pub message: String,
}

/// Build the webhook router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(webhook_endpoint))
        .route("/callback", post(callback_endpoint))
        .route("/health", get(health_endpoint))
        .with_state(state)
}

/// Handle a form-encoded webhook message.
async fn webhook_endpoint(
    State(state): State<AppState>,
    Form(inbound): Form<InboundMessage>,
) -> String {
    reply_to(&state, inbound)
}

/// Handle a JSON platform callback.
async fn callback_endpoint(
    State(state): State<AppState>,
    Json(inbound): Json<InboundMessage>,
) -> String {
    reply_to(&state, inbound)
}

fn reply_to(state: &AppState, inbound: InboundMessage) -> String {
    let user_id = inbound.user_id.as_deref().unwrap_or(DEMO_USER_ID);
    tracing::info!(user_id, "received message");

    state.interpreter.handle_message(user_id, &inbound.message)
}

async fn health_endpoint() -> &'static str {
    "OK"
}
