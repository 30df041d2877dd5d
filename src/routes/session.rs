use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::{
    chatkit,
    error::{attach_cors, ProxyError},
    state::AppState,
};

pub async fn handler(State(state): State<AppState>, method: Method, body: String) -> Response {
    if method != Method::POST {
        return ProxyError::MethodNotAllowed.into_response();
    }

    match create_session(&state, &body).await {
        Ok(response) => response,
        Err(err) => {
            // Upstream rejections are relayed quietly; everything else
            // reaches the boundary as a genuine failure.
            if !matches!(err, ProxyError::Upstream { .. }) {
                tracing::error!("chatkit session error: {err}");
            }
            err.into_response()
        }
    }
}

async fn create_session(state: &AppState, raw_body: &str) -> Result<Response, ProxyError> {
    let missing = state.missing_env();
    if !missing.is_empty() {
        return Err(ProxyError::MissingConfig(missing));
    }
    // Presence checked above.
    let api_key = state.api_key.as_deref().unwrap_or_default();
    let workflow_id = state.workflow_id.as_deref().unwrap_or_default();

    let user = extract_user(raw_body)?;

    let reply = chatkit::create_session(&state.http, &state.base_url, api_key, workflow_id, &user)
        .await
        .map_err(|err| ProxyError::Internal(err.to_string()))?;

    if !reply.status.is_success() {
        return Err(ProxyError::Upstream {
            status: reply.status,
            message: chatkit::rejection_message(&reply.body),
        });
    }

    // The secret is passed through verbatim; an upstream body without the
    // field yields an empty object rather than an explicit null.
    let body = match reply.body.get("client_secret") {
        Some(secret) => json!({ "client_secret": secret }),
        None => json!({}),
    };

    let mut response = (StatusCode::OK, Json(body)).into_response();
    attach_cors(&mut response);
    Ok(response)
}

/// Pulls `user` out of the request body. An absent or empty body counts
/// as an empty object; a missing, null, non-string, or empty `user`
/// becomes `"guest"`.
fn extract_user(raw_body: &str) -> Result<String, ProxyError> {
    let parsed: Value = if raw_body.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(raw_body).map_err(|err| ProxyError::Internal(err.to_string()))?
    };

    let user = parsed
        .get("user")
        .and_then(Value::as_str)
        .filter(|user| !user.is_empty())
        .unwrap_or("guest");

    Ok(user.to_string())
}
