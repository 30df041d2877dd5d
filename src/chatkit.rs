use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// Wire payload for the session-creation endpoint.
#[derive(Serialize)]
struct SessionPayload<'a> {
    workflow: Workflow<'a>,
    user: &'a str,
}

#[derive(Serialize)]
struct Workflow<'a> {
    id: &'a str,
}

/// Raw upstream reply: the HTTP status plus the best-effort decoded body.
/// An empty or non-JSON body decodes to `Value::Null`.
pub struct SessionReply {
    pub status: StatusCode,
    pub body: Value,
}

/// Calls the ChatKit session-creation endpoint.
///
/// Single best-effort attempt: no retries and no request timeout beyond
/// whatever the invocation environment imposes.
pub async fn create_session(
    http: &Client,
    base_url: &str,
    api_key: &str,
    workflow_id: &str,
    user: &str,
) -> Result<SessionReply, reqwest::Error> {
    let response = http
        .post(sessions_url(base_url))
        .header("Content-Type", "application/json")
        .header("Authorization", auth_header(api_key))
        .header("OpenAI-Beta", "chatkit_beta=v1")
        .json(&SessionPayload {
            workflow: Workflow { id: workflow_id },
            user,
        })
        .send()
        .await?;

    let status = response.status();
    let bytes = response.bytes().await?;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    Ok(SessionReply { status, body })
}

/// Error message for a rejected session request: `error.message`, then
/// top-level `message`, then a fixed fallback.
pub fn rejection_message(body: &Value) -> String {
    body.pointer("/error/message")
        .and_then(non_empty_str)
        .or_else(|| body.get("message").and_then(non_empty_str))
        .unwrap_or("Unable to create session")
        .to_string()
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

fn sessions_url(base_url: &str) -> String {
    format!("{base_url}/chatkit/sessions")
}

fn auth_header(api_key: &str) -> String {
    format!("Bearer {api_key}")
}
