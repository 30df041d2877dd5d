use std::fmt;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Unified error type for the session proxy.
///
/// Each variant maps to an HTTP status code and produces a JSON response
/// body of the form `{"error": "<message>"}`.
#[derive(Debug)]
pub enum ProxyError {
    /// Request used a method other than POST.
    MethodNotAllowed,
    /// Required environment variables are absent.
    MissingConfig(Vec<&'static str>),
    /// Upstream completed with a non-success status; relayed as-is.
    Upstream { status: StatusCode, message: String },
    /// Everything else: body parse failures, network failures.
    Internal(String),
}

impl ProxyError {
    /// The user-visible message placed in the `error` field of the body.
    pub fn message(&self) -> String {
        match self {
            ProxyError::MethodNotAllowed => "Method Not Allowed".to_string(),
            ProxyError::MissingConfig(names) => format!(
                "Missing required environment variables: {}.",
                names.join(", ")
            ),
            ProxyError::Upstream { message, .. } => message.clone(),
            ProxyError::Internal(message) => {
                if message.is_empty() {
                    "Server error".to_string()
                } else {
                    message.clone()
                }
            }
        }
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::Upstream { status, message } => {
                write!(f, "upstream rejected session ({status}): {message}")
            }
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ProxyError {}

/// Attaches the permissive CORS header shared by the 405, 200, and 500
/// paths. The upstream-error relay is the one response that goes out
/// without it.
pub fn attach_cors(response: &mut Response) {
    response.headers_mut().insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_static("*"),
    );
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::MissingConfig(_) | ProxyError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let relay = matches!(self, ProxyError::Upstream { .. });
        let body = json!({ "error": self.message() });

        let mut response = (status, Json(body)).into_response();
        if !relay {
            attach_cors(&mut response);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_missing_config_message_lists_names() {
        let err = ProxyError::MissingConfig(vec!["OPENAI_API_KEY", "WORKFLOW_ID"]);
        assert_eq!(
            err.message(),
            "Missing required environment variables: OPENAI_API_KEY, WORKFLOW_ID."
        );
    }

    #[test]
    fn test_internal_falls_back_to_generic_message() {
        assert_eq!(ProxyError::Internal(String::new()).message(), "Server error");
        assert_eq!(ProxyError::Internal("boom".to_string()).message(), "boom");
    }

    #[tokio::test]
    async fn test_method_not_allowed_response() {
        let response = ProxyError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Method Not Allowed" })
        );
    }

    #[tokio::test]
    async fn test_upstream_relay_omits_cors_header() {
        let response = ProxyError::Upstream {
            status: StatusCode::UNAUTHORIZED,
            message: "invalid key".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get("Access-Control-Allow-Origin").is_none());
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "invalid key" })
        );
    }

    #[tokio::test]
    async fn test_internal_response_carries_cors_header() {
        let response = ProxyError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }
}
