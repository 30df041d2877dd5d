use std::env;

use reqwest::Client;

const CHATKIT_BASE_URL: &str = "https://api.openai.com/v1";

/// Process-wide state, built once in `main` and cloned into each handler.
///
/// The required environment variables are captured here rather than read
/// ad hoc so tests can inject values without touching the real process
/// environment. Presence is checked per request, not at startup: a
/// misconfigured deployment must answer with a descriptive 500 instead of
/// failing to boot.
#[derive(Clone)]
pub struct AppState {
    pub api_key: Option<String>,
    pub workflow_id: Option<String>,
    pub base_url: String,
    pub http: Client,
}

impl AppState {
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty(env::var("OPENAI_API_KEY").ok()),
            workflow_id: non_empty(env::var("WORKFLOW_ID").ok()),
            base_url: CHATKIT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Names of required environment variables that are absent, in the
    /// fixed order they are documented.
    pub fn missing_env(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push("OPENAI_API_KEY");
        }
        if self.workflow_id.is_none() {
            missing.push("WORKFLOW_ID");
        }
        missing
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
