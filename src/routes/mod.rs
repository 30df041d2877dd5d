mod session;

use axum::{routing::any, Router};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    // Registered for every method: the handler owns the 405 response so
    // its body and headers match the documented contract.
    Router::new()
        .route("/chatkit/session", any(session::handler))
        .with_state(state)
}
