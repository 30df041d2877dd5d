pub mod chatkit;
pub mod error;
pub mod routes;
pub mod state;
