// HTTP surface: axum router, handlers and server bootstrap.

pub mod config;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use server::{build_router, start_server, AppState};
