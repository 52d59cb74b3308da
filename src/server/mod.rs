pub mod config;
mod http_layers;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::{log_requests, RequestsLoggingLevel};
pub use routes::{make_app, run_server};
