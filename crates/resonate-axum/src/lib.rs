#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings; used by integration tests
#[cfg(test)]
use base64 as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{
    AxumContext, CorsConfig, ServerConfig, bootstrap, bootstrap_with, start_server,
};
pub use error::HttpError;
pub use routes::{MAX_BODY_BYTES, create_router};
pub use state::AppState;
