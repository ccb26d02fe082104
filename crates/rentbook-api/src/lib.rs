//! # Rentbook API
//! 
//! HTTP handlers, session middleware, extractors and routing.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;

pub use response::ApiError;
pub use router::build_router;
pub use state::AppState;
