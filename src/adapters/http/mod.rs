//! HTTP adapter - thin axum surface over the application handlers.
//!
//! Rate limiting and admin verification run before any handler logic;
//! both gates short-circuit the request on failure.

pub mod admin;
mod error;
mod state;

pub use error::ApiError;
pub use state::AdminApiState;
