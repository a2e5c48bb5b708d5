//! Threadline HTTP server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! identity extractor) so integration tests and the binary entrypoint can
//! both reach them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
