//! HTTP service for the column multiplication integration.

pub mod auth;
pub mod calculation;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
