//! REST API server: routes, token authentication, DTOs, and OpenAPI documentation.

pub mod auth;
pub mod cache;
pub mod config;
pub mod dto;
pub mod error;
pub mod logging;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod system;
