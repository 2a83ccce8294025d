//! REST API client module for the reading tracker.
//!
//! This module provides the `ApiClient` for communicating with the
//! tracker API: authentication, classrooms, the book catalog, reading
//! assignments, and submitted summaries.
//!
//! The API uses JWT bearer token authentication obtained through the
//! login endpoint.

pub mod client;
pub mod error;

pub use client::{ApiClient, LoginResponse, DEFAULT_BASE_URL};
pub use error::ApiError;
