//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `TokenStore`: durable persistence of the session token
//! - `Session`: the login/logout lifecycle and published auth state
//!
//! The token survives restarts; the profile is re-verified on every
//! startup and an invalid token degrades silently to anonymous.

pub mod session;
pub mod token;

pub use session::{Session, SessionState};
pub use token::TokenStore;
