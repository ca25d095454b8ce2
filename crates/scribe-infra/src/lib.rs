//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`.
//!
//! ## Feature Flags
//!
//! - `auth` (default) - HS256 signed session tokens via `jsonwebtoken`

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::InMemoryRepository;

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
