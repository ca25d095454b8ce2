//! # Scribe Core
//!
//! The domain layer of the Scribe API.
//! Entities, pagination, errors and the ports that infrastructure implements.
//! No HTTP or storage code lives here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
