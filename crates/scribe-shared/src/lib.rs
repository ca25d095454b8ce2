//! # Scribe Shared
//!
//! Request and response types for the HTTP API, with their validation rules
//! and OpenAPI schemas.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldError, PageMeta, Paginated};
