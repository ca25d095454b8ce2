//! Standardized API response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

use scribe_core::domain::Page;

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Short error category, e.g. `Not Found`.
    #[schema(example = "Not Found")]
    pub error: String,

    /// Human-readable explanation specific to this occurrence.
    #[schema(example = "User not found")]
    pub message: String,

    /// Field-level problems, present on validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,

    /// Echo of the requested path for unmatched routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// A single offending field in a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "email")]
    pub path: String,
    #[schema(example = "Invalid email address")]
    pub message: String,
    #[schema(example = "email")]
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            path: None,
        }
    }

    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    // Common error constructors
    pub fn validation(details: Vec<FieldError>) -> Self {
        Self::new("Validation Error", "Invalid request data").with_details(details)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("Unauthorized", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("Forbidden", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("Not Found", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("Conflict", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("Internal Server Error", message)
    }
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            code: code.into(),
        }
    }

    /// Flatten `validator` output into one entry per failed rule, ordered by field.
    pub fn from_validation(errors: &ValidationErrors) -> Vec<Self> {
        let mut details: Vec<Self> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, failures)| {
                failures.iter().map(move |failure| {
                    let message = failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {field}"));
                    Self::new(field, message, failure.code.as_ref())
                })
            })
            .collect();

        details.sort_by(|a, b| a.path.cmp(&b.path));
        details
    }
}

/// Metadata describing one page of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: usize,
}

/// A page of results plus its metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> From<Page<T>> for Paginated<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            data: page.items,
            meta: PageMeta {
                page: page.page,
                limit: page.limit,
                total: page.total,
                total_pages: page.total_pages,
            },
        }
    }
}
