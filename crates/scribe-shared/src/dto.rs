//! Data Transfer Objects - request types for the API.
//!
//! Bodies are checked with `validator` after deserialization; a field that
//! is absent stays `None` and is skipped by its rules.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use scribe_core::domain::{PageRequest, PostFilter, PostPatch, UserPatch};

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(min = 18, max = 120, message = "Age must be between 18 and 120"))]
    pub age: Option<i64>,
}

/// Request to update a user. Only provided fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 18, max = 120, message = "Age must be between 18 and 120"))]
    pub age: Option<i64>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            email: req.email,
            name: req.name,
            age: req.age,
        }
    }
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response to a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Send as `Authorization: Bearer <token>`.
    pub token: String,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
    pub author_id: Uuid,
    #[serde(default)]
    #[schema(default = false)]
    pub published: bool,
    pub tags: Option<Vec<String>>,
}

/// Request to update a post. The author cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,
    pub published: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            published: req.published,
            tags: req.tags,
        }
    }
}

/// Query values arrive as text; `?page=` counts as absent.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Query string for `GET /users`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// 1-based page number (default 1).
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(range(min = 1, message = "page must be a positive integer"))]
    pub page: Option<u32>,
    /// Page size (default 10).
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(range(min = 1, message = "limit must be a positive integer"))]
    pub limit: Option<u32>,
    /// Case-insensitive match on name or email.
    pub search: Option<String>,
}

impl UserQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// Query string for `GET /posts`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PostQuery {
    /// 1-based page number (default 1).
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(range(min = 1, message = "page must be a positive integer"))]
    pub page: Option<u32>,
    /// Page size (default 10).
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(range(min = 1, message = "limit must be a positive integer"))]
    pub limit: Option<u32>,
    /// Only posts by this author.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub author_id: Option<Uuid>,
    /// `true` or `false`.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub published: Option<bool>,
    /// Case-insensitive match on title or content.
    pub search: Option<String>,
}

impl PostQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }

    pub fn filter(&self) -> PostFilter {
        PostFilter {
            author_id: self.author_id,
            published: self.published,
            search: self.search.clone(),
        }
    }
}
