use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Entity, contains_ignore_case};

/// User entity - represents a user in the system.
///
/// The password is stored and returned as plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(example = "jane@example.com")]
    pub email: String,
    pub password: String,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(minimum = 18, maximum = 120)]
    pub age: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a user update may change. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<i64>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(email: String, password: String, name: String, age: Option<i64>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password,
            name,
            age,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the provided fields into a copy of this user and refresh `updated_at`.
    pub fn merged(&self, patch: UserPatch) -> Self {
        let mut user = self.clone();
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(age) = patch.age {
            user.age = Some(age);
        }
        user.updated_at = Utc::now();
        user
    }

    /// Case-insensitive search over name and email.
    pub fn matches_search(&self, term: &str) -> bool {
        contains_ignore_case(&self.name, term) || contains_ignore_case(&self.email, term)
    }
}

impl Entity for User {
    const KIND: &'static str = "User";

    fn id(&self) -> Uuid {
        self.id
    }

    fn conflicts_with(&self, other: &Self) -> Option<String> {
        (self.email == other.email).then(|| "User with this email already exists".to_string())
    }
}
