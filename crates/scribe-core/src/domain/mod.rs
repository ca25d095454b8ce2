//! Domain entities - the core business objects.

mod page;
mod post;
mod user;

use uuid::Uuid;

pub use page::{Page, PageRequest, paginate};
pub use post::{Post, PostFilter, PostPatch};
pub use user::{User, UserPatch};

/// An entity that can live in a repository.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable kind, used in error messages.
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    /// Returns a message if `self` cannot coexist with `other` in the same store.
    fn conflicts_with(&self, _other: &Self) -> Option<String> {
        None
    }
}

/// Case-insensitive substring match. An empty needle matches everything.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
