use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Entity, Post, User};
use crate::error::RepoError;

/// Predicate used by [`Repository::filter`].
pub type Predicate<'a, T> = &'a (dyn Fn(&T) -> bool + Send + Sync);

/// Rewrite applied by [`Repository::update`] to the stored entity.
pub type Updater<'a, T> = Box<dyn FnOnce(&T) -> T + Send + 'a>;

/// Generic repository trait defining standard CRUD operations.
///
/// Implementations keep insertion order for `find_all` and `filter`.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError>;

    /// All entities in insertion order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Entities matching `predicate`, in insertion order.
    async fn filter(&self, predicate: Predicate<'_, T>) -> Result<Vec<T>, RepoError>;

    /// Append a new entity. Fails with `Constraint` if it conflicts with a stored one.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Rewrite the entity stored under `id` from its current value, keeping
    /// its position. The read, `apply` and the write happen under one lock.
    /// Fails with `NotFound` if nothing is stored under `id`, or `Constraint`
    /// if the result conflicts with another entity.
    async fn update(&self, id: Uuid, apply: Updater<'_, T>) -> Result<T, RepoError>;

    /// Remove by ID. Returns whether anything was removed.
    async fn remove(&self, id: Uuid) -> Result<bool, RepoError>;

    async fn count(&self) -> Result<usize, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: Repository<User> {
    /// Find a user by their email address (exact match).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository. Posts have no lookups beyond the generic ones yet.
pub trait PostRepository: Repository<Post> {}
