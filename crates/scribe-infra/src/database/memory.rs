//! In-memory repository - an ordered `Vec` behind an async `RwLock`.
//!
//! Every operation is a linear scan. Data is lost on process restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Entity, Post, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{PostRepository, Predicate, Repository, Updater, UserRepository};

/// Generic in-memory store for any [`Entity`].
///
/// Writes hold the lock across the conflict check and the mutation, so
/// uniqueness holds under concurrent requests.
pub struct InMemoryRepository<T: Entity> {
    items: RwLock<Vec<T>>,
}

/// In-memory user repository.
pub type InMemoryUserRepository = InMemoryRepository<User>;

/// In-memory post repository.
pub type InMemoryPostRepository = InMemoryRepository<Post>;

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    fn conflict(items: &[T], candidate: &T) -> Option<String> {
        items
            .iter()
            .filter(|existing| existing.id() != candidate.id())
            .find_map(|existing| candidate.conflicts_with(existing))
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.items.read().await.clone())
    }

    async fn filter(&self, predicate: Predicate<'_, T>) -> Result<Vec<T>, RepoError> {
        let items = self.items.read().await;
        Ok(items.iter().filter(|&item| predicate(item)).cloned().collect())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut items = self.items.write().await;

        if let Some(message) = Self::conflict(&items, &entity) {
            tracing::debug!(kind = T::KIND, "Insert rejected: {}", message);
            return Err(RepoError::Constraint(message));
        }

        items.push(entity.clone());
        tracing::debug!(kind = T::KIND, id = %entity.id(), total = items.len(), "Inserted");
        Ok(entity)
    }

    async fn update(&self, id: Uuid, apply: Updater<'_, T>) -> Result<T, RepoError> {
        let mut items = self.items.write().await;

        let index = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(RepoError::NotFound)?;

        let entity = apply(&items[index]);

        if let Some(message) = Self::conflict(&items, &entity) {
            tracing::debug!(kind = T::KIND, %id, "Update rejected: {}", message);
            return Err(RepoError::Constraint(message));
        }

        items[index] = entity.clone();
        tracing::debug!(kind = T::KIND, %id, "Updated");
        Ok(entity)
    }

    async fn remove(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut items = self.items.write().await;

        match items.iter().position(|item| item.id() == id) {
            Some(index) => {
                items.remove(index);
                tracing::debug!(kind = T::KIND, %id, total = items.len(), "Removed");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<usize, RepoError> {
        Ok(self.items.read().await.len())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = match email.split_once('@') {
            Some((local, domain)) if local.chars().count() > 1 => {
                format!("{}***@{}", local.chars().next().unwrap_or('*'), domain)
            }
            Some((_, domain)) => format!("***@{}", domain),
            None => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let items = self.items.read().await;
        Ok(items.iter().find(|user| user.email == email).cloned())
    }
}

impl PostRepository for InMemoryPostRepository {}
