use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Entity, contains_ignore_case};

/// Post entity - represents a blog post or article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    #[schema(example = "Hello world")]
    pub title: String,
    pub content: String,
    /// Author reference. Not checked against the user store.
    pub author_id: Uuid,
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a post update may change.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// List filters for posts. Every `None` criterion matches all posts.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub author_id: Option<Uuid>,
    pub published: Option<bool>,
    pub search: Option<String>,
}

impl Post {
    /// Create a new post.
    pub fn new(
        author_id: Uuid,
        title: String,
        content: String,
        published: bool,
        tags: Option<Vec<String>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            author_id,
            published,
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn merged(&self, patch: PostPatch) -> Self {
        let mut post = self.clone();
        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(published) = patch.published {
            post.published = published;
        }
        if let Some(tags) = patch.tags {
            post.tags = Some(tags);
        }
        post.updated_at = Utc::now();
        post
    }
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        if self.author_id.is_some_and(|author| author != post.author_id) {
            return false;
        }
        if self.published.is_some_and(|published| published != post.published) {
            return false;
        }
        match &self.search {
            Some(term) => {
                contains_ignore_case(&post.title, term) || contains_ignore_case(&post.content, term)
            }
            None => true,
        }
    }
}

impl Entity for Post {
    const KIND: &'static str = "Post";

    fn id(&self) -> Uuid {
        self.id
    }
}
