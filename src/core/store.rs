//! Data store capability consumed by resolvers
//!
//! Resolvers only see the [`Db`] trait, so the backing implementation
//! (in-memory or persistent) can be swapped without touching them.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A stored post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub published: bool,
}

/// Fields supplied when creating a post; the store assigns the id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    /// Defaults to `false`
    #[serde(default)]
    pub published: Option<bool>,
}

impl NewPost {
    pub fn draft(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            published: None,
        }
    }
}

/// Record filter for [`Db::list_records`]; unset fields match everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub published: Option<bool>,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn drafts() -> Self {
        Self {
            published: Some(false),
        }
    }

    pub fn published() -> Self {
        Self {
            published: Some(true),
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.published.is_none_or(|published| post.published == published)
    }
}

/// Record store for posts
///
/// Implementations must be safe under concurrent use: ids handed out by
/// concurrent `create_record` calls never collide.
#[async_trait]
pub trait Db: Send + Sync {
    /// List posts matching the filter, in creation order
    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<Post>>;

    /// Store a new post under a fresh id
    async fn create_record(&self, fields: NewPost) -> Result<Post>;
}
