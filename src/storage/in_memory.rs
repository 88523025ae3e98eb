//! In-memory implementation of Db for testing and development

use crate::core::store::{Db, NewPost, Post, RecordFilter};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

#[derive(Debug)]
struct PostTable {
    posts: Vec<Post>,
    next_id: i64,
}

/// In-memory post store
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// ids are assigned under the write lock so concurrent creates never collide.
#[derive(Clone)]
pub struct InMemoryDb {
    table: Arc<RwLock<PostTable>>,
}

impl InMemoryDb {
    /// Create an empty store whose first id is 1
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a store preloaded with existing records
    ///
    /// The next assigned id follows the highest preloaded id.
    pub fn with_records(posts: Vec<Post>) -> Self {
        let next_id = posts.iter().map(|post| post.id).max().unwrap_or(0) + 1;
        Self {
            table: Arc::new(RwLock::new(PostTable { posts, next_id })),
        }
    }

    /// Create a store from seed fields, assigning ids in order
    pub fn seeded(seed: Vec<NewPost>) -> Self {
        let posts = seed
            .into_iter()
            .zip(1..)
            .map(|(fields, id)| Post {
                id,
                title: fields.title,
                body: fields.body,
                published: fields.published.unwrap_or(false),
            })
            .collect();
        Self::with_records(posts)
    }
}

impl Default for InMemoryDb {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Db for InMemoryDb {
    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<Post>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table
            .posts
            .iter()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect())
    }

    async fn create_record(&self, fields: NewPost) -> Result<Post> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let post = Post {
            id: table.next_id,
            title: fields.title,
            body: fields.body,
            published: fields.published.unwrap_or(false),
        };
        table.next_id += 1;
        table.posts.push(post.clone());

        Ok(post)
    }
}
