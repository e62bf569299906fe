use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;

use yatube_core::domain::{Post, PostEntry, PostFilter};
use yatube_core::error::RepoError;
use yatube_core::ports::{BaseRepository, PostRepository};

use super::InMemoryStore;

/// In-memory post repository.
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.store.tables.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;

        if !tables.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                post.author_id
            )));
        }
        tables.check_group(post.group_id)?;

        if post.id == 0 {
            tables.last_post_id += 1;
            post.id = tables.last_post_id;
        } else {
            tables.last_post_id = tables.last_post_id.max(post.id);
        }

        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn list(
        &self,
        filter: PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<PostEntry>, RepoError> {
        let tables = self.store.tables.read().await;

        let mut matching: Vec<&Post> = tables.posts.values().filter(|p| filter.matches(p)).collect();
        matching.sort_by_key(|p| Reverse((p.pub_date, p.id)));

        matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|post| tables.entry(post))
            .collect()
    }

    async fn find_entry(&self, id: i32) -> Result<Option<PostEntry>, RepoError> {
        let tables = self.store.tables.read().await;
        tables.posts.get(&id).map(|post| tables.entry(post)).transpose()
    }

    async fn update_content(
        &self,
        id: i32,
        text: String,
        group_id: Option<i32>,
    ) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.check_group(group_id)?;

        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.text = text;
        post.group_id = group_id;
        Ok(post.clone())
    }
}
