use std::sync::Arc;

use async_trait::async_trait;

use yatube_core::domain::Group;
use yatube_core::error::RepoError;
use yatube_core::ports::{BaseRepository, GroupRepository};

use super::InMemoryStore;

/// In-memory group repository.
pub struct InMemoryGroupRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryGroupRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Group, i32> for InMemoryGroupRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Group>, RepoError> {
        Ok(self.store.tables.read().await.groups.get(&id).cloned())
    }

    async fn save(&self, mut group: Group) -> Result<Group, RepoError> {
        let mut tables = self.store.tables.write().await;

        let taken = tables
            .groups
            .values()
            .any(|g| g.slug == group.slug && g.id != group.id);
        if taken {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        if group.id == 0 {
            tables.last_group_id += 1;
            group.id = tables.last_group_id;
        } else {
            tables.last_group_id = tables.last_group_id.max(group.id);
        }

        tables.groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;

        tables.groups.remove(&id).ok_or(RepoError::NotFound)?;
        for post in tables.posts.values_mut() {
            if post.group_id == Some(id) {
                post.group_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.groups.values().find(|g| g.slug == slug).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Group>, RepoError> {
        let tables = self.store.tables.read().await;
        let mut groups: Vec<Group> = tables.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(groups)
    }
}
