//! In-memory repositories - used when no database is configured, and in tests.
//!
//! All three repositories share one [`InMemoryStore`] so that deleting a user
//! or a group affects that user's or group's posts the same way the
//! database foreign keys do. Data is lost on process restart.

mod groups;
mod posts;
mod users;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use yatube_core::domain::{Author, Group, Post, PostEntry, User};
use yatube_core::error::RepoError;

pub use groups::InMemoryGroupRepository;
pub use posts::InMemoryPostRepository;
pub use users::InMemoryUserRepository;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    groups: BTreeMap<i32, Group>,
    posts: BTreeMap<i32, Post>,
    last_group_id: i32,
    last_post_id: i32,
}

impl Tables {
    fn entry(&self, post: &Post) -> Result<PostEntry, RepoError> {
        let author = self
            .users
            .get(&post.author_id)
            .map(Author::from)
            .ok_or_else(|| {
                RepoError::Query(format!("post {} references a missing author", post.id))
            })?;
        let group = post.group_id.and_then(|id| self.groups.get(&id).cloned());

        Ok(PostEntry {
            post: post.clone(),
            author,
            group,
        })
    }

    fn check_group(&self, group_id: Option<i32>) -> Result<(), RepoError> {
        match group_id {
            Some(id) if !self.groups.contains_key(&id) => {
                Err(RepoError::Constraint(format!("group {id} does not exist")))
            }
            _ => Ok(()),
        }
    }
}

/// Shared storage behind the in-memory repositories.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[cfg(test)]
mod tests;
