use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Group, Post, PostEntry, PostFilter, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository. Deleting a user deletes all of their posts.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Group repository. Deleting a group detaches its posts instead of deleting them.
#[async_trait]
pub trait GroupRepository: BaseRepository<Group, i32> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    /// All groups, ordered by title. Used for form choices.
    async fn list_all(&self) -> Result<Vec<Group>, RepoError>;
}

/// Post repository.
///
/// Listings are always ordered newest `pub_date` first, ties broken by
/// descending id.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Number of posts matching the filter.
    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError>;

    /// One window of matching posts with author and group resolved.
    async fn list(
        &self,
        filter: PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<PostEntry>, RepoError>;

    /// A single post with author and group resolved.
    async fn find_entry(&self, id: i32) -> Result<Option<PostEntry>, RepoError>;

    /// Replace a post's text and group. Author and `pub_date` are never touched.
    async fn update_content(
        &self,
        id: i32,
        text: String,
        group_id: Option<i32>,
    ) -> Result<Post, RepoError>;
}
