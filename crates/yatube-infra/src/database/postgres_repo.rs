//! PostgreSQL repository implementations.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use uuid::Uuid;

use yatube_core::domain::{Author, Group, Post, PostEntry, PostFilter, User};
use yatube_core::error::RepoError;
use yatube_core::ports::{GroupRepository, PostRepository, UserRepository};

use super::entity::group::{self, Entity as GroupEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL group repository.
pub type PostgresGroupRepository = PostgresBaseRepository<GroupEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let result = GroupEntity::find()
            .filter(group::Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Group>, RepoError> {
        let result = GroupEntity::find()
            .order_by_asc(group::Column::Title)
            .order_by_asc(group::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

fn filtered_posts(filter: PostFilter) -> Select<PostEntity> {
    let query = PostEntity::find();
    match filter {
        PostFilter::All => query,
        PostFilter::Group(group_id) => query.filter(post::Column::GroupId.eq(group_id)),
        PostFilter::Author(author_id) => query.filter(post::Column::AuthorId.eq(author_id)),
    }
}

/// Resolve authors and groups for a batch of posts with one query each.
async fn attach_relations(
    db: &DbConn,
    models: Vec<post::Model>,
) -> Result<Vec<PostEntry>, RepoError> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let author_ids: BTreeSet<Uuid> = models.iter().map(|m| m.author_id).collect();
    let authors: HashMap<Uuid, Author> = UserEntity::find()
        .filter(user::Column::Id.is_in(author_ids))
        .all(db)
        .await
        .map_err(map_db_err)?
        .into_iter()
        .map(|u| {
            (
                u.id,
                Author {
                    id: u.id,
                    username: u.username,
                },
            )
        })
        .collect();

    let group_ids: BTreeSet<i32> = models.iter().filter_map(|m| m.group_id).collect();
    let groups: HashMap<i32, Group> = if group_ids.is_empty() {
        HashMap::new()
    } else {
        GroupEntity::find()
            .filter(group::Column::Id.is_in(group_ids))
            .all(db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|g| (g.id, Group::from(g)))
            .collect()
    };

    models
        .into_iter()
        .map(|model| {
            let author = authors.get(&model.author_id).cloned().ok_or_else(|| {
                RepoError::Query(format!("post {} references a missing author", model.id))
            })?;
            let group = model.group_id.and_then(|id| groups.get(&id).cloned());

            Ok(PostEntry {
                post: model.into(),
                author,
                group,
            })
        })
        .collect()
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError> {
        filtered_posts(filter)
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn list(
        &self,
        filter: PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<PostEntry>, RepoError> {
        let models = filtered_posts(filter)
            .order_by_desc(post::Column::PubDate)
            .order_by_desc(post::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        attach_relations(&*self.db, models).await
    }

    async fn find_entry(&self, id: i32) -> Result<Option<PostEntry>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        Ok(attach_relations(&*self.db, vec![model]).await?.pop())
    }

    async fn update_content(
        &self,
        id: i32,
        text: String,
        group_id: Option<i32>,
    ) -> Result<Post, RepoError> {
        let changes = post::ActiveModel {
            id: Unchanged(id),
            text: Set(text),
            group_id: Set(group_id),
            ..Default::default()
        };

        let model = changes.update(&*self.db).await.map_err(map_db_err)?;
        tracing::debug!(post_id = id, "Post content updated");

        Ok(model.into())
    }
}
