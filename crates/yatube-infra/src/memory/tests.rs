use std::sync::Arc;

use chrono::{Duration, Utc};

use yatube_core::domain::{Group, Post, PostFilter, User};
use yatube_core::error::RepoError;
use yatube_core::ports::{BaseRepository, GroupRepository, PostRepository, UserRepository};

use super::{InMemoryGroupRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository};

struct Repos {
    users: InMemoryUserRepository,
    groups: InMemoryGroupRepository,
    posts: InMemoryPostRepository,
}

fn repos() -> Repos {
    let store = InMemoryStore::new();
    Repos {
        users: InMemoryUserRepository::new(Arc::clone(&store)),
        groups: InMemoryGroupRepository::new(Arc::clone(&store)),
        posts: InMemoryPostRepository::new(store),
    }
}

async fn user(repos: &Repos, username: &str) -> User {
    repos
        .users
        .save(User::new(username.to_string(), "hash".to_string()))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_save_assigns_sequential_ids() {
    let repos = repos();
    let author = user(&repos, "leo").await;

    let first = repos
        .posts
        .save(Post::new(author.id, "one".into(), None))
        .await
        .unwrap();
    let second = repos
        .posts
        .save(Post::new(author.id, "two".into(), None))
        .await
        .unwrap();

    assert_eq!((first.id, second.id), (1, 2));
}

#[tokio::test]
async fn test_list_is_newest_first_with_window() {
    let repos = repos();
    let author = user(&repos, "leo").await;
    let base = Utc::now();

    for i in 0..5 {
        let mut post = Post::new(author.id, format!("post {i}"), None);
        post.pub_date = base + Duration::minutes(i);
        repos.posts.save(post).await.unwrap();
    }

    let entries = repos.posts.list(PostFilter::All, 1, 2).await.unwrap();
    let texts: Vec<&str> = entries.iter().map(|e| e.post.text.as_str()).collect();

    assert_eq!(texts, ["post 3", "post 2"]);
    assert_eq!(entries[0].author.username, "leo");
}

#[tokio::test]
async fn test_filters_by_group_and_author() {
    let repos = repos();
    let leo = user(&repos, "leo").await;
    let ann = user(&repos, "ann").await;
    let rust = repos.groups.save(Group::new("Rust", "rust")).await.unwrap();

    repos
        .posts
        .save(Post::new(leo.id, "grouped".into(), Some(rust.id)))
        .await
        .unwrap();
    repos
        .posts
        .save(Post::new(ann.id, "loose".into(), None))
        .await
        .unwrap();

    let grouped = repos.posts.list(PostFilter::Group(rust.id), 0, 10).await.unwrap();
    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped[0].group.as_ref(), Some(&rust));

    assert_eq!(repos.posts.count(PostFilter::Author(ann.id)).await.unwrap(), 1);
    assert_eq!(repos.posts.count(PostFilter::All).await.unwrap(), 2);
}

#[tokio::test]
async fn test_duplicate_slug_is_rejected() {
    let repos = repos();
    repos.groups.save(Group::new("Rust", "rust")).await.unwrap();

    let result = repos.groups.save(Group::new("Other", "rust")).await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let repos = repos();
    user(&repos, "leo").await;

    let result = repos
        .users
        .save(User::new("leo".to_string(), "hash".to_string()))
        .await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_post_requires_existing_author_and_group() {
    let repos = repos();
    let leo = user(&repos, "leo").await;

    let orphan = repos
        .posts
        .save(Post::new(uuid::Uuid::new_v4(), "x".into(), None))
        .await;
    assert!(matches!(orphan, Err(RepoError::Constraint(_))));

    let bad_group = repos.posts.save(Post::new(leo.id, "x".into(), Some(42))).await;
    assert!(matches!(bad_group, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_deleting_author_cascades_to_posts() {
    let repos = repos();
    let leo = user(&repos, "leo").await;
    let ann = user(&repos, "ann").await;
    repos.posts.save(Post::new(leo.id, "a".into(), None)).await.unwrap();
    repos.posts.save(Post::new(ann.id, "b".into(), None)).await.unwrap();

    repos.users.delete(leo.id).await.unwrap();

    assert_eq!(repos.posts.count(PostFilter::All).await.unwrap(), 1);
    assert_eq!(repos.posts.count(PostFilter::Author(leo.id)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_deleting_group_detaches_posts() {
    let repos = repos();
    let leo = user(&repos, "leo").await;
    let rust = repos.groups.save(Group::new("Rust", "rust")).await.unwrap();
    let post = repos
        .posts
        .save(Post::new(leo.id, "a".into(), Some(rust.id)))
        .await
        .unwrap();

    repos.groups.delete(rust.id).await.unwrap();

    let stored = repos.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.group_id, None);
    assert_eq!(stored.text, "a");
}

#[tokio::test]
async fn test_update_content_keeps_author_and_date() {
    let repos = repos();
    let leo = user(&repos, "leo").await;
    let rust = repos.groups.save(Group::new("Rust", "rust")).await.unwrap();
    let original = repos
        .posts
        .save(Post::new(leo.id, "before".into(), None))
        .await
        .unwrap();

    let updated = repos
        .posts
        .update_content(original.id, "after".into(), Some(rust.id))
        .await
        .unwrap();

    assert_eq!(updated.text, "after");
    assert_eq!(updated.group_id, Some(rust.id));
    assert_eq!(updated.author_id, original.author_id);
    assert_eq!(updated.pub_date, original.pub_date);

    let missing = repos.posts.update_content(999, "x".into(), None).await;
    assert!(matches!(missing, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_groups_listed_by_title() {
    let repos = repos();
    repos.groups.save(Group::new("Zig", "zig")).await.unwrap();
    repos.groups.save(Group::new("Ada", "ada")).await.unwrap();

    let slugs: Vec<String> = repos
        .groups
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.slug)
        .collect();

    assert_eq!(slugs, ["ada", "zig"]);
    assert!(repos.groups.find_by_slug("zig").await.unwrap().is_some());
    assert!(repos.groups.find_by_slug("go").await.unwrap().is_none());
}
