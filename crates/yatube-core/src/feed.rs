//! Feed loading shared by the index, group and profile listings.

use crate::domain::{PostEntry, PostFilter};
use crate::error::RepoError;
use crate::pagination::{Page, Paginator};
use crate::ports::PostRepository;

/// Load one page of a feed.
///
/// `requested_page` is the raw `page` query value; it is clamped by the
/// paginator and never produces an error on its own.
pub async fn load_feed(
    posts: &dyn PostRepository,
    paginator: &Paginator,
    filter: PostFilter,
    requested_page: Option<&str>,
) -> Result<Page<PostEntry>, RepoError> {
    let count = posts.count(filter).await?;
    let window = paginator.window(requested_page, count);

    let items = if window.limit == 0 {
        Vec::new()
    } else {
        posts.list(filter, window.offset, window.limit).await?
    };

    Ok(Page::new(items, window))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{Author, Post};
    use crate::ports::BaseRepository;

    /// Returns `total` synthetic posts and records the windows it was asked for.
    struct FakePosts {
        total: u64,
        calls: Mutex<Vec<(u64, u64)>>,
    }

    #[async_trait]
    impl BaseRepository<Post, i32> for FakePosts {
        async fn find_by_id(&self, _id: i32) -> Result<Option<Post>, RepoError> {
            Ok(None)
        }

        async fn save(&self, entity: Post) -> Result<Post, RepoError> {
            Ok(entity)
        }

        async fn delete(&self, _id: i32) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl PostRepository for FakePosts {
        async fn count(&self, _filter: PostFilter) -> Result<u64, RepoError> {
            Ok(self.total)
        }

        async fn list(
            &self,
            _filter: PostFilter,
            offset: u64,
            limit: u64,
        ) -> Result<Vec<PostEntry>, RepoError> {
            self.calls.lock().unwrap().push((offset, limit));
            let author = Author {
                id: Uuid::new_v4(),
                username: "writer".to_string(),
            };
            Ok((offset..offset + limit)
                .map(|i| PostEntry {
                    post: Post::new(author.id, format!("post {i}"), None),
                    author: author.clone(),
                    group: None,
                })
                .collect())
        }

        async fn find_entry(&self, _id: i32) -> Result<Option<PostEntry>, RepoError> {
            Ok(None)
        }

        async fn update_content(
            &self,
            _id: i32,
            _text: String,
            _group_id: Option<i32>,
        ) -> Result<Post, RepoError> {
            Err(RepoError::NotFound)
        }
    }

    #[tokio::test]
    async fn test_load_feed_requests_clamped_window() {
        let posts = FakePosts {
            total: 13,
            calls: Mutex::new(Vec::new()),
        };

        let page = load_feed(&posts, &Paginator::default(), PostFilter::All, Some("7"))
            .await
            .unwrap();

        assert_eq!(page.number, 2);
        assert_eq!(page.items.len(), 3);
        assert_eq!(*posts.calls.lock().unwrap(), vec![(10, 3)]);
    }

    #[tokio::test]
    async fn test_load_feed_skips_listing_when_empty() {
        let posts = FakePosts {
            total: 0,
            calls: Mutex::new(Vec::new()),
        };

        let page = load_feed(&posts, &Paginator::default(), PostFilter::All, None)
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.num_pages, 1);
        assert!(posts.calls.lock().unwrap().is_empty());
    }
}
