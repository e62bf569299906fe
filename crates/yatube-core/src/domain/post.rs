use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Author, Group};

/// Number of characters of `text` used as the post's short label.
const LABEL_CHARS: usize = 15;

/// Post entity - a single authored text entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned identifier, `0` until first saved.
    pub id: i32,
    pub text: String,
    /// Set once at creation.
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub group_id: Option<i32>,
}

impl Post {
    /// Create a new, unsaved post.
    pub fn new(author_id: Uuid, text: String, group_id: Option<i32>) -> Self {
        Self {
            id: 0,
            text,
            pub_date: Utc::now(),
            author_id,
            group_id,
        }
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }
}

/// A post reads as the first characters of its text.
impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label: String = self.text.chars().take(LABEL_CHARS).collect();
        f.write_str(&label)
    }
}

/// A post together with its resolved author and group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEntry {
    pub post: Post,
    pub author: Author,
    pub group: Option<Group>,
}

/// Which posts a feed shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Group(i32),
    Author(Uuid),
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            PostFilter::All => true,
            PostFilter::Group(id) => post.group_id == Some(*id),
            PostFilter::Author(id) => post.author_id == *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_truncates_on_char_boundary() {
        let post = Post::new(Uuid::new_v4(), "Тестовый пост про Rust".to_string(), None);
        assert_eq!(post.to_string(), "Тестовый пост п");

        let short = Post::new(Uuid::new_v4(), "hi".to_string(), None);
        assert_eq!(short.to_string(), "hi");
    }

    #[test]
    fn filter_matches_group_and_author() {
        let author = Uuid::new_v4();
        let post = Post::new(author, "text".to_string(), Some(3));

        assert!(PostFilter::All.matches(&post));
        assert!(PostFilter::Group(3).matches(&post));
        assert!(!PostFilter::Group(4).matches(&post));
        assert!(PostFilter::Author(author).matches(&post));
        assert!(!PostFilter::Author(Uuid::new_v4()).matches(&post));
    }
}
