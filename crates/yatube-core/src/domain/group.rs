use serde::{Deserialize, Serialize};

/// Group entity - a named category posts may optionally belong to.
///
/// Groups are created administratively and looked up publicly by `slug`,
/// which is unique across all groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Store-assigned identifier, `0` until first saved.
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
}

impl Group {
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            slug: slug.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
