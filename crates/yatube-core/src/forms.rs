//! Post form validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Group, Post};

pub const FIELD_TEXT: &str = "text";
pub const FIELD_GROUP: &str = "group";

const REQUIRED: &str = "This field is required.";
const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";

/// Raw values submitted through the create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFormInput {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

impl PostFormInput {
    /// Initial values for editing an existing post.
    pub fn from_post(post: &Post) -> Self {
        Self {
            text: Some(post.text.clone()),
            group: post.group_id.map(|id| id.to_string()),
        }
    }

    /// Validate against the currently available groups.
    pub fn validate(&self, groups: &[Group]) -> Result<PostForm, FormErrors> {
        let mut errors = FormErrors::default();

        let text = self.text.as_deref().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            errors.add(FIELD_TEXT, REQUIRED);
        }

        let group_id = match self.group.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<i32>() {
                Ok(id) if groups.iter().any(|g| g.id == id) => Some(id),
                _ => {
                    errors.add(FIELD_GROUP, INVALID_CHOICE);
                    None
                }
            },
        };

        if errors.is_empty() {
            Ok(PostForm {
                text: text.to_string(),
                group_id,
            })
        } else {
            Err(errors)
        }
    }
}

/// Cleaned form data, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    pub text: String,
    pub group_id: Option<i32>,
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<Group> {
        vec![Group {
            id: 7,
            title: "Rust".to_string(),
            slug: "rust".to_string(),
            description: None,
        }]
    }

    fn input(text: Option<&str>, group: Option<&str>) -> PostFormInput {
        PostFormInput {
            text: text.map(String::from),
            group: group.map(String::from),
        }
    }

    #[test]
    fn test_valid_with_and_without_group() {
        let form = input(Some("  hello  "), Some("7")).validate(&groups()).unwrap();
        assert_eq!(form.text, "hello");
        assert_eq!(form.group_id, Some(7));

        let form = input(Some("hello"), Some("")).validate(&groups()).unwrap();
        assert_eq!(form.group_id, None);

        let form = input(Some("hello"), None).validate(&groups()).unwrap();
        assert_eq!(form.group_id, None);
    }

    #[test]
    fn test_text_is_required() {
        for text in [None, Some(""), Some("   \n")] {
            let errors = input(text, None).validate(&groups()).unwrap_err().into_inner();
            assert_eq!(errors[FIELD_TEXT], [REQUIRED]);
            assert!(!errors.contains_key(FIELD_GROUP));
        }
    }

    #[test]
    fn test_unknown_group_is_rejected() {
        for group in ["8", "rust", "-1"] {
            let errors = input(Some("hello"), Some(group))
                .validate(&groups())
                .unwrap_err()
                .into_inner();
            assert_eq!(errors[FIELD_GROUP], [INVALID_CHOICE]);
        }
    }

    #[test]
    fn test_initial_values_from_post() {
        let mut post = Post::new(uuid::Uuid::new_v4(), "body".to_string(), Some(7));
        assert_eq!(PostFormInput::from_post(&post), input(Some("body"), Some("7")));

        post.group_id = None;
        assert_eq!(PostFormInput::from_post(&post).group, None);
    }
}
