//! Data Transfer Objects - request/response types for the HTTP surface.
//!
//! Page responses mirror the context a template would receive: feeds expose
//! `page_obj`, the detail view exposes `post`, the create/edit views expose
//! `form`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// GET /auth/login/ - what the login entry point accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPageResponse {
    /// Where to go once a token has been obtained.
    pub next: Option<String>,
    pub fields: Vec<String>,
}

/// GET /auth/me/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author: AuthorResponse,
    pub group: Option<GroupResponse>,
}

/// One page of a feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// GET /
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub page_obj: PageResponse<PostResponse>,
}

/// GET /group/{slug}/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupFeedResponse {
    pub group: GroupResponse,
    pub page_obj: PageResponse<PostResponse>,
}

/// GET /profile/{username}/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub author: AuthorResponse,
    pub posts_count: u64,
    pub page_obj: PageResponse<PostResponse>,
}

/// GET /posts/{post_id}/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    /// Total number of posts by the same author.
    pub posts_count: u64,
}

/// Create and edit views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormResponse {
    pub is_edit: bool,
    pub post_id: Option<i32>,
    pub form: FormResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormResponse {
    pub fields: PostFormFields,
    /// Validation messages keyed by field name. Empty for an unbound form.
    pub errors: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormFields {
    pub text: TextField,
    pub group: ChoiceField,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextField {
    pub label: String,
    pub help_text: String,
    pub required: bool,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceField {
    pub label: String,
    pub help_text: String,
    pub required: bool,
    pub value: Option<String>,
    /// The first choice is always the empty "no group" option.
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// Static informational pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPageResponse {
    pub title: String,
    pub body: String,
}
