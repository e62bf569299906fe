//! Builders turning domain values into response documents.

use actix_web::{HttpResponse, http::header};

use yatube_core::domain::{Author, Group, PostEntry};
use yatube_core::forms::{FormErrors, PostFormInput};
use yatube_core::pagination::Page;
use yatube_shared::dto::{
    AuthorResponse, Choice, ChoiceField, FormResponse, GroupResponse, PageResponse,
    PostFormFields, PostResponse, TextField,
};

/// Label of the empty "no group" choice.
const EMPTY_CHOICE_LABEL: &str = "---------";

pub fn author(author: &Author) -> AuthorResponse {
    AuthorResponse {
        username: author.username.clone(),
    }
}

pub fn group(group: &Group) -> GroupResponse {
    GroupResponse {
        id: group.id,
        title: group.title.clone(),
        slug: group.slug.clone(),
        description: group.description.clone(),
    }
}

pub fn post(entry: &PostEntry) -> PostResponse {
    PostResponse {
        id: entry.post.id,
        text: entry.post.text.clone(),
        pub_date: entry.post.pub_date,
        author: author(&entry.author),
        group: entry.group.as_ref().map(group),
    }
}

pub fn page(page: Page<PostEntry>) -> PageResponse<PostResponse> {
    let has_next = page.has_next();
    let has_previous = page.has_previous();
    let page = page.map(|entry| post(&entry));

    PageResponse {
        items: page.items,
        number: page.number,
        num_pages: page.num_pages,
        count: page.count,
        has_next,
        has_previous,
    }
}

/// The post form with its current values, group choices and any errors.
pub fn post_form(input: &PostFormInput, groups: &[Group], errors: FormErrors) -> FormResponse {
    let mut choices = vec![Choice {
        value: String::new(),
        label: EMPTY_CHOICE_LABEL.to_string(),
    }];
    choices.extend(groups.iter().map(|g| Choice {
        value: g.id.to_string(),
        label: g.title.clone(),
    }));

    FormResponse {
        fields: PostFormFields {
            text: TextField {
                label: "Text".to_string(),
                help_text: "Enter the text of the post".to_string(),
                required: true,
                value: input.text.clone().unwrap_or_default(),
            },
            group: ChoiceField {
                label: "Group".to_string(),
                help_text: "Choose the group the post belongs to".to_string(),
                required: false,
                value: input.group.clone().filter(|g| !g.is_empty()),
                choices,
            },
        },
        errors: errors.into_inner(),
    }
}

/// `302 Found` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn profile_url(username: &str) -> String {
    format!("/profile/{}/", username)
}

pub fn post_detail_url(post_id: i32) -> String {
    format!("/posts/{}/", post_id)
}
