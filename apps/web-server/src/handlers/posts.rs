//! Post feeds, detail page and the create/edit views.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use yatube_core::DomainError;
use yatube_core::domain::{Post, PostEntry, PostFilter, User};
use yatube_core::feed::load_feed;
use yatube_core::forms::{FormErrors, PostFormInput};
use yatube_core::ports::BaseRepository;
use yatube_shared::dto::{
    FormResponse, GroupFeedResponse, IndexResponse, PostDetailResponse, PostFormResponse,
    ProfileResponse,
};

use super::context;
use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// `?page=` query. Kept as a string so that junk values fall back to page 1.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = load_feed(
        state.posts.as_ref(),
        &state.paginator,
        PostFilter::All,
        query.page.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(IndexResponse {
        page_obj: context::page(page),
    }))
}

/// GET /group/{slug}/
pub async fn group_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| DomainError::not_found("Group", &slug))?;

    let page = load_feed(
        state.posts.as_ref(),
        &state.paginator,
        PostFilter::Group(group.id),
        query.page.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(GroupFeedResponse {
        group: context::group(&group),
        page_obj: context::page(page),
    }))
}

/// GET /profile/{username}/
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| DomainError::not_found("User", &username))?;

    let page = load_feed(
        state.posts.as_ref(),
        &state.paginator,
        PostFilter::Author(user.id),
        query.page.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        author: context::author(&(&user).into()),
        posts_count: page.count,
        page_obj: context::page(page),
    }))
}

async fn find_entry(state: &AppState, post_id: i32) -> AppResult<PostEntry> {
    state
        .posts
        .find_entry(post_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", post_id).into())
}

/// GET /posts/{post_id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let entry = find_entry(&state, path.into_inner()).await?;
    let posts_count = state
        .posts
        .count(PostFilter::Author(entry.author.id))
        .await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: context::post(&entry),
        posts_count,
    }))
}

fn form_page(post_id: Option<i32>, form: FormResponse) -> PostFormResponse {
    PostFormResponse {
        is_edit: post_id.is_some(),
        post_id,
        form,
    }
}

/// Re-render a rejected submission with its messages. Nothing was stored.
fn invalid_form(post_id: Option<i32>, form: FormResponse) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(form_page(post_id, form))
}

/// GET /create/
pub async fn post_create_form(
    _user: CurrentUser,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let groups = state.groups.list_all().await?;
    let form = context::post_form(&PostFormInput::default(), &groups, FormErrors::default());

    Ok(HttpResponse::Ok().json(form_page(None, form)))
}

/// POST /create/
///
/// An unreadable body is treated like an empty submission.
pub async fn post_create(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    form: Option<web::Form<PostFormInput>>,
) -> AppResult<HttpResponse> {
    let input = form.map(web::Form::into_inner).unwrap_or_default();
    let groups = state.groups.list_all().await?;

    let cleaned = match input.validate(&groups) {
        Ok(cleaned) => cleaned,
        Err(errors) => {
            tracing::debug!(author = %user.username, "Rejected post submission");
            return Ok(invalid_form(None, context::post_form(&input, &groups, errors)));
        }
    };

    let post = state
        .posts
        .save(Post::new(user.id, cleaned.text, cleaned.group_id))
        .await?;
    tracing::info!(
        post_id = post.id,
        post = %post,
        author = %user.username,
        "Post created"
    );

    Ok(context::redirect(&context::profile_url(&user.username)))
}

/// Load a post for editing, or the redirect a non-author gets instead.
async fn editable_post(
    state: &AppState,
    user: &User,
    post_id: i32,
) -> AppResult<Result<Post, HttpResponse>> {
    let post = find_entry(state, post_id).await?.post;

    if !post.is_authored_by(user.id) {
        tracing::debug!(post_id, user = %user.username, "Edit attempt by non-author");
        return Ok(Err(context::redirect(&context::post_detail_url(post_id))));
    }

    Ok(Ok(post))
}

/// GET /posts/{post_id}/edit/
pub async fn post_edit_form(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = match editable_post(&state, &user, post_id).await? {
        Ok(post) => post,
        Err(redirect) => return Ok(redirect),
    };

    let groups = state.groups.list_all().await?;
    let form = context::post_form(
        &PostFormInput::from_post(&post),
        &groups,
        FormErrors::default(),
    );

    Ok(HttpResponse::Ok().json(form_page(Some(post_id), form)))
}

/// POST /posts/{post_id}/edit/
pub async fn post_edit(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: Option<web::Form<PostFormInput>>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    if let Err(redirect) = editable_post(&state, &user, post_id).await? {
        return Ok(redirect);
    }

    let input = form.map(web::Form::into_inner).unwrap_or_default();
    let groups = state.groups.list_all().await?;

    let cleaned = match input.validate(&groups) {
        Ok(cleaned) => cleaned,
        Err(errors) => {
            return Ok(invalid_form(
                Some(post_id),
                context::post_form(&input, &groups, errors),
            ));
        }
    };

    let post = state
        .posts
        .update_content(post_id, cleaned.text, cleaned.group_id)
        .await?;
    tracing::info!(post_id, post = %post, author = %user.username, "Post updated");

    Ok(context::redirect(&context::post_detail_url(post_id)))
}
