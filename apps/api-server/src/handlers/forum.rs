//! Forum handlers: feeds, post creation, post view, post deletion.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use forum_core::domain::Post;
use forum_shared::ApiResponse;
use forum_shared::dto::{CommentResponse, FeedResponse, PostDetail, PostForm, PostSummary};

use crate::handlers::{feed_location, redirect_with_notice};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Resolve an author's display name. Cascade rules delete a user's posts and
/// comments with the user, so a missing author only happens on a race with an
/// administrative delete.
async fn author_name(state: &AppState, user_id: Uuid) -> AppResult<String> {
    Ok(state
        .users
        .find_by_id(user_id)
        .await?
        .map(|u| u.nickname)
        .unwrap_or_else(|| "unknown".to_string()))
}

async fn summarize(state: &AppState, post: Post) -> AppResult<PostSummary> {
    let author = author_name(state, post.user_id).await?;
    let like_count = state.likes.count_for_post(post.id).await?;
    let comment_count = state.comments.count_for_post(post.id).await?;

    Ok(PostSummary {
        id: post.id,
        title: post.title,
        content: post.content,
        major: post.major,
        author,
        created_at: post.created_at,
        like_count,
        comment_count,
    })
}

async fn build_feed(state: &AppState, major: Option<&str>) -> AppResult<FeedResponse> {
    let posts = state.posts.list_recent(major).await?;

    let mut summaries = Vec::with_capacity(posts.len());
    for post in posts {
        summaries.push(summarize(state, post).await?);
    }

    Ok(FeedResponse {
        major: major.map(|m| m.to_string()),
        posts: summaries,
    })
}

/// GET /main - the global feed, newest first. Requires login.
pub async fn main_feed(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let feed = build_feed(&state, None).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(feed)))
}

/// GET /forum/{major} - one sub-forum's feed.
pub async fn forum_feed(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let major = path.into_inner();
    let feed = build_feed(&state, Some(&major)).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(feed)))
}

async fn create_post_in(
    state: &AppState,
    identity: &Identity,
    form: PostForm,
    major: Option<String>,
) -> AppResult<HttpResponse> {
    let mut errors = Vec::new();
    if form.title.trim().is_empty() {
        errors.push("Title is required.".to_string());
    } else if form.title.chars().count() > 100 {
        errors.push("Title must be 100 characters or fewer.".to_string());
    }
    if form.content.trim().is_empty() {
        errors.push("Content is required.".to_string());
    }
    if major.as_deref().is_some_and(|m| m.chars().count() > 50) {
        errors.push("Sub-forum name must be 50 characters or fewer.".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let post = Post::new(identity.user_id, form.title, form.content, major.clone());
    let post = state.posts.insert(post).await?;

    tracing::debug!(post_id = %post.id, "Post created");

    let location = feed_location(major.as_deref());
    Ok(redirect_with_notice(
        &location,
        ApiResponse::notice("Your post has been created!"),
    ))
}

/// POST /main - create a post on the global feed.
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    create_post_in(&state, &identity, form.into_inner(), None).await
}

/// POST /forum/{major} - create a post scoped to one sub-forum.
pub async fn create_forum_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let major = path.into_inner();
    create_post_in(&state, &identity, form.into_inner(), Some(major)).await
}

/// GET /post/{id} - a single post with its comments, oldest first.
pub async fn view_post(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;

    let author = author_name(&state, post.user_id).await?;
    let like_count = state.likes.count_for_post(post.id).await?;

    let mut comments = Vec::new();
    for comment in state.comments.find_by_post(post.id).await? {
        let author = author_name(&state, comment.user_id).await?;
        comments.push(CommentResponse {
            id: comment.id,
            content: comment.content,
            author,
            created_at: comment.created_at,
        });
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostDetail {
        id: post.id,
        title: post.title,
        content: post.content,
        major: post.major,
        author,
        created_at: post.created_at,
        like_count,
        comments,
    })))
}

/// POST /post/{id}/delete - author-only; cascades to comments and likes.
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;

    if post.user_id != identity.user_id {
        return Err(AppError::Forbidden);
    }

    state.posts.delete(post.id).await?;

    tracing::debug!(post_id = %post.id, "Post deleted");

    Ok(redirect_with_notice(
        "/main",
        ApiResponse::notice("Your post has been deleted!"),
    ))
}
