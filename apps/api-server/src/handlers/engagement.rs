//! Engagement handlers: like toggling, comments.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use forum_core::domain::{Comment, Like};
use forum_core::error::RepoError;
use forum_shared::ApiResponse;
use forum_shared::dto::{CommentForm, MajorQuery};

use crate::handlers::{feed_location, redirect_with_notice};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

async fn require_post(state: &AppState, post_id: Uuid) -> AppResult<()> {
    state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;
    Ok(())
}

/// POST /like_post/{id}?major=
///
/// Flips the like state for (caller, post). The unique index on
/// (user_id, post_id) makes this safe under concurrent duplicate requests:
/// if two toggles race past the lookup, the second insert fails the index
/// and is reported as "already liked" instead of creating a second row.
pub async fn toggle_like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    query: web::Query<MajorQuery>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let major = query.into_inner().major;

    require_post(&state, post_id).await?;

    let notice = match state
        .likes
        .find_by_user_and_post(identity.user_id, post_id)
        .await?
    {
        Some(like) => {
            // A concurrent unlike may have removed the row already; that
            // leaves the same end state, so NotFound is fine here.
            match state.likes.delete(like.id).await {
                Ok(()) | Err(RepoError::NotFound) => {}
                Err(e) => return Err(e.into()),
            }
            "Post unliked!"
        }
        None => match state.likes.insert(Like::new(identity.user_id, post_id)).await {
            Ok(_) => "Post liked!",
            Err(RepoError::Constraint(_)) => "Post liked!",
            Err(e) => return Err(e.into()),
        },
    };

    Ok(redirect_with_notice(
        &feed_location(major.as_deref()),
        ApiResponse::notice(notice),
    ))
}

/// POST /post/{id}/comment?major=
///
/// A blank comment writes nothing and reports a failure notice, but the
/// redirect back to the feed still happens.
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    query: web::Query<MajorQuery>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let major = query.into_inner().major;
    let location = feed_location(major.as_deref());

    require_post(&state, post_id).await?;

    let content = form.into_inner().content;
    if content.trim().is_empty() {
        return Ok(redirect_with_notice(
            &location,
            ApiResponse::failure_notice("There was an error with your comment."),
        ));
    }

    state
        .comments
        .insert(Comment::new(identity.user_id, post_id, content))
        .await?;

    Ok(redirect_with_notice(
        &location,
        ApiResponse::notice("Your comment has been added!"),
    ))
}

/// POST /comment/{id}/delete?major= - author-only.
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    query: web::Query<MajorQuery>,
) -> AppResult<HttpResponse> {
    let comment_id = path.into_inner();
    let major = query.into_inner().major;

    let comment = state
        .comments
        .find_by_id(comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))?;

    if comment.user_id != identity.user_id {
        return Err(AppError::Forbidden);
    }

    state.comments.delete(comment.id).await?;

    Ok(redirect_with_notice(
        &feed_location(major.as_deref()),
        ApiResponse::notice("Your comment has been deleted!"),
    ))
}
