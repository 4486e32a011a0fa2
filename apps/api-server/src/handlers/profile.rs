//! Profile handler: view and update the display nickname.
//!
//! The login `username` is unique and immutable; the nickname is a separate
//! non-unique column and is the only editable field here.

use actix_web::{HttpResponse, web};

use forum_shared::ApiResponse;
use forum_shared::dto::{ProfileForm, ProfileResponse};

use crate::handlers::redirect_with_notice;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /profile - the current user's profile with the nickname pre-filled.
pub async fn view_profile(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", identity.user_id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProfileResponse {
        username: user.username,
        nickname: user.nickname,
        email: user.email,
    })))
}

/// POST /profile - rename the display nickname.
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<ProfileForm>,
) -> AppResult<HttpResponse> {
    let nickname = form.into_inner().nickname;
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(AppError::Validation(vec!["Nickname is required.".to_string()]));
    }
    if nickname.chars().count() > 20 {
        return Err(AppError::Validation(vec![
            "Nickname must be 20 characters or fewer.".to_string(),
        ]));
    }

    state.users.update_nickname(identity.user_id, nickname).await?;

    Ok(redirect_with_notice(
        "/profile",
        ApiResponse::notice("Your profile has been updated!"),
    ))
}
