//! Account handlers: registration, login, logout.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpResponse, http::header, web};

use forum_core::domain::User;
use forum_core::error::RepoError;
use forum_shared::dto::{FormView, LoginForm, NextQuery, RegisterForm, SessionResponse};
use forum_shared::ApiResponse;

use crate::handlers::{redirect, redirect_with_notice};
use crate::middleware::auth::{OptionalIdentity, SESSION_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /register - the registration form. Logged-in users are bounced to
/// the feed.
pub async fn register_form(identity: OptionalIdentity) -> HttpResponse {
    if identity.0.is_some() {
        return redirect("/main");
    }

    HttpResponse::Ok().json(ApiResponse::ok(FormView::new(
        "/register",
        &["username", "email", "password", "confirm_password"],
    )))
}

/// POST /register
///
/// Collects every validation failure before reporting, so the form can show
/// them all at once. Nothing is written unless the whole form is valid.
pub async fn register(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    form: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    if identity.0.is_some() {
        return Ok(redirect("/main"));
    }

    let form = form.into_inner();
    let mut errors = Vec::new();

    // Length caps mirror the varchar widths in the schema.
    if form.username.trim().is_empty() {
        errors.push("Username is required.".to_string());
    } else if form.username.trim().chars().count() > 20 {
        errors.push("Username must be 20 characters or fewer.".to_string());
    }
    if form.email.trim().is_empty() {
        errors.push("Email is required.".to_string());
    } else if !form.email.contains('@') {
        errors.push("Invalid email address.".to_string());
    } else if form.email.trim().chars().count() > 120 {
        errors.push("Email must be 120 characters or fewer.".to_string());
    } else if !form.email.ends_with(&state.allowed_email_domain) {
        errors.push(format!(
            "Registration is only allowed with an @{} email.",
            state.allowed_email_domain
        ));
    }
    if form.password.is_empty() {
        errors.push("Password is required.".to_string());
    }
    if form.password != form.confirm_password {
        errors.push("Passwords do not match.".to_string());
    }

    if !form.username.trim().is_empty()
        && state.users.find_by_username(form.username.trim()).await?.is_some()
    {
        errors.push("That username is taken. Please choose a different one.".to_string());
    }
    if form.email.contains('@') && state.users.find_by_email(form.email.trim()).await?.is_some() {
        errors.push("That email is taken. Please choose a different one.".to_string());
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let password_hash = state.passwords.hash(&form.password)?;
    let user = User::new(
        form.username.trim().to_string(),
        form.email.trim().to_string(),
        password_hash,
    );

    // The unique indexes on username and email back up the checks above
    // against concurrent duplicate registrations.
    state.users.insert(user).await.map_err(|e| match e {
        RepoError::Constraint(_) => {
            AppError::Conflict("That username or email is already taken.".to_string())
        }
        other => other.into(),
    })?;

    Ok(redirect_with_notice(
        "/login",
        ApiResponse::notice("Your account has been created! You can now log in."),
    ))
}

/// GET /login
pub async fn login_form(identity: OptionalIdentity) -> HttpResponse {
    if identity.0.is_some() {
        return redirect("/main");
    }

    HttpResponse::Ok().json(ApiResponse::ok(FormView::new(
        "/login",
        &["email", "password", "remember"],
    )))
}

/// POST /login?next=
///
/// Unknown email and wrong password produce the same notice, so callers
/// cannot probe which addresses are registered.
pub async fn login(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    if identity.0.is_some() {
        return Ok(redirect("/main"));
    }

    let form = form.into_inner();

    let user = state.users.find_by_email(form.email.trim()).await?;
    let verified = match &user {
        Some(user) => state.passwords.verify(&form.password, &user.password_hash)?,
        None => false,
    };

    let Some(user) = user.filter(|_| verified) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::failure_notice(
            "Login Unsuccessful. Please check email and password.",
        )));
    };

    let token = state.tokens.issue_token(user.id, &user.email, form.remember)?;
    let expires_in = state.tokens.expiration_seconds(form.remember);

    let cookie = Cookie::build(SESSION_COOKIE, token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(expires_in))
        .finish();

    let location = sanitize_next(query.into_inner().next.as_deref());

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(cookie)
        .json(ApiResponse::ok(SessionResponse {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: expires_in as u64,
        })))
}

/// GET /logout - clears the session cookie and returns to the landing page.
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.set_max_age(Duration::ZERO);

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(cookie)
        .finish()
}

/// Only local paths are valid post-login targets; anything else (absolute
/// URLs, protocol-relative `//host` forms) falls back to the main feed.
fn sanitize_next(next: Option<&str>) -> String {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") => next.to_string(),
        _ => "/main".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_next;

    #[test]
    fn next_must_be_a_local_path() {
        assert_eq!(sanitize_next(Some("/post/abc")), "/post/abc");
        assert_eq!(sanitize_next(Some("https://evil.example")), "/main");
        assert_eq!(sanitize_next(Some("//evil.example")), "/main");
        assert_eq!(sanitize_next(None), "/main");
    }
}
