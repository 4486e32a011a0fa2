//! Identity extraction for guarded routes.
//!
//! The session token is looked for in the `Authorization: Bearer` header
//! first (API clients), then in the `session` cookie set at login (browsers).
//! Unauthenticated callers of a guarded route are not given a bare 401: they
//! are redirected to the login page with the original target preserved in the
//! `next` query parameter, so login can send them back where they were going.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::StatusCode, http::header};
use std::future::{Ready, ready};

use crate::state::AppState;

/// Name of the session cookie set at login.
pub const SESSION_COOKIE: &str = "session";

/// Authenticated user identity extractor.
///
/// Use this in handlers to require login:
/// ```ignore
/// async fn guarded(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub email: String,
}

/// Rejection for unauthenticated access: a 303 redirect to the login page
/// carrying the originally requested path.
#[derive(Debug)]
pub struct LoginRedirect {
    next: String,
}

impl LoginRedirect {
    fn for_request(req: &HttpRequest) -> Self {
        let next = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| req.path().to_string());
        Self { next }
    }

    /// The login URL with the original target preserved.
    pub fn location(&self) -> String {
        format!("/login?next={}", urlencoding::encode(&self.next))
    }
}

impl std::fmt::Display for LoginRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unauthenticated, redirecting to {}", self.location())
    }
}

impl actix_web::ResponseError for LoginRedirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::SeeOther()
            .insert_header((header::LOCATION, self.location()))
            .json(forum_shared::ApiResponse::failure_notice(
                "Please log in to access this page.",
            ))
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let auth_str = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    auth_str.strip_prefix("Bearer ").map(|t| t.to_string())
}

fn cookie_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE).map(|c| c.value().to_string())
}

impl FromRequest for Identity {
    type Error = LoginRedirect;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<actix_web::web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(LoginRedirect::for_request(req)));
        };

        let Some(token) = bearer_token(req).or_else(|| cookie_token(req)) else {
            return ready(Err(LoginRedirect::for_request(req)));
        };

        match state.tokens.validate_token(&token) {
            Ok(claims) => ready(Ok(Identity {
                user_id: claims.user_id,
                email: claims.email,
            })),
            Err(e) => {
                tracing::debug!("Rejected session token: {}", e);
                ready(Err(LoginRedirect::for_request(req)))
            }
        }
    }
}

/// Optional identity extractor - does not fail when unauthenticated.
/// Used by anonymous-only pages to bounce logged-in users to the feed.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        match Identity::from_request(req, payload).into_inner() {
            Ok(identity) => ready(Ok(OptionalIdentity(Some(identity)))),
            Err(_) => ready(Ok(OptionalIdentity(None))),
        }
    }
}
