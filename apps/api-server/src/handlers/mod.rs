//! HTTP handlers and route configuration.

mod auth;
mod engagement;
mod forum;
mod pages;
mod profile;

use actix_web::{HttpResponse, http::header, web};
use forum_shared::ApiResponse;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::landing))
        .route("/health", web::get().to(pages::health_check))
        // Account routes (anonymous only)
        .route("/register", web::get().to(auth::register_form))
        .route("/register", web::post().to(auth::register))
        .route("/login", web::get().to(auth::login_form))
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::get().to(auth::logout))
        // Feeds
        .route("/main", web::get().to(forum::main_feed))
        .route("/main", web::post().to(forum::create_post))
        .route("/forum/{major}", web::get().to(forum::forum_feed))
        .route("/forum/{major}", web::post().to(forum::create_forum_post))
        // Posts
        .route("/post/{id}", web::get().to(forum::view_post))
        .route("/post/{id}/delete", web::post().to(forum::delete_post))
        // Engagement
        .route("/like_post/{id}", web::post().to(engagement::toggle_like))
        .route("/post/{id}/comment", web::post().to(engagement::add_comment))
        .route(
            "/comment/{id}/delete",
            web::post().to(engagement::delete_comment),
        )
        // Profile
        .route("/profile", web::get().to(profile::view_profile))
        .route("/profile", web::post().to(profile::update_profile));
}

/// A bare 303 redirect.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// A 303 redirect whose body carries the transient status notice a
/// server-rendered frontend would flash after following it.
pub(crate) fn redirect_with_notice(location: &str, body: ApiResponse<()>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .json(body)
}

/// Redirect target after an engagement action: the sub-forum the caller was
/// viewing if any, else the main feed.
pub(crate) fn feed_location(major: Option<&str>) -> String {
    match major {
        Some(major) => format!("/forum/{}", urlencoding::encode(major)),
        None => "/main".to_string(),
    }
}
