//! HTTP surface tests.
//!
//! Handlers run against in-memory repository doubles that mirror the schema
//! rules (unique username/email, unique (user, post) like pair, cascade
//! deletes), with the real Argon2 and JWT services behind them.

use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{App, test, web};
use async_trait::async_trait;
use uuid::Uuid;

use forum_core::domain::{Comment, Like, Post, User};
use forum_core::error::RepoError;
use forum_core::ports::{
    BaseRepository, CommentRepository, LikeRepository, PostRepository, UserRepository,
};
use forum_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};
use forum_shared::ApiResponse;
use forum_shared::dto::{FeedResponse, SessionResponse};

use crate::handlers::configure_routes;
use crate::state::AppState;

#[derive(Default)]
struct Store {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
}

/// One in-memory repository serving all four entity traits.
#[derive(Clone, Default)]
struct MemRepo {
    store: Arc<Mutex<Store>>,
}

#[async_trait]
impl BaseRepository<User, Uuid> for MemRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.lock().unwrap();
        if store
            .users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(RepoError::Constraint("users unique index".to_string()));
        }
        store.users.push(user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.lock().unwrap();
        let before = store.users.len();
        store.users.retain(|u| u.id != id);
        if store.users.len() == before {
            return Err(RepoError::NotFound);
        }
        let owned: Vec<Uuid> = store
            .posts
            .iter()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();
        store.posts.retain(|p| p.user_id != id);
        store
            .comments
            .retain(|c| c.user_id != id && !owned.contains(&c.post_id));
        store
            .likes
            .retain(|l| l.user_id != id && !owned.contains(&l.post_id));
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.username == username).cloned())
    }

    async fn update_nickname(&self, id: Uuid, nickname: &str) -> Result<User, RepoError> {
        let mut store = self.store.lock().unwrap();
        let user = store
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RepoError::NotFound)?;
        user.nickname = nickname.to_string();
        Ok(user.clone())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for MemRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.store.lock().unwrap().posts.push(post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.lock().unwrap();
        let before = store.posts.len();
        store.posts.retain(|p| p.id != id);
        if store.posts.len() == before {
            return Err(RepoError::NotFound);
        }
        // FK cascade
        store.comments.retain(|c| c.post_id != id);
        store.likes.retain(|l| l.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemRepo {
    async fn list_recent(&self, major: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let store = self.store.lock().unwrap();
        let mut posts: Vec<Post> = store
            .posts
            .iter()
            .filter(|p| major.is_none() || p.major.as_deref() == major)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for MemRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.store.lock().unwrap().comments.push(comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.lock().unwrap();
        let before = store.comments.len();
        store.comments.retain(|c| c.id != id);
        if store.comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemRepo {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let store = self.store.lock().unwrap();
        let mut comments: Vec<Comment> = store
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store.comments.iter().filter(|c| c.post_id == post_id).count() as u64)
    }
}

#[async_trait]
impl BaseRepository<Like, Uuid> for MemRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Like>, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store.likes.iter().find(|l| l.id == id).cloned())
    }

    async fn insert(&self, like: Like) -> Result<Like, RepoError> {
        let mut store = self.store.lock().unwrap();
        if store
            .likes
            .iter()
            .any(|l| l.user_id == like.user_id && l.post_id == like.post_id)
        {
            return Err(RepoError::Constraint("idx_likes_user_post".to_string()));
        }
        store.likes.push(like.clone());
        Ok(like)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.lock().unwrap();
        let before = store.likes.len();
        store.likes.retain(|l| l.id != id);
        if store.likes.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for MemRepo {
    async fn find_by_user_and_post(
        &self,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Like>, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .likes
            .iter()
            .find(|l| l.user_id == user_id && l.post_id == post_id)
            .cloned())
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store.likes.iter().filter(|l| l.post_id == post_id).count() as u64)
    }
}

/// Like repository whose pair lookup always misses, as when a concurrent
/// like lands between the handler's lookup and its insert. Everything else
/// delegates to the shared store.
struct StaleLookupLikes(MemRepo);

#[async_trait]
impl BaseRepository<Like, Uuid> for StaleLookupLikes {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Like>, RepoError> {
        BaseRepository::<Like, Uuid>::find_by_id(&self.0, id).await
    }

    async fn insert(&self, like: Like) -> Result<Like, RepoError> {
        BaseRepository::<Like, Uuid>::insert(&self.0, like).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        BaseRepository::<Like, Uuid>::delete(&self.0, id).await
    }
}

#[async_trait]
impl LikeRepository for StaleLookupLikes {
    async fn find_by_user_and_post(
        &self,
        _user_id: Uuid,
        _post_id: Uuid,
    ) -> Result<Option<Like>, RepoError> {
        Ok(None)
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        LikeRepository::count_for_post(&self.0, post_id).await
    }
}

struct Harness {
    state: AppState,
    repo: MemRepo,
}

fn harness() -> Harness {
    let repo = MemRepo::default();
    let state = AppState {
        users: Arc::new(repo.clone()),
        posts: Arc::new(repo.clone()),
        comments: Arc::new(repo.clone()),
        likes: Arc::new(repo.clone()),
        passwords: Arc::new(Argon2PasswordService::new()),
        tokens: Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            ..JwtConfig::default()
        })),
        allowed_email_domain: "u.rochester.edu".to_string(),
    };
    Harness { state, repo }
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

/// Register directly against the state, bypassing the HTTP form.
async fn seed_user(state: &AppState, username: &str, email: &str, password: &str) -> User {
    let hash = state.passwords.hash(password).unwrap();
    let user = User::new(username.to_string(), email.to_string(), hash);
    state.users.insert(user).await.unwrap()
}

fn bearer(state: &AppState, user: &User) -> (header::HeaderName, String) {
    let token = state.tokens.issue_token(user.id, &user.email, false).unwrap();
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[actix_web::test]
async fn register_login_post_like_unlike_round_trip() {
    let h = harness();
    let app = test_app!(h.state);

    // Register
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_form([
                ("username", "alice"),
                ("email", "alice@u.rochester.edu"),
                ("password", "secret1"),
                ("confirm_password", "secret1"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    // The stored hash verifies but never equals the plaintext
    let stored = h.state.users.find_by_email("alice@u.rochester.edu").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "secret1");
    assert!(h.state.passwords.verify("secret1", &stored.password_hash).unwrap());

    // Login
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("email", "alice@u.rochester.edu"), ("password", "secret1")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/main");
    let body: ApiResponse<SessionResponse> = test::read_body_json(resp).await;
    let token = body.data.unwrap().access_token;
    let auth = (header::AUTHORIZATION, format!("Bearer {}", token));

    // Create a post
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/main")
            .insert_header(auth.clone())
            .set_form([("title", "Hello"), ("content", "World")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    // It shows up at the top of the feed
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/main")
            .insert_header(auth.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ApiResponse<FeedResponse> = test::read_body_json(resp).await;
    let feed = body.data.unwrap();
    assert_eq!(feed.posts[0].title, "Hello");
    assert_eq!(feed.posts[0].like_count, 0);
    let post_id = feed.posts[0].id;

    // Like, then unlike
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/like_post/{}", post_id))
            .insert_header(auth.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let body: ApiResponse<()> = test::read_body_json(resp).await;
    assert_eq!(body.message.as_deref(), Some("Post liked!"));
    assert_eq!(h.state.likes.count_for_post(post_id).await.unwrap(), 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/like_post/{}", post_id))
            .insert_header(auth)
            .to_request(),
    )
    .await;
    let body: ApiResponse<()> = test::read_body_json(resp).await;
    assert_eq!(body.message.as_deref(), Some("Post unliked!"));
    assert_eq!(h.state.likes.count_for_post(post_id).await.unwrap(), 0);
}

#[actix_web::test]
async fn registration_validation_rejects_without_writing() {
    let h = harness();
    seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let app = test_app!(h.state);

    let cases: &[[(&str, &str); 4]] = &[
        // duplicate username
        [
            ("username", "alice"),
            ("email", "other@u.rochester.edu"),
            ("password", "pw"),
            ("confirm_password", "pw"),
        ],
        // duplicate email
        [
            ("username", "bob"),
            ("email", "alice@u.rochester.edu"),
            ("password", "pw"),
            ("confirm_password", "pw"),
        ],
        // wrong email domain
        [
            ("username", "carol"),
            ("email", "carol@gmail.com"),
            ("password", "pw"),
            ("confirm_password", "pw"),
        ],
        // password mismatch
        [
            ("username", "dave"),
            ("email", "dave@u.rochester.edu"),
            ("password", "pw"),
            ("confirm_password", "other"),
        ],
        // username over the 20-character column width
        [
            ("username", "a-username-longer-than-twenty"),
            ("email", "long@u.rochester.edu"),
            ("password", "pw"),
            ("confirm_password", "pw"),
        ],
    ];

    for form in cases {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form(form)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    assert_eq!(h.repo.store.lock().unwrap().users.len(), 1);
}

#[actix_web::test]
async fn guarded_route_redirects_to_login_with_next() {
    let h = harness();
    let app = test_app!(h.state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/main").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login?next=%2Fmain");
}

#[actix_web::test]
async fn bad_credentials_get_generic_notice() {
    let h = harness();
    seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let app = test_app!(h.state);

    for (email, password) in [
        ("alice@u.rochester.edu", "wrong"),
        ("nobody@u.rochester.edu", "secret1"),
    ] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form([("email", email), ("password", password)])
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: ApiResponse<()> = test::read_body_json(resp).await;
        assert_eq!(
            body.message.as_deref(),
            Some("Login Unsuccessful. Please check email and password.")
        );
    }
}

#[actix_web::test]
async fn blank_comment_writes_nothing_but_still_redirects() {
    let h = harness();
    let alice = seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let post = h
        .state
        .posts
        .insert(Post::new(alice.id, "Hello".into(), "World".into(), None))
        .await
        .unwrap();
    let app = test_app!(h.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/post/{}/comment", post.id))
            .insert_header(bearer(&h.state, &alice))
            .set_form([("content", "   ")])
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/main");
    let body: ApiResponse<()> = test::read_body_json(resp).await;
    assert!(!body.success);
    assert!(h.repo.store.lock().unwrap().comments.is_empty());
}

#[actix_web::test]
async fn engagement_redirects_to_subforum_when_scoped() {
    let h = harness();
    let alice = seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let post = h
        .state
        .posts
        .insert(Post::new(alice.id, "Hello".into(), "World".into(), Some("csc".into())))
        .await
        .unwrap();
    let app = test_app!(h.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/like_post/{}?major=csc", post.id))
            .insert_header(bearer(&h.state, &alice))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/forum/csc");
}

#[actix_web::test]
async fn like_on_missing_post_is_not_found() {
    let h = harness();
    let alice = seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let app = test_app!(h.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/like_post/{}", Uuid::new_v4()))
            .insert_header(bearer(&h.state, &alice))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn only_the_author_may_delete_a_post() {
    let h = harness();
    let alice = seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let bob = seed_user(&h.state, "bob", "bob@u.rochester.edu", "secret2").await;
    let post = h
        .state
        .posts
        .insert(Post::new(alice.id, "Hello".into(), "World".into(), None))
        .await
        .unwrap();
    let app = test_app!(h.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/post/{}/delete", post.id))
            .insert_header(bearer(&h.state, &bob))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(h.state.posts.find_by_id(post.id).await.unwrap().is_some());
}

#[actix_web::test]
async fn deleting_a_post_cascades_to_comments_and_likes() {
    let h = harness();
    let alice = seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let post = h
        .state
        .posts
        .insert(Post::new(alice.id, "Hello".into(), "World".into(), None))
        .await
        .unwrap();
    h.state
        .comments
        .insert(Comment::new(alice.id, post.id, "first!".into()))
        .await
        .unwrap();
    h.state.likes.insert(Like::new(alice.id, post.id)).await.unwrap();
    let app = test_app!(h.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/post/{}/delete", post.id))
            .insert_header(bearer(&h.state, &alice))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let store = h.repo.store.lock().unwrap();
    assert!(store.posts.is_empty());
    assert!(store.comments.is_empty());
    assert!(store.likes.is_empty());
}

#[actix_web::test]
async fn profile_shows_and_renames_nickname() {
    let h = harness();
    let alice = seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let app = test_app!(h.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/profile")
            .insert_header(bearer(&h.state, &alice))
            .set_form([("nickname", "Ali")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/profile");

    let updated = h.state.users.find_by_id(alice.id).await.unwrap().unwrap();
    assert_eq!(updated.nickname, "Ali");
    // the login handle does not change
    assert_eq!(updated.username, "alice");
}

#[actix_web::test]
async fn duplicate_like_insert_is_treated_as_already_liked() {
    let h = harness();
    let alice = seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let post = h
        .state
        .posts
        .insert(Post::new(alice.id, "Hello".into(), "World".into(), None))
        .await
        .unwrap();

    // First insert wins, second hits the unique index
    h.state.likes.insert(Like::new(alice.id, post.id)).await.unwrap();
    let second = h.state.likes.insert(Like::new(alice.id, post.id)).await;
    assert!(matches!(second, Err(RepoError::Constraint(_))));
    assert_eq!(h.state.likes.count_for_post(post.id).await.unwrap(), 1);
}

#[actix_web::test]
async fn like_conflict_on_insert_still_reports_liked() {
    let h = harness();
    let alice = seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let post = h
        .state
        .posts
        .insert(Post::new(alice.id, "Hello".into(), "World".into(), None))
        .await
        .unwrap();
    h.state.likes.insert(Like::new(alice.id, post.id)).await.unwrap();

    // The stale lookup misses the existing row, so the toggle goes down the
    // insert path and hits the unique index instead.
    let mut state = h.state.clone();
    state.likes = Arc::new(StaleLookupLikes(h.repo.clone()));
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/like_post/{}", post.id))
            .insert_header(bearer(&h.state, &alice))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let body: ApiResponse<()> = test::read_body_json(resp).await;
    assert_eq!(body.message.as_deref(), Some("Post liked!"));
    assert_eq!(h.state.likes.count_for_post(post.id).await.unwrap(), 1);
}

#[actix_web::test]
async fn only_the_author_may_delete_a_comment() {
    let h = harness();
    let alice = seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let bob = seed_user(&h.state, "bob", "bob@u.rochester.edu", "secret2").await;
    let post = h
        .state
        .posts
        .insert(Post::new(alice.id, "Hello".into(), "World".into(), None))
        .await
        .unwrap();
    let comment = h
        .state
        .comments
        .insert(Comment::new(alice.id, post.id, "first!".into()))
        .await
        .unwrap();
    let app = test_app!(h.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/comment/{}/delete", comment.id))
            .insert_header(bearer(&h.state, &bob))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(h.state.comments.find_by_id(comment.id).await.unwrap().is_some());
}

#[actix_web::test]
async fn oversized_fields_fail_validation_before_storage() {
    let h = harness();
    let alice = seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let app = test_app!(h.state);

    let long_title = "t".repeat(101);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/main")
            .insert_header(bearer(&h.state, &alice))
            .set_form([("title", long_title.as_str()), ("content", "World")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(h.repo.store.lock().unwrap().posts.is_empty());

    let long_nickname = "n".repeat(21);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/profile")
            .insert_header(bearer(&h.state, &alice))
            .set_form([("nickname", long_nickname.as_str())])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let unchanged = h.state.users.find_by_id(alice.id).await.unwrap().unwrap();
    assert_eq!(unchanged.nickname, "alice");
}

#[actix_web::test]
async fn subforum_redirect_percent_encodes_the_major() {
    let h = harness();
    let alice = seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let post = h
        .state
        .posts
        .insert(Post::new(alice.id, "Hello".into(), "World".into(), Some("cs 101".into())))
        .await
        .unwrap();
    let app = test_app!(h.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/like_post/{}?major=cs%20101", post.id))
            .insert_header(bearer(&h.state, &alice))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/forum/cs%20101");
}

#[actix_web::test]
async fn landing_redirects_authenticated_users_to_feed() {
    let h = harness();
    let alice = seed_user(&h.state, "alice", "alice@u.rochester.edu", "secret1").await;
    let app = test_app!(h.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/")
            .insert_header(bearer(&h.state, &alice))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/main");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
