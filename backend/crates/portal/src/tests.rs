//! Router-level tests: the portal routes behind the real auth routes and
//! identity middleware, over in-memory repositories.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::{Router, middleware};
use serde_json::{Value, json};
use tower::ServiceExt;

use auth::domain::value_object::{email::Email, user_name::UserName};
use auth::{
    AuthAppState, AuthConfig, AuthResult, MemorySessionStore, User, UserRepository,
    attach_identity, auth_router,
};
use kernel::id::{ForumPostId, ModuleId, UserId};

use crate::application::SeedUseCase;
use crate::domain::entity::{
    AdminStats, Author, Feedback, ForumComment, ForumCommentWithAuthor, ForumPost,
    ForumPostWithAuthor, GovernmentScheme, Module, NewFeedback, NewForumComment, NewForumPost,
    NewModule, NewScheme, ProgressUpdate, UserProgress,
};
use crate::domain::repository::{
    FeedbackRepository, ForumRepository, ModuleRepository, ProgressRepository, SchemeRepository,
    StatsRepository,
};
use crate::error::PortalResult;
use crate::presentation::{PortalAppState, portal_router};

// ============================================================================
// Test doubles
// ============================================================================

#[derive(Default)]
struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    fn find(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| pred(u)).cloned()
    }

    fn promote(&self, username: &str) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.username.as_str() == username) {
            user.is_admin = true;
        }
    }

    fn author(&self, id: UserId) -> Option<Author> {
        self.find(|u| u.id == id).map(|u| Author {
            id: u.id,
            username: u.username.as_str().to_string(),
            first_name: u.first_name,
            last_name: u.last_name,
        })
    }
}

impl UserRepository for InMemoryUsers {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.find(|u| u.id == *user_id))
    }

    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>> {
        Ok(self.find(|u| u.username == *username))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.find(|u| u.email == *email))
    }
}

/// Portal storage with a counter on the aggregate query
#[derive(Default)]
struct InMemoryPortal {
    users: Arc<InMemoryUsers>,
    modules: Mutex<Vec<Module>>,
    progress: Mutex<Vec<UserProgress>>,
    posts: Mutex<Vec<ForumPost>>,
    comments: Mutex<Vec<ForumComment>>,
    feedback: Mutex<Vec<Feedback>>,
    schemes: Mutex<Vec<GovernmentScheme>>,
    stats_calls: AtomicUsize,
}

impl ModuleRepository for InMemoryPortal {
    async fn list_active_modules(&self) -> PortalResult<Vec<Module>> {
        let modules = self.modules.lock().unwrap();
        Ok(modules.iter().filter(|m| m.is_active).cloned().collect())
    }

    async fn find_module(&self, module_id: &ModuleId) -> PortalResult<Option<Module>> {
        let modules = self.modules.lock().unwrap();
        Ok(modules.iter().find(|m| m.id == *module_id).cloned())
    }

    async fn create_module(&self, module: NewModule) -> PortalResult<Module> {
        let module = module.into_module();
        self.modules.lock().unwrap().push(module.clone());
        Ok(module)
    }

    async fn count_modules(&self) -> PortalResult<i64> {
        Ok(self.modules.lock().unwrap().len() as i64)
    }
}

impl ProgressRepository for InMemoryPortal {
    async fn list_progress(&self, user_id: &UserId) -> PortalResult<Vec<UserProgress>> {
        let rows = self.progress.lock().unwrap();
        Ok(rows.iter().filter(|p| p.user_id == *user_id).cloned().collect())
    }

    async fn upsert_progress(&self, update: &ProgressUpdate) -> PortalResult<UserProgress> {
        let mut rows = self.progress.lock().unwrap();
        let position = rows
            .iter()
            .position(|p| p.user_id == update.user_id && p.module_id == update.module_id);

        let row = update.apply(position.map(|i| &rows[i]), chrono::Utc::now());
        match position {
            Some(i) => rows[i] = row.clone(),
            None => rows.push(row.clone()),
        }
        Ok(row)
    }
}

impl ForumRepository for InMemoryPortal {
    async fn list_posts(&self, category: Option<&str>) -> PortalResult<Vec<ForumPostWithAuthor>> {
        let posts = self.posts.lock().unwrap();
        Ok(posts
            .iter()
            .rev()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .filter_map(|p| {
                let author = self.users.author(p.user_id)?;
                Some(ForumPostWithAuthor {
                    post: p.clone(),
                    author,
                })
            })
            .collect())
    }

    async fn find_post(&self, post_id: &ForumPostId) -> PortalResult<Option<ForumPost>> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().find(|p| p.id == *post_id).cloned())
    }

    async fn create_post(&self, post: NewForumPost) -> PortalResult<ForumPost> {
        let post = post.into_post();
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn like_post(&self, post_id: &ForumPostId) -> PortalResult<bool> {
        let mut posts = self.posts.lock().unwrap();
        match posts.iter_mut().find(|p| p.id == *post_id) {
            Some(post) => {
                post.likes += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_comments(
        &self,
        post_id: &ForumPostId,
    ) -> PortalResult<Vec<ForumCommentWithAuthor>> {
        let comments = self.comments.lock().unwrap();
        Ok(comments
            .iter()
            .filter(|c| c.post_id == *post_id)
            .filter_map(|c| {
                let author = self.users.author(c.user_id)?;
                Some(ForumCommentWithAuthor {
                    comment: c.clone(),
                    author,
                })
            })
            .collect())
    }

    async fn create_comment(&self, comment: NewForumComment) -> PortalResult<ForumComment> {
        let comment = comment.into_comment();
        self.comments.lock().unwrap().push(comment.clone());
        Ok(comment)
    }
}

impl FeedbackRepository for InMemoryPortal {
    async fn create_feedback(&self, feedback: NewFeedback) -> PortalResult<Feedback> {
        let feedback = feedback.into_feedback();
        self.feedback.lock().unwrap().push(feedback.clone());
        Ok(feedback)
    }

    async fn list_feedback(&self) -> PortalResult<Vec<Feedback>> {
        let feedback = self.feedback.lock().unwrap();
        Ok(feedback.iter().rev().cloned().collect())
    }
}

impl SchemeRepository for InMemoryPortal {
    async fn list_active_schemes(&self) -> PortalResult<Vec<GovernmentScheme>> {
        let schemes = self.schemes.lock().unwrap();
        Ok(schemes.iter().filter(|s| s.is_active()).cloned().collect())
    }

    async fn create_scheme(&self, scheme: NewScheme) -> PortalResult<GovernmentScheme> {
        let scheme = scheme.into_scheme();
        self.schemes.lock().unwrap().push(scheme.clone());
        Ok(scheme)
    }

    async fn count_schemes(&self) -> PortalResult<i64> {
        Ok(self.schemes.lock().unwrap().len() as i64)
    }
}

impl StatsRepository for InMemoryPortal {
    async fn admin_stats(&self) -> PortalResult<AdminStats> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        Ok(AdminStats {
            total_users: self.users.users.lock().unwrap().len() as i64,
            total_modules: self.modules.lock().unwrap().len() as i64,
            total_posts: self.posts.lock().unwrap().len() as i64,
            total_feedback: self.feedback.lock().unwrap().len() as i64,
            completed_modules: self
                .progress
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.completed)
                .count() as i64,
        })
    }
}

// ============================================================================
// Harness
// ============================================================================

struct TestApp {
    router: Router,
    users: Arc<InMemoryUsers>,
    portal: Arc<InMemoryPortal>,
}

struct TestResponse {
    status: StatusCode,
    body: Value,
}

impl TestApp {
    async fn new() -> Self {
        let users = Arc::new(InMemoryUsers::default());
        let portal = Arc::new(InMemoryPortal {
            users: users.clone(),
            ..Default::default()
        });

        SeedUseCase::new(portal.clone()).execute().await.unwrap();

        let auth_state = AuthAppState {
            users: users.clone(),
            sessions: Arc::new(MemorySessionStore::new()),
            config: Arc::new(AuthConfig::development()),
        };
        let portal_state = PortalAppState {
            repo: portal.clone(),
        };

        let router = auth_router(auth_state.clone())
            .merge(portal_router(portal_state))
            .layer(middleware::from_fn_with_state(
                auth_state,
                attach_identity::<InMemoryUsers, MemorySessionStore>,
            ));

        Self {
            router,
            users,
            portal,
        }
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(request("GET", uri, cookie, None)).await
    }

    async fn post(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(request("POST", uri, cookie, Some(body))).await
    }

    /// Register a member and return the session cookie
    async fn sign_up(&self, username: &str) -> String {
        let req = request(
            "POST",
            "/register",
            None,
            Some(json!({
                "email": format!("{username}@example.com"),
                "password": "secret123",
                "firstName": "Test",
                "lastName": "User",
                "username": username,
                "preferredLanguage": "ta"
            })),
        );
        let response = self.router.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .unwrap()
            .to_string()
    }

    fn first_module_id(&self) -> ModuleId {
        self.portal.modules.lock().unwrap()[0].id
    }

    fn progress_rows(&self) -> usize {
        self.portal.progress.lock().unwrap().len()
    }

    fn stats_calls(&self) -> usize {
        self.portal.stats_calls.load(Ordering::SeqCst)
    }
}

fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn post_body() -> Value {
    json!({
        "title": "How do I check my PM-KISAN status?",
        "content": "The website asks for a registration number.",
        "category": "agriculture"
    })
}

// ============================================================================
// Modules & schemes
// ============================================================================

#[tokio::test]
async fn test_modules_are_seeded_once() {
    let app = TestApp::new().await;

    let res = app.get("/modules", None).await;
    assert_eq!(res.status, StatusCode::OK);
    let modules = res.body.as_array().unwrap();
    assert_eq!(modules.len(), 3);
    assert_eq!(modules[0]["title"], "Digital Banking Basics");
    assert_eq!(modules[0]["titleTamil"], "டிஜிட்டல் வங்கி அடிப்படைகள்");
    assert_eq!(modules[0]["duration"], 300);

    let report = SeedUseCase::new(app.portal.clone()).execute().await.unwrap();
    assert_eq!(report.modules, 0);
    assert_eq!(report.schemes, 0);
}

#[tokio::test]
async fn test_get_module() {
    let app = TestApp::new().await;
    let id = app.first_module_id();

    let res = app.get(&format!("/modules/{id}"), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["id"], id.to_string());

    let res = app.get(&format!("/modules/{}", ModuleId::new()), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["detail"], "Module not found");

    let res = app.get("/modules/not-a-uuid", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_schemes_are_listed() {
    let app = TestApp::new().await;

    let res = app.get("/schemes", None).await;
    assert_eq!(res.status, StatusCode::OK);
    let schemes = res.body.as_array().unwrap();
    assert_eq!(schemes.len(), 2);
    assert!(schemes.iter().all(|s| s["status"] == "active"));
    assert!(schemes[0]["nameTamil"].is_string());
}

// ============================================================================
// Forum
// ============================================================================

#[tokio::test]
async fn test_create_post_requires_session() {
    let app = TestApp::new().await;

    let res = app.post("/forum/posts", None, post_body()).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(app.portal.posts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_and_list_posts() {
    let app = TestApp::new().await;
    let cookie = app.sign_up("muthu").await;

    let res = app.post("/forum/posts", Some(&cookie), post_body()).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["likes"], 0);

    let mut other = post_body();
    other["category"] = json!("banking");
    app.post("/forum/posts", Some(&cookie), other).await;

    let res = app.get("/forum/posts", None).await;
    let posts = res.body.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["category"], "banking");
    assert_eq!(posts[0]["author"]["username"], "muthu");
    assert!(posts[0]["author"].get("password").is_none());
    assert!(posts[0]["author"].get("email").is_none());

    let res = app.get("/forum/posts?category=agriculture", None).await;
    let posts = res.body.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["category"], "agriculture");
}

#[tokio::test]
async fn test_invalid_post_is_400() {
    let app = TestApp::new().await;
    let cookie = app.sign_up("muthu").await;

    let res = app
        .post("/forum/posts", Some(&cookie), json!({ "title": "No body" }))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let mut blank = post_body();
    blank["content"] = json!("   ");
    let res = app.post("/forum/posts", Some(&cookie), blank).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comments() {
    let app = TestApp::new().await;
    let cookie = app.sign_up("muthu").await;
    let post = app.post("/forum/posts", Some(&cookie), post_body()).await;
    let post_id = post.body["id"].as_str().unwrap().to_string();

    let uri = format!("/forum/posts/{post_id}/comments");
    let res = app
        .post(&uri, None, json!({ "content": "Try the beneficiary status page" }))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app
        .post(&uri, Some(&cookie), json!({ "content": "Try the beneficiary status page" }))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["postId"], post_id);

    let res = app.get(&uri, None).await;
    let comments = res.body.as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["author"]["username"], "muthu");

    let missing = format!("/forum/posts/{}/comments", ForumPostId::new());
    let res = app.post(&missing, Some(&cookie), json!({ "content": "hello" })).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.get(&missing, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn test_like_requires_session_and_existing_post() {
    let app = TestApp::new().await;
    let cookie = app.sign_up("muthu").await;
    let post = app.post("/forum/posts", Some(&cookie), post_body()).await;
    let uri = format!("/forum/posts/{}/like", post.body["id"].as_str().unwrap());

    let res = app.post(&uri, None, json!({})).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.post(&uri, Some(&cookie), json!({})).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Post liked successfully");

    let missing = format!("/forum/posts/{}/like", ForumPostId::new());
    let res = app.post(&missing, Some(&cookie), json!({})).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_likes_are_all_counted() {
    const LIKES: usize = 25;

    let app = TestApp::new().await;
    let cookie = app.sign_up("muthu").await;
    let post = app.post("/forum/posts", Some(&cookie), post_body()).await;
    let uri = format!("/forum/posts/{}/like", post.body["id"].as_str().unwrap());

    let tasks: Vec<_> = (0..LIKES)
        .map(|_| {
            let router = app.router.clone();
            let req = request("POST", &uri, Some(&cookie), None);
            tokio::spawn(async move { router.oneshot(req).await.unwrap().status() })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    let res = app.get("/forum/posts", None).await;
    assert_eq!(res.body[0]["likes"], LIKES);
}

// ============================================================================
// Progress
// ============================================================================

#[tokio::test]
async fn test_progress_requires_session() {
    let app = TestApp::new().await;

    let res = app.get("/progress", None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let body = json!({ "moduleId": app.first_module_id().to_string(), "completed": true });
    let res = app.post("/progress", None, body).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.progress_rows(), 0);
}

#[tokio::test]
async fn test_progress_upsert_keeps_one_row() {
    let app = TestApp::new().await;
    let cookie = app.sign_up("lakshmi").await;
    let module_id = app.first_module_id().to_string();

    let first = app
        .post(
            "/progress",
            Some(&cookie),
            json!({ "moduleId": module_id, "completed": false, "watchTime": 120 }),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(first.body["completedAt"].is_null());

    let second = app
        .post(
            "/progress",
            Some(&cookie),
            json!({ "moduleId": module_id, "completed": true, "watchTime": 300 }),
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["id"], first.body["id"]);
    assert_eq!(second.body["watchTime"], 300);
    assert_eq!(second.body["completed"], true);
    assert!(second.body["completedAt"].is_string());
    assert_eq!(app.progress_rows(), 1);

    let res = app.get("/progress", Some(&cookie)).await;
    let rows = res.body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["watchTime"], 300);
}

#[tokio::test]
async fn test_progress_is_per_user() {
    let app = TestApp::new().await;
    let alice = app.sign_up("alice").await;
    let bob = app.sign_up("bob").await;
    let body = json!({ "moduleId": app.first_module_id().to_string(), "watchTime": 10 });

    app.post("/progress", Some(&alice), body.clone()).await;
    app.post("/progress", Some(&bob), body).await;
    assert_eq!(app.progress_rows(), 2);

    let res = app.get("/progress", Some(&bob)).await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_progress_rejects_bad_input() {
    let app = TestApp::new().await;
    let cookie = app.sign_up("lakshmi").await;

    let unknown = json!({ "moduleId": ModuleId::new().to_string(), "completed": true });
    let res = app.post("/progress", Some(&cookie), unknown).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let negative = json!({ "moduleId": app.first_module_id().to_string(), "watchTime": -5 });
    let res = app.post("/progress", Some(&cookie), negative).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let malformed = json!({ "moduleId": "banking-101" });
    let res = app.post("/progress", Some(&cookie), malformed).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.progress_rows(), 0);
}

// ============================================================================
// Feedback
// ============================================================================

#[tokio::test]
async fn test_feedback_submission() {
    let app = TestApp::new().await;

    let res = app
        .post(
            "/feedback",
            None,
            json!({
                "name": "Selvi",
                "email": "selvi@example.com",
                "category": "content",
                "rating": 5,
                "message": "The banking video was very clear"
            }),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["isReviewed"], false);

    let res = app
        .post(
            "/feedback",
            None,
            json!({ "name": "Selvi", "email": "selvi@example.com", "category": "content" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.portal.feedback.lock().unwrap().len(), 1);
}

// ============================================================================
// Admin
// ============================================================================

#[tokio::test]
async fn test_admin_stats_refused_without_query() {
    let app = TestApp::new().await;

    let res = app.get("/admin/stats", None).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let member = app.sign_up("muthu").await;
    let res = app.get("/admin/stats", Some(&member)).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["detail"], "Admin access required");

    let res = app.get("/admin/feedback", Some(&member)).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    assert_eq!(app.stats_calls(), 0);
}

#[tokio::test]
async fn test_admin_stats_for_admin() {
    let app = TestApp::new().await;
    let cookie = app.sign_up("admin").await;
    app.users.promote("admin");

    app.post("/forum/posts", Some(&cookie), post_body()).await;
    app.post(
        "/progress",
        Some(&cookie),
        json!({ "moduleId": app.first_module_id().to_string(), "completed": true }),
    )
    .await;

    let res = app.get("/admin/stats", Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        json!({
            "totalUsers": 1,
            "totalModules": 3,
            "totalPosts": 1,
            "totalFeedback": 0,
            "completedModules": 1
        })
    );
    assert_eq!(app.stats_calls(), 1);

    let res = app.get("/admin/feedback", Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([]));
}
