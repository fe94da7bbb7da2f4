use std::sync::Arc;

use chrono::{Duration, Utc};
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use reqwest::StatusCode;
use serde_json::json;

use inkpress_api::app::{self, services::AppServices};
use inkpress_auth::User;
use inkpress_core::PostId;
use inkpress_posts::{Author, BlogPost, NewPost};

const SEED_COUNT: usize = 10;
const PASSWORD: &str = "whatever";

/// Production router bound to an ephemeral port, with direct handles on the
/// store for seeding and verification. Each test gets a fresh server, so
/// tear-down is implicit.
struct TestServer {
    base_url: String,
    services: Arc<AppServices>,
    username: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let services = Arc::new(app::services::build_services());

        let username: String = Username().fake();
        let user = User::create(
            &username,
            PASSWORD,
            FirstName().fake::<String>(),
            LastName().fake::<String>(),
        )
        .expect("failed to hash test password");
        services.create_user(user).expect("failed to seed user");

        for post in (0..SEED_COUNT).map(generate_post) {
            services.posts_create(post).expect("failed to seed post");
        }

        let router = app::build_app(Arc::clone(&services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url,
            services,
            username,
            handle,
        }
    }

    fn first_post(&self) -> BlogPost {
        self.services
            .posts_list()
            .unwrap()
            .into_iter()
            .next()
            .expect("seeded store is empty")
    }

    fn count(&self) -> usize {
        self.services.posts_count().unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn generate_post(index: usize) -> NewPost {
    let age_days = (SEED_COUNT - index) as i64;
    NewPost::new(
        Sentence(3..8).fake(),
        Author::new(FirstName().fake::<String>(), LastName().fake::<String>()),
        Sentence(8..20).fake(),
        Some(Utc::now() - Duration::days(age_days)),
    )
    .expect("generated post must be valid")
}

fn complete_body() -> serde_json::Value {
    json!({
        "title": Sentence(3..8).fake::<String>(),
        "author": {
            "firstName": FirstName().fake::<String>(),
            "lastName": LastName().fake::<String>(),
        },
        "content": Sentence(8..20).fake::<String>(),
    })
}

fn parse_id(value: &serde_json::Value) -> PostId {
    value["id"]
        .as_str()
        .expect("response has a string id")
        .parse()
        .expect("response id is a valid PostId")
}

// -------------------------
// GET /posts
// -------------------------

#[tokio::test]
async fn get_returns_every_stored_post() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/posts", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    let posts = body.as_array().expect("response is a json array");
    assert_eq!(posts.len(), srv.count());
}

#[tokio::test]
async fn listed_posts_carry_exactly_the_contract_fields() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/posts", srv.base_url)).await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();

    for post in body.as_array().unwrap() {
        let obj = post.as_object().expect("each element is an object");
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["author", "content", "created", "id", "title"]);
    }

    // The serialized author is the display string derived from the stored
    // structured value.
    let first = &body.as_array().unwrap()[0];
    let stored = srv
        .services
        .posts_get(parse_id(first))
        .unwrap()
        .expect("listed post exists in the store");
    assert_eq!(first["title"], stored.title);
    assert_eq!(first["content"], stored.content);
    assert_eq!(first["author"], stored.author.display_name());
}

// -------------------------
// POST /posts
// -------------------------

#[tokio::test]
async fn create_persists_and_returns_the_new_resource() {
    let srv = TestServer::spawn().await;
    let before = srv.count();

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/posts", srv.base_url))
        .basic_auth(&srv.username, Some(PASSWORD))
        .json(&complete_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();

    let stored = srv
        .services
        .posts_get(parse_id(&created))
        .unwrap()
        .expect("created post is retrievable by the returned id");
    assert_eq!(created["title"], stored.title);
    assert_eq!(created["content"], stored.content);
    assert_eq!(created["author"], stored.author.display_name());
    assert_eq!(srv.count(), before + 1);
}

#[tokio::test]
async fn create_without_credentials_changes_nothing() {
    let srv = TestServer::spawn().await;
    let before = srv.count();

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/posts", srv.base_url))
        .json(&complete_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(srv.count(), before);
}

#[tokio::test]
async fn create_with_wrong_password_is_rejected() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/posts", srv.base_url))
        .basic_auth(&srv.username, Some("not-the-password"))
        .json(&complete_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_with_missing_title_is_a_validation_error() {
    let srv = TestServer::spawn().await;
    let before = srv.count();

    let mut body = complete_body();
    body.as_object_mut().unwrap().remove("title");

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/posts", srv.base_url))
        .basic_auth(&srv.username, Some(PASSWORD))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(srv.count(), before);
}

// -------------------------
// PUT /posts/:id
// -------------------------

#[tokio::test]
async fn update_overwrites_only_the_sent_fields() {
    let srv = TestServer::spawn().await;
    let target = srv.first_post();
    let old_author = target.author.display_name();

    let client = reqwest::Client::new();
    let res = client
        .put(format!("{}/posts/{}", srv.base_url, target.id))
        .basic_auth(&srv.username, Some(PASSWORD))
        .json(&json!({ "title": "Renamed by the suite" }))
        .send()
        .await
        .unwrap();

    // 201 on update is the documented contract; see the handler.
    assert_eq!(res.status(), StatusCode::CREATED);

    let stored = srv.services.posts_get(target.id).unwrap().unwrap();
    assert_eq!(stored.title, "Renamed by the suite");
    assert_eq!(stored.author.display_name(), old_author);
    assert_eq!(stored.content, target.content);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .put(format!("{}/posts/{}", srv.base_url, PostId::new()))
        .basic_auth(&srv.username, Some(PASSWORD))
        .json(&json!({ "title": "x" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_malformed_id_is_a_bad_request() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .put(format!("{}/posts/not-a-uuid", srv.base_url))
        .basic_auth(&srv.username, Some(PASSWORD))
        .json(&json!({ "title": "x" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_without_credentials_changes_nothing() {
    let srv = TestServer::spawn().await;
    let target = srv.first_post();

    let client = reqwest::Client::new();
    let res = client
        .put(format!("{}/posts/{}", srv.base_url, target.id))
        .json(&json!({ "title": "sneaky" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let stored = srv.services.posts_get(target.id).unwrap().unwrap();
    assert_eq!(stored.title, target.title);
}

// -------------------------
// DELETE /posts/:id
// -------------------------

#[tokio::test]
async fn delete_removes_the_post() {
    let srv = TestServer::spawn().await;
    let target = srv.first_post();
    let before = srv.count();

    let client = reqwest::Client::new();
    let res = client
        .delete(format!("{}/posts/{}", srv.base_url, target.id))
        .basic_auth(&srv.username, Some(PASSWORD))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.text().await.unwrap().is_empty());

    assert!(srv.services.posts_get(target.id).unwrap().is_none());
    assert_eq!(srv.count(), before - 1);
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .delete(format!("{}/posts/{}", srv.base_url, PostId::new()))
        .basic_auth(&srv.username, Some(PASSWORD))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_without_credentials_changes_nothing() {
    let srv = TestServer::spawn().await;
    let target = srv.first_post();
    let before = srv.count();

    let client = reqwest::Client::new();
    let res = client
        .delete(format!("{}/posts/{}", srv.base_url, target.id))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(srv.count(), before);
}

// -------------------------
// Misc
// -------------------------

#[tokio::test]
async fn health_needs_no_credentials() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
