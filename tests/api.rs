use chirpy::auth::{Claims, TokenKind, TokenService};
use chirpy::configuration::JwtSettings;
use chirpy::database::Database;
use chirpy::domain::Chirpy;
use chirpy::startup::run;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use std::net::TcpListener;
use tempfile::TempDir;

const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";
const POLKA_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub dir: TempDir,
}

async fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let dir = TempDir::new().expect("Failed to create temp dir");
    let db = Database::open(dir.path().join("database.json")).expect("Failed to open database");
    let tokens = TokenService::new(&JwtSettings {
        secret: TEST_SECRET.to_string(),
    });
    let chirpy = Chirpy::new(db, tokens, POLKA_KEY);

    let server = run(listener, chirpy, dir.path().to_path_buf()).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        client: reqwest::Client::new(),
        dir,
    }
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    async fn signup(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/users"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Signs up and logs in; returns the login body
    async fn register(&self, email: &str) -> Value {
        assert_eq!(201, self.signup(email, "04234").await.status().as_u16());
        let response = self.login(email, "04234").await;
        assert_eq!(200, response.status().as_u16());
        response.json().await.expect("Failed to parse login response")
    }

    async fn post_chirp(&self, token: &str, body: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/chirps"))
            .bearer_auth(token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    async fn list_chirps(&self, query: &str) -> Vec<Value> {
        let response = self
            .client
            .get(self.url(&format!("/api/chirps{}", query)))
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(200, response.status().as_u16());
        response.json().await.expect("Failed to parse chirps")
    }

    async fn post_with_bearer(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

fn token(body: &Value, field: &str) -> String {
    body[field].as_str().expect("token missing").to_string()
}

async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Error body is not JSON");
    body["error"].as_str().expect("error field missing").to_string()
}

// --- Health ---

#[tokio::test]
async fn healthz_returns_ok() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/api/healthz"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");
}

// --- Users ---

#[tokio::test]
async fn signup_returns_201_without_password() {
    let app = spawn_app().await;

    let response = app.signup("walt@breakingbad.com", "123456").await;

    assert_eq!(201, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["email"], "walt@breakingbad.com");
    assert_eq!(body["is_chirpy_red"], false);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn signup_returns_400_for_invalid_input() {
    let app = spawn_app().await;

    let test_cases = vec![
        ("notanemail", "pw", "email without @"),
        ("user@", "pw", "empty domain"),
        ("a@b.com", "", "empty password"),
    ];

    for (email, password, reason) in test_cases {
        let response = app.signup(email, password).await;
        assert_eq!(400, response.status().as_u16(), "Should reject: {}", reason);
    }
}

#[tokio::test]
async fn signup_returns_400_for_malformed_json() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/users"))
        .header("Content-Type", "application/json")
        .body("{\"email\": ")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    assert!(!error_message(response).await.is_empty());
}

#[tokio::test]
async fn signup_returns_409_for_duplicate_email() {
    let app = spawn_app().await;

    assert_eq!(201, app.signup("a@b.com", "pw").await.status().as_u16());
    let response = app.signup("a@b.com", "pw2").await;

    assert_eq!(409, response.status().as_u16());
}

#[tokio::test]
async fn login_returns_user_and_tokens() {
    let app = spawn_app().await;
    app.signup("a@b.com", "pw").await;

    let response = app.login("a@b.com", "pw").await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["email"], "a@b.com");

    let tokens = TokenService::new(&JwtSettings {
        secret: TEST_SECRET.to_string(),
    });
    assert_eq!(tokens.issuer(&token(&body, "token")).unwrap(), TokenKind::Access);
    assert_eq!(
        tokens.issuer(&token(&body, "refresh_token")).unwrap(),
        TokenKind::Refresh
    );
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = spawn_app().await;
    app.signup("a@b.com", "pw").await;

    let wrong_password = app.login("a@b.com", "wrong").await;
    let unknown_email = app.login("nobody@b.com", "pw").await;

    assert_eq!(401, wrong_password.status().as_u16());
    assert_eq!(401, unknown_email.status().as_u16());
    assert_eq!(
        error_message(wrong_password).await,
        error_message(unknown_email).await
    );
}

#[tokio::test]
async fn update_user_changes_email_and_password() {
    let app = spawn_app().await;
    let session = app.register("old@b.com").await;

    let response = app
        .client
        .put(app.url("/api/users"))
        .bearer_auth(token(&session, "token"))
        .json(&json!({ "email": "new@b.com", "password": "fresh" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], "new@b.com");

    assert_eq!(200, app.login("new@b.com", "fresh").await.status().as_u16());
    assert_eq!(401, app.login("old@b.com", "04234").await.status().as_u16());
}

#[tokio::test]
async fn update_user_rejects_refresh_token() {
    let app = spawn_app().await;
    let session = app.register("a@b.com").await;

    let response = app
        .client
        .put(app.url("/api/users"))
        .bearer_auth(token(&session, "refresh_token"))
        .json(&json!({ "email": "new@b.com" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
}

// --- Chirps ---

#[tokio::test]
async fn create_chirp_masks_banned_words() {
    let app = spawn_app().await;
    let session = app.register("a@b.com").await;

    let response = app
        .post_chirp(&token(&session, "token"), "You are a Kerfuffle, not a kerfufflebomb")
        .await;

    assert_eq!(201, response.status().as_u16());
    let chirp: Value = response.json().await.unwrap();
    assert_eq!(chirp["id"], 1);
    assert_eq!(chirp["author_id"], session["id"]);
    assert_eq!(chirp["body"], "You are a ****, not a kerfufflebomb");
}

#[tokio::test]
async fn create_chirp_rejects_long_body_and_persists_nothing() {
    let app = spawn_app().await;
    let session = app.register("a@b.com").await;

    let response = app
        .post_chirp(&token(&session, "token"), &"x".repeat(141))
        .await;

    assert_eq!(400, response.status().as_u16());
    assert!(app.list_chirps("").await.is_empty());
}

#[tokio::test]
async fn create_chirp_requires_access_token() {
    let app = spawn_app().await;
    let session = app.register("a@b.com").await;

    let missing = app
        .client
        .post(app.url("/api/chirps"))
        .json(&json!({ "body": "hi" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(401, missing.status().as_u16());

    let garbage = app.post_chirp("not.a.jwt", "hi").await;
    assert_eq!(401, garbage.status().as_u16());

    let refresh = app.post_chirp(&token(&session, "refresh_token"), "hi").await;
    assert_eq!(401, refresh.status().as_u16());

    assert!(app.list_chirps("").await.is_empty());
}

#[tokio::test]
async fn expired_access_token_is_rejected() {
    let app = spawn_app().await;
    let session = app.register("a@b.com").await;

    let mut claims = Claims::new(session["id"].as_u64().unwrap(), TokenKind::Access);
    claims.iat -= 7200;
    claims.exp = claims.iat + 3600;
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let response = app.post_chirp(&expired, "too late").await;

    assert_eq!(401, response.status().as_u16());
    assert_eq!(error_message(response).await, "Token has expired");
}

#[tokio::test]
async fn get_chirp_by_id() {
    let app = spawn_app().await;
    let session = app.register("a@b.com").await;
    app.post_chirp(&token(&session, "token"), "first").await;

    let found = app
        .client
        .get(app.url("/api/chirps/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(200, found.status().as_u16());
    let chirp: Value = found.json().await.unwrap();
    assert_eq!(chirp["body"], "first");

    let missing = app
        .client
        .get(app.url("/api/chirps/99"))
        .send()
        .await
        .unwrap();
    assert_eq!(404, missing.status().as_u16());

    let invalid = app
        .client
        .get(app.url("/api/chirps/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(400, invalid.status().as_u16());
}

#[tokio::test]
async fn list_chirps_sorts_and_filters() {
    let app = spawn_app().await;
    let alice = app.register("alice@b.com").await;
    let bob = app.register("bob@b.com").await;

    app.post_chirp(&token(&alice, "token"), "a1").await;
    app.post_chirp(&token(&bob, "token"), "b1").await;
    app.post_chirp(&token(&alice, "token"), "a2").await;

    let ids = |chirps: Vec<Value>| -> Vec<u64> {
        chirps.iter().map(|c| c["id"].as_u64().unwrap()).collect()
    };

    assert_eq!(ids(app.list_chirps("").await), vec![1, 2, 3]);
    assert_eq!(ids(app.list_chirps("?sort=asc").await), vec![1, 2, 3]);
    assert_eq!(ids(app.list_chirps("?sort=desc").await), vec![3, 2, 1]);

    let by_alice = app
        .list_chirps(&format!("?author_id={}&sort=desc", alice["id"]))
        .await;
    assert_eq!(ids(by_alice), vec![3, 1]);

    let bad_sort = app
        .client
        .get(app.url("/api/chirps?sort=sideways"))
        .send()
        .await
        .unwrap();
    assert_eq!(400, bad_sort.status().as_u16());
}

#[tokio::test]
async fn delete_chirp_only_by_author() {
    let app = spawn_app().await;
    let alice = app.register("alice@b.com").await;
    let bob = app.register("bob@b.com").await;
    app.post_chirp(&token(&alice, "token"), "mine").await;

    let delete = |session: &Value| {
        app.client
            .delete(app.url("/api/chirps/1"))
            .bearer_auth(token(session, "token"))
            .send()
    };

    let forbidden = delete(&bob).await.unwrap();
    assert_eq!(403, forbidden.status().as_u16());
    assert_eq!(app.list_chirps("").await.len(), 1);

    let deleted = delete(&alice).await.unwrap();
    assert_eq!(200, deleted.status().as_u16());

    let again = delete(&alice).await.unwrap();
    assert_eq!(404, again.status().as_u16());
    assert!(app.list_chirps("").await.is_empty());
}

// --- Tokens ---

#[tokio::test]
async fn refresh_rejects_access_token() {
    let app = spawn_app().await;
    let session = app.register("a@b.com").await;

    let response = app
        .post_with_bearer("/api/refresh", &token(&session, "token"))
        .await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn refresh_rotates_refresh_token() {
    let app = spawn_app().await;
    let session = app.register("a@b.com").await;
    let refresh = token(&session, "refresh_token");

    let response = app.post_with_bearer("/api/refresh", &refresh).await;
    assert_eq!(200, response.status().as_u16());
    let rotated: Value = response.json().await.unwrap();

    // New access token works
    let chirp = app.post_chirp(&token(&rotated, "token"), "refreshed").await;
    assert_eq!(201, chirp.status().as_u16());

    // Old refresh token is spent
    let reused = app.post_with_bearer("/api/refresh", &refresh).await;
    assert_eq!(401, reused.status().as_u16());

    // Replacement refresh token works once
    let next = app
        .post_with_bearer("/api/refresh", &token(&rotated, "refresh_token"))
        .await;
    assert_eq!(200, next.status().as_u16());
}

#[tokio::test]
async fn revoked_refresh_token_cannot_refresh() {
    let app = spawn_app().await;
    let session = app.register("a@b.com").await;
    let refresh = token(&session, "refresh_token");

    let revoked = app.post_with_bearer("/api/revoke", &refresh).await;
    assert_eq!(200, revoked.status().as_u16());

    let response = app.post_with_bearer("/api/refresh", &refresh).await;
    assert_eq!(401, response.status().as_u16());

    let wrong_kind = app
        .post_with_bearer("/api/revoke", &token(&session, "token"))
        .await;
    assert_eq!(400, wrong_kind.status().as_u16());
}

// --- Polka ---

#[tokio::test]
async fn polka_webhook_upgrades_user() {
    let app = spawn_app().await;
    let session = app.register("a@b.com").await;

    let send = |key: &str, body: Value| {
        app.client
            .post(app.url("/api/polka/webhooks"))
            .header("Authorization", format!("ApiKey {}", key))
            .json(&body)
            .send()
    };

    let upgrade = json!({ "event": "user.upgraded", "data": { "user_id": session["id"] } });

    let wrong_key = send("nope", upgrade.clone()).await.unwrap();
    assert_eq!(401, wrong_key.status().as_u16());

    let ignored = send(POLKA_KEY, json!({ "event": "user.payment_failed", "data": {} }))
        .await
        .unwrap();
    assert_eq!(200, ignored.status().as_u16());

    let unknown = send(
        POLKA_KEY,
        json!({ "event": "user.upgraded", "data": { "user_id": 999 } }),
    )
    .await
    .unwrap();
    assert_eq!(404, unknown.status().as_u16());

    let ok = send(POLKA_KEY, upgrade).await.unwrap();
    assert_eq!(200, ok.status().as_u16());

    let body: Value = app.login("a@b.com", "04234").await.json().await.unwrap();
    assert_eq!(body["is_chirpy_red"], true);
}

// --- Static files and metrics ---

#[tokio::test]
async fn static_files_are_counted() {
    let app = spawn_app().await;
    std::fs::write(app.dir.path().join("hello.txt"), "hi there").unwrap();

    for _ in 0..2 {
        let response = app
            .client
            .get(app.url("/app/hello.txt"))
            .send()
            .await
            .unwrap();
        assert_eq!(200, response.status().as_u16());
        assert_eq!(response.text().await.unwrap(), "hi there");
    }

    let page = app
        .client
        .get(app.url("/admin/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("visited 2 times"));

    app.client.post(app.url("/api/reset")).send().await.unwrap();
    let page = app
        .client
        .get(app.url("/admin/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("visited 0 times"));
}
