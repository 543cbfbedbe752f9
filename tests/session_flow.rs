mod common;

use common::{TestApp, video_json};
use mockito::Matcher;
use serde_json::json;
use tubedeck::core::viewmodels::LoginOutcome;
use tubedeck::models::{DisplayMode, OperationStatus, Session};
use tubedeck::services::CredentialStore;

#[tokio::test]
async fn test_login_persists_token_and_loads_videos() {
    let mut t = TestApp::new().await;
    let login = t
        .server
        .mock("POST", "/auth/login")
        .match_body(Matcher::Json(json!({"email": "a@x.com", "password": "pw"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"access_token": "T"}).to_string())
        .create_async()
        .await;
    let videos = t
        .mock_videos("T", json!([video_json("1", "Banana"), video_json("2", "apple")]))
        .await;

    assert_eq!(t.app.login("a@x.com", "pw").await, LoginOutcome::Authenticated);

    login.assert_async().await;
    videos.assert_async().await;
    assert_eq!(t.store.get().unwrap().unwrap().as_str(), "T");
    let titles: Vec<_> = t.app.dashboard().into_iter().map(|v| v.title).collect();
    assert_eq!(titles, vec!["apple", "Banana"]);
}

#[tokio::test]
async fn test_login_without_token_shows_invalid_credentials() {
    let mut t = TestApp::new().await;
    t.mock_status("POST", "/auth/login", 401, json!({"message": "Invalid credentials"}))
        .await;
    let videos = t.mock_videos("T", json!([])).await;

    assert_eq!(t.app.login("a@x.com", "bad").await, LoginOutcome::Rejected);

    assert!(!videos.matched_async().await);
    assert_eq!(t.app.session(), Session::Anonymous);
    assert_eq!(
        t.app.status(),
        OperationStatus::Error("Invalid login credentials".into())
    );
}

#[tokio::test]
async fn test_restart_restores_session_then_logout_clears_everything() {
    let mut t = TestApp::with_saved_token("saved").await;
    t.mock_videos("saved", json!([video_json("1", "Cats")])).await;

    t.app.initialize().await;
    assert!(t.app.is_authenticated());

    let cats = t.app.videos()[0].clone();
    t.app.select(cats);
    assert_eq!(t.app.display_mode(), DisplayMode::Player);
    assert_eq!(
        t.app.now_playing().unwrap().stream_url,
        format!("{}/video/1/stream", t.server.url())
    );

    t.app.logout();

    assert_eq!(t.app.display_mode(), DisplayMode::Dashboard);
    assert!(t.app.videos().is_empty());
    assert!(t.store.get().unwrap().is_none());
}

#[tokio::test]
async fn test_register_reports_server_refusal() {
    let mut t = TestApp::new().await;
    t.server
        .mock("POST", "/auth/signup")
        .match_body(Matcher::PartialJson(json!({"email": "taken@x.com"})))
        .with_status(400)
        .with_body(json!({"message": "User already exists"}).to_string())
        .create_async()
        .await;
    t.server
        .mock("POST", "/auth/signup")
        .match_body(Matcher::PartialJson(json!({"email": "new@x.com"})))
        .with_status(201)
        .with_body(json!({"message": "User registered successfully"}).to_string())
        .create_async()
        .await;

    assert!(!t.app.register("Ann", "taken@x.com", "pw").await);
    assert_eq!(
        t.app.status(),
        OperationStatus::Error("User already exists".into())
    );

    assert!(t.app.register("Ann", "new@x.com", "pw").await);
    assert!(!t.app.is_authenticated());
    assert_eq!(
        t.app.status(),
        OperationStatus::Success("Account created, please log in".into())
    );
}

#[tokio::test]
async fn test_whoami() {
    let mut t = TestApp::with_saved_token("T").await;
    t.server
        .mock("GET", "/auth/me")
        .match_header("authorization", "Bearer T")
        .with_status(200)
        .with_body(json!({"name": "Ann", "email": "a@x.com"}).to_string())
        .create_async()
        .await;

    t.app.restore();
    let profile = t.app.profile().await.unwrap();
    assert_eq!(profile.name, "Ann");
}
