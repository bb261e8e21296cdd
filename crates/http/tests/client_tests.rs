//! Integration tests for the VidyaSethu HTTP client

use serde_json::json;
use vidya_http::client::LoginChannel;
use vidya_http::types::{LoginRequest, RegisterRequest, Role};
use vidya_http::{ClientError, VidyaClient};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_exchanges_credentials_for_tokens() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user-login/"))
        .and(body_json(json!({
            "username": "alice",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "acc-1",
            "refresh": "ref-1"
        })))
        .mount(&mock_server)
        .await;

    let client = VidyaClient::new(mock_server.uri()).unwrap();
    let pair = client
        .login(
            LoginChannel::User,
            &LoginRequest {
                username: "alice".into(),
                password: "secret".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(pair.access, "acc-1");
    assert_eq!(pair.refresh, "ref-1");
}

#[tokio::test]
async fn admin_channel_uses_its_own_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin-login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "acc-admin",
            "refresh": "ref-admin"
        })))
        .mount(&mock_server)
        .await;

    let client = VidyaClient::new(mock_server.uri()).unwrap();
    let pair = client
        .login(
            LoginChannel::Admin,
            &LoginRequest {
                username: "principal1".into(),
                password: "secret".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(pair.access, "acc-admin");
}

#[tokio::test]
async fn me_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/"))
        .and(header("authorization", "Bearer acc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "username": "alice",
            "email": "alice@example.edu",
            "first_name": "Alice",
            "last_name": "Kumar",
            "role": "student",
            "college": 1
        })))
        .mount(&mock_server)
        .await;

    let client = VidyaClient::new(mock_server.uri()).unwrap();
    let identity = client.me("acc-1").await.unwrap();
    assert_eq!(identity.role, Role::Student);
    assert_eq!(identity.username, "alice");
}

#[tokio::test]
async fn refresh_posts_refresh_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .and(body_json(json!({"refresh": "ref-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "acc-2"})))
        .mount(&mock_server)
        .await;

    let client = VidyaClient::new(mock_server.uri()).unwrap();
    let refreshed = client.refresh_token("ref-1").await.unwrap();
    assert_eq!(refreshed.access, "acc-2");
}

#[tokio::test]
async fn register_does_not_require_authentication() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42,
            "email": "bob@example.edu",
            "username": "bob",
            "role": "faculty"
        })))
        .mount(&mock_server)
        .await;

    let client = VidyaClient::new(mock_server.uri()).unwrap();
    let created = client
        .register(&RegisterRequest {
            email: "bob@example.edu".into(),
            username: "bob".into(),
            first_name: "Bob".into(),
            last_name: "Iyer".into(),
            password: "pw".into(),
            password_confirm: "pw".into(),
            role: Role::Faculty,
            college: 1,
            department: Some(3),
        })
        .await
        .unwrap();

    assert_eq!(created.id, 42);
    assert_eq!(created.role, Role::Faculty);
}

#[tokio::test]
async fn error_statuses_map_to_variants() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&mock_server)
        .await;

    let client = VidyaClient::new(mock_server.uri()).unwrap();
    let result = client.me("stale").await;
    assert!(matches!(result, Err(ClientError::Unauthorized(_))));
}
