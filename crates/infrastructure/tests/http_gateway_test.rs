//! HTTP 认证网关集成测试
//!
//! 用 wiremock 模拟后端，验证三个端点的状态码映射与
//! 请求/响应契约。

use application::{AuthGateway, GatewayError};
use config::ApiConfig;
use domain::{LoginCredentials, RegistrationDraft};
use infrastructure::HttpAuthGateway;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> HttpAuthGateway {
    let config = ApiConfig {
        base_url: server.uri(),
        request_timeout_ms: 2000,
    };
    HttpAuthGateway::new(&config).unwrap()
}

fn credentials() -> LoginCredentials {
    LoginCredentials {
        login: "alice".to_string(),
        password: "Secret1!".to_string(),
    }
}

fn draft() -> RegistrationDraft {
    RegistrationDraft {
        login: "alice".to_string(),
        nickname: "Ally".to_string(),
        email: "alice@example.com".to_string(),
        password: "Aa1@aaaa".to_string(),
    }
}

#[tokio::test]
async fn test_login_success_returns_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"login": "alice", "password": "Secret1!"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "fake-jwt-token-for-alice",
            "username": "alice",
            "nickname": "Ally"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let token = gateway.login(credentials()).await.unwrap();
    assert_eq!(token.as_str(), "fake-jwt-token-for-alice");
}

#[tokio::test]
async fn test_login_401_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"message": "Invalid login or password!"})),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let result = gateway.login(credentials()).await;
    assert_eq!(result.err().unwrap(), GatewayError::Unauthorized);
}

#[tokio::test]
async fn test_login_500_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    match gateway.login(credentials()).await.err().unwrap() {
        GatewayError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_login_without_server_maps_to_connectivity() {
    // 不可达端口，连接被拒绝
    let config = ApiConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        request_timeout_ms: 500,
    };
    let gateway = HttpAuthGateway::new(&config).unwrap();

    let result = gateway.login(credentials()).await;
    assert!(matches!(
        result.err().unwrap(),
        GatewayError::Connectivity(_)
    ));
}

#[tokio::test]
async fn test_login_with_empty_token_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": ""})))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    assert!(matches!(
        gateway.login(credentials()).await.err().unwrap(),
        GatewayError::Status { status: 200, .. }
    ));
}

#[tokio::test]
async fn test_signup_success_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .and(body_json(json!({
            "login": "alice",
            "nickname": "Ally",
            "email": "alice@example.com",
            "password": "Aa1@aaaa"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("User registered and joined default channel!"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    assert!(gateway.signup(draft()).await.is_ok());
}

#[tokio::test]
async fn test_signup_rejection_body_surfaces_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Login already exists"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    match gateway.signup(draft()).await.err().unwrap() {
        GatewayError::Status { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "Login already exists");
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_profile_parses_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(query_param("login", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "alice",
            "nickname": "Ally",
            "email": "alice@example.com",
            "roles": "user",
            "createdAt": "2025-03-01T10:15:30"
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let profile = gateway.fetch_profile("alice").await.unwrap();
    assert_eq!(profile.login, "alice");
    assert_eq!(profile.nickname, "Ally");
    assert_eq!(profile.roles, "user");
    assert_eq!(profile.created_at.to_string(), "2025-03-01 10:15:30");
}

#[tokio::test]
async fn test_fetch_profile_404_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(ResponseTemplate::new(404).set_body_string("That user doesn't exist"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    match gateway.fetch_profile("ghost").await.err().unwrap() {
        GatewayError::Status { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "That user doesn't exist");
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
}
