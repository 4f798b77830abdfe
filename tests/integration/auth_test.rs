//! Integration tests for the login/logout flow.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_health_probes_database() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], true);
}

#[tokio::test]
async fn test_login_success() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("testuser", "password123", "standard")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "testuser",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert!(data["access_token"].as_str().is_some());
    assert_eq!(data["token_type"], "bearer");
    assert_eq!(data["user"]["username"], "testuser");
    // Password material never leaves the server.
    assert!(data["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("testuser2", "password123", "standard")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "testuser2",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "INVALID_CREDENTIALS");
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("4 attempts remaining")
    );
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "nobody",
                "password": "password123",
            })),
            None,
        )
        .await;

    // Indistinguishable from a wrong password.
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_disabled_account() {
    let app = helpers::TestApp::new().await;
    let id = app
        .create_test_user("disableduser", "password123", "standard")
        .await;
    sqlx::query("UPDATE users SET enabled = FALSE WHERE id = $1")
        .bind(id)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "disableduser",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "ACCOUNT_DISABLED");
}

#[tokio::test]
async fn test_me_authenticated() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("meuser", "password123", "admin").await;
    let token = app.login("meuser", "password123").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "meuser");
    assert_eq!(response.body["data"]["role"], "admin");
}

#[tokio::test]
async fn test_me_unauthenticated() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_garbage_token() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("GET", "/api/auth/me", None, Some("not.a.token"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "TOKEN_INVALID");
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("logoutuser", "password123", "standard")
        .await;
    let token = app.login("logoutuser", "password123").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Token no longer resolves to an active session.
    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "SESSION_REVOKED");

    // A second logout with the same dead token still succeeds.
    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_without_token_succeeds() {
    let app = helpers::TestApp::new().await;

    // No bearer token at all: nothing to revoke, still a success.
    let response = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], "Logged out successfully");
}

#[tokio::test]
async fn test_login_records_audit_trail() {
    let app = helpers::TestApp::new().await;
    let admin = app
        .create_test_user("audit_admin", "password123", "admin")
        .await;
    let _ = admin;

    // One unknown-username failure, then a success.
    app.request(
        "POST",
        "/api/auth/login",
        Some(serde_json::json!({"username": "ghost", "password": "x"})),
        None,
    )
    .await;
    let token = app.login("audit_admin", "password123").await;

    let response = app
        .request("GET", "/api/admin/login-history", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let attempts = response.body["data"].as_array().unwrap();
    assert_eq!(attempts.len(), 2);
    // Newest first: the successful admin login.
    assert_eq!(attempts[0]["success"], true);
    assert_eq!(attempts[0]["username"], "audit_admin");
    // The unknown username carries no identity but keeps the name.
    assert_eq!(attempts[1]["success"], false);
    assert_eq!(attempts[1]["username"], "ghost");
    assert!(attempts[1]["user_id"].is_null());
}
