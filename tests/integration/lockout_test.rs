//! Integration tests for the failed-login lockout policy.

mod helpers;

use http::StatusCode;

async fn fail_login(app: &helpers::TestApp, username: &str) -> helpers::TestResponse {
    app.request(
        "POST",
        "/api/auth/login",
        Some(serde_json::json!({
            "username": username,
            "password": "definitely-wrong",
        })),
        None,
    )
    .await
}

#[tokio::test]
async fn test_lockout_after_max_attempts() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lockme", "password123", "standard")
        .await;

    // Four failures count down the remaining attempts.
    for remaining in [4, 3, 2, 1] {
        let response = fail_login(&app, "lockme").await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert!(
            response.body["message"]
                .as_str()
                .unwrap()
                .contains(&format!("{remaining} attempts remaining")),
            "unexpected message: {:?}",
            response.body
        );
    }

    // The fifth failure locks the account.
    let response = fail_login(&app, "lockme").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "ACCOUNT_LOCKED");

    // The correct password no longer helps. Locked stays locked.
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "lockme",
                "password": "password123",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "ACCOUNT_LOCKED");
}

#[tokio::test]
async fn test_successful_login_resets_counter() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("resetme", "password123", "standard")
        .await;

    for _ in 0..3 {
        fail_login(&app, "resetme").await;
    }
    app.login("resetme", "password123").await;

    // Counter went back to zero: four fresh failures do not lock.
    for _ in 0..4 {
        let response = fail_login(&app, "resetme").await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
    let token = app.login("resetme", "password123").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_admin_reenable_unlocks_account() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("unlock_admin", "password123", "admin")
        .await;
    let user_id = app
        .create_test_user("lockedout", "password123", "standard")
        .await;

    for _ in 0..5 {
        fail_login(&app, "lockedout").await;
    }

    let admin_token = app.login("unlock_admin", "password123").await;
    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{user_id}"),
            Some(serde_json::json!({"enabled": true})),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["failed_login_attempts"], 0);

    // Unlocked user logs in again.
    let token = app.login("lockedout", "password123").await;
    assert!(!token.is_empty());
}
