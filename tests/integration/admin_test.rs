//! Integration tests for the admin surface.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("plainuser", "password123", "standard")
        .await;
    let token = app.login("plainuser", "password123").await;

    for (method, path) in [
        ("GET", "/api/admin/users"),
        ("GET", "/api/admin/sessions"),
        ("GET", "/api/admin/login-history"),
    ] {
        let response = app.request(method, path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{method} {path}");
        assert_eq!(response.body["error"], "ADMIN_REQUIRED");
    }
}

#[tokio::test]
async fn test_create_and_list_users() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("root_admin", "password123", "admin")
        .await;
    let token = app.login("root_admin", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(serde_json::json!({
                "username": "newanalyst",
                "password": "longenough",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "newanalyst");
    assert_eq!(response.body["data"]["role"], "standard");

    // Duplicate username is a conflict.
    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(serde_json::json!({
                "username": "newanalyst",
                "password": "longenough",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request("GET", "/api/admin/users", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["items"].as_array().unwrap().len(), 2);

    // The new user can actually log in.
    let analyst_token = app.login("newanalyst", "longenough").await;
    assert!(!analyst_token.is_empty());
}

#[tokio::test]
async fn test_disable_user_kills_their_sessions() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("kill_admin", "password123", "admin")
        .await;
    let victim_id = app
        .create_test_user("victim", "password123", "standard")
        .await;

    let victim_token = app.login("victim", "password123").await;
    let admin_token = app.login("kill_admin", "password123").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{victim_id}"),
            Some(serde_json::json!({"enabled": false})),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["enabled"], false);

    assert_eq!(app.active_session_count(victim_id).await, 0);
    let response = app
        .request("GET", "/api/auth/me", None, Some(&victim_token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reset_password_revokes_sessions_and_unlocks() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("pw_admin", "password123", "admin")
        .await;
    let user_id = app
        .create_test_user("forgetful", "oldpassword", "standard")
        .await;

    // Two live sessions and a couple of failed attempts on the counter.
    let old_token = app.login("forgetful", "oldpassword").await;
    app.login("forgetful", "oldpassword").await;
    for _ in 0..3 {
        app.request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({"username": "forgetful", "password": "nope"})),
            None,
        )
        .await;
    }

    let admin_token = app.login("pw_admin", "password123").await;
    let response = app
        .request(
            "POST",
            &format!("/api/admin/users/{user_id}/reset-password"),
            Some(serde_json::json!({"new_password": "brandnewpass"})),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["revoked"], 2);

    // No session survives the credential change.
    assert_eq!(app.active_session_count(user_id).await, 0);
    let response = app
        .request("GET", "/api/auth/me", None, Some(&old_token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // Old password is dead, new one works, counter is clean.
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({"username": "forgetful", "password": "oldpassword"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let token = app.login("forgetful", "brandnewpass").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_list_and_revoke_sessions() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("sess_admin", "password123", "admin")
        .await;
    let user_id = app
        .create_test_user("sessowner", "password123", "standard")
        .await;

    let user_token = app.login("sessowner", "password123").await;
    let admin_token = app.login("sess_admin", "password123").await;

    // Filtered list shows only the target user's session.
    let response = app
        .request(
            "GET",
            &format!("/api/admin/sessions?user_id={user_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let sessions = response.body["data"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    // Raw tokens are never exposed to the admin view.
    assert!(sessions[0].get("token").is_none());
    let session_id = sessions[0]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/admin/sessions/{session_id}/revoke"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Idempotent: revoking again still succeeds.
    let response = app
        .request(
            "POST",
            &format!("/api/admin/sessions/{session_id}/revoke"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/auth/me", None, Some(&user_token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // An ID that matches no session at all is a 404, not a silent success.
    let response = app
        .request(
            "POST",
            &format!("/api/admin/sessions/{}/revoke", uuid::Uuid::new_v4()),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_revoke_all_sessions_for_user() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("bulk_admin", "password123", "admin")
        .await;
    let user_id = app
        .create_test_user("bulkuser", "password123", "standard")
        .await;

    app.login("bulkuser", "password123").await;
    app.login("bulkuser", "password123").await;
    let admin_token = app.login("bulk_admin", "password123").await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/sessions/revoke-all/{user_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["revoked"], 2);
    assert_eq!(app.active_session_count(user_id).await, 0);
}

#[tokio::test]
async fn test_login_history_filter_by_user() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("hist_admin", "password123", "admin")
        .await;
    let user_id = app
        .create_test_user("histuser", "password123", "standard")
        .await;

    app.login("histuser", "password123").await;
    app.request(
        "POST",
        "/api/auth/login",
        Some(serde_json::json!({"username": "histuser", "password": "bad"})),
        None,
    )
    .await;
    let admin_token = app.login("hist_admin", "password123").await;

    let response = app
        .request(
            "GET",
            &format!("/api/admin/login-history?user_id={user_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let attempts = response.body["data"].as_array().unwrap();
    assert_eq!(attempts.len(), 2);
    assert!(attempts.iter().all(|a| a["username"] == "histuser"));
    // Newest first: the failure came after the success.
    assert_eq!(attempts[0]["success"], false);
    assert_eq!(attempts[1]["success"], true);
}
