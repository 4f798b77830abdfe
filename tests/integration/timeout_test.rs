//! Integration tests for the sliding inactivity timeout.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_idle_session_times_out() {
    let app = helpers::TestApp::new().await;
    let user_id = app
        .create_test_user("idleuser", "password123", "standard")
        .await;
    let token = app.login("idleuser", "password123").await;

    // Past the 10-minute window.
    app.age_session(&token, 11).await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "SESSION_TIMED_OUT");

    // Timing out deactivated the row.
    assert_eq!(app.active_session_count(user_id).await, 0);

    // Once timed out, the session stays dead.
    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "SESSION_REVOKED");
}

#[tokio::test]
async fn test_activity_slides_the_window() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("activeuser", "password123", "standard")
        .await;
    let token = app.login("activeuser", "password123").await;

    // Nine idle minutes, then a request: still inside the window, and the
    // request itself refreshes last_activity.
    app.age_session(&token, 9).await;
    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    // Another nine idle minutes after the refresh: still alive.
    app.age_session(&token, 9).await;
    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_partial_minute_past_timeout_expires() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("fractionuser", "password123", "standard")
        .await;
    let token = app.login("fractionuser", "password123").await;

    // 10m59s idle: expired even though whole minutes alone read as 10.
    app.age_session_seconds(&token, 10 * 60 + 59).await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "SESSION_TIMED_OUT");
}

#[tokio::test]
async fn test_exactly_at_timeout_is_not_expired() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("edgeuser", "password123", "standard")
        .await;
    let token = app.login("edgeuser", "password123").await;

    // The comparison is strictly greater-than.
    app.age_session(&token, 10).await;
    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
}
