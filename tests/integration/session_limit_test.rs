//! Integration tests for the per-user session cap and FIFO eviction.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_third_login_evicts_oldest_session() {
    let app = helpers::TestApp::new().await;
    let user_id = app
        .create_test_user("capuser", "password123", "standard")
        .await;

    let first = app.login("capuser", "password123").await;
    let second = app.login("capuser", "password123").await;
    let third = app.login("capuser", "password123").await;

    // Cap is 2: the oldest session died, the two newest survive.
    assert_eq!(app.active_session_count(user_id).await, 2);

    let response = app.request("GET", "/api/auth/me", None, Some(&first)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "SESSION_REVOKED");

    for token in [&second, &third] {
        let response = app.request("GET", "/api/auth/me", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_cap_is_per_user() {
    let app = helpers::TestApp::new().await;
    let alice = app
        .create_test_user("alice_cap", "password123", "standard")
        .await;
    let bob = app
        .create_test_user("bob_cap", "password123", "standard")
        .await;

    let alice_token = app.login("alice_cap", "password123").await;
    app.login("bob_cap", "password123").await;
    app.login("bob_cap", "password123").await;

    // Bob filling his own cap does not touch Alice's session.
    assert_eq!(app.active_session_count(alice).await, 1);
    assert_eq!(app.active_session_count(bob).await, 2);

    let response = app
        .request("GET", "/api/auth/me", None, Some(&alice_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_session_tokens_are_unique() {
    let app = helpers::TestApp::new().await;
    let user_id = app
        .create_test_user("tokendupe", "password123", "standard")
        .await;

    let insert = "INSERT INTO sessions (user_id, token) VALUES ($1, $2)";
    sqlx::query(insert)
        .bind(user_id)
        .bind("repeated-token")
        .execute(&app.db_pool)
        .await
        .unwrap();

    // The schema rejects a second row carrying the same token, so
    // token-keyed lookups and revocations match at most one session.
    let duplicate = sqlx::query(insert)
        .bind(user_id)
        .bind("repeated-token")
        .execute(&app.db_pool)
        .await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_logout_frees_a_slot() {
    let app = helpers::TestApp::new().await;
    let user_id = app
        .create_test_user("slotuser", "password123", "standard")
        .await;

    let first = app.login("slotuser", "password123").await;
    let second = app.login("slotuser", "password123").await;

    app.request("POST", "/api/auth/logout", None, Some(&first))
        .await;
    assert_eq!(app.active_session_count(user_id).await, 1);

    // A third login fits without evicting the second.
    let third = app.login("slotuser", "password123").await;
    assert_eq!(app.active_session_count(user_id).await, 2);

    for token in [&second, &third] {
        let response = app.request("GET", "/api/auth/me", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::OK);
    }
}
