//! End-to-end behavior of the accounts scope over HTTP: CRUD with a valid
//! token, validation failures, sanitization, and the login flow that issues
//! usable tokens.

mod common;

use actix_web::{test, web, App};
use backend::{routes, RequestTrace};
use serde_json::json;

use common::{call_json, test_state, token_for};

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestTrace)
                .app_data(web::Data::new($state.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

fn draft(username: &str, email: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": email,
        "credential": "s3cret-pw",
        "access": 1,
    })
}

#[actix_web::test]
async fn crud_roundtrip_over_http() {
    let state = test_state();
    let app = app!(state);
    let token = token_for("operator");

    // Create.
    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(("Authorization", token.clone()))
        .set_json(draft("alice", "alice@example.com"))
        .to_request();
    let (status, created) = call_json(&app, req).await;
    assert_eq!(status, 201);
    assert_eq!(created["username"], "alice");
    assert_eq!(created["email"], "alice@example.com");
    assert_eq!(created["access"], 1);
    // The stored credential never appears in a response.
    assert!(created.get("credential").is_none());
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

    // Read back.
    let req = test::TestRequest::get()
        .uri(&format!("/api/accounts/{id}"))
        .insert_header(("Authorization", token.clone()))
        .to_request();
    let (status, fetched) = call_json(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(fetched, created);

    // Update the email; empty credential keeps the stored hash.
    let req = test::TestRequest::put()
        .uri(&format!("/api/accounts/{id}"))
        .insert_header(("Authorization", token.clone()))
        .set_json(json!({
            "username": "alice",
            "email": "alice@rollcall.app",
            "access": 1,
        }))
        .to_request();
    let (status, updated) = call_json(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["email"], "alice@rollcall.app");

    // Listing shows the single updated account.
    let req = test::TestRequest::get()
        .uri("/api/accounts")
        .insert_header(("Authorization", token.clone()))
        .to_request();
    let (status, listing) = call_json(&app, req).await;
    assert_eq!(status, 200);
    let listing = listing.as_array().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0]["email"], "alice@rollcall.app");

    // Delete, then the id is gone.
    let req = test::TestRequest::delete()
        .uri(&format!("/api/accounts/{id}"))
        .insert_header(("Authorization", token.clone()))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/accounts/{id}"))
        .insert_header(("Authorization", token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], "ACCOUNT_NOT_FOUND");
}

#[actix_web::test]
async fn rejected_create_writes_nothing() {
    let state = test_state();
    let app = app!(state);
    let token = token_for("operator");

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(("Authorization", token.clone()))
        .set_json(json!({
            "username": "bob",
            "email": "not-an-email",
            "credential": "s3cret-pw",
            "access": 0,
        }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "INVALID_EMAIL");

    let req = test::TestRequest::get()
        .uri("/api/accounts")
        .insert_header(("Authorization", token))
        .to_request();
    let (status, listing) = call_json(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(listing, json!([]));
}

#[actix_web::test]
async fn out_of_range_tier_is_rejected() {
    let state = test_state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(("Authorization", token_for("operator")))
        .set_json(json!({
            "username": "carol",
            "email": "carol@example.com",
            "credential": "s3cret-pw",
            "access": 3,
        }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "INVALID_ACCESS_TIER");
}

#[actix_web::test]
async fn stored_fields_are_sanitized() {
    let state = test_state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(("Authorization", token_for("operator")))
        .set_json(draft("  <b>eve</b>  ", "eve@example.com"))
        .to_request();
    let (status, created) = call_json(&app, req).await;
    assert_eq!(status, 201);
    assert_eq!(created["username"], "&lt;b&gt;eve&lt;/b&gt;");
}

#[actix_web::test]
async fn malformed_and_absent_ids_return_the_same_not_found() {
    let state = test_state();
    let app = app!(state);
    let token = token_for("operator");

    // Not hex at all.
    let req = test::TestRequest::get()
        .uri("/api/accounts/zzz")
        .insert_header(("Authorization", token.clone()))
        .to_request();
    let (malformed_status, malformed_body) = call_json(&app, req).await;

    // Well-formed but absent.
    let req = test::TestRequest::get()
        .uri("/api/accounts/0123456789abcdef01234567")
        .insert_header(("Authorization", token))
        .to_request();
    let (absent_status, absent_body) = call_json(&app, req).await;

    assert_eq!(malformed_status, 404);
    assert_eq!(absent_status, 404);
    assert_eq!(malformed_body["code"], absent_body["code"]);
    assert_eq!(malformed_body["detail"], absent_body["detail"]);
}

#[actix_web::test]
async fn login_issues_a_token_that_opens_the_guarded_scope() {
    let state = test_state();
    let app = app!(state);

    // Provision an account through the API first.
    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(("Authorization", token_for("operator")))
        .set_json(draft("dave", "dave@example.com"))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, 201);

    // Wrong credential is rejected without leaking which part failed.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": "dave", "credential": "wrong"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, 401);
    assert_eq!(body["code"], "UNAUTHORIZED");

    // The right credential yields a token the guard accepts.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": "dave", "credential": "s3cret-pw"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, 200);
    let token = body["token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    let req = test::TestRequest::get()
        .uri("/api/accounts")
        .insert_header(("Authorization", token))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, 200);
}

#[actix_web::test]
async fn login_rejects_blank_fields_before_probing_the_store() {
    let state = test_state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": "   ", "credential": "x"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "INVALID_USERNAME");

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": "dave"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "INVALID_CREDENTIAL");
}
