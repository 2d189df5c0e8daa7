
use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use test_utils::*;

const PASSWORD: &str = "Str0ng!Passphrase#2024";

fn credentials(email: &str) -> Value {
    json!({ "email": email, "password": PASSWORD })
}

async fn sign_in<S>(app: &S, email: &str) -> Value
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/sign-in")
        .set_json(credentials(email))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    test::read_body_json(resp).await
}

#[actix_rt::test]
async fn first_sign_up_succeeds_and_registration_then_closes() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/sign-up")
        .set_json(credentials("owner@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/sign-up")
        .set_json(credentials("intruder@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn weak_password_is_refused() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/sign-up")
        .set_json(json!({ "email": "owner@example.com", "password": "password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(fakes.users.users.lock().unwrap().is_empty());
}

#[actix_rt::test]
async fn sign_in_issues_a_token_pair() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/sign-up")
        .set_json(credentials("Owner@Example.com"))
        .to_request();
    test::call_service(&app, req).await;

    let tokens = sign_in(&app, "owner@example.com").await;
    assert!(!tokens["access_token"].as_str().unwrap().is_empty());
    assert!(!tokens["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(tokens["token_type"], "Bearer");
}

#[actix_rt::test]
async fn wrong_password_is_rejected() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/sign-up")
        .set_json(credentials("owner@example.com"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/sign-in")
        .set_json(json!({ "email": "owner@example.com", "password": "Not!The1Password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Wrong credentials");
}

#[actix_rt::test]
async fn signed_out_token_no_longer_opens_a_session() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/sign-up")
        .set_json(credentials("owner@example.com"))
        .to_request();
    test::call_service(&app, req).await;
    let tokens = sign_in(&app, "owner@example.com").await;
    let access = tokens["access_token"].as_str().unwrap().to_string();
    let refresh = tokens["refresh_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(session["user"]["email"], "owner@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/sign-out")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .set_json(json!({ "refresh_token": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["view"], "login");
    assert_eq!(body["error"], "Token revoked");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn refresh_rotates_and_revokes_the_old_token() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/sign-up")
        .set_json(credentials("owner@example.com"))
        .to_request();
    test::call_service(&app, req).await;
    let tokens = sign_in(&app, "owner@example.com").await;
    let refresh = tokens["refresh_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let rotated: Value = test::read_body_json(resp).await;
    assert_ne!(rotated["refresh_token"], tokens["refresh_token"]);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Token revoked");
}
