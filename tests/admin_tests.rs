
use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use test_utils::*;
use uuid::Uuid;

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[actix_rt::test]
async fn admin_requires_a_session() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get().uri("/api/v1/admin/dashboard").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["view"], "login");
}

#[actix_rt::test]
async fn garbage_token_is_sent_to_login() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/dashboard")
        .insert_header(bearer("not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn dashboard_reports_each_slice_on_its_own() {
    let fakes = Fakes::new();
    fakes.skills.seed(skill("Figma", "Design"));
    let token = admin_token(&fakes);
    let mut repos = fakes.repos();
    repos.projects = failing_projects();
    let app = init_app(app_state(repos)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/dashboard")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["projects"]["status"], "failed");
    assert_eq!(body["skills"]["status"], "loaded");
    assert_eq!(body["skills"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["posts"]["status"], "loaded");
}

#[actix_rt::test]
async fn selecting_a_tab_starts_on_its_listing() {
    let fakes = Fakes::new();
    fakes.skills.seed(skill("Figma", "Design"));
    let token = admin_token(&fakes);
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/skills")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["tab"], "skills");
    assert_eq!(body["form"]["state"], "listing");
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn creating_a_tag_generates_its_slug() {
    let fakes = Fakes::new();
    let token = admin_token(&fakes);
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/tags")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Design Systems", "slug": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["alert"], "Created successfully!");
    assert_eq!(body["form"]["state"], "listing");
    assert_eq!(body["item"]["slug"], "design-systems");
    assert_eq!(fakes.tags.len(), 1);
}

#[actix_rt::test]
async fn invalid_skill_keeps_the_form_open() {
    let fakes = Fakes::new();
    let token = admin_token(&fakes);
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/skills")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Figma", "level": "150" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["alert"].as_str().unwrap().starts_with("Error:"));
    assert_eq!(body["form"]["state"], "form_open");
    assert_eq!(body["form"]["target"]["mode"], "create");
    assert_eq!(fakes.skills.len(), 0);
}

#[actix_rt::test]
async fn updating_a_missing_row_reports_not_found() {
    let fakes = Fakes::new();
    let token = admin_token(&fakes);
    let app = init_app(app_state(fakes.repos())).await;
    let id = Uuid::new_v4();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/admin/achievements/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Speaker" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["form"]["target"]["mode"], "edit");
    assert_eq!(body["form"]["target"]["id"], id.to_string());
}

#[actix_rt::test]
async fn delete_needs_confirmation() {
    let fakes = Fakes::new();
    let row = skill("Figma", "Design");
    let id = row.id;
    fakes.skills.seed(row);
    let token = admin_token(&fakes);
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/skills/{id}"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PRECONDITION_REQUIRED);
    assert_eq!(fakes.skills.len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/skills/{id}?confirm=true"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["alert"], "Deleted successfully!");
    assert_eq!(fakes.skills.len(), 0);
}

#[actix_rt::test]
async fn only_one_availability_status_stays_active() {
    let fakes = Fakes::new();
    let token = admin_token(&fakes);
    let app = init_app(app_state(fakes.repos())).await;

    for status in ["Available", "Booked"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/admin/availability")
            .insert_header(bearer(&token))
            .set_json(json!({ "status": status, "is_active": "on" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    assert_eq!(fakes.availability.active_count(), 1);

    let req = test::TestRequest::get().uri("/api/v1/pages/contact").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["availability"]["status"], "Booked");
}

#[actix_rt::test]
async fn malformed_id_is_rejected() {
    let fakes = Fakes::new();
    let token = admin_token(&fakes);
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::delete()
        .uri("/api/v1/admin/skills/not-a-uuid?confirm=true")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn unknown_tab_is_not_found() {
    let fakes = Fakes::new();
    let token = admin_token(&fakes);
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/invoices")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn published_posts_appear_on_the_blog() {
    let fakes = Fakes::new();
    let token = admin_token(&fakes);
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/posts")
        .insert_header(bearer(&token))
        .set_json(json!({
            "title": "Shipping Accessible Forms",
            "content": "Labels first.",
            "status": "published"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["item"]["slug"], "shipping-accessible-forms");
    assert!(body["item"]["published_at"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/v1/pages/blog/shipping-accessible-forms")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
