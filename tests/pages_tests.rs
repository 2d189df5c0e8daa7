
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use actix_web::{http::StatusCode, test};
use portfolio_site::entities::{availability::AvailabilityStatus, blog_post::BlogPostDetail};
use serde_json::{json, Value};
use test_utils::*;
use uuid::Uuid;

#[actix_rt::test]
async fn home_page_with_no_content_shows_empty_sections() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get().uri("/api/v1/pages/home").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["hero"]["title"], "Product Designer");
    assert_eq!(body["featured_projects"]["state"], "empty");
    assert_eq!(body["latest_posts"]["state"], "empty");
}

#[actix_rt::test]
async fn home_page_lists_at_most_three_projects() {
    let fakes = Fakes::new();
    for i in 0..5 {
        fakes.projects.seed(project(&format!("Project {i}"), &["Web Design"]));
    }
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get().uri("/api/v1/pages/home").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["featured_projects"]["source"], "live");
    assert_eq!(body["featured_projects"]["data"].as_array().unwrap().len(), 3);
}

#[actix_rt::test]
async fn home_page_serves_static_projects_when_the_read_fails() {
    let fakes = Fakes::new();
    fakes.posts.seed(post("hello-world", "published"));
    let mut repos = fakes.repos();
    repos.projects = failing_projects();
    let app = init_app(app_state(repos)).await;

    let req = test::TestRequest::get().uri("/api/v1/pages/home").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["featured_projects"]["state"], "ready");
    assert_eq!(body["featured_projects"]["source"], "fallback");
    assert_eq!(body["featured_projects"]["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["latest_posts"]["source"], "live");
}

#[actix_rt::test]
async fn projects_page_falls_back_when_the_read_fails() {
    let fakes = Fakes::new();
    let mut repos = fakes.repos();
    repos.projects = failing_projects();
    let app = init_app(app_state(repos)).await;

    let req = test::TestRequest::get().uri("/api/v1/pages/projects").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["state"], "ready");
    assert_eq!(body["source"], "fallback");
    assert!(!body["data"]["projects"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn projects_filter_keeps_exact_tag_matches() {
    let fakes = Fakes::new();
    fakes.projects.seed(project("Checkout Flow", &["UI/UX", "Frontend"]));
    fakes.projects.seed(project("Brand Refresh", &["Branding"]));
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/pages/projects?filter=UI%2FUX")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["active_filter"], "UI/UX");
    let projects = body["data"]["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["title"], "Checkout Flow");
}

#[actix_rt::test]
async fn unknown_project_is_not_found_with_back_link() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/pages/projects/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["state"], "not_found");
    assert_eq!(body["back_link"]["href"], "/projects");
}

#[actix_rt::test]
async fn project_detail_excludes_itself_from_related() {
    let fakes = Fakes::new();
    let main = project("Main", &["Web Design"]);
    let id = main.id;
    fakes.projects.seed(main);
    fakes.projects.seed(project("Other", &["Branding"]));
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/pages/projects/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["project"]["title"], "Main");
    let related = body["data"]["related"].as_array().unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0]["title"], "Other");
}

#[actix_rt::test]
async fn reading_a_post_increments_its_views() {
    let fakes = Fakes::new();
    fakes.posts.seed(post("hello-world", "published"));
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get().uri("/api/v1/pages/blog/hello-world").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["state"], "ready");
    let html = body["data"]["post"]["content_html"].as_str().unwrap();
    assert!(html.contains("<strong>bold</strong>"));

    for _ in 0..50 {
        if fakes.posts.views("hello-world") == Some(1) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(fakes.posts.views("hello-world"), Some(1));
}

#[actix_rt::test]
async fn failed_view_increment_is_not_surfaced() {
    let detail = BlogPostDetail { post: post("p", "published"), category: None, tags: vec![] };
    let attempts = Arc::new(AtomicUsize::new(0));
    let seen = attempts.clone();

    let mut posts = MockPostRepo::new();
    posts
        .expect_get_published_by_slug()
        .returning(move |_| Ok(Some(detail.clone())));
    posts.expect_list_published().returning(|_| Ok(vec![]));
    posts.expect_increment_views().returning(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        Err(db_down())
    });

    let fakes = Fakes::new();
    let mut repos = fakes.repos();
    repos.posts = Arc::new(posts);
    let app = init_app(app_state(repos)).await;

    let req = test::TestRequest::get().uri("/api/v1/pages/blog/p").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["state"], "ready");
    assert_eq!(body["data"]["post"]["slug"], "p");

    for _ in 0..50 {
        if attempts.load(Ordering::SeqCst) == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[actix_rt::test]
async fn draft_posts_are_not_found() {
    let fakes = Fakes::new();
    fakes.posts.seed(post("work-in-progress", "draft"));
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/pages/blog/work-in-progress")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["back_link"]["href"], "/blog");
    assert_eq!(fakes.posts.views("work-in-progress"), Some(0));
}

#[actix_rt::test]
async fn blog_falls_back_when_the_read_fails() {
    let fakes = Fakes::new();
    let mut repos = fakes.repos();
    repos.posts = failing_posts();
    let app = init_app(app_state(repos)).await;

    let req = test::TestRequest::get().uri("/api/v1/pages/blog").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["source"], "fallback");
    assert!(!body["data"]["posts"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn about_page_filters_skills_by_category() {
    let fakes = Fakes::new();
    fakes.skills.seed(skill("Figma", "Design"));
    fakes.skills.seed(skill("React", "Frontend"));
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/pages/about?skill=Design")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["source"], "live");
    assert_eq!(body["data"]["active_skill_filter"], "Design");
    let skills = body["data"]["skills"].as_array().unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0]["name"], "Figma");
}

#[actix_rt::test]
async fn about_page_falls_back_one_section_at_a_time() {
    let fakes = Fakes::new();
    fakes.profiles.seed(profile("Sam Rivera"));
    let mut repos = fakes.repos();
    repos.skills = failing_skills();
    let app = init_app(app_state(repos)).await;

    let req = test::TestRequest::get().uri("/api/v1/pages/about").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["state"], "ready");
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["data"]["profile"]["name"], "Sam Rivera");
    assert!(body["data"]["skills"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn about_page_uses_the_default_profile_when_none_is_stored() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get().uri("/api/v1/pages/about").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["source"], "live");
    assert_eq!(body["data"]["profile"]["name"], "Profile");
}

#[actix_rt::test]
async fn contact_page_uses_default_availability_without_an_active_status() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get().uri("/api/v1/pages/contact").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["source"], "fallback");
    assert_eq!(body["data"]["availability"]["status"], "Available");
}

#[actix_rt::test]
async fn contact_page_shows_the_active_status() {
    let fakes = Fakes::new();
    fakes.availability.rows.lock().unwrap().push(AvailabilityStatus {
        id: Uuid::new_v4(),
        status: "Booked".into(),
        message: Some("Back in March".into()),
        is_active: true,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    });
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get().uri("/api/v1/pages/contact").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["source"], "live");
    assert_eq!(body["data"]["availability"]["status"], "Booked");
    assert_eq!(body["data"]["availability"]["message"], "Back in March");
}

#[actix_rt::test]
async fn resume_is_static() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get().uri("/api/v1/pages/resume").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["state"], "ready");
    assert_eq!(body["source"], "static");
}

#[actix_rt::test]
async fn site_chrome_lists_navigation() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get().uri("/api/v1/site").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let navigation = body["navigation"].as_array().unwrap();
    assert_eq!(navigation.len(), 6);
    assert_eq!(navigation[0]["href"], "/");
    assert_eq!(body["footer"]["admin_link"]["href"], "/login");
}

#[actix_rt::test]
async fn theme_defaults_to_dark_and_persists_in_a_cookie() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get().uri("/api/v1/preferences/theme").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["theme"], "dark");
    assert_eq!(body["origin"], "default");

    let req = test::TestRequest::put()
        .uri("/api/v1/preferences/theme")
        .set_json(json!({ "theme": "light" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "theme")
        .expect("theme cookie is set");
    assert_eq!(cookie.value(), "light");

    let req = test::TestRequest::post()
        .uri("/api/v1/preferences/theme/toggle")
        .cookie(actix_web::cookie::Cookie::new("theme", "light"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["theme"], "dark");
    assert_eq!(body["origin"], "cookie");
}

#[actix_rt::test]
async fn contact_form_is_rate_limited_after_five_submissions() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;
    let form = json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "message": "I'd like to talk about a project."
    });

    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/api/v1/contact")
            .set_json(&form)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/contact")
        .set_json(&form)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Too many requests, retry in"));
}

#[actix_rt::test]
async fn invalid_contact_form_is_rejected() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/contact")
        .set_json(json!({ "name": "A", "email": "not-an-email", "message": "hey" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}

#[actix_rt::test]
async fn malformed_json_gets_a_json_error() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/contact")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("JSON payload error"));
}

#[actix_rt::test]
async fn health_reports_database_status() {
    let fakes = Fakes::new();
    let app = init_app(app_state(fakes.repos())).await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["database"], "OK");
    assert_eq!(body["redis_status"], "Not configured");
}
