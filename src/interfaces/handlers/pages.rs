use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SkillQuery {
    pub skill: Option<String>,
}

#[instrument(skip(state))]
pub async fn home_page(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.pages_handler.home().await)
}

#[instrument(skip(state))]
pub async fn projects_page(
    state: web::Data<AppState>,
    query: web::Query<FilterQuery>,
) -> impl Responder {
    state.pages_handler.projects(query.filter.as_deref()).await.into_response()
}

#[instrument(skip(state))]
pub async fn project_detail_page(
    state: web::Data<AppState>,
    project_id: web::Path<String>,
) -> impl Responder {
    state.pages_handler.project_detail(&project_id).await.into_response()
}

#[instrument(skip(state))]
pub async fn blog_page(state: web::Data<AppState>) -> impl Responder {
    state.pages_handler.blog().await.into_response()
}

#[instrument(skip(state))]
pub async fn blog_post_page(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> impl Responder {
    state.pages_handler.blog_post(&slug).await.into_response()
}

/// `?skill=` selects a skill category; `All` or nothing shows every skill.
#[instrument(skip(state))]
pub async fn about_page(
    state: web::Data<AppState>,
    query: web::Query<SkillQuery>,
) -> impl Responder {
    state.pages_handler.about(query.skill.as_deref()).await.into_response()
}

pub async fn resume_page(state: web::Data<AppState>) -> impl Responder {
    state.pages_handler.resume().into_response()
}

#[instrument(skip(state))]
pub async fn contact_page(state: web::Data<AppState>) -> impl Responder {
    state.pages_handler.contact().await.into_response()
}
