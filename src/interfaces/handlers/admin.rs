use actix_web::{http::StatusCode, web, HttpResponse, Responder, ResponseError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::{
    admin_form::{AdminAction, AdminOutcome, AdminTab, EditTarget, FormState},
    errors::AppError,
    use_cases::{
        admin::{AdminCommand, TabRows},
        extractors::AuthClaims,
    },
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// A freshly selected tab always starts on its listing.
#[derive(Debug, Serialize)]
pub struct TabListing {
    pub form: FormState,
    #[serde(flatten)]
    pub rows: TabRows,
}

fn respond<T: serde::Serialize>(
    tab: AdminTab,
    form: FormState,
    action: AdminAction,
    result: Result<T, AppError>,
) -> HttpResponse {
    match result {
        Ok(item) => {
            let status = match action {
                AdminAction::Create => StatusCode::CREATED,
                _ => StatusCode::OK,
            };
            let outcome = AdminOutcome::settle(tab, form, action, Ok::<_, &AppError>(item));
            HttpResponse::build(status).json(outcome)
        }
        Err(err) => {
            tracing::warn!(%tab, "Admin {:?} failed: {}", action, err);
            let outcome = AdminOutcome::<T>::settle(tab, form, action, Err(&err));
            HttpResponse::build(err.status_code()).json(outcome)
        }
    }
}

#[instrument(skip(_claims, state))]
pub async fn dashboard(_claims: AuthClaims, state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.admin_handler.dashboard().await)
}

#[instrument(skip(_claims, state))]
pub async fn list_tab(
    _claims: AuthClaims,
    state: web::Data<AppState>,
    tab: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let tab: AdminTab = tab.parse()?;
    let rows = state.admin_handler.list(tab).await?;
    Ok(HttpResponse::Ok().json(TabListing { form: FormState::Listing, rows }))
}

#[instrument(skip(_claims, state, payload))]
pub async fn create_item(
    _claims: AuthClaims,
    state: web::Data<AppState>,
    tab: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let tab: AdminTab = tab.parse()?;
    let form = FormState::open(EditTarget::Create);

    let result = match AdminCommand::decode(tab, payload.into_inner()) {
        Ok(command) => state.admin_handler.create(&command).await,
        Err(e) => Err(e),
    };
    Ok(respond(tab, form, AdminAction::Create, result))
}

#[instrument(skip(_claims, state, payload))]
pub async fn update_item(
    _claims: AuthClaims,
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    payload: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let (tab, id) = path.into_inner();
    let tab: AdminTab = tab.parse()?;
    let id = valid_uuid(&id)?;
    let form = FormState::open(EditTarget::Edit { id });

    let result = match AdminCommand::decode(tab, payload.into_inner()) {
        Ok(command) => state.admin_handler.update(&id, &command).await,
        Err(e) => Err(e),
    };
    Ok(respond(tab, form, AdminAction::Update, result))
}

/// Requires `?confirm=true`; without it nothing is deleted and 428 is returned.
#[instrument(skip(_claims, state))]
pub async fn delete_item(
    _claims: AuthClaims,
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<DeleteQuery>,
) -> Result<impl Responder, AppError> {
    let (tab, id) = path.into_inner();
    let tab: AdminTab = tab.parse()?;
    let id = valid_uuid(&id)?;

    let result = state.admin_handler.delete(tab, &id, query.confirm).await;
    Ok(respond(tab, FormState::Listing, AdminAction::Delete, result))
}
