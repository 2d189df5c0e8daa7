use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        token::{RefreshTokenRequest, SignOutRequest},
        user::{LoginUser, NewUser},
    },
    errors::AuthError,
    use_cases::extractors::{AccessToken, AuthClaims},
    AppState,
};

#[instrument(skip(state, user), fields(email = %user.email))]
pub async fn sign_up(
    state: web::Data<AppState>,
    user: web::Json<NewUser>,
) -> Result<impl Responder, AuthError> {
    let response = state.auth_handler.sign_up(user.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state, user), fields(email = %user.email))]
pub async fn sign_in(
    state: web::Data<AppState>,
    user: web::Json<LoginUser>,
) -> Result<impl Responder, AuthError> {
    let response = state.auth_handler.sign_in(user.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state, request))]
pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<impl Responder, AuthError> {
    let response = state.auth_handler.refresh(&request.refresh_token).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(claims, token, state, body))]
pub async fn sign_out(
    claims: AuthClaims,
    token: AccessToken,
    state: web::Data<AppState>,
    body: web::Json<SignOutRequest>,
) -> Result<impl Responder, AuthError> {
    state.auth_handler
        .sign_out(&token.0, &claims.0, &body.refresh_token)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Signed out successfully",
        "view": "login"
    })))
}

#[instrument(skip(claims, state))]
pub async fn session(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AuthError> {
    let session = state.auth_handler.session(&claims.0).await?;
    Ok(HttpResponse::Ok().json(session))
}
