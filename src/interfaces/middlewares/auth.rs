use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse, ResponseError,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{errors::AuthError, use_cases::extractors::AccessToken, AppState};

/// Guards a scope: requests without a valid, non-revoked bearer token are
/// answered with 401 and the login view instead of reaching the handler.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if req.method() == actix_web::http::Method::OPTIONS {
                return service.call(req).await;
            }

            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                tracing::error!("AppState missing in middleware");
                let response =
                    AuthError::Internal("application state unavailable".into()).error_response();
                return Ok(req.into_response(response));
            };

            let Some(token) = extract_token(&req) else {
                tracing::debug!(path = req.path(), "Missing or malformed Authorization header");
                return Ok(login_view(req, AuthError::MissingCredentials));
            };

            match state.auth_handler.verify_access(&token).await {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    req.extensions_mut().insert(AccessToken(token));
                    service.call(req).await
                }
                Err(e @ AuthError::SessionStore(_)) => {
                    tracing::error!("Session check failed: {}", e);
                    let response = e.error_response();
                    Ok(req.into_response(response))
                }
                Err(e) => {
                    tracing::warn!(path = req.path(), "Rejected session: {}", e);
                    Ok(login_view(req, e))
                }
            }
        })
    }
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn login_view(req: ServiceRequest, err: AuthError) -> ServiceResponse<BoxBody> {
    let message = match err {
        AuthError::MissingCredentials => "Authentication required".to_string(),
        AuthError::TokenExpired => "Token has expired".to_string(),
        other => other.to_string(),
    };
    req.into_response(HttpResponse::Unauthorized().json(serde_json::json!({
        "error": message,
        "view": "login"
    })))
}
