use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{
    deny_list::TokenDenyList,
    jwt::{deny_key, remaining_ttl, JwtService, ACCESS_DENY_PREFIX, REFRESH_DENY_PREFIX},
    password::{hash_password, verify_password},
};
use crate::entities::token::{AuthResponse, Claims};
use crate::entities::user::{LoginUser, NewUser, NewUserResponse, PublicUser, User};
use crate::errors::{AppError, AuthError};
use crate::repositories::user::UserRepository;

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub user: PublicUser,
    pub expires_at: usize,
}

pub struct AuthHandler {
    pub user_repo: Arc<dyn UserRepository>,
    pub token_service: JwtService,
    pub deny_list: Arc<dyn TokenDenyList>,
    pub allow_registration: bool,
}

impl AuthHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        token_service: JwtService,
        deny_list: Arc<dyn TokenDenyList>,
        allow_registration: bool,
    ) -> Self {
        AuthHandler {
            user_repo,
            token_service,
            deny_list,
            allow_registration,
        }
    }

    /// The first account can always be created; later ones only when
    /// registration is open.
    pub async fn sign_up(&self, request: NewUser) -> Result<NewUserResponse, AuthError> {
        request.validate()?;

        let existing = self.user_repo.count_users()
            .await
            .map_err(|e| AuthError::SessionStore(e.to_string()))?;
        if existing > 0 && !self.allow_registration {
            return Err(AuthError::RegistrationClosed);
        }

        let hashed_password = hash_password(&request.password)?;
        let user_insert = request.prepare_for_insert(hashed_password);
        let id = self.user_repo.create_user(&user_insert)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => AuthError::AccountExists,
                other => AuthError::SessionStore(other.to_string()),
            })?;

        tracing::info!(%id, "Admin account created");
        Ok(NewUserResponse {
            id,
            message: "User created successfully".to_string(),
        })
    }

    pub async fn sign_in(&self, request: LoginUser) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let user = self.user_repo.get_user_by_email(&request.email)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|_| AuthError::WrongCredentials)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let response = self.create_auth_response(&user)?;

        tracing::info!(user_id = %user.id, "User signed in");
        Ok(response)
    }

    fn create_auth_response(&self, user: &User) -> Result<AuthResponse, AuthError> {
        let access_token = self.token_service.create_jwt(user)
            .inspect_err(|e| tracing::warn!("Failed to create JWT: {}", e))?;
        let refresh_token = self.token_service.create_refresh_jwt(&user.id)
            .inspect_err(|e| tracing::warn!("Failed to create refresh JWT: {}", e))?;
        Ok(AuthResponse::new(access_token, refresh_token))
    }

    /// Issues a new pair and revokes the refresh token that was presented.
    pub async fn refresh(&self, token: &str) -> Result<AuthResponse, AuthError> {
        let decoded = self.token_service.decode_refresh_jwt(token)?;
        let key = deny_key(REFRESH_DENY_PREFIX, token);
        if self.deny_list.is_revoked(&key).await? {
            return Err(AuthError::TokenRevoked);
        }

        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AuthError::InvalidUserId)?;
        let user = self.user_repo.get_user_by_id(&user_id)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        let response = self.create_auth_response(&user)?;
        self.revoke(&key, decoded.claims.exp).await?;
        Ok(response)
    }

    /// Revokes both tokens until their own expiry.
    pub async fn sign_out(
        &self,
        access_token: &str,
        access_claims: &Claims,
        refresh_token: &str,
    ) -> Result<(), AuthError> {
        self.revoke(&deny_key(ACCESS_DENY_PREFIX, access_token), access_claims.exp).await?;

        match self.token_service.decode_refresh_jwt(refresh_token) {
            Ok(refresh) if refresh.claims.sub == access_claims.sub => {
                let key = deny_key(REFRESH_DENY_PREFIX, refresh_token);
                self.revoke(&key, refresh.claims.exp).await?;
            }
            Ok(_) => return Err(AuthError::InvalidToken),
            // An already expired refresh token needs no revocation.
            Err(AuthError::TokenExpired) => {}
            Err(e) => return Err(e),
        }

        tracing::info!(user_id = %access_claims.sub, "User signed out");
        Ok(())
    }

    async fn revoke(&self, key: &str, exp: usize) -> Result<(), AuthError> {
        match remaining_ttl(exp) {
            Some(ttl) => self.deny_list.revoke(key, ttl).await,
            None => Ok(()),
        }
    }

    /// Decodes a bearer token and rejects it if it has been revoked.
    pub async fn verify_access(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.token_service.decode_jwt(token)?.claims;
        if self.deny_list.is_revoked(&deny_key(ACCESS_DENY_PREFIX, token)).await? {
            return Err(AuthError::TokenRevoked);
        }
        Ok(claims)
    }

    pub async fn session(&self, claims: &Claims) -> Result<SessionView, AuthError> {
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;
        let user = self.user_repo.get_user_by_id(&user_id)
            .await
            .map_err(|e| AuthError::SessionStore(e.to_string()))?
            .ok_or(AuthError::InvalidToken)?;

        Ok(SessionView {
            user: PublicUser::from(user),
            expires_at: claims.exp,
        })
    }
}
