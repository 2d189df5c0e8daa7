use jsonwebtoken::{encode, Header, decode, Validation, TokenData, Algorithm};
use chrono::{Utc, Duration};
use uuid::Uuid;

use crate::entities::token::{Claims, RefreshClaims, TokenType};
use crate::entities::user::User;
use crate::settings::{AppConfig, JwtKeys};
use crate::errors::AuthError;

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;
pub const ACCESS_DENY_PREFIX: &str = "access_deny";
pub const REFRESH_DENY_PREFIX: &str = "refresh_deny";

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    access_expiration: Duration,
    refresh_expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            access_expiration: Duration::minutes(config.jwt_expiration_minutes),
            refresh_expiration: Duration::days(config.refresh_token_exp_days),
        }
    }

    pub fn create_jwt(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            jti: Uuid::new_v4().to_string(),
            email: user.email.clone(),
            exp: (now + self.access_expiration).timestamp() as usize,
            iat: now.timestamp() as usize,
            token_type: TokenType::Access,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    pub fn create_refresh_jwt(&self, user_id: &Uuid) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: (now + self.refresh_expiration).timestamp() as usize,
            iat: now.timestamp() as usize,
            token_type: TokenType::Refresh,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.refresh_encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &validation())?;
        if data.claims.token_type != TokenType::Access {
            return Err(AuthError::InvalidToken);
        }
        Ok(data)
    }

    pub fn decode_refresh_jwt(&self, token: &str) -> Result<TokenData<RefreshClaims>, AuthError> {
        let data = decode::<RefreshClaims>(token, &self.keys.refresh_decoding, &validation())?;
        if data.claims.token_type != TokenType::Refresh {
            return Err(AuthError::InvalidToken);
        }
        Ok(data)
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation
}

/// Seconds until `exp`, or `None` once it has passed.
pub fn remaining_ttl(exp: usize) -> Option<u64> {
    let now = Utc::now().timestamp() as usize;
    exp.checked_sub(now).filter(|ttl| *ttl > 0).map(|ttl| ttl as u64)
}

pub fn deny_key(prefix: &str, token: &str) -> String {
    format!("{prefix}:{token}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppEnvironment;

    fn config(minutes: i64) -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            database_url: "postgres://localhost/test".into(),
            redis_url: None,
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234567890".into(),
            jwt_expiration_minutes: minutes,
            refresh_token_secret: "test_refresh_secret_that_is_long_enough_1234567890".into(),
            refresh_token_exp_days: 1,
            allow_registration: false,
            run_migrations: false,
            contact_rate_limit_per_minute: 5,
            trust_forwarded_for: false,
        }
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "admin@example.com".into(),
            password_hash: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn access_token_round_trips_claims() {
        let service = JwtService::new(&config(15));
        let user = user();
        let token = service.create_jwt(&user).unwrap();
        let claims = service.decode_jwt(&token).unwrap().claims;
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, "admin@example.com");
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let service = JwtService::new(&config(15));
        let refresh = service.create_refresh_jwt(&Uuid::new_v4()).unwrap();
        assert!(service.decode_jwt(&refresh).is_err());
        assert!(service.decode_refresh_jwt(&refresh).is_ok());
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let service = JwtService::new(&config(-5));
        let token = service.create_jwt(&user()).unwrap();
        assert!(matches!(service.decode_jwt(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn tokens_issued_together_are_distinct() {
        let service = JwtService::new(&config(15));
        let id = Uuid::new_v4();
        assert_ne!(
            service.create_refresh_jwt(&id).unwrap(),
            service.create_refresh_jwt(&id).unwrap()
        );
    }

    #[test]
    fn ttl_is_none_after_expiry() {
        assert_eq!(remaining_ttl(0), None);
        assert!(remaining_ttl(Utc::now().timestamp() as usize + 60).is_some());
    }
}
