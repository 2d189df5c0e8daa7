use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use deadpool_redis::{redis::AsyncCommands, Pool};

use crate::errors::AuthError;

/// Revoked tokens, each kept until its own expiry.
#[async_trait]
pub trait TokenDenyList: Send + Sync {
    async fn revoke(&self, key: &str, ttl_secs: u64) -> Result<(), AuthError>;
    async fn is_revoked(&self, key: &str) -> Result<bool, AuthError>;
}

#[derive(Clone)]
pub struct RedisDenyList {
    pool: Pool,
}

impl RedisDenyList {
    pub fn new(pool: Pool) -> Self {
        RedisDenyList { pool }
    }

    async fn connection(&self) -> Result<deadpool_redis::Connection, AuthError> {
        self.pool
            .get()
            .await
            .map_err(|e| AuthError::SessionStore(e.to_string()))
    }
}

#[async_trait]
impl TokenDenyList for RedisDenyList {
    async fn revoke(&self, key: &str, ttl_secs: u64) -> Result<(), AuthError> {
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, "revoked", ttl_secs.max(1))
            .await
            .map_err(|e| AuthError::SessionStore(e.to_string()))
    }

    async fn is_revoked(&self, key: &str) -> Result<bool, AuthError> {
        let mut conn = self.connection().await?;
        conn.exists(key)
            .await
            .map_err(|e| AuthError::SessionStore(e.to_string()))
    }
}

/// Process-local deny list used when no Redis URL is configured.
#[derive(Default)]
pub struct MemoryDenyList {
    entries: DashMap<String, Instant>,
}

impl MemoryDenyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, expires_at| *expires_at > now);
        before - self.entries.len()
    }
}

#[async_trait]
impl TokenDenyList for MemoryDenyList {
    async fn revoke(&self, key: &str, ttl_secs: u64) -> Result<(), AuthError> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_secs.max(1));
        self.entries.insert(key.to_string(), expires_at);
        Ok(())
    }

    async fn is_revoked(&self, key: &str) -> Result<bool, AuthError> {
        Ok(self
            .entries
            .get(key)
            .is_some_and(|expires_at| *expires_at > Instant::now()))
    }
}
