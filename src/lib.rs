use std::sync::Arc;

use deadpool_redis::{Config as RedisConfig, Runtime};
use tokio_util::sync::CancellationToken;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;
pub mod shared_repos;

pub use domain::{admin_form, entities, forms, gallery, password, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{auth, db, limiter, utils};

use auth::{
    deny_list::{MemoryDenyList, RedisDenyList, TokenDenyList},
    jwt::JwtService,
};
use background_task::BackgroundTasks;
use limiter::rate_limiter::RateLimiterStore;
use settings::AppConfig;
use shared_repos::SharedRepositories;
use use_cases::{
    admin::AdminHandler, auth::AuthHandler, contact::ContactHandler, pages::PagesHandler,
};

pub struct AppState {
    pub config: AppConfig,
    pub auth_handler: AuthHandler,
    pub pages_handler: PagesHandler,
    pub admin_handler: AdminHandler,
    pub contact_handler: ContactHandler,
    pub repos: SharedRepositories,
    pub redis_pool: Option<deadpool_redis::Pool>,
    pub tasks: BackgroundTasks,
}

impl AppState {
    /// Wires the Postgres-backed repositories and starts the housekeeping
    /// tasks. Must be called inside the runtime.
    pub fn new(config: AppConfig, pool: sqlx::PgPool, shutdown: CancellationToken) -> Self {
        let tasks = BackgroundTasks::new(shutdown);

        let redis_pool = config.redis_url.as_ref().and_then(|url| {
            RedisConfig::from_url(url.as_str())
                .create_pool(Some(Runtime::Tokio1))
                .map_err(|e| tracing::error!("Redis pool error: {}", e))
                .ok()
        });

        let deny_list: Arc<dyn TokenDenyList> = match &redis_pool {
            Some(pool) => Arc::new(RedisDenyList::new(pool.clone())),
            None => {
                tracing::warn!("Redis not configured, revoked tokens are tracked in memory");
                let memory = Arc::new(MemoryDenyList::new());
                tasks.spawn_deny_list_purge(memory.clone());
                memory
            }
        };

        let limiter = RateLimiterStore::per_minute(config.contact_rate_limit_per_minute);
        limiter.spawn_eviction(tasks.token());

        let repos = SharedRepositories::new(pool);
        Self::from_parts(config, repos, deny_list, limiter, redis_pool, tasks)
    }

    pub fn from_parts(
        config: AppConfig,
        repos: SharedRepositories,
        deny_list: Arc<dyn TokenDenyList>,
        limiter: RateLimiterStore,
        redis_pool: Option<deadpool_redis::Pool>,
        tasks: BackgroundTasks,
    ) -> Self {
        let auth_handler = AuthHandler::new(
            repos.users.clone(),
            JwtService::new(&config),
            deny_list,
            config.allow_registration,
        );

        AppState {
            auth_handler,
            pages_handler: PagesHandler::new(repos.clone(), tasks.clone()),
            admin_handler: AdminHandler::new(repos.clone()),
            contact_handler: ContactHandler::new(limiter),
            repos,
            redis_pool,
            tasks,
            config,
        }
    }
}
