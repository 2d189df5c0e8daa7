use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{auth::deny_list::MemoryDenyList, repositories::blog_post::BlogPostRepository};

const VIEW_INCREMENT_TIMEOUT: Duration = Duration::from_secs(5);
const DENY_LIST_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 10);

/// Spawns side work that must never hold up a response. Every task runs on a
/// child of the process shutdown token.
#[derive(Clone)]
pub struct BackgroundTasks {
    shutdown: CancellationToken,
}

impl BackgroundTasks {
    pub fn new(shutdown: CancellationToken) -> Self {
        BackgroundTasks { shutdown }
    }

    pub fn token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Bumps a post's view counter. Failures and timeouts are logged only.
    pub fn spawn_view_increment(
        &self,
        posts: Arc<dyn BlogPostRepository>,
        slug: String,
    ) -> JoinHandle<()> {
        let token = self.shutdown.child_token();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(%slug, "View increment cancelled by shutdown");
                }
                outcome = timeout(VIEW_INCREMENT_TIMEOUT, posts.increment_views(&slug)) => {
                    match outcome {
                        Ok(Ok(())) => debug!(%slug, "View count incremented"),
                        Ok(Err(e)) => warn!(%slug, error = %e, "Failed to increment view count"),
                        Err(_) => warn!(%slug, "View count increment timed out"),
                    }
                }
            }
        })
    }

    /// Drops expired entries from the in-process deny list until shutdown.
    pub fn spawn_deny_list_purge(&self, deny_list: Arc<MemoryDenyList>) -> JoinHandle<()> {
        let token = self.shutdown.child_token();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(DENY_LIST_PURGE_INTERVAL);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let purged = deny_list.purge_expired();
                        if purged > 0 {
                            info!("Purged {} expired revoked tokens", purged);
                        }
                    }
                }
            }
        })
    }
}
