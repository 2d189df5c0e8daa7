use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Token bucket with fractional refill.
#[derive(Debug)]
struct TokenBucket {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn new(capacity: f64, refill_per_sec: f64) -> Self {
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec,
            last_refill: Instant::now(),
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        if elapsed > 0.0 {
            self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
            self.last_refill = now;
        }
    }

    fn has_token(&mut self) -> bool {
        self.refill();
        self.tokens + 1e-12 >= 1.0
    }

    fn consume(&mut self) {
        self.tokens = (self.tokens - 1.0).max(0.0);
    }

    fn secs_until_token(&self) -> u64 {
        let needed = 1.0 - self.tokens;
        if needed <= 0.0 || self.refill_per_sec <= 0.0 {
            return 1;
        }
        ((needed / self.refill_per_sec).ceil() as u64).max(1)
    }
}

/// Weighted sliding window over two fixed windows.
#[derive(Debug)]
struct SlidingWindow {
    window_size: Duration,
    limit: u64,
    current_window_start: Instant,
    current_count: u64,
    prev_count: u64,
}

impl SlidingWindow {
    fn new(window_size: Duration, limit: u64) -> Self {
        Self {
            window_size,
            limit,
            current_window_start: Instant::now(),
            current_count: 0,
            prev_count: 0,
        }
    }

    fn roll(&mut self) -> f64 {
        let now = Instant::now();
        let mut elapsed = now.duration_since(self.current_window_start);
        if elapsed >= self.window_size * 2 {
            self.prev_count = 0;
            self.current_count = 0;
            self.current_window_start = now;
            elapsed = Duration::ZERO;
        } else if elapsed >= self.window_size {
            self.prev_count = self.current_count;
            self.current_count = 0;
            self.current_window_start += self.window_size;
            elapsed -= self.window_size;
        }

        let weight = elapsed.as_secs_f64() / self.window_size.as_secs_f64();
        (self.prev_count as f64) * (1.0 - weight) + (self.current_count as f64)
    }

    fn has_room(&mut self) -> bool {
        self.roll() < self.limit as f64
    }

    fn record(&mut self) {
        self.current_count += 1;
    }

    fn secs_until_rollover(&self) -> u64 {
        let elapsed = self.current_window_start.elapsed();
        self.window_size.saturating_sub(elapsed).as_secs().max(1)
    }
}

#[derive(Debug)]
struct HybridLimiter {
    bucket: TokenBucket,
    window: SlidingWindow,
    last_seen: Instant,
}

impl HybridLimiter {
    fn check(&mut self) -> RateDecision {
        self.last_seen = Instant::now();
        let bucket_ok = self.bucket.has_token();
        let window_ok = self.window.has_room();

        if bucket_ok && window_ok {
            self.bucket.consume();
            self.window.record();
            return RateDecision::Allowed {
                remaining: self.bucket.tokens.floor() as u64,
            };
        }

        let retry_after = match (bucket_ok, window_ok) {
            (false, true) => self.bucket.secs_until_token(),
            (true, false) => self.window.secs_until_rollover(),
            _ => self.bucket.secs_until_token().max(self.window.secs_until_rollover()),
        };
        RateDecision::Limited { retry_after_secs: retry_after }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u64 },
    Limited { retry_after_secs: u64 },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

/// Per-key limiters. A request passes only when both the bucket and the
/// sliding window have room.
#[derive(Clone)]
pub struct RateLimiterStore {
    map: Arc<DashMap<String, Arc<Mutex<HybridLimiter>>>>,
    capacity: f64,
    refill_per_sec: f64,
    window_size: Duration,
    limit: u64,
    idle_ttl: Duration,
}

impl RateLimiterStore {
    pub fn new(
        capacity: f64,
        refill_per_sec: f64,
        window_size: Duration,
        limit: u64,
        idle_ttl: Duration,
    ) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            capacity,
            refill_per_sec,
            window_size,
            limit,
            idle_ttl,
        }
    }

    pub fn per_minute(limit: u64) -> Self {
        let limit = limit.max(1);
        Self::new(
            limit as f64,
            limit as f64 / 60.0,
            Duration::from_secs(60),
            limit,
            Duration::from_secs(10 * 60),
        )
    }

    fn limiter_for(&self, key: &str) -> Arc<Mutex<HybridLimiter>> {
        if let Some(existing) = self.map.get(key) {
            return existing.clone();
        }
        self.map
            .entry(key.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(HybridLimiter {
                    bucket: TokenBucket::new(self.capacity, self.refill_per_sec),
                    window: SlidingWindow::new(self.window_size, self.limit),
                    last_seen: Instant::now(),
                }))
            })
            .clone()
    }

    pub fn check(&self, key: &str) -> RateDecision {
        self.limiter_for(key).lock().check()
    }

    pub fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let before = self.map.len();
        self.map
            .retain(|_, limiter| now.duration_since(limiter.lock().last_seen) <= self.idle_ttl);
        before - self.map.len()
    }

    pub fn tracked_keys(&self) -> usize {
        self.map.len()
    }

    /// Evicts idle keys every 30s until `token` is cancelled.
    pub fn spawn_eviction(&self, token: CancellationToken) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(30));
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let evicted = store.evict_idle();
                        if evicted > 0 {
                            debug!(evicted, "Evicted idle rate limiter keys");
                        }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_limit_then_rejects() {
        let store = RateLimiterStore::per_minute(3);
        for _ in 0..3 {
            assert!(store.check("10.0.0.1").is_allowed());
        }
        match store.check("10.0.0.1") {
            RateDecision::Limited { retry_after_secs } => assert!(retry_after_secs >= 1),
            other => panic!("expected limit, got {other:?}"),
        }
    }

    #[test]
    fn keys_are_independent() {
        let store = RateLimiterStore::per_minute(1);
        assert!(store.check("a").is_allowed());
        assert!(!store.check("a").is_allowed());
        assert!(store.check("b").is_allowed());
        assert_eq!(store.tracked_keys(), 2);
    }

    #[test]
    fn idle_keys_are_evicted() {
        let store = RateLimiterStore::new(1.0, 1.0, Duration::from_secs(60), 1, Duration::ZERO);
        store.check("a");
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.evict_idle(), 1);
        assert_eq!(store.tracked_keys(), 0);
    }

    #[actix_rt::test]
    async fn eviction_task_stops_on_cancel() {
        let store = RateLimiterStore::per_minute(5);
        let token = CancellationToken::new();
        let handle = store.spawn_eviction(token.clone());
        token.cancel();
        assert!(handle.await.is_ok());
    }
}
