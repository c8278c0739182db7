use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::shared::AppState;

/// Fileserver hit counter owned by the application state.
///
/// Atomic increments are the only guarantee; no ordering between requests
/// is implied.
#[derive(Clone, Debug, Default)]
pub struct HitCounter {
    hits: Arc<AtomicU64>,
}

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) -> u64 {
        self.hits.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn read(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}

/// Middleware counting fileserver hits.
/// Usage: .layer(middleware::from_fn_with_state(state.clone(), admin::count_hits))
pub async fn count_hits(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let hits = state.hits.increment();
    debug!(hits, path = %req.uri().path(), "Fileserver hit");
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_counter_increment_and_read() {
        let counter = HitCounter::new();
        assert_eq!(counter.read(), 0);

        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.read(), 2);
    }

    #[test]
    fn test_hit_counter_reset() {
        let counter = HitCounter::new();
        counter.increment();
        counter.increment();

        counter.reset();
        assert_eq!(counter.read(), 0);
    }

    #[test]
    fn test_clones_share_the_same_count() {
        let counter = HitCounter::new();
        let clone = counter.clone();

        counter.increment();
        clone.increment();

        assert_eq!(counter.read(), 2);
        assert_eq!(clone.read(), 2);
    }
}
