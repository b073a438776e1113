use crate::config::AppConfig;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// ── Performance Counters (lock-free) ──

pub struct PerfCounters {
    pub payouts_evaluated: AtomicU64,
    pub previews_built: AtomicU64,
    pub scores_computed: AtomicU64,
    pub leaderboards_ranked: AtomicU64,
    pub requests_rejected: AtomicU64,
}

impl PerfCounters {
    pub fn new() -> Self {
        Self {
            payouts_evaluated: AtomicU64::new(0),
            previews_built: AtomicU64::new(0),
            scores_computed: AtomicU64::new(0),
            leaderboards_ranked: AtomicU64::new(0),
            requests_rejected: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

// ── Application shared state ──

/// Everything handlers need. The calculators are pure, so this is only
/// configuration plus counters.
pub struct AppState {
    pub config: AppConfig,
    pub counters: PerfCounters,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            counters: PerfCounters::new(),
        })
    }
}
