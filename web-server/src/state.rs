//! Shared application state

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dr_scoring_core::{LoadedModel, ModelMetadata, Scorer};
use serde::Serialize;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub model: Arc<ModelState>,
    pub stats: Arc<ScoringStats>,
}

impl AppState {
    pub fn new(config: Config, model: ModelState) -> Self {
        Self {
            config,
            model: Arc::new(model),
            stats: Arc::new(ScoringStats::default()),
        }
    }

    /// The scorer, or the blocking failure every request gets without one
    pub fn scorer(&self) -> AppResult<&Scorer> {
        match self.model.as_ref() {
            ModelState::Ready { scorer, .. } => Ok(scorer),
            ModelState::Unavailable(reason) => Err(AppError::ModelUnavailable(reason.clone())),
        }
    }
}

/// Outcome of the one-time model load at startup
pub enum ModelState {
    Ready {
        scorer: Scorer,
        metadata: ModelMetadata,
    },
    Unavailable(String),
}

impl ModelState {
    pub fn ready(loaded: LoadedModel) -> Self {
        ModelState::Ready {
            scorer: Scorer::new(loaded.classifier),
            metadata: loaded.metadata,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelState::Ready { .. })
    }

    pub fn metadata(&self) -> Option<&ModelMetadata> {
        match self {
            ModelState::Ready { metadata, .. } => Some(metadata),
            ModelState::Unavailable(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ModelState::Ready { .. } => None,
            ModelState::Unavailable(reason) => Some(reason),
        }
    }
}

/// Scoring counters for the status endpoint
#[derive(Debug, Default)]
pub struct ScoringStats {
    scored: AtomicU64,
    failed: AtomicU64,
    latency_sum_us: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub scored: u64,
    pub failed: u64,
    pub avg_latency_us: f64,
}

impl ScoringStats {
    pub fn record_success(&self, elapsed: Duration) {
        self.scored.fetch_add(1, Ordering::Relaxed);
        self.latency_sum_us
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let scored = self.scored.load(Ordering::Relaxed);
        let sum = self.latency_sum_us.load(Ordering::Relaxed);

        StatsSnapshot {
            scored,
            failed: self.failed.load(Ordering::Relaxed),
            avg_latency_us: if scored > 0 { sum as f64 / scored as f64 } else { 0.0 },
        }
    }
}
