// =============================================================================
// Central Application State — MarketPulse analysis service
// =============================================================================
//
// The loaded price window and the engine configuration, shared across request
// handlers via `Arc<AppState>`.  This replaces the ad-hoc globals of the old
// dashboard (current ticker, selected column, fetched dataset) with one
// explicit state object, keeping the indicator math itself pure.
//
// Thread safety:
//   - AtomicU64 for lock-free version tracking.
//   - parking_lot::RwLock around the dataset; handlers clone the price
//     vector out of the lock so no lock is held during computation.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use crate::config::EngineConfig;

/// The currently loaded price window.
#[derive(Debug, Clone)]
pub struct PriceDataset {
    /// Ticker symbol the window belongs to (e.g. "AAPL").
    pub ticker: String,
    /// Source column the prices were taken from (e.g. "Close").
    pub column: String,
    /// Prices ascending by trading-day position.
    pub prices: Vec<f64>,
    pub loaded_at: DateTime<Utc>,
}

/// Metadata view of the loaded window, safe to hand to the API.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub ticker: String,
    pub column: String,
    pub points: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Shared state for all request handlers.
pub struct AppState {
    /// Monotonically increasing counter, bumped on every dataset load so
    /// polling clients can detect changes cheaply.
    pub state_version: AtomicU64,

    pub config: EngineConfig,

    dataset: RwLock<Option<PriceDataset>>,

    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            state_version: AtomicU64::new(1),
            config,
            dataset: RwLock::new(None),
            start_time: std::time::Instant::now(),
        }
    }

    // ── Version Management ──────────────────────────────────────────────

    /// Atomically increment the state version.
    pub fn increment_version(&self) -> u64 {
        self.state_version.fetch_add(1, Ordering::SeqCst)
    }

    /// Read the current state version without modifying it.
    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::SeqCst)
    }

    // ── Dataset Access ──────────────────────────────────────────────────

    /// Replace the loaded window and bump the state version.
    pub fn load_dataset(&self, dataset: PriceDataset) {
        *self.dataset.write() = Some(dataset);
        self.increment_version();
    }

    /// Clone the loaded price vector out of the lock, if any.
    pub fn prices(&self) -> Option<Vec<f64>> {
        self.dataset.read().as_ref().map(|d| d.prices.clone())
    }

    /// Metadata of the loaded window, if any.
    pub fn dataset_info(&self) -> Option<DatasetInfo> {
        self.dataset.read().as_ref().map(|d| DatasetInfo {
            ticker: d.ticker.clone(),
            column: d.column.clone(),
            points: d.prices.len(),
            loaded_at: d.loaded_at,
        })
    }
}
