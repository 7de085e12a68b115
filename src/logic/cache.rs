//! Cache Manager
//!
//! Holds the normalized dataset and derived query results in memory with
//! time-based expiry. One instance per process, shared behind an `Arc` by
//! the HTTP layer. All state sits behind a single mutex which is held
//! across the backing-file read, so concurrent callers during a load block
//! and then reuse the fresh snapshot instead of re-reading the file.
//!
//! Snapshot lifecycle: EMPTY -> LOADED -> (TTL elapses) STALE -> reload.
//! `clear_cache` forces EMPTY. A failed load leaves the cache EMPTY so the
//! next call retries; failures are never cached.

use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{filters, normalize, search, stats};
use crate::config::Config;
use crate::error::CacheError;
use crate::models::{DriverSample, DriverStatistics, HvciBlocklistCheck};

// ============================================================================
// RESPONSE SHAPES
// ============================================================================

/// One page of the dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPage {
    pub drivers: Vec<DriverSample>,
    pub total: usize,
    pub has_more: bool,
}

/// One page of a filtered/searched result set, echoing the query inputs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub drivers: Vec<DriverSample>,
    pub total: usize,
    pub has_more: bool,
    pub query: String,
    pub filters: Vec<String>,
    pub page: usize,
    pub limit: usize,
}

// ============================================================================
// INTERNAL STATE
// ============================================================================

struct DatasetSnapshot {
    samples: Arc<Vec<DriverSample>>,
    blocklist_check: Option<HvciBlocklistCheck>,
    loaded_at: Instant,
}

#[derive(PartialEq, Eq, Hash, Clone)]
struct SearchKey {
    query: String,
    filters: Vec<String>,
    page: usize,
    limit: usize,
}

struct CachedSearch {
    result: SearchPage,
    cached_at: Instant,
}

#[derive(Default)]
struct CacheState {
    snapshot: Option<DatasetSnapshot>,
    statistics: Option<DriverStatistics>,
    search_results: HashMap<SearchKey, CachedSearch>,
}

// ============================================================================
// CACHE MANAGER
// ============================================================================

pub struct DriverCache {
    data_file: PathBuf,
    dataset_ttl: Duration,
    search_ttl: Duration,
    state: Mutex<CacheState>,
}

impl DriverCache {
    pub fn new(
        data_file: impl Into<PathBuf>,
        dataset_ttl: Duration,
        search_ttl: Duration,
    ) -> Self {
        Self {
            data_file: data_file.into(),
            dataset_ttl,
            search_ttl,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.data_file.clone(),
            Duration::from_secs(config.cache_ttl_secs),
            Duration::from_secs(config.search_cache_ttl_secs),
        )
    }

    /// Current snapshot's samples, reloading from the backing file if no
    /// valid snapshot exists.
    pub fn load_drivers(&self) -> Result<Arc<Vec<DriverSample>>, CacheError> {
        let mut state = self.state.lock();
        self.snapshot_samples(&mut state)
    }

    /// Page slice of the full dataset. 1-based page; out-of-range values
    /// produce an empty or truncated slice, never an error.
    pub fn get_drivers(&self, page: usize, limit: usize) -> Result<DriverPage, CacheError> {
        let mut state = self.state.lock();
        let samples = self.snapshot_samples(&mut state)?;

        let total = samples.len();
        let (start, end) = page_bounds(total, page, limit);

        Ok(DriverPage {
            drivers: samples[start..end].to_vec(),
            total,
            has_more: end < total,
        })
    }

    /// Filter, search, paginate. Identical (query, filters, page, limit)
    /// tuples are memoized for a short TTL independent of the dataset TTL;
    /// the UI re-issues the same query on every re-render.
    pub fn search_drivers(
        &self,
        query: &str,
        filter_names: &[String],
        page: usize,
        limit: usize,
    ) -> Result<SearchPage, CacheError> {
        let query = query.trim().to_lowercase();
        let key = SearchKey {
            query: query.clone(),
            filters: filter_names.to_vec(),
            page,
            limit,
        };

        let mut state = self.state.lock();
        if let Some(hit) = state.search_results.get(&key) {
            if hit.cached_at.elapsed() < self.search_ttl {
                return Ok(hit.result.clone());
            }
        }

        let samples = self.snapshot_samples(&mut state)?;
        let now = Utc::now();

        let mut matched: Vec<&DriverSample> = samples
            .iter()
            .filter(|sample| filters::matches_filters(sample, filter_names, now))
            .collect();
        if !query.is_empty() {
            matched.retain(|sample| search::matches_query(sample, &query));
        }

        let total = matched.len();
        let (start, end) = page_bounds(total, page, limit);

        let result = SearchPage {
            drivers: matched[start..end].iter().map(|s| (*s).clone()).collect(),
            total,
            has_more: end < total,
            query,
            filters: filter_names.to_vec(),
            page,
            limit,
        };

        let search_ttl = self.search_ttl;
        state
            .search_results
            .retain(|_, entry| entry.cached_at.elapsed() < search_ttl);
        state.search_results.insert(
            key,
            CachedSearch {
                result: result.clone(),
                cached_at: Instant::now(),
            },
        );

        Ok(result)
    }

    /// Dataset-wide statistics, cached alongside the snapshot (main TTL).
    pub fn get_statistics(&self) -> Result<DriverStatistics, CacheError> {
        let mut state = self.state.lock();
        let samples = self.snapshot_samples(&mut state)?;

        if let Some(stats) = &state.statistics {
            return Ok(stats.clone());
        }

        let blocklist_check = state
            .snapshot
            .as_ref()
            .and_then(|snap| snap.blocklist_check.clone());
        let computed = stats::compute_statistics(&samples, blocklist_check.as_ref(), Utc::now());
        state.statistics = Some(computed.clone());
        Ok(computed)
    }

    /// Number of samples in the current snapshot, if a valid one is loaded.
    /// A peek only: never triggers a load, and an expired snapshot counts
    /// as absent.
    pub fn snapshot_size(&self) -> Option<usize> {
        let state = self.state.lock();
        state
            .snapshot
            .as_ref()
            .filter(|snapshot| snapshot.loaded_at.elapsed() < self.dataset_ttl)
            .map(|snapshot| snapshot.samples.len())
    }

    /// Drop all cached state; the next access reloads from the backing file.
    pub fn clear_cache(&self) {
        *self.state.lock() = CacheState::default();
        tracing::debug!("Driver cache cleared");
    }

    /// Return the snapshot's samples, rebuilding the snapshot first if it is
    /// missing or past its TTL. Runs with the state lock held, which makes
    /// the load single-flight per invalidation cycle.
    fn snapshot_samples(
        &self,
        state: &mut CacheState,
    ) -> Result<Arc<Vec<DriverSample>>, CacheError> {
        if let Some(snapshot) = &state.snapshot {
            if snapshot.loaded_at.elapsed() < self.dataset_ttl {
                return Ok(snapshot.samples.clone());
            }
        }

        // Stale or empty: derived state goes with the old snapshot.
        state.snapshot = None;
        state.statistics = None;
        state.search_results.clear();

        let raw = std::fs::read_to_string(&self.data_file).map_err(|source| {
            CacheError::SourceUnavailable {
                path: self.data_file.clone(),
                source,
            }
        })?;
        let payload: serde_json::Value = serde_json::from_str(&raw)?;

        let samples = Arc::new(normalize::normalize(&payload));
        let blocklist_check = normalize::extract_metadata(&payload);
        tracing::info!(
            "Loaded {} driver samples from {}",
            samples.len(),
            self.data_file.display()
        );

        state.snapshot = Some(DatasetSnapshot {
            samples: samples.clone(),
            blocklist_check,
            loaded_at: Instant::now(),
        });

        Ok(samples)
    }
}

/// Clamp a 1-based page window to the sequence length.
fn page_bounds(total: usize, page: usize, limit: usize) -> (usize, usize) {
    let start = page.saturating_sub(1).saturating_mul(limit).min(total);
    let end = start.saturating_add(limit).min(total);
    (start, end)
}

// ============================================================================
// TESTS
// ============================================================================
