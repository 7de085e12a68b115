//! Dataset statistics models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dataset-wide counts, recomputed whenever the snapshot is rebuilt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverStatistics {
    pub total: usize,
    pub hvci_compatible: usize,
    pub killer_drivers: usize,
    pub signed: usize,
    pub last_updated: DateTime<Utc>,

    /// Offline maintenance metadata embedded in the dataset file, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hvci_blocklist_check: Option<HvciBlocklistCheck>,
}

/// Result of the offline Microsoft blocklist cross-check, stored in the
/// backing file under `_metadata.hvciBlocklistCheck` by a maintenance script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HvciBlocklistCheck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microsoft_last_modified: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_blocked_hashes: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_drivers: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}
