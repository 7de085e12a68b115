//! Statistics Aggregator
//!
//! One pass over the normalized dataset, reusing the filter engine's
//! predicates so the counts can never drift from what filtering returns.

use chrono::{DateTime, Utc};

use super::filters;
use crate::models::{DriverSample, DriverStatistics, HvciBlocklistCheck};

/// Compute dataset-wide counts. Pure function of the snapshot; recomputed in
/// full whenever the snapshot is rebuilt, never patched incrementally.
pub fn compute_statistics(
    samples: &[DriverSample],
    blocklist_check: Option<&HvciBlocklistCheck>,
    now: DateTime<Utc>,
) -> DriverStatistics {
    let mut stats = DriverStatistics {
        total: samples.len(),
        hvci_compatible: 0,
        killer_drivers: 0,
        signed: 0,
        last_updated: now,
        hvci_blocklist_check: blocklist_check.cloned(),
    };

    for sample in samples {
        if filters::loads_despite_hvci(sample) {
            stats.hvci_compatible += 1;
        }
        if filters::is_killer(sample) {
            stats.killer_drivers += 1;
        }
        if filters::is_signed(sample) {
            stats.signed += 1;
        }
    }

    stats
}
