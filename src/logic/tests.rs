//! End-to-end scenario tests over the bundled fallback dataset, exercising
//! the full pipeline: raw payload -> normalizer -> filters/search ->
//! cache -> pagination.

use super::cache::DriverCache;
use super::{fallback, filters, search};
use chrono::Utc;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn dataset_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let payload = fallback::sample_payload();
    write!(file, "{}", serde_json::to_string(&payload).unwrap()).unwrap();
    file
}

#[test]
fn test_end_to_end_scenario() {
    let file = dataset_file();
    let cache = DriverCache::new(
        file.path().to_path_buf(),
        Duration::from_secs(300),
        Duration::from_secs(30),
    );

    // Statistics over the three bundled records.
    let stats = cache.get_statistics().unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.hvci_compatible, 1);
    assert_eq!(stats.killer_drivers, 1);
    assert_eq!(stats.signed, 2);

    // Filtering by killer returns exactly the BadDriver entry.
    let killer = cache
        .search_drivers("", &["killer".to_string()], 1, 50)
        .unwrap();
    assert_eq!(killer.total, 1);
    assert_eq!(killer.drivers[0].filename.as_deref(), Some("BadDriver.sys"));

    // Searching "razer" returns exactly one entry.
    let razer = cache.search_drivers("razer", &[], 1, 50).unwrap();
    assert_eq!(razer.total, 1);
    assert_eq!(razer.drivers[0].company.as_deref(), Some("Razer, Inc."));
}

#[test]
fn test_filters_and_search_compose() {
    let samples = fallback::sample_dataset();
    let now = Utc::now();

    // signed AND hvci: only the Microsoft driver satisfies both.
    let names = vec!["signed".to_string(), "hvci".to_string()];
    let both = filters::apply_filters(samples, &names, now);
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].company.as_deref(), Some("Microsoft Corporation"));

    // signed alone matches two; adding killer drops both out.
    let signed = filters::apply_filters(samples, &["signed".to_string()], now);
    assert_eq!(signed.len(), 2);
    let signed_killer = filters::apply_filters(
        samples,
        &["signed".to_string(), "killer".to_string()],
        now,
    );
    assert!(signed_killer.is_empty());
}

#[test]
fn test_unsigned_filter_matches_bad_driver() {
    let samples = fallback::sample_dataset();
    let unsigned = filters::apply_filters(samples, &["unsigned".to_string()], Utc::now());
    assert_eq!(unsigned.len(), 1);
    assert_eq!(unsigned[0].filename.as_deref(), Some("BadDriver.sys"));
}

#[test]
fn test_search_spans_parent_metadata() {
    let samples = fallback::sample_dataset();

    // MitreID and CVE come from the parent record, merged by normalization.
    assert_eq!(search::search(samples, "T1562").len(), 1);
    assert_eq!(search::search(samples, "cve-2017-9769").len(), 1);
}
