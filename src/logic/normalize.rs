//! Normalizer
//!
//! Flattens the raw dataset into one `DriverSample` per known vulnerable
//! binary. The dataset ships in several top-level shapes (bare array,
//! wrapper object, single record), all of which must coerce to a valid
//! sequence; malformed entries are skipped, never fatal.

use serde_json::Value;

use crate::models::{DriverSample, HvciBlocklistCheck, RawDriverRecord};

/// Wrapper keys checked, in order, when the top-level payload is an object.
const ARRAY_KEYS: &[&str] = &["drivers", "data", "items"];

/// Coerce the top-level payload into a sequence of record values.
///
/// A bare array is taken as-is; an object is unwrapped through the first
/// conventional array-bearing key, falling back to treating the object as a
/// single record; anything else yields an empty sequence.
pub fn extract_records(payload: &Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items.clone(),
        Value::Object(map) => {
            for key in ARRAY_KEYS {
                if let Some(Value::Array(items)) = map.get(*key) {
                    return items.clone();
                }
            }
            vec![payload.clone()]
        }
        _ => Vec::new(),
    }
}

/// Flatten the raw payload into canonical driver samples.
///
/// Each record with a non-empty `KnownVulnerableSamples` sequence yields one
/// sample per entry, with the parent metadata merged on. A record with no
/// samples yields itself as a single sample. Non-object entries are dropped
/// silently.
pub fn normalize(payload: &Value) -> Vec<DriverSample> {
    let mut samples = Vec::new();

    for record_value in extract_records(payload) {
        if !record_value.is_object() {
            continue;
        }

        let Ok(record) = serde_json::from_value::<RawDriverRecord>(record_value.clone()) else {
            continue;
        };

        if record.known_vulnerable_samples.is_empty() {
            // Fallback: the record itself is the sample.
            if let Ok(sample) = serde_json::from_value::<DriverSample>(record_value) {
                samples.push(sample);
            }
            continue;
        }

        for sample_value in &record.known_vulnerable_samples {
            if !sample_value.is_object() {
                continue;
            }
            if let Ok(mut sample) = serde_json::from_value::<DriverSample>(sample_value.clone()) {
                sample.apply_parent(&record);
                samples.push(sample);
            }
        }
    }

    samples
}

/// Pull the offline blocklist-check metadata out of the payload, if the
/// maintenance script has written one.
pub fn extract_metadata(payload: &Value) -> Option<HvciBlocklistCheck> {
    let block = payload.get("_metadata")?.get("hvciBlocklistCheck")?;
    serde_json::from_value(block.clone()).ok()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_one_sample_per_known_vulnerable_entry() {
        let payload = json!([{
            "Id": "driver-1",
            "Author": "hfiref0x",
            "Tags": ["rzpnk.sys"],
            "Category": "vulnerable driver",
            "KnownVulnerableSamples": [
                { "Filename": "rzpnk.sys", "MD5": "aa1" },
                { "Filename": "rzpnk_v2.sys", "MD5": "aa2" },
                { "Filename": "rzpnk_v3.sys", "MD5": "aa3" }
            ]
        }]);

        let samples = normalize(&payload);
        assert_eq!(samples.len(), 3);
        for sample in &samples {
            assert_eq!(sample.driver_id.as_deref(), Some("driver-1"));
            assert_eq!(sample.author.as_deref(), Some("hfiref0x"));
            assert_eq!(sample.tags, vec!["rzpnk.sys"]);
        }
        assert_eq!(samples[1].filename.as_deref(), Some("rzpnk_v2.sys"));
    }

    #[test]
    fn test_record_without_samples_emits_itself() {
        let payload = json!([{
            "Id": "driver-2",
            "Filename": "orphan.sys",
            "Category": "malicious"
        }]);

        let samples = normalize(&payload);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].filename.as_deref(), Some("orphan.sys"));
        assert_eq!(samples[0].driver_id.as_deref(), Some("driver-2"));
    }

    #[test]
    fn test_non_object_records_are_dropped() {
        let payload = json!([
            "just a string",
            42,
            null,
            { "Id": "driver-3", "KnownVulnerableSamples": [{ "Filename": "ok.sys" }] }
        ]);

        let samples = normalize(&payload);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].filename.as_deref(), Some("ok.sys"));
    }

    #[test]
    fn test_wrapper_object_unwraps_conventional_keys() {
        for key in ["drivers", "data", "items"] {
            let payload = json!({
                key: [{ "Id": "driver-4", "KnownVulnerableSamples": [{ "Filename": "a.sys" }] }],
                "_metadata": { "hvciBlocklistCheck": { "source": "msft" } }
            });

            let samples = normalize(&payload);
            assert_eq!(samples.len(), 1, "key {key} should unwrap");
        }
    }

    #[test]
    fn test_single_object_becomes_one_record() {
        let payload = json!({ "Id": "driver-5", "Filename": "solo.sys" });
        let samples = normalize(&payload);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].filename.as_deref(), Some("solo.sys"));
    }

    #[test]
    fn test_uncoercible_payload_yields_empty_sequence() {
        assert!(normalize(&json!("nope")).is_empty());
        assert!(normalize(&json!(7)).is_empty());
        assert!(normalize(&json!(null)).is_empty());
    }

    #[test]
    fn test_extract_metadata() {
        let payload = json!({
            "drivers": [],
            "_metadata": {
                "hvciBlocklistCheck": {
                    "lastCheck": "2025-11-02T10:00:00Z",
                    "totalBlockedHashes": 2153,
                    "matchedDrivers": 412,
                    "source": "Microsoft recommended driver block rules"
                }
            }
        });

        let meta = extract_metadata(&payload).unwrap();
        assert_eq!(meta.total_blocked_hashes, Some(2153));
        assert_eq!(meta.matched_drivers, Some(412));

        assert!(extract_metadata(&json!([])).is_none());
    }
}
