//! Filter Engine
//!
//! Named boolean predicates over a `DriverSample`, combined with AND
//! semantics. No precomputed indices: every query re-evaluates the
//! predicates over the full snapshot, which is fine at the dataset's scale
//! (tens of thousands of samples).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::DriverSample;

// ============================================================================
// PREDICATES
// ============================================================================

/// Imported-function substrings that mark a driver as able to kill
/// arbitrary processes (BYOVD abuse pattern).
pub const KILLER_IMPORTS: &[&str] = &["zwterminateprocess", "zwkillprocess", "ntterminate"];

/// `LoadsDespiteHVCI` is present and equals "TRUE" case-insensitively.
pub fn loads_despite_hvci(sample: &DriverSample) -> bool {
    sample
        .loads_despite_hvci
        .as_deref()
        .map(|v| v.eq_ignore_ascii_case("TRUE"))
        .unwrap_or(false)
}

/// Any imported function name contains one of the known process-kill APIs.
pub fn is_killer(sample: &DriverSample) -> bool {
    sample.imported_functions.iter().any(|import| {
        let import = import.to_lowercase();
        KILLER_IMPORTS.iter().any(|needle| import.contains(needle))
    })
}

pub fn is_signed(sample: &DriverSample) -> bool {
    !sample.signatures.is_empty()
}

pub fn is_unsigned(sample: &DriverSample) -> bool {
    sample.signatures.is_empty()
}

/// Any certificate in any signature is still inside its validity window:
/// `ValidTo` strictly later than `now`. A certificate expiring exactly at
/// `now` does not count.
pub fn has_active_certificate(sample: &DriverSample, now: DateTime<Utc>) -> bool {
    sample
        .signatures
        .iter()
        .flat_map(|sig| sig.certificates.iter())
        .filter_map(|cert| cert.valid_to.as_deref())
        .filter_map(parse_timestamp)
        .any(|valid_to| valid_to > now)
}

/// Parse the dataset's certificate timestamps. Certificates carry either
/// RFC 3339 strings or "YYYY-MM-DD HH:MM:SS" (sometimes date-only).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}

// ============================================================================
// COMBINATOR
// ============================================================================

/// AND across all active filter names. An empty set matches everything.
/// Unknown filter names pass; the browsing UI has always sent names straight
/// through, so an unrecognized name degrades to "no constraint" instead of
/// an error.
pub fn matches_filters(sample: &DriverSample, names: &[String], now: DateTime<Utc>) -> bool {
    names.iter().all(|name| match name.as_str() {
        "hvci" => loads_despite_hvci(sample),
        "killer" => is_killer(sample),
        "signed" => is_signed(sample),
        "unsigned" => is_unsigned(sample),
        "recent" => has_active_certificate(sample, now),
        _ => true,
    })
}

/// Convenience wrapper: the subsequence of `samples` matching all filters.
pub fn apply_filters<'a>(
    samples: &'a [DriverSample],
    names: &[String],
    now: DateTime<Utc>,
) -> Vec<&'a DriverSample> {
    samples
        .iter()
        .filter(|sample| matches_filters(sample, names, now))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DriverSignature, SignatureCertificate};
    use chrono::TimeZone;

    fn signed_until(valid_to: &str) -> Vec<DriverSignature> {
        vec![DriverSignature {
            certificates: vec![SignatureCertificate {
                valid_from: None,
                valid_to: Some(valid_to.to_string()),
            }],
        }]
    }

    #[test]
    fn test_hvci_predicate_is_case_insensitive() {
        let mut sample = DriverSample {
            loads_despite_hvci: Some("true".to_string()),
            ..Default::default()
        };
        assert!(loads_despite_hvci(&sample));

        sample.loads_despite_hvci = Some("TRUE".to_string());
        assert!(loads_despite_hvci(&sample));

        sample.loads_despite_hvci = Some("FALSE".to_string());
        assert!(!loads_despite_hvci(&sample));

        sample.loads_despite_hvci = None;
        assert!(!loads_despite_hvci(&sample));
    }

    #[test]
    fn test_killer_matches_substring_case_insensitively() {
        let sample = DriverSample {
            imported_functions: vec!["IoCreateDevice".to_string(), "ZwTerminateProcess".to_string()],
            ..Default::default()
        };
        assert!(is_killer(&sample));

        let benign = DriverSample {
            imported_functions: vec!["IoCreateDevice".to_string(), "ZwClose".to_string()],
            ..Default::default()
        };
        assert!(!benign.imported_functions.is_empty());
        assert!(!is_killer(&benign));

        // NtTerminateProcess matches the "ntterminate" needle.
        let nt = DriverSample {
            imported_functions: vec!["NtTerminateProcess".to_string()],
            ..Default::default()
        };
        assert!(is_killer(&nt));
    }

    #[test]
    fn test_signed_and_unsigned_are_complements() {
        let signed = DriverSample {
            signatures: signed_until("2030-01-01 00:00:00"),
            ..Default::default()
        };
        assert!(is_signed(&signed));
        assert!(!is_unsigned(&signed));

        let unsigned = DriverSample::default();
        assert!(!is_signed(&unsigned));
        assert!(is_unsigned(&unsigned));
    }

    #[test]
    fn test_active_certificate_boundary_is_strict() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        let sample = DriverSample {
            signatures: signed_until("2025-06-01 12:00:00"),
            ..Default::default()
        };
        // ValidTo exactly equal to now is NOT active.
        assert!(!has_active_certificate(&sample, now));
        // One tick earlier, and the certificate is still active.
        assert!(has_active_certificate(
            &sample,
            now - chrono::Duration::microseconds(1)
        ));

        let expired = DriverSample {
            signatures: signed_until("2019-03-18 12:00:00"),
            ..Default::default()
        };
        assert!(!has_active_certificate(&expired, now));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2026-06-03 22:31:00").is_some());
        assert!(parse_timestamp("2026-06-03T22:31:00").is_some());
        assert!(parse_timestamp("2026-06-03T22:31:00Z").is_some());
        assert!(parse_timestamp("2026-06-03").is_some());
        assert!(parse_timestamp("not a date").is_none());
    }

    #[test]
    fn test_and_semantics_across_filters() {
        let now = Utc::now();
        let sample = DriverSample {
            loads_despite_hvci: Some("TRUE".to_string()),
            imported_functions: vec!["ZwClose".to_string()],
            ..Default::default()
        };

        let hvci = vec!["hvci".to_string()];
        let both = vec!["hvci".to_string(), "killer".to_string()];

        assert!(matches_filters(&sample, &hvci, now));
        assert!(!matches_filters(&sample, &both, now));
    }

    #[test]
    fn test_empty_filter_set_is_identity() {
        let now = Utc::now();
        let samples = vec![DriverSample::default(), DriverSample::default()];
        assert_eq!(apply_filters(&samples, &[], now).len(), 2);
    }

    #[test]
    fn test_unknown_filter_names_pass() {
        let now = Utc::now();
        let sample = DriverSample::default();
        let names = vec!["definitely-not-a-filter".to_string()];
        assert!(matches_filters(&sample, &names, now));
    }
}
