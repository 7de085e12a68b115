//! Search Engine
//!
//! Case-insensitive substring search across a fixed set of sample fields.
//! A deliberate linear scan: at tens of thousands of samples a per-query
//! walk is cheap enough that an inverted index would be overbuilt.

use crate::models::DriverSample;

fn field_contains(field: Option<&str>, query: &str) -> bool {
    field
        .map(|value| value.to_lowercase().contains(query))
        .unwrap_or(false)
}

/// Whether any searched field of the sample contains `query`.
///
/// `query` must already be trimmed and lowercased. Fields are checked in a
/// fixed order and the first hit short-circuits; absent fields are skipped.
pub fn matches_query(sample: &DriverSample, query: &str) -> bool {
    let direct = [
        // Display name prefers OriginalFilename, like the listing UI does.
        sample
            .original_filename
            .as_deref()
            .or(sample.filename.as_deref()),
        sample.company.as_deref(),
        sample.description.as_deref(),
        sample.md5.as_deref(),
        sample.sha1.as_deref(),
        sample.sha256.as_deref(),
        sample.file_version.as_deref(),
        sample.copyright.as_deref(),
        sample.category.as_deref(),
        sample.author.as_deref(),
        sample.mitre_id.as_deref(),
        sample.verified.as_deref(),
    ];
    if direct.iter().any(|field| field_contains(*field, query)) {
        return true;
    }

    if let Some(auth) = &sample.authentihash {
        let hashes = [auth.md5.as_deref(), auth.sha1.as_deref(), auth.sha256.as_deref()];
        if hashes.iter().any(|field| field_contains(*field, query)) {
            return true;
        }
    }

    if sample.tags.iter().any(|tag| field_contains(Some(tag), query)) {
        return true;
    }
    if sample.cve.iter().any(|cve| field_contains(Some(cve), query)) {
        return true;
    }
    if sample
        .imported_functions
        .iter()
        .any(|import| field_contains(Some(import), query))
    {
        return true;
    }

    if field_contains(sample.loads_despite_hvci.as_deref(), query) {
        return true;
    }

    if let Some(commands) = &sample.commands {
        let fields = [
            commands.command.as_deref(),
            commands.description.as_deref(),
            commands.operating_system.as_deref(),
            commands.privileges.as_deref(),
            commands.usecase.as_deref(),
        ];
        if fields.iter().any(|field| field_contains(*field, query)) {
            return true;
        }
    }

    false
}

/// The subsequence of `samples` matching the free-text query. The query is
/// trimmed and lowercased once; an empty or whitespace-only query matches
/// everything.
pub fn search<'a>(samples: &'a [DriverSample], query: &str) -> Vec<&'a DriverSample> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return samples.iter().collect();
    }

    samples
        .iter()
        .filter(|sample| matches_query(sample, &query))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Authentihash, DriverCommands};

    fn razer_sample() -> DriverSample {
        DriverSample {
            filename: Some("rzpnk.sys".to_string()),
            company: Some("Razer, Inc.".to_string()),
            description: Some("Razer Overlay Support".to_string()),
            sha256: Some("93d873cdf23d5edc622b74f9544cac7fe247d7a68e1e2a7bf2879d7b7fe3a5f4".to_string()),
            tags: vec!["rzpnk.sys".to_string()],
            cve: vec!["CVE-2017-9769".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let samples = vec![razer_sample()];

        let upper = search(&samples, "RAZER");
        let lower = search(&samples, "razer");
        assert_eq!(upper.len(), 1);
        assert_eq!(lower.len(), 1);
        assert_eq!(
            upper[0].company.as_deref(),
            lower[0].company.as_deref()
        );
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let samples = vec![razer_sample(), DriverSample::default()];
        assert_eq!(search(&samples, "").len(), 2);
        assert_eq!(search(&samples, "   ").len(), 2);
    }

    #[test]
    fn test_hash_prefix_matches() {
        let samples = vec![razer_sample()];
        assert_eq!(search(&samples, "93d873cdf23d").len(), 1);
    }

    #[test]
    fn test_cve_and_tag_elements_are_searched() {
        let samples = vec![razer_sample()];
        assert_eq!(search(&samples, "cve-2017-9769").len(), 1);
        assert_eq!(search(&samples, "rzpnk").len(), 1);
    }

    #[test]
    fn test_original_filename_preferred_over_filename() {
        let sample = DriverSample {
            filename: Some("renamed.sys".to_string()),
            original_filename: Some("gdrv.sys".to_string()),
            ..Default::default()
        };
        assert!(matches_query(&sample, "gdrv"));
        // Filename is shadowed when OriginalFilename is present.
        assert!(!matches_query(&sample, "renamed"));
    }

    #[test]
    fn test_imported_functions_and_commands_are_searched() {
        let sample = DriverSample {
            imported_functions: vec!["ZwTerminateProcess".to_string()],
            commands: Some(DriverCommands {
                command: Some("sc.exe create baddrv binPath=...".to_string()),
                operating_system: Some("Windows 10".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches_query(&sample, "zwterminate"));
        assert!(matches_query(&sample, "sc.exe"));
        assert!(matches_query(&sample, "windows 10"));
        assert!(!matches_query(&sample, "linux"));
    }

    #[test]
    fn test_authentihash_is_searched() {
        let sample = DriverSample {
            authentihash: Some(Authentihash {
                sha1: Some("c1b4c57cbbb9ad6bcf235bdfa97a08e37f33f8d1".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches_query(&sample, "c1b4c57c"));
    }

    #[test]
    fn test_no_match_returns_empty() {
        let samples = vec![razer_sample()];
        assert!(search(&samples, "does-not-exist-anywhere").is_empty());
    }
}
