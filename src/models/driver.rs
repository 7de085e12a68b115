//! Driver record models
//!
//! Typed mirror of the LOLDrivers dataset shapes. The dataset is
//! community-maintained JSON with PascalCase keys and plenty of missing or
//! oddly-typed fields, so every field is optional and decoding is lenient:
//! a wrongly-typed field decodes to its empty default instead of failing
//! the whole record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// RAW RECORD (top-level dataset entry)
// ============================================================================

/// A top-level dataset entry: driver metadata plus zero or more
/// known vulnerable binary samples.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDriverRecord {
    #[serde(rename = "Id", default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    #[serde(rename = "Tags", default, deserialize_with = "lenient_string_vec")]
    pub tags: Vec<String>,

    #[serde(rename = "Verified", default, deserialize_with = "lenient_string")]
    pub verified: Option<String>,

    #[serde(rename = "Author", default, deserialize_with = "lenient_string")]
    pub author: Option<String>,

    #[serde(rename = "Created", default, deserialize_with = "lenient_string")]
    pub created: Option<String>,

    #[serde(rename = "MitreID", default, deserialize_with = "lenient_string")]
    pub mitre_id: Option<String>,

    #[serde(rename = "CVE", default, deserialize_with = "lenient_string_vec")]
    pub cve: Vec<String>,

    #[serde(rename = "Category", default, deserialize_with = "lenient_string")]
    pub category: Option<String>,

    #[serde(rename = "Commands", default, deserialize_with = "lenient_commands")]
    pub commands: Option<DriverCommands>,

    #[serde(rename = "Resources", default, deserialize_with = "lenient_string_vec")]
    pub resources: Vec<String>,

    /// Kept as raw values: each entry is decoded into a [`DriverSample`]
    /// during normalization so a malformed sample only drops itself.
    #[serde(rename = "KnownVulnerableSamples", default, deserialize_with = "lenient_value_vec")]
    pub known_vulnerable_samples: Vec<Value>,
}

// ============================================================================
// CANONICAL DRIVER SAMPLE
// ============================================================================

/// The flattened unit every downstream component operates on: one vulnerable
/// binary sample with its parent record's metadata merged in. Immutable value
/// copy after normalization; no back-reference to the parent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverSample {
    // --- sample fields ---
    #[serde(rename = "Filename", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(rename = "OriginalFilename", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,

    #[serde(rename = "Company", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(rename = "Description", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "FileVersion", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub file_version: Option<String>,

    #[serde(rename = "Copyright", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    #[serde(rename = "MD5", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,

    #[serde(rename = "SHA1", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,

    #[serde(rename = "SHA256", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,

    /// Authenticode digest of the binary, distinct from the raw file hashes.
    #[serde(rename = "Authentihash", default, deserialize_with = "lenient_authentihash", skip_serializing_if = "Option::is_none")]
    pub authentihash: Option<Authentihash>,

    #[serde(rename = "ImportedFunctions", default, deserialize_with = "lenient_string_vec", skip_serializing_if = "Vec::is_empty")]
    pub imported_functions: Vec<String>,

    /// Tri-state as shipped in the dataset: "TRUE", "FALSE" or absent.
    #[serde(rename = "LoadsDespiteHVCI", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub loads_despite_hvci: Option<String>,

    #[serde(rename = "Signatures", default, deserialize_with = "lenient_signatures", skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<DriverSignature>,

    // --- parent record metadata, merged in by the normalizer ---
    #[serde(rename = "Id", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,

    #[serde(rename = "Tags", default, deserialize_with = "lenient_string_vec", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(rename = "Verified", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub verified: Option<String>,

    #[serde(rename = "Author", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(rename = "Created", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    #[serde(rename = "MitreID", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub mitre_id: Option<String>,

    #[serde(rename = "CVE", default, deserialize_with = "lenient_string_vec", skip_serializing_if = "Vec::is_empty")]
    pub cve: Vec<String>,

    #[serde(rename = "Category", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(rename = "Commands", default, deserialize_with = "lenient_commands", skip_serializing_if = "Option::is_none")]
    pub commands: Option<DriverCommands>,

    #[serde(rename = "Resources", default, deserialize_with = "lenient_string_vec", skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
}

impl DriverSample {
    /// Copy the parent record's metadata onto this sample. Fields the sample
    /// already carries win on collision (in practice the key sets are
    /// disjoint).
    pub fn apply_parent(&mut self, parent: &RawDriverRecord) {
        if self.driver_id.is_none() {
            self.driver_id = parent.id.clone();
        }
        if self.tags.is_empty() {
            self.tags = parent.tags.clone();
        }
        if self.verified.is_none() {
            self.verified = parent.verified.clone();
        }
        if self.author.is_none() {
            self.author = parent.author.clone();
        }
        if self.created.is_none() {
            self.created = parent.created.clone();
        }
        if self.mitre_id.is_none() {
            self.mitre_id = parent.mitre_id.clone();
        }
        if self.cve.is_empty() {
            self.cve = parent.cve.clone();
        }
        if self.category.is_none() {
            self.category = parent.category.clone();
        }
        if self.commands.is_none() {
            self.commands = parent.commands.clone();
        }
        if self.resources.is_empty() {
            self.resources = parent.resources.clone();
        }
    }
}

// ============================================================================
// NESTED SHAPES
// ============================================================================

/// Authenticode digest hashes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Authentihash {
    #[serde(rename = "MD5", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,

    #[serde(rename = "SHA1", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,

    #[serde(rename = "SHA256", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// One Authenticode signature on a sample.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverSignature {
    #[serde(rename = "Certificates", default, deserialize_with = "lenient_certificates", skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<SignatureCertificate>,
}

/// A certificate in a signature chain. Validity bounds stay as the dataset's
/// strings; they are parsed on demand by the filter engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignatureCertificate {
    #[serde(rename = "ValidFrom", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,

    #[serde(rename = "ValidTo", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<String>,
}

/// Usage metadata attached to a driver record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverCommands {
    #[serde(rename = "Command", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(rename = "Description", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "OperatingSystem", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<String>,

    #[serde(rename = "Privileges", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub privileges: Option<String>,

    #[serde(rename = "Usecase", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub usecase: Option<String>,
}

// ============================================================================
// LENIENT DECODING
// ============================================================================

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accept a string, number or bool; anything else (null, arrays, objects)
/// decodes to `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

/// Accept an array (scalar elements stringified, the rest skipped), a bare
/// scalar (one-element vec) or anything else (empty vec).
fn lenient_string_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(&other).map(|s| vec![s]).unwrap_or_default(),
    })
}

fn lenient_value_vec<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}

fn lenient_signatures<'de, D>(deserializer: D) -> Result<Vec<DriverSignature>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_certificates<'de, D>(deserializer: D) -> Result<Vec<SignatureCertificate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_authentihash<'de, D>(deserializer: D) -> Result<Option<Authentihash>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_commands<'de, D>(deserializer: D) -> Result<Option<DriverCommands>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// ============================================================================
// TESTS
// ============================================================================
