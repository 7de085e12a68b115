//! Bundled fallback dataset
//!
//! A tiny built-in slice of the catalog, kept as raw records in the
//! dataset's own shape. Client mirrors substitute it when the real dataset
//! cannot be fetched, so the UI degrades to a populated (if short) listing
//! instead of a blank state. Also the fixture for the end-to-end tests.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use super::normalize;
use crate::models::DriverSample;

static SAMPLES: Lazy<Vec<DriverSample>> = Lazy::new(|| normalize::normalize(&sample_payload()));

/// The fallback records as a raw payload, exactly as they would appear in
/// the backing file.
pub fn sample_payload() -> Value {
    json!([
        {
            "Id": "2d7b2b77-c362-4b84-8d7d-02d2e8a36132",
            "Author": "LOLDrivers",
            "Created": "2023-05-20",
            "MitreID": "T1068",
            "Category": "vulnerable driver",
            "Verified": "TRUE",
            "Tags": ["rzpnk.sys"],
            "CVE": ["CVE-2017-9769"],
            "Commands": {
                "Command": "sc.exe create rzpnk binPath=C:\\windows\\temp\\rzpnk.sys type=kernel && sc.exe start rzpnk",
                "Description": "Razer Overlay Support driver with an exposed IOCTL allowing handle duplication",
                "OperatingSystem": "Windows 10",
                "Privileges": "kernel",
                "Usecase": "Elevate privileges"
            },
            "KnownVulnerableSamples": [{
                "Filename": "rzpnk.sys",
                "Company": "Razer, Inc.",
                "Description": "Razer Overlay Support",
                "FileVersion": "1.0.12.0",
                "Copyright": "Copyright (C) 2015 Razer, Inc.",
                "MD5": "a0cf0e0ff14470bbf21c1bbd5a2a2b1d",
                "SHA1": "dd201a4a1f6e4a5bd10b0ce01c7c9d06b534e04b",
                "SHA256": "93d873cdf23d5edc622b74f9544cac7fe247d7a68e1e2a7bf2879d7b7fe3a5f4",
                "LoadsDespiteHVCI": "FALSE",
                "ImportedFunctions": ["ZwOpenProcess", "IoCreateDevice", "ObReferenceObjectByHandle"],
                "Signatures": [{
                    "Certificates": [{
                        "ValidFrom": "2015-10-01 00:00:00",
                        "ValidTo": "2019-03-18 12:00:00"
                    }]
                }]
            }]
        },
        {
            "Id": "8c4b1dc3-68f9-4e34-9e04-0bb201f0c015",
            "Author": "LOLDrivers",
            "Created": "2023-05-20",
            "MitreID": "T1068",
            "Category": "vulnerable driver",
            "Verified": "TRUE",
            "Tags": ["procexp.sys"],
            "KnownVulnerableSamples": [{
                "Filename": "procexp.sys",
                "Company": "Microsoft Corporation",
                "Description": "Process Explorer",
                "FileVersion": "16.32",
                "MD5": "6d9b12e5d21ebdfc566d27d0079a1a5e",
                "SHA1": "aa612a6d3ecde1e4e4fb31e81f9f4e3c11f349b5",
                "SHA256": "0b2f2b4b4f4e27aee0a4ed6c35f5b9b1f3a28e403ba27314ea8a38128ba0c5de",
                "LoadsDespiteHVCI": "TRUE",
                "ImportedFunctions": ["IoCreateDevice", "ZwClose", "ObOpenObjectByPointer"],
                "Signatures": [{
                    "Certificates": [{
                        "ValidFrom": "2021-09-02 00:00:00",
                        "ValidTo": "2031-07-01 00:00:00"
                    }]
                }]
            }]
        },
        {
            "Id": "f3b4d2aa-1c69-41f4-9cd0-2b2d64d90e6b",
            "Author": "LOLDrivers",
            "Created": "2023-05-20",
            "MitreID": "T1562.001",
            "Category": "malicious",
            "Verified": "TRUE",
            "Tags": ["BadDriver.sys"],
            "KnownVulnerableSamples": [{
                "Filename": "BadDriver.sys",
                "Company": "Contoso Ltd",
                "Description": "Process killer used to disable endpoint protection",
                "MD5": "44d88612fea8a8f36de82e1278abb02f",
                "SHA1": "3395856ce81f2b7382dee72602f798b642f14140",
                "SHA256": "275a021bbfb6489e54d471899f7db9d1663fc695ec2fe2a2c4538aabf651fd0f",
                "LoadsDespiteHVCI": "FALSE",
                "ImportedFunctions": ["ZwTerminateProcess", "ZwOpenProcess", "PsLookupProcessByProcessId"]
            }]
        }
    ])
}

/// The fallback records, normalized.
pub fn sample_dataset() -> &'static [DriverSample] {
    &SAMPLES
}
