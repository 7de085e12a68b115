//! Data models

pub mod driver;
pub mod stats;

pub use driver::{
    Authentihash, DriverCommands, DriverSample, DriverSignature, RawDriverRecord,
    SignatureCertificate,
};
pub use stats::{DriverStatistics, HvciBlocklistCheck};
