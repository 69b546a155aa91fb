//! Cardlens core: contact data model, payload classification, and the
//! consolidation rules shared by the scanning pipeline.
//!
//! The scanning logic here is synchronous and side-effect-free. The two
//! collaborators that touch the outside world (code detection, the vision
//! model) live in `cardlens-processing` and `cardlens-services`.

pub mod config;
pub mod contact_builder;
pub mod error;
pub mod merge;
pub mod models;
pub mod payload;

pub use config::Config;
pub use contact_builder::build_contact;
pub use error::ScanError;
pub use merge::{consolidate, merge_field_maps, STANDARD_FIELDS};
pub use models::{
    CompanyAnalysis, ContactData, ContactRecord, ContactResponse, FieldMap, OcrExtraction,
    PlatformInfo, QrCapture, RawScanData, ScanMetadata, ScanResult, ScanType, NO_DETECTION_ERROR,
};
pub use payload::FormatVariant;
