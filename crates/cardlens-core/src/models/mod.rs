pub mod contact;
pub mod response;
pub mod scan;

pub use contact::{CompanyAnalysis, ContactRecord, FieldMap};
pub use response::{ContactData, ContactResponse, PlatformInfo, ScanMetadata};
pub use scan::{
    OcrExtraction, QrCapture, RawScanData, ScanResult, ScanType, NO_DETECTION_ERROR,
};
