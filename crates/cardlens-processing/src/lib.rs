//! Cardlens processing: machine-readable code detection on raw image bytes.

pub mod qr;
pub mod traits;

pub use qr::QrCodeDetector;
pub use traits::{CodeDetector, DetectError};
