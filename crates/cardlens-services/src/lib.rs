//! Cardlens services: the vision extraction provider and the scanner that
//! orchestrates both recognizer pipelines.

pub mod openai;
pub mod scanner;
pub mod vision;

pub use openai::OpenAiVisionService;
pub use scanner::ContactScanner;
pub use vision::ContactVisionProvider;
