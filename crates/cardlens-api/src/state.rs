use std::sync::Arc;

use cardlens_services::ContactScanner;

#[derive(Clone)]
pub struct AppState {
    pub scanner: Arc<ContactScanner>,
}

impl AppState {
    pub fn new(scanner: ContactScanner) -> Self {
        Self {
            scanner: Arc::new(scanner),
        }
    }
}
