use crate::core::companies::CompanyRegistry;
use crate::domain::ports::DocumentSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DocumentSource>,
    pub registry: Arc<CompanyRegistry>,
}

impl AppState {
    pub fn new(source: Arc<dyn DocumentSource>, registry: CompanyRegistry) -> Self {
        Self {
            source,
            registry: Arc::new(registry),
        }
    }
}
