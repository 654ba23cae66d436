use std::sync::Arc;

use crate::config::Config;
use crate::importer::IiifImporter;
use crate::observability::Metrics;
use crate::transport::Transport;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub transport: Arc<dyn Transport>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Fresh importer per request; nothing is shared between imports but the transport
    pub fn importer(&self, manifest_uri: impl Into<String>) -> IiifImporter {
        self.config.importer(manifest_uri, self.transport.clone())
    }
}
