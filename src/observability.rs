//! Import counters

use std::sync::atomic::{AtomicU64, Ordering};

use crate::importer::ImportError;

/// Process-wide counters for the HTTP surface
#[derive(Debug, Default)]
pub struct Metrics {
    manifests_validated: AtomicU64,
    manifests_rejected: AtomicU64,
    validator_unavailable: AtomicU64,
    tasks_generated: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manifest_validated(&self) {
        self.manifests_validated.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "manifests_validated", "Metric incremented");
    }

    pub fn tasks_generated(&self, count: usize) {
        self.tasks_generated
            .fetch_add(count as u64, Ordering::Relaxed);
        tracing::debug!(counter = "tasks_generated", count, "Metric incremented");
    }

    /// Bucket a failed import by kind
    pub fn import_failed(&self, error: &ImportError) {
        let counter = match error {
            ImportError::InvalidManifest(_) | ImportError::MalformedManifest(_) => {
                &self.manifests_rejected
            }
            ImportError::Transport(_) => &self.validator_unavailable,
        };

        counter.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(error = %error, "Import failure recorded");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            manifests_validated: self.manifests_validated.load(Ordering::Relaxed),
            manifests_rejected: self.manifests_rejected.load(Ordering::Relaxed),
            validator_unavailable: self.validator_unavailable.load(Ordering::Relaxed),
            tasks_generated: self.tasks_generated.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub manifests_validated: u64,
    pub manifests_rejected: u64,
    pub validator_unavailable: u64,
    pub tasks_generated: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::InvalidReason;
    use crate::transport::TransportError;

    #[test]
    fn test_metrics_counts() {
        let metrics = Metrics::new();

        metrics.manifest_validated();
        metrics.tasks_generated(6);
        metrics.tasks_generated(2);
        metrics.import_failed(&ImportError::InvalidManifest(InvalidReason::Rejected));
        metrics.import_failed(&ImportError::MalformedManifest("x".to_string()));
        metrics.import_failed(&ImportError::Transport(TransportError::Timeout));

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                manifests_validated: 1,
                manifests_rejected: 2,
                validator_unavailable: 1,
                tasks_generated: 8,
            }
        );
    }
}
