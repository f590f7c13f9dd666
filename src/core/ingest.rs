use crate::core::admission::AdmissionController;
use crate::domain::model::Document;
use crate::domain::ports::DocumentStore;
use crate::utils::error::{IngestError, Result};
use crate::utils::monitor::IngestMonitor;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Admitted and persisted; `stored` is the collection size after the append.
    Accepted { stored: usize },
    /// Over the window limit. The store was not touched.
    Rejected,
}

/// Admission + persistence for one document creation request.
#[derive(Clone)]
pub struct IngestService {
    admission: AdmissionController,
    store: Arc<dyn DocumentStore>,
    monitor: Arc<IngestMonitor>,
}

impl IngestService {
    pub fn new(
        admission: AdmissionController,
        store: Arc<dyn DocumentStore>,
        monitor: Arc<IngestMonitor>,
    ) -> Self {
        Self {
            admission,
            store,
            monitor,
        }
    }

    pub fn admission(&self) -> &AdmissionController {
        &self.admission
    }

    pub fn monitor(&self) -> &Arc<IngestMonitor> {
        &self.monitor
    }

    pub fn decode(&self, body: &[u8]) -> Result<Document> {
        serde_json::from_slice(body).map_err(|e| {
            self.monitor.record_decode_failure();
            tracing::warn!("Rejected malformed document payload: {}", e);
            IngestError::DecodeError(e)
        })
    }

    pub async fn submit(&self, document: Document) -> Result<Submission> {
        if !self.admission.try_admit() {
            self.monitor.record_rejected();
            tracing::warn!(
                doc_id = %document.doc_id,
                limit = self.admission.limit(),
                "Document rejected: request limit exceeded"
            );
            return Ok(Submission::Rejected);
        }
        self.monitor.record_admitted();

        let doc_id = document.doc_id.clone();
        match self.store.append(document).await {
            Ok(stored) => {
                self.monitor.record_persisted();
                tracing::info!(doc_id = %doc_id, stored, "Document saved");
                Ok(Submission::Accepted { stored })
            }
            Err(e) => {
                self.monitor.record_storage_failure();
                tracing::error!(doc_id = %doc_id, error = %e, "Failed to save document");
                Err(e)
            }
        }
    }

    pub async fn submit_bytes(&self, body: &[u8]) -> Result<Submission> {
        let document = self.decode(body)?;
        self.submit(document).await
    }
}
