use anyhow::Result;
use doc_ingest::core::ingest::Submission;
use doc_ingest::domain::ports::DocumentStore;
use doc_ingest::utils::monitor::IngestMonitor;
use doc_ingest::{AdmissionController, DocType, Document, IngestService, JsonFileStore};
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;

fn document(id: String) -> Document {
    Document {
        description: None,
        doc_id: id,
        doc_status: Some("NEW".to_string()),
        doc_type: DocType::LpIntroduceGoods,
        import_request: Some(true),
        owner_inn: Some("7700000002".to_string()),
        participant_inn: None,
        producer_inn: None,
        production_date: None,
        production_type: None,
        products: Vec::new(),
        reg_date: None,
        reg_number: None,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_appends_lose_nothing() -> Result<()> {
    const WRITERS: usize = 48;

    let temp_dir = TempDir::new()?;
    let store = Arc::new(JsonFileStore::open(temp_dir.path().join("documents.json")).await?);

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.append(document(format!("doc-{i}"))).await })
        })
        .collect();

    let mut counts = Vec::new();
    for handle in handles {
        counts.push(handle.await??);
    }

    // Each append observed a distinct collection size.
    counts.sort_unstable();
    assert_eq!(counts, (1..=WRITERS).collect::<Vec<_>>());

    let stored = store.load().await?;
    assert_eq!(stored.len(), WRITERS);
    let ids: HashSet<String> = stored.documents.into_iter().map(|d| d.doc_id).collect();
    assert_eq!(ids.len(), WRITERS);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn burst_of_submissions_persists_exactly_the_limit() -> Result<()> {
    const LIMIT: usize = 10;
    const REQUESTS: usize = 64;

    let temp_dir = TempDir::new()?;
    let store = Arc::new(JsonFileStore::open(temp_dir.path().join("documents.json")).await?);
    let monitor = Arc::new(IngestMonitor::new());
    let service = Arc::new(IngestService::new(
        AdmissionController::new(LIMIT),
        store.clone(),
        Arc::clone(&monitor),
    ));

    let handles: Vec<_> = (0..REQUESTS)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.submit(document(format!("burst-{i}"))).await })
        })
        .collect();

    let mut accepted = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await?? {
            Submission::Accepted { .. } => accepted += 1,
            Submission::Rejected => rejected += 1,
        }
    }

    assert_eq!(accepted, LIMIT);
    assert_eq!(rejected, REQUESTS - LIMIT);
    assert_eq!(store.load().await?.len(), LIMIT);

    let stats = monitor.snapshot();
    assert_eq!(stats.admitted, LIMIT as u64);
    assert_eq!(stats.persisted, LIMIT as u64);
    assert_eq!(stats.rejected, (REQUESTS - LIMIT) as u64);
    Ok(())
}
