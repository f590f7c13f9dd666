use anyhow::Result;
use doc_ingest::app::server::serve;
use doc_ingest::config::{ConfigProvider, TomlConfig};
use doc_ingest::domain::ports::DocumentStore;
use doc_ingest::{IngestApp, JsonFileStore};
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

fn config_for(storage_path: &str, limit: usize) -> Result<TomlConfig> {
    let normalized_path = storage_path.replace('\\', "/");
    let content = format!(
        r#"
[server]
host = "127.0.0.1"
port = 0

[admission]
request_limit = {limit}
window_unit = "minutes"
window_length = 1

[storage]
path = "{normalized_path}"
"#
    );
    Ok(TomlConfig::from_toml_str(&content)?)
}

fn document(doc_id: &str) -> serde_json::Value {
    json!({
        "doc_id": doc_id,
        "doc_type": "LP_INTRODUCE_GOODS",
        "importRequest": true,
        "production_date": "2024-03-01",
        "products": []
    })
}

#[tokio::test]
async fn end_to_end_over_tcp() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage_path = temp_dir.path().join("db").join("documents.json");
    let config = config_for(storage_path.to_str().unwrap(), 2)?;

    let app = IngestApp::build(&config).await?;
    assert!(app.ticker.is_running());
    assert_eq!(app.ticker.period(), Duration::from_secs(60));
    let monitor = app.monitor().clone();

    let listener = TcpListener::bind(config.bind_address()).await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(serve(listener, app.state));

    let client = reqwest::Client::new();
    let url = format!("http://{addr}/api/v3/lk/documents/create");

    let mut statuses = Vec::new();
    for i in 0..3 {
        let res = client.post(&url).json(&document(&format!("tcp-{i}"))).send().await?;
        statuses.push(res.status().as_u16());
    }
    assert_eq!(statuses, vec![200, 200, 429]);

    let res = client.get(&url).send().await?;
    assert_eq!(res.status().as_u16(), 405);

    let res = client
        .post(&url)
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await?;
    assert_eq!(res.status().as_u16(), 400);

    server.abort();

    let stored = JsonFileStore::new(&storage_path).load().await?;
    let ids: Vec<String> = stored.documents.into_iter().map(|d| d.doc_id).collect();
    assert_eq!(ids, vec!["tcp-0", "tcp-1"]);

    let stats = monitor.snapshot();
    assert_eq!(stats.persisted, 2);
    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.decode_failures, 1);
    Ok(())
}

#[tokio::test]
async fn build_fails_when_store_is_corrupt() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage_path = temp_dir.path().join("documents.json");
    std::fs::write(&storage_path, "[1, 2, 3]")?;
    let config = config_for(storage_path.to_str().unwrap(), 2)?;

    let err = match IngestApp::build(&config).await {
        Ok(_) => panic!("corrupt store must not open"),
        Err(e) => e,
    };

    assert!(matches!(
        err,
        doc_ingest::IngestError::StorageReadError { .. }
    ));
    Ok(())
}
