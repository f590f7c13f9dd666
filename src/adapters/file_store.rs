use crate::domain::model::{Document, DocumentList};
use crate::domain::ports::DocumentStore;
use crate::utils::error::{IngestError, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Flat JSON file holding `{ "documents": [...] }`.
///
/// Every write goes through one lock and lands via write-to-temp + rename,
/// so readers only ever see a complete file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Opens the store, creating an empty collection when the file is absent.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);

        match fs::try_exists(&store.path).await {
            Ok(true) => {
                let existing = store.load().await?;
                tracing::info!(
                    "📁 Opened document store {} ({} documents)",
                    store.display_path(),
                    existing.len()
                );
            }
            Ok(false) => {
                if let Some(parent) = store.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)
                            .await
                            .map_err(|e| IngestError::storage_write(store.display_path(), e))?;
                    }
                }
                store.write_atomically(&DocumentList::new()).await?;
                tracing::info!("📁 Created empty document store {}", store.display_path());
            }
            Err(e) => return Err(IngestError::storage_read(store.display_path(), e)),
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("documents.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_atomically(&self, documents: &DocumentList) -> Result<()> {
        let data = serde_json::to_vec_pretty(documents)
            .map_err(|e| IngestError::storage_write(self.display_path(), e))?;
        let temp_path = self.temp_path();

        if let Err(e) = write_and_sync(&temp_path, &data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(IngestError::storage_write(self.display_path(), e));
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(IngestError::storage_write(self.display_path(), e));
        }

        // The rename is only durable once the directory entry is flushed.
        sync_parent_dir(&self.path)
            .await
            .map_err(|e| IngestError::storage_write(self.display_path(), e))
    }
}

async fn write_and_sync(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await
}

#[cfg(unix)]
async fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::File::open(parent).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_parent_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> Result<DocumentList> {
        let data = fs::read(&self.path)
            .await
            .map_err(|e| IngestError::storage_read(self.display_path(), e))?;
        serde_json::from_slice(&data).map_err(|e| IngestError::storage_read(self.display_path(), e))
    }

    async fn save(&self, documents: &DocumentList) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_atomically(documents).await
    }

    async fn append(&self, document: Document) -> Result<usize> {
        let _guard = self.write_lock.lock().await;

        let mut documents = self.load().await?;
        documents.push(document);
        self.write_atomically(&documents).await?;

        tracing::debug!(
            "Document store {} now holds {} documents",
            self.display_path(),
            documents.len()
        );
        Ok(documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DocType;
    use tempfile::TempDir;

    fn document(id: &str) -> Document {
        Document {
            description: None,
            doc_id: id.to_string(),
            doc_status: Some("NEW".to_string()),
            doc_type: DocType::LpIntroduceGoods,
            import_request: Some(false),
            owner_inn: None,
            participant_inn: None,
            producer_inn: None,
            production_date: None,
            production_type: None,
            products: Vec::new(),
            reg_date: None,
            reg_number: None,
        }
    }

    #[tokio::test]
    async fn open_creates_empty_store_and_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("documents.json");

        let store = JsonFileStore::open(&path).await.unwrap();

        assert!(path.exists());
        assert!(store.load().await.unwrap().is_empty());
        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({ "documents": [] }));
    }

    #[tokio::test]
    async fn open_keeps_existing_documents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("documents.json");
        let first = JsonFileStore::open(&path).await.unwrap();
        first.append(document("kept")).await.unwrap();

        let reopened = JsonFileStore::open(&path).await.unwrap();

        let list = reopened.load().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.documents[0].doc_id, "kept");
    }

    #[tokio::test]
    async fn sequential_appends_preserve_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("documents.json"))
            .await
            .unwrap();

        for i in 0..5 {
            let count = store.append(document(&format!("doc-{}", i))).await.unwrap();
            assert_eq!(count, i + 1);
        }

        let ids: Vec<String> = store
            .load()
            .await
            .unwrap()
            .documents
            .into_iter()
            .map(|d| d.doc_id)
            .collect();
        assert_eq!(ids, vec!["doc-0", "doc-1", "doc-2", "doc-3", "doc-4"]);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn load_fails_when_file_is_missing() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, IngestError::StorageReadError { .. }));

        let err = store.append(document("lost")).await.unwrap_err();
        assert!(matches!(err, IngestError::StorageReadError { .. }));
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn malformed_content_is_a_read_error_and_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("documents.json");
        std::fs::write(&path, b"{ not json").unwrap();
        let store = JsonFileStore::new(&path);

        let err = store.append(document("x")).await.unwrap_err();

        assert!(matches!(err, IngestError::StorageReadError { .. }));
        assert_eq!(std::fs::read(&path).unwrap(), b"{ not json");
    }

    #[tokio::test]
    async fn save_replaces_the_whole_collection() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("documents.json"))
            .await
            .unwrap();
        store.append(document("old")).await.unwrap();

        let mut replacement = DocumentList::new();
        replacement.push(document("new-a"));
        replacement.push(document("new-b"));
        store.save(&replacement).await.unwrap();

        assert_eq!(store.load().await.unwrap(), replacement);
    }

    #[tokio::test]
    async fn save_into_missing_directory_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("no-such-dir").join("documents.json"));

        let err = store.save(&DocumentList::new()).await.unwrap_err();
        assert!(matches!(err, IngestError::StorageWriteError { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn parent_directory_is_synced_after_rename() {
        let dir = TempDir::new().unwrap();
        assert!(sync_parent_dir(&dir.path().join("documents.json")).await.is_ok());
        assert!(sync_parent_dir(Path::new("documents.json")).await.is_ok());

        let gone = dir.path().join("gone").join("documents.json");
        assert!(sync_parent_dir(&gone).await.is_err());
    }
}
