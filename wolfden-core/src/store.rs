//! File-backed JSON document store.
//!
//! Layout under the root directory:
//!
//! ```text
//! config.json            server configuration (see ConfigDocument)
//! default_prompt.json    read-only reference document
//! saves/<name>.json      one file per saved game
//! presets/<name>.json    one file per preset
//! ```
//!
//! Nothing is cached: every call goes to the filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::collection::{document_name, with_json_suffix, Collection, JSON_SUFFIX};
use crate::config::ConfigDocument;
use crate::error::{StoreError, StoreResult};
use crate::json::to_pretty_vec;

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_PROMPT_FILE: &str = "default_prompt.json";

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
    // Serializes config read-merge-write cycles issued through this store.
    config_lock: Arc<Mutex<()>>,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DocumentStore {
            root: root.into(),
            config_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn default_prompt_path(&self) -> PathBuf {
        self.root.join(DEFAULT_PROMPT_FILE)
    }

    pub fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.dir_name())
    }

    /// Creates the collection directories if they are missing.
    pub async fn ensure_layout(&self) -> StoreResult<()> {
        for collection in Collection::ALL {
            let dir = self.collection_dir(collection);
            fs::create_dir_all(&dir)
                .await
                .map_err(|e| StoreError::io(&dir, e))?;
            debug!(dir = ?dir, "Collection directory ready");
        }
        Ok(())
    }

    /// Loads `config.json`, falling back to built-in defaults when the file is
    /// absent, unreadable, or not a JSON object.
    pub async fn load_config(&self) -> ConfigDocument {
        let path = self.config_path();
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?path, "No config file, using defaults");
                return ConfigDocument::default();
            }
            Err(e) => {
                warn!(path = ?path, error = %e, "Failed to read config file, using defaults");
                return ConfigDocument::default();
            }
        };
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => ConfigDocument::from_value(value).unwrap_or_else(|| {
                warn!(path = ?path, "Config file is not a JSON object, using defaults");
                ConfigDocument::default()
            }),
            Err(e) => {
                warn!(path = ?path, error = %e, "Config file is not valid JSON, using defaults");
                ConfigDocument::default()
            }
        }
    }

    pub async fn save_config(&self, config: &ConfigDocument) -> StoreResult<()> {
        let bytes = to_pretty_vec(config)?;
        write_atomic(&self.config_path(), &bytes).await
    }

    /// Merges the updatable fields of `patch` into the stored config and
    /// persists the result, which is returned.
    pub async fn update_config(&self, patch: &Value) -> StoreResult<ConfigDocument> {
        let _guard = self.config_lock.lock().await;
        let mut config = self.load_config().await;
        let copied = config.merge_from(patch);
        self.save_config(&config).await?;
        info!(fields = copied, "Config updated");
        Ok(config)
    }

    pub async fn default_prompt(&self) -> StoreResult<Value> {
        read_json(self.default_prompt_path(), "Default prompt file", DEFAULT_PROMPT_FILE).await
    }

    /// File names ending in `.json` in the collection directory, sorted.
    pub async fn list(&self, collection: Collection) -> StoreResult<Vec<String>> {
        let dir = self.collection_dir(collection);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(dir = ?dir, "Collection directory missing, listing nothing");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&dir, e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| StoreError::io(&dir, e))? {
            let Ok(name) = entry.file_name().into_string() else {
                warn!(path = ?entry.path(), "Skipping non UTF-8 file name");
                continue;
            };
            if !name.ends_with(JSON_SUFFIX) {
                continue;
            }
            match entry.file_type().await {
                Ok(file_type) if file_type.is_file() => names.push(name),
                Ok(_) => {}
                Err(e) => warn!(path = ?entry.path(), error = %e, "Could not stat directory entry"),
            }
        }
        names.sort();
        Ok(names)
    }

    /// Reads the document addressed by `sub_path`. The name is used as given:
    /// no `.json` suffix is added on reads.
    pub async fn read(&self, collection: Collection, sub_path: &str) -> StoreResult<Value> {
        let name = document_name(sub_path)?;
        let path = self.collection_dir(collection).join(name);
        read_json(path, collection.label(), name).await
    }

    /// Stores `document` under `sub_path`, appending `.json` if needed, and
    /// returns the file name written. Replaces any existing document atomically.
    pub async fn write(
        &self,
        collection: Collection,
        sub_path: &str,
        document: &Value,
    ) -> StoreResult<String> {
        let file_name = with_json_suffix(document_name(sub_path)?);
        let path = self.collection_dir(collection).join(&file_name);
        let bytes = to_pretty_vec(document)?;
        write_atomic(&path, &bytes).await?;
        info!(
            collection = collection.dir_name(),
            document = %file_name,
            bytes = bytes.len(),
            "Document written"
        );
        Ok(file_name)
    }

    pub async fn remove(&self, collection: Collection, sub_path: &str) -> StoreResult<()> {
        let name = document_name(sub_path)?;
        let path = self.collection_dir(collection).join(name);
        let not_found = || StoreError::NotFound {
            what: collection.label(),
            name: name.to_string(),
        };

        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(not_found()),
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(StoreError::io(&path, e)),
        }
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(collection = collection.dir_name(), document = %name, "Document removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }
}

async fn read_json(path: PathBuf, what: &'static str, name: &str) -> StoreResult<Value> {
    let not_found = || StoreError::NotFound { what, name: name.to_string() };
    match fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(not_found()),
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(StoreError::io(&path, e)),
    }
    let bytes = match fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(StoreError::io(&path, e)),
    };
    serde_json::from_slice(&bytes).map_err(|source| StoreError::DataCorruption { path, source })
}

/// Writes `bytes` to a sibling temp file and renames it over `path`, so
/// readers and competing writers only ever see a complete file.
async fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let temp_path = dir.join(format!(
        ".{}.{}-{}.tmp",
        file_name,
        std::process::id(),
        TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    if let Err(e) = fs::write(&temp_path, bytes).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(StoreError::io(&temp_path, e));
    }
    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(StoreError::io(path, e));
    }
    Ok(())
}
