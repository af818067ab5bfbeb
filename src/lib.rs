use serde::{Deserialize, Serialize};

pub mod actions;
pub mod error;
pub mod format;
pub mod panel;
pub mod render;
pub mod reports;
pub mod status;

#[cfg(feature = "cli")]
pub mod config;
#[cfg(feature = "cli")]
pub mod http;
#[cfg(feature = "cli")]
pub mod terminal;

pub use actions::AdminAction;
pub use error::PanelError;
pub use panel::{ActionOutcome, AdminPanel, HttpMethod, Transport, ViewPort};
pub use render::{FileListView, FileRow, StorageSummary};
pub use reports::{AdminReport, ReportView};
pub use status::StatusState;

/// One stored document as reported by `/api/status`.
///
/// Every field tolerates being absent or `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated: String,
    // Stored name; the backend deletes by this when it differs from `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_embedding: bool,
}

impl FileRecord {
    /// Name the backend expects in `/api/files/{filename}`.
    pub fn storage_name(&self) -> &str {
        match self.filename.as_deref() {
            Some(stored) if !stored.is_empty() => stored,
            _ => &self.name,
        }
    }

    /// Label shown in the list; falls back to the stored name.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.storage_name()
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageStatus {
    #[serde(default, deserialize_with = "lenient_files")]
    pub files: Vec<FileRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_files: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RagSystemStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub vector_store_initialized: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub openai_initialized: bool,
}

/// Snapshot returned by `GET /api/status`. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SystemStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub storage: StorageStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rag_system: RagSystemStatus,
}

/// Body of every admin endpoint: `{message}` on success, `{error}` otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActionReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Malformed entries and entries with no usable name are dropped one by one
fn lenient_files<'de, D>(deserializer: D) -> Result<Vec<FileRecord>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = null_as_default(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<FileRecord>(entry) {
            Ok(file) if !file.storage_name().is_empty() => Some(file),
            Ok(_) => {
                log::debug!("skipping file record without a name");
                None
            }
            Err(e) => {
                log::debug!("skipping malformed file record: {}", e);
                None
            }
        })
        .collect())
}

#[cfg(feature = "frontend")]
pub mod frontend;

#[cfg(feature = "frontend")]
pub use frontend::*;
