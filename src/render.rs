//! Turns status snapshots into display models and markup.

use crate::format::{file_icon, format_file_size, format_updated};
use crate::{FileRecord, StorageStatus};

pub const EMPTY_FILES_MESSAGE: &str = "업로드된 파일이 없습니다.";
pub const EMBEDDED_LABEL: &str = "임베딩 완료";
pub const PENDING_LABEL: &str = "임베딩 대기";

#[derive(Debug, Clone, PartialEq)]
pub struct FileRow {
    pub icon: &'static str,
    pub name: String,
    /// Stored name passed back on deletion.
    pub key: String,
    pub size: String,
    pub updated: String,
    /// Whether the backend already holds vectors for this file.
    pub embedded: bool,
}

impl FileRow {
    pub fn embedding_label(&self) -> &'static str {
        if self.embedded {
            EMBEDDED_LABEL
        } else {
            PENDING_LABEL
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileListView {
    Empty(&'static str),
    Rows(Vec<FileRow>),
}

impl FileListView {
    pub fn len(&self) -> usize {
        match self {
            FileListView::Empty(_) => 0,
            FileListView::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Backend order is kept as is.
pub fn render_file_list(files: &[FileRecord]) -> FileListView {
    if files.is_empty() {
        return FileListView::Empty(EMPTY_FILES_MESSAGE);
    }

    FileListView::Rows(
        files
            .iter()
            .map(|file| FileRow {
                icon: file_icon(file.display_name()),
                name: file.display_name().to_string(),
                key: file.storage_name().to_string(),
                size: format_file_size(file.size),
                updated: format_updated(&file.updated),
                embedded: file.has_embedding,
            })
            .collect(),
    )
}

pub fn file_list_html(view: &FileListView) -> String {
    match view {
        FileListView::Empty(message) => {
            format!(r#"<div class="empty-state">{}</div>"#, escape_html(message))
        }
        FileListView::Rows(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    concat!(
                        r#"<div class="file-item">"#,
                        r#"<i class="{}"></i>"#,
                        r#"<span class="file-name">{}</span>"#,
                        r#"<span class="embedding-badge {}">{}</span>"#,
                        r#"<span class="file-size">{}</span>"#,
                        r#"<span class="file-date">{}</span>"#,
                        r#"<button type="button" class="delete-btn" data-filename="{}">삭제</button>"#,
                        "</div>"
                    ),
                    row.icon,
                    escape_html(&row.name),
                    if row.embedded { "embedded" } else { "pending" },
                    row.embedding_label(),
                    escape_html(&row.size),
                    escape_html(&row.updated),
                    escape_html(&row.key),
                )
            })
            .collect(),
    }
}

/// Totals line shown next to the indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageSummary {
    pub total_files: u64,
    pub total_size: String,
}

impl StorageSummary {
    pub fn from_storage(storage: &StorageStatus) -> Self {
        let total_files = storage
            .total_files
            .unwrap_or(storage.files.len() as u64);
        let total_bytes = storage
            .total_size
            .unwrap_or_else(|| storage.files.iter().map(|f| f.size).sum());
        Self {
            total_files,
            total_size: format_file_size(total_bytes),
        }
    }
}

impl std::fmt::Display for StorageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "파일 {}개, {}", self.total_files, self.total_size)
    }
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
