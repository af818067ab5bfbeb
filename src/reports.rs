//! Read-only admin views: embedding coverage, vector store details, server
//! load and index settings.
//!
//! Each report is one `GET` whose body is decoded leniently and flattened
//! into labelled lines for display.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PanelError;
use crate::null_as_default;
use crate::render::{escape_html, StorageSummary};
use crate::status::StatusState;
use crate::{RagSystemStatus, StorageStatus, SystemStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminReport {
    Coverage,
    VectorDb,
    ServerStatus,
    Settings,
}

impl AdminReport {
    pub const ALL: [AdminReport; 4] = [
        AdminReport::Coverage,
        AdminReport::VectorDb,
        AdminReport::ServerStatus,
        AdminReport::Settings,
    ];

    pub fn path(self) -> &'static str {
        match self {
            AdminReport::Coverage => "/api/admin/document-coverage",
            AdminReport::VectorDb => "/api/admin/vector-db-info",
            AdminReport::ServerStatus => "/api/admin/system-status",
            AdminReport::Settings => "/api/admin/get-settings",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AdminReport::Coverage => "문서 임베딩 현황",
            AdminReport::VectorDb => "벡터 DB 정보",
            AdminReport::ServerStatus => "서버 상태",
            AdminReport::Settings => "시스템 설정",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            AdminReport::Coverage => "문서 커버리지 조회에 실패했습니다",
            AdminReport::VectorDb => "벡터 DB 정보 조회에 실패했습니다",
            AdminReport::ServerStatus => "시스템 상태 조회에 실패했습니다",
            AdminReport::Settings => "설정 조회에 실패했습니다",
        }
    }
}

impl std::fmt::Display for AdminReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GET {}", self.path())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentCoverage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_documents: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub documents_with_embedding: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub documents_without_embedding: u64,
    /// Percent, one decimal.
    #[serde(default, deserialize_with = "null_as_default")]
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VectorDbDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_vectors: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dimensions: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub db_size_mb: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub index_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VectorStorageUsage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_size_mb: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vector_store_size_mb: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VectorDbInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub vector_db: VectorDbDetails,
    #[serde(default, deserialize_with = "null_as_default")]
    pub storage: VectorStorageUsage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServerLoad {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cpu_percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub memory_percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub memory_available_gb: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_response_time_ms: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServerStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub system: ServerLoad,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rag_system: RagSystemStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub storage: StorageStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IndexSettings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub chunk_size: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chunk_overlap: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub embedding_model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub llm_model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub openai_api_key_configured: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub label: &'static str,
    pub value: String,
}

fn entry(label: &'static str, value: impl Into<String>) -> ReportEntry {
    ReportEntry {
        label,
        value: value.into(),
    }
}

/// A decoded report, ready for a terminal or the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub title: &'static str,
    pub entries: Vec<ReportEntry>,
}

impl ReportView {
    /// Decodes a report body. A body carrying `error` is a rejection.
    pub fn decode(report: AdminReport, body: Value) -> Result<Self, PanelError> {
        if let Some(reason) = body.get("error").and_then(Value::as_str) {
            return Err(PanelError::Rejected(reason.to_string()));
        }

        let entries = match report {
            AdminReport::Coverage => serde_json::from_value::<DocumentCoverage>(body)?.entries(),
            AdminReport::VectorDb => serde_json::from_value::<VectorDbInfo>(body)?.entries(),
            AdminReport::ServerStatus => serde_json::from_value::<ServerStatus>(body)?.entries(),
            AdminReport::Settings => serde_json::from_value::<IndexSettings>(body)?.entries(),
        };

        Ok(Self {
            title: report.title(),
            entries,
        })
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value.as_str())
    }
}

impl DocumentCoverage {
    pub fn entries(&self) -> Vec<ReportEntry> {
        vec![
            entry("전체 문서", format!("{}개", self.total_documents)),
            entry("임베딩 완료", format!("{}개", self.documents_with_embedding)),
            entry("임베딩 대기", format!("{}개", self.documents_without_embedding)),
            entry("완료율", format!("{:.1}%", self.completion_rate)),
        ]
    }
}

impl VectorDbInfo {
    pub fn entries(&self) -> Vec<ReportEntry> {
        let db = &self.vector_db;
        let mut entries = vec![
            entry("벡터 수", db.total_vectors.to_string()),
            entry("차원", db.dimensions.to_string()),
            entry("인덱스 유형", db.index_type.clone()),
            entry("DB 크기", format!("{:.2} MB", db.db_size_mb)),
        ];
        if let Some(path) = &db.storage_path {
            entries.push(entry("저장 경로", path.clone()));
        }
        entries.push(entry(
            "전체 저장소 용량",
            format!("{:.2} MB", self.storage.total_size_mb),
        ));
        entries.push(entry(
            "벡터 저장소 용량",
            format!("{:.2} MB", self.storage.vector_store_size_mb),
        ));
        entries
    }
}

impl ServerStatus {
    pub fn entries(&self) -> Vec<ReportEntry> {
        let state = StatusState::from_status(&SystemStatus {
            storage: self.storage.clone(),
            rag_system: self.rag_system.clone(),
        });
        vec![
            entry("CPU 사용률", format!("{:.1}%", self.system.cpu_percent)),
            entry("메모리 사용률", format!("{:.1}%", self.system.memory_percent)),
            entry(
                "사용 가능 메모리",
                format!("{:.2} GB", self.system.memory_available_gb),
            ),
            entry(
                "API 응답 시간",
                format!("{:.2} ms", self.system.api_response_time_ms),
            ),
            entry("RAG 시스템", state.label()),
            entry(
                "저장소",
                StorageSummary::from_storage(&self.storage).to_string(),
            ),
            entry("측정 시각", self.timestamp.clone()),
        ]
    }
}

impl IndexSettings {
    pub fn entries(&self) -> Vec<ReportEntry> {
        let key = if self.openai_api_key_configured {
            "설정됨"
        } else {
            "미설정"
        };
        vec![
            entry("청크 크기", self.chunk_size.to_string()),
            entry("청크 겹침", self.chunk_overlap.to_string()),
            entry("임베딩 모델", self.embedding_model.clone()),
            entry("LLM 모델", self.llm_model.clone()),
            entry("OpenAI API 키", key),
        ]
    }
}

pub fn report_html(view: &ReportView) -> String {
    let rows: String = view
        .entries
        .iter()
        .map(|e| {
            format!(
                r#"<div class="report-row"><span class="report-label">{}</span><span class="report-value">{}</span></div>"#,
                escape_html(e.label),
                escape_html(&e.value)
            )
        })
        .collect();
    format!(
        r#"<div class="admin-report"><h3 class="report-title">{}</h3>{}</div>"#,
        escape_html(view.title),
        rows
    )
}
