use serde_json::{json, Value};

use crate::error::PanelError;
use crate::panel::HttpMethod;

pub const EMPTY_NAME_MESSAGE: &str = "파일 이름이 비어 있습니다.";
pub const SLASH_IN_NAME_MESSAGE: &str = "파일 이름에 '/'를 포함할 수 없습니다.";

/// Maintenance operations exposed by the admin API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    DeleteFile(String),
    DeleteFiles(Vec<String>),
    DeleteAll,
    Rebuild,
    UpdateEmbeddings,
    EmbedSelected(Vec<String>),
    DeleteEmbedding(String),
    ClearIndex,
    BackupVectors,
    RestoreVectors(String),
}

impl AdminAction {
    pub fn method(&self) -> HttpMethod {
        match self {
            AdminAction::DeleteFile(_) => HttpMethod::Delete,
            _ => HttpMethod::Post,
        }
    }

    pub fn path(&self) -> String {
        match self {
            AdminAction::DeleteFile(filename) => {
                format!("/api/files/{}", urlencoding::encode(filename))
            }
            AdminAction::DeleteFiles(_) => "/api/files/batch-delete".to_string(),
            AdminAction::DeleteAll => "/api/admin/delete-all".to_string(),
            AdminAction::Rebuild => "/api/admin/rebuild".to_string(),
            AdminAction::UpdateEmbeddings => "/api/admin/update-embeddings".to_string(),
            AdminAction::EmbedSelected(_) => "/api/admin/embed-selected".to_string(),
            AdminAction::DeleteEmbedding(_) => "/api/admin/delete-embedding".to_string(),
            AdminAction::ClearIndex => "/api/admin/clear-index".to_string(),
            AdminAction::BackupVectors => "/api/admin/backup-vectors".to_string(),
            AdminAction::RestoreVectors(_) => "/api/admin/restore-vectors".to_string(),
        }
    }

    /// Checks that the request can be routed at all.
    ///
    /// A `DeleteFile` name travels as one path segment. The backend decodes
    /// `%2F` before routing, so a name with `/` would never reach the handler.
    pub fn validate(&self) -> Result<(), PanelError> {
        match self {
            AdminAction::DeleteFile(filename) if filename.is_empty() => {
                Err(PanelError::Rejected(EMPTY_NAME_MESSAGE.to_string()))
            }
            AdminAction::DeleteFile(filename) if filename.contains('/') => {
                Err(PanelError::Rejected(SLASH_IN_NAME_MESSAGE.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// JSON body, if the endpoint takes one.
    pub fn body(&self) -> Option<Value> {
        match self {
            AdminAction::DeleteFiles(filenames) | AdminAction::EmbedSelected(filenames) => {
                Some(json!({ "filenames": filenames }))
            }
            AdminAction::DeleteEmbedding(filename) => Some(json!({ "filename": filename })),
            AdminAction::RestoreVectors(backup) => Some(json!({ "backup_filename": backup })),
            _ => None,
        }
    }

    pub fn confirm_message(&self) -> String {
        match self {
            AdminAction::DeleteFile(filename) => {
                format!("'{}' 파일을 삭제하시겠습니까?", filename)
            }
            AdminAction::DeleteFiles(filenames) => {
                format!("선택한 {}개 파일을 삭제하시겠습니까?", filenames.len())
            }
            AdminAction::DeleteAll => {
                "모든 파일을 삭제하시겠습니까? 이 작업은 되돌릴 수 없습니다.".to_string()
            }
            AdminAction::Rebuild => "전체 임베딩을 재구성하시겠습니까?".to_string(),
            AdminAction::UpdateEmbeddings => "임베딩을 업데이트하시겠습니까?".to_string(),
            AdminAction::EmbedSelected(filenames) => {
                format!("선택한 {}개 파일을 임베딩하시겠습니까?", filenames.len())
            }
            AdminAction::DeleteEmbedding(filename) => {
                format!("'{}'의 임베딩을 삭제하시겠습니까?", filename)
            }
            AdminAction::ClearIndex => {
                "임베딩 인덱스를 초기화하시겠습니까? 모든 임베딩이 삭제됩니다.".to_string()
            }
            AdminAction::BackupVectors => "벡터 저장소를 백업하시겠습니까?".to_string(),
            AdminAction::RestoreVectors(backup) => {
                format!("'{}' 백업으로 벡터 저장소를 복원하시겠습니까?", backup)
            }
        }
    }

    /// Prefix for the alert shown when the request does not succeed.
    pub fn failure_message(&self) -> &'static str {
        match self {
            AdminAction::DeleteFile(_) | AdminAction::DeleteFiles(_) => "파일 삭제에 실패했습니다",
            AdminAction::DeleteAll => "전체 파일 삭제에 실패했습니다",
            AdminAction::Rebuild => "인덱스 재구성에 실패했습니다",
            AdminAction::UpdateEmbeddings | AdminAction::EmbedSelected(_) => {
                "임베딩 업데이트에 실패했습니다"
            }
            AdminAction::DeleteEmbedding(_) => "임베딩 삭제에 실패했습니다",
            AdminAction::ClearIndex => "인덱스 초기화에 실패했습니다",
            AdminAction::BackupVectors => "백업에 실패했습니다",
            AdminAction::RestoreVectors(_) => "복원에 실패했습니다",
        }
    }
}

impl std::fmt::Display for AdminAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
