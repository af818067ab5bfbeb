use crate::SystemStatus;

/// Backend readiness as shown by the status dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusState {
    Offline,
    NeedsUpload,
    Ready,
}

impl StatusState {
    pub fn from_status(status: &SystemStatus) -> Self {
        let rag = &status.rag_system;
        if rag.vector_store_initialized {
            StatusState::Ready
        } else if rag.openai_initialized {
            StatusState::NeedsUpload
        } else {
            StatusState::Offline
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            StatusState::Ready => "status-ready",
            StatusState::NeedsUpload => "status-warning",
            StatusState::Offline => "status-offline",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusState::Ready => "시스템 준비됨",
            StatusState::NeedsUpload => "문서 업로드 필요",
            StatusState::Offline => "시스템 오프라인",
        }
    }
}

impl std::fmt::Display for StatusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
