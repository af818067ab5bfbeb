use thiserror::Error;

/// Failure of a single panel operation.
///
/// `Rejected` is the backend saying no (an `error` field in a valid JSON
/// reply). The other two mean the reply never arrived in usable form.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PanelError {
    #[error("{0}")]
    Rejected(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

impl PanelError {
    /// True for failures that never reached an application-level answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, PanelError::Transport(_) | PanelError::Decode(_))
    }
}

impl From<serde_json::Error> for PanelError {
    fn from(err: serde_json::Error) -> Self {
        PanelError::Decode(err.to_string())
    }
}
