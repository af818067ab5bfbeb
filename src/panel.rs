//! Action dispatcher shared by the browser panel and the terminal client.
//!
//! The panel owns two seams: a [`Transport`] that performs one HTTP exchange
//! and returns the decoded JSON body, and a [`ViewPort`] that prompts, alerts
//! and renders. Neither holds state between calls.

use async_trait::async_trait;
use log::{debug, error, info, warn};
use serde_json::Value;

use crate::actions::AdminAction;
use crate::error::PanelError;
use crate::render::{render_file_list, FileListView, StorageSummary};
use crate::reports::{AdminReport, ReportView};
use crate::status::StatusState;
use crate::{ActionReply, SystemStatus};

pub const STATUS_PATH: &str = "/api/status";

const UNKNOWN_ERROR: &str = "알 수 없는 오류";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request, one JSON body back.
///
/// Implementations map connection failures to [`PanelError::Transport`] and
/// non-JSON bodies to [`PanelError::Decode`]. The HTTP status code is not
/// interpreted here.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, PanelError>;
}

pub trait ViewPort {
    fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);

    fn render_files(&self, view: &FileListView);

    fn render_status(&self, state: StatusState);

    fn render_storage(&self, _summary: &StorageSummary) {}

    fn render_report(&self, _report: &ReportView) {}

    fn log_error(&self, message: &str) {
        error!("{}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The confirmation prompt was declined; nothing was sent.
    Cancelled,
    /// Backend accepted the action with this message.
    Completed(String),
}

pub struct AdminPanel<T, V> {
    transport: T,
    view: V,
}

impl<T: Transport, V: ViewPort> AdminPanel<T, V> {
    pub fn new(transport: T, view: V) -> Self {
        Self { transport, view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub async fn fetch_status(&self) -> Result<SystemStatus, PanelError> {
        let body = self
            .transport
            .send(HttpMethod::Get, STATUS_PATH, None)
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Fetch status and redraw only the file list.
    pub async fn load_files(&self) -> Result<usize, PanelError> {
        match self.fetch_status().await {
            Ok(status) => {
                let view = render_file_list(&status.storage.files);
                self.view.render_files(&view);
                debug!("rendered {} files", view.len());
                Ok(view.len())
            }
            Err(err) => {
                self.view
                    .log_error(&format!("파일 목록 로드 실패: {}", err));
                Err(err)
            }
        }
    }

    /// Fetch status and redraw the indicator and storage totals.
    /// Failures show as offline.
    pub async fn load_status(&self) -> Result<StatusState, PanelError> {
        match self.fetch_status().await {
            Ok(status) => {
                let state = StatusState::from_status(&status);
                self.view.render_status(state);
                self.view
                    .render_storage(&StorageSummary::from_storage(&status.storage));
                Ok(state)
            }
            Err(err) => {
                self.view.log_error(&format!("상태 확인 실패: {}", err));
                self.view.render_status(StatusState::Offline);
                Err(err)
            }
        }
    }

    /// One status fetch feeding every region of the view.
    pub async fn refresh(&self) -> Result<SystemStatus, PanelError> {
        match self.fetch_status().await {
            Ok(status) => {
                self.view
                    .render_files(&render_file_list(&status.storage.files));
                self.view.render_status(StatusState::from_status(&status));
                self.view
                    .render_storage(&StorageSummary::from_storage(&status.storage));
                Ok(status)
            }
            Err(err) => {
                self.view.log_error(&format!("상태 확인 실패: {}", err));
                self.view.render_status(StatusState::Offline);
                Err(err)
            }
        }
    }

    /// Fetch one read-only admin report and hand it to the view.
    pub async fn load_report(&self, report: AdminReport) -> Result<ReportView, PanelError> {
        let result = match self.transport.send(HttpMethod::Get, report.path(), None).await {
            Ok(body) => ReportView::decode(report, body),
            Err(err) => Err(err),
        };

        match result {
            Ok(view) => {
                debug!("{} -> {} entries", report, view.entries.len());
                self.view.render_report(&view);
                Ok(view)
            }
            Err(PanelError::Rejected(reason)) => {
                warn!("{} rejected: {}", report, reason);
                self.view
                    .alert(&format!("{}: {}", report.failure_message(), reason));
                Err(PanelError::Rejected(reason))
            }
            Err(err) => {
                self.view.log_error(&format!("{} failed: {}", report, err));
                self.view.alert(&format!(
                    "{}. 잠시 후 다시 시도해주세요.",
                    report.failure_message()
                ));
                Err(err)
            }
        }
    }

    pub async fn run_action(&self, action: &AdminAction) -> Result<ActionOutcome, PanelError> {
        if let Err(err) = action.validate() {
            warn!("{} not sent: {}", action, err);
            self.view
                .alert(&format!("{}: {}", action.failure_message(), err));
            return Err(err);
        }

        if !self.view.confirm(&action.confirm_message()) {
            debug!("{} cancelled", action);
            return Ok(ActionOutcome::Cancelled);
        }

        info!("{}", action);
        let reply = match self.send_action(action).await {
            Ok(reply) => reply,
            Err(err) => {
                self.view.log_error(&format!("{} failed: {}", action, err));
                self.view.alert(&format!(
                    "{}. 잠시 후 다시 시도해주세요.",
                    action.failure_message()
                ));
                return Err(err);
            }
        };

        match reply.message {
            Some(message) => {
                self.view.alert(&message);
                if let Err(err) = self.refresh().await {
                    warn!("refresh after {} failed: {}", action, err);
                }
                Ok(ActionOutcome::Completed(message))
            }
            None => {
                let reason = reply.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
                warn!("{} rejected: {}", action, reason);
                self.view
                    .alert(&format!("{}: {}", action.failure_message(), reason));
                Err(PanelError::Rejected(reason))
            }
        }
    }

    async fn send_action(&self, action: &AdminAction) -> Result<ActionReply, PanelError> {
        let body = self
            .transport
            .send(action.method(), &action.path(), action.body())
            .await?;
        Ok(serde_json::from_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    type Call = (HttpMethod, String, Option<Value>);

    #[derive(Default)]
    struct ScriptedTransport {
        replies: RefCell<VecDeque<Result<Value, PanelError>>>,
        calls: RefCell<Vec<Call>>,
    }

    impl ScriptedTransport {
        fn with(replies: Vec<Result<Value, PanelError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                calls: RefCell::default(),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl Transport for ScriptedTransport {
        async fn send(
            &self,
            method: HttpMethod,
            path: &str,
            body: Option<Value>,
        ) -> Result<Value, PanelError> {
            self.calls.borrow_mut().push((method, path.to_string(), body));
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(PanelError::Transport("no scripted reply".into())))
        }
    }

    struct RecordingView {
        accept: bool,
        prompts: RefCell<Vec<String>>,
        alerts: RefCell<Vec<String>>,
        files: RefCell<Vec<FileListView>>,
        states: RefCell<Vec<StatusState>>,
        storage: RefCell<Vec<StorageSummary>>,
        reports: RefCell<Vec<ReportView>>,
        errors: Cell<usize>,
    }

    impl RecordingView {
        fn new(accept: bool) -> Self {
            Self {
                accept,
                prompts: RefCell::default(),
                alerts: RefCell::default(),
                files: RefCell::default(),
                states: RefCell::default(),
                storage: RefCell::default(),
                reports: RefCell::default(),
                errors: Cell::new(0),
            }
        }
    }

    impl ViewPort for RecordingView {
        fn confirm(&self, message: &str) -> bool {
            self.prompts.borrow_mut().push(message.to_string());
            self.accept
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn render_files(&self, view: &FileListView) {
            self.files.borrow_mut().push(view.clone());
        }

        fn render_status(&self, state: StatusState) {
            self.states.borrow_mut().push(state);
        }

        fn render_storage(&self, summary: &StorageSummary) {
            self.storage.borrow_mut().push(summary.clone());
        }

        fn render_report(&self, report: &ReportView) {
            self.reports.borrow_mut().push(report.clone());
        }

        fn log_error(&self, _message: &str) {
            self.errors.set(self.errors.get() + 1);
        }
    }

    fn status_body() -> Value {
        json!({
            "storage": {
                "files": [
                    { "name": "a.pdf", "size": 1024, "updated": "2024-01-15T09:30:00" },
                    { "name": "b.md", "size": 10, "updated": "2024-01-16T09:30:00" }
                ]
            },
            "rag_system": { "vector_store_initialized": true, "openai_initialized": true }
        })
    }

    #[tokio::test]
    async fn test_declined_confirmation_sends_nothing() {
        let panel = AdminPanel::new(ScriptedTransport::default(), RecordingView::new(false));

        let outcome = panel.run_action(&AdminAction::DeleteAll).await;

        assert_eq!(outcome, Ok(ActionOutcome::Cancelled));
        assert!(panel.transport().calls().is_empty());
        assert_eq!(panel.view().prompts.borrow().len(), 1);
        assert!(panel.view().alerts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_success_alerts_then_refreshes_once() {
        let transport = ScriptedTransport::with(vec![
            Ok(json!({ "message": "모든 파일이 삭제되었습니다." })),
            Ok(status_body()),
        ]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        let outcome = panel.run_action(&AdminAction::DeleteAll).await;

        assert_eq!(
            outcome,
            Ok(ActionOutcome::Completed("모든 파일이 삭제되었습니다.".to_string()))
        );
        let calls = panel.transport().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            (HttpMethod::Post, "/api/admin/delete-all".to_string(), None)
        );
        assert_eq!(calls[1], (HttpMethod::Get, STATUS_PATH.to_string(), None));

        let view = panel.view();
        assert_eq!(*view.alerts.borrow(), vec!["모든 파일이 삭제되었습니다."]);
        assert_eq!(view.files.borrow().len(), 1);
        assert_eq!(view.files.borrow()[0].len(), 2);
        assert_eq!(*view.states.borrow(), vec![StatusState::Ready]);
        assert_eq!(view.storage.borrow()[0].total_files, 2);
    }

    #[tokio::test]
    async fn test_delete_file_request_shape() {
        let transport = ScriptedTransport::with(vec![
            Ok(json!({ "message": "파일이 삭제되었습니다." })),
            Ok(json!({})),
        ]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        panel
            .run_action(&AdminAction::DeleteFile("my file.pdf".to_string()))
            .await
            .unwrap();

        let calls = panel.transport().calls();
        assert_eq!(calls[0].0, HttpMethod::Delete);
        assert_eq!(calls[0].1, "/api/files/my%20file.pdf");
        assert!(calls[0].2.is_none());
    }

    #[tokio::test]
    async fn test_rejected_shows_backend_error_without_refresh() {
        let transport = ScriptedTransport::with(vec![Ok(
            json!({ "error": "RAG 시스템이 초기화되지 않았습니다." }),
        )]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        let outcome = panel.run_action(&AdminAction::Rebuild).await;

        assert_eq!(
            outcome,
            Err(PanelError::Rejected(
                "RAG 시스템이 초기화되지 않았습니다.".to_string()
            ))
        );
        assert_eq!(panel.transport().calls().len(), 1);
        let alerts = panel.view().alerts.borrow();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("RAG 시스템이 초기화되지 않았습니다."));
        assert!(alerts[0].starts_with(AdminAction::Rebuild.failure_message()));
        assert!(panel.view().files.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_reply_without_message_or_error() {
        let transport = ScriptedTransport::with(vec![Ok(json!({}))]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        let outcome = panel.run_action(&AdminAction::ClearIndex).await;

        assert_eq!(outcome, Err(PanelError::Rejected(UNKNOWN_ERROR.to_string())));
    }

    #[tokio::test]
    async fn test_transport_failure_logged_and_generic_alert() {
        let transport =
            ScriptedTransport::with(vec![Err(PanelError::Transport("connection refused".into()))]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        let outcome = panel.run_action(&AdminAction::UpdateEmbeddings).await;

        assert!(matches!(outcome, Err(PanelError::Transport(_))));
        let view = panel.view();
        assert_eq!(view.errors.get(), 1);
        let alerts = view.alerts.borrow();
        assert_eq!(alerts.len(), 1);
        assert!(!alerts[0].contains("connection refused"));
    }

    #[tokio::test]
    async fn test_non_object_reply_is_decode_error() {
        let transport = ScriptedTransport::with(vec![Ok(json!("ok"))]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        let outcome = panel.run_action(&AdminAction::BackupVectors).await;

        assert!(matches!(outcome, Err(PanelError::Decode(_))));
        assert_eq!(panel.view().errors.get(), 1);
    }

    #[tokio::test]
    async fn test_body_forwarded_for_batch_delete() {
        let transport = ScriptedTransport::with(vec![
            Ok(json!({ "message": "2개 파일이 삭제되었습니다.", "deleted_count": 2 })),
            Ok(json!({})),
        ]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        panel
            .run_action(&AdminAction::DeleteFiles(vec!["a.pdf".into(), "b.md".into()]))
            .await
            .unwrap();

        let calls = panel.transport().calls();
        assert_eq!(calls[0].1, "/api/files/batch-delete");
        assert_eq!(calls[0].2, Some(json!({ "filenames": ["a.pdf", "b.md"] })));
    }

    #[tokio::test]
    async fn test_refresh_failure_after_success_keeps_outcome() {
        let transport = ScriptedTransport::with(vec![
            Ok(json!({ "message": "임베딩이 초기화되었습니다." })),
            Err(PanelError::Transport("timeout".into())),
        ]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        let outcome = panel.run_action(&AdminAction::ClearIndex).await;

        assert!(matches!(outcome, Ok(ActionOutcome::Completed(_))));
        assert_eq!(*panel.view().states.borrow(), vec![StatusState::Offline]);
    }

    #[tokio::test]
    async fn test_load_files_empty_storage() {
        let transport = ScriptedTransport::with(vec![Ok(json!({ "rag_system": {} }))]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        assert_eq!(panel.load_files().await, Ok(0));
        assert!(matches!(
            panel.view().files.borrow()[0],
            FileListView::Empty(_)
        ));
    }

    #[tokio::test]
    async fn test_load_files_failure_leaves_list_untouched() {
        let transport = ScriptedTransport::with(vec![Err(PanelError::Decode("html".into()))]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        assert!(panel.load_files().await.is_err());
        assert!(panel.view().files.borrow().is_empty());
        assert_eq!(panel.view().errors.get(), 1);
    }

    #[tokio::test]
    async fn test_load_status_states() {
        let transport = ScriptedTransport::with(vec![
            Ok(json!({ "rag_system": { "vector_store_initialized": false, "openai_initialized": true } })),
            Ok(json!({})),
            Err(PanelError::Transport("down".into())),
        ]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        assert_eq!(panel.load_status().await, Ok(StatusState::NeedsUpload));
        assert_eq!(panel.load_status().await, Ok(StatusState::Offline));
        assert!(panel.load_status().await.is_err());
        assert_eq!(
            *panel.view().states.borrow(),
            vec![
                StatusState::NeedsUpload,
                StatusState::Offline,
                StatusState::Offline
            ]
        );
    }

    #[tokio::test]
    async fn test_partial_status_still_reports_ready() {
        let transport = ScriptedTransport::with(vec![
            Ok(json!({
                "storage": { "files": [{ "size": 10 }] },
                "rag_system": { "vector_store_initialized": true }
            })),
            Ok(json!({
                "storage": { "files": [{ "name": "a.pdf", "size": null }] },
                "rag_system": { "vector_store_initialized": true }
            })),
            Ok(json!({
                "storage": { "files": [] },
                "rag_system": { "vector_store_initialized": null, "openai_initialized": true }
            })),
        ]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        assert_eq!(panel.load_status().await, Ok(StatusState::Ready));
        assert_eq!(panel.load_status().await, Ok(StatusState::Ready));
        assert_eq!(panel.load_status().await, Ok(StatusState::NeedsUpload));
        assert_eq!(panel.view().errors.get(), 0);
    }

    #[tokio::test]
    async fn test_load_files_skips_unusable_records() {
        let transport = ScriptedTransport::with(vec![Ok(json!({
            "storage": {
                "files": [
                    { "size": 10 },
                    { "name": "a.pdf", "size": null, "updated": null }
                ]
            }
        }))]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        assert_eq!(panel.load_files().await, Ok(1));
        let files = panel.view().files.borrow();
        let FileListView::Rows(rows) = &files[0] else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].name, "a.pdf");
        assert_eq!(rows[0].size, "0 B");
    }

    #[tokio::test]
    async fn test_slash_in_name_rejected_before_prompt() {
        let panel = AdminPanel::new(ScriptedTransport::default(), RecordingView::new(true));

        let outcome = panel
            .run_action(&AdminAction::DeleteFile("reports/q1.pdf".to_string()))
            .await;

        assert!(matches!(outcome, Err(PanelError::Rejected(_))));
        assert!(panel.transport().calls().is_empty());
        assert!(panel.view().prompts.borrow().is_empty());
        let alerts = panel.view().alerts.borrow();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].starts_with("파일 삭제에 실패했습니다: "));
        assert!(alerts[0].contains('/'));
    }

    #[tokio::test]
    async fn test_load_report_renders() {
        let transport = ScriptedTransport::with(vec![Ok(json!({
            "total_documents": 4,
            "documents_with_embedding": 1,
            "documents_without_embedding": 3,
            "completion_rate": 25.0
        }))]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        let report = panel.load_report(AdminReport::Coverage).await.unwrap();

        assert_eq!(report.value("완료율"), Some("25.0%"));
        assert_eq!(
            panel.transport().calls(),
            vec![(
                HttpMethod::Get,
                "/api/admin/document-coverage".to_string(),
                None
            )]
        );
        assert_eq!(*panel.view().reports.borrow(), vec![report]);
        assert!(panel.view().alerts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_load_report_rejected_alerts_reason() {
        let transport = ScriptedTransport::with(vec![Ok(
            json!({ "error": "RAG 시스템이 초기화되지 않았습니다." }),
        )]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        let outcome = panel.load_report(AdminReport::Settings).await;

        assert!(matches!(outcome, Err(PanelError::Rejected(_))));
        assert!(panel.view().reports.borrow().is_empty());
        assert_eq!(
            *panel.view().alerts.borrow(),
            vec!["설정 조회에 실패했습니다: RAG 시스템이 초기화되지 않았습니다."]
        );
        assert_eq!(panel.view().errors.get(), 0);
    }

    #[tokio::test]
    async fn test_load_report_transport_failure() {
        let transport =
            ScriptedTransport::with(vec![Err(PanelError::Transport("connection reset".into()))]);
        let panel = AdminPanel::new(transport, RecordingView::new(true));

        let outcome = panel.load_report(AdminReport::VectorDb).await;

        assert!(matches!(outcome, Err(PanelError::Transport(_))));
        assert_eq!(panel.view().errors.get(), 1);
        let alerts = panel.view().alerts.borrow();
        assert!(!alerts[0].contains("connection reset"));
        assert!(alerts[0].starts_with(AdminReport::VectorDb.failure_message()));
    }
}
