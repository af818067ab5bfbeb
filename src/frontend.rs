use async_trait::async_trait;
use gloo_net::http::Request;
use leptos::*;
use log::{debug, Level, LevelFilter, Log, Metadata, Record};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Element, MouseEvent};

use crate::render::{file_list_html, FileListView};
use crate::reports::{report_html, ReportView};
use crate::{
    AdminAction, AdminPanel, AdminReport, HttpMethod, PanelError, StatusState, Transport, ViewPort,
};

pub const FILES_LIST_ID: &str = "files-list";
pub const STATUS_DOT_ID: &str = "statusDot";
pub const STATUS_TEXT_ID: &str = "statusText";
pub const REPORT_ID: &str = "admin-report";

/// Sends `log` records to the browser console at the matching level.
struct ConsoleLogger;

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

fn console_line(record: &Record) -> String {
    format!("[{}] {}", record.target(), record.args())
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from(console_line(record));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

// Safe to call from every entry point; only the first call installs
fn init_logging() {
    if log::set_logger(&CONSOLE_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Same-origin fetch through gloo-net.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, PanelError> {
        let builder = match method {
            HttpMethod::Get => Request::get(path),
            HttpMethod::Post => Request::post(path),
            HttpMethod::Delete => Request::delete(path),
        };

        let request = match body {
            Some(body) => builder
                .json(&body)
                .map_err(|e| PanelError::Transport(format!("Failed to set body: {:?}", e)))?,
            None => builder
                .build()
                .map_err(|e| PanelError::Transport(format!("Failed to build request: {:?}", e)))?,
        };

        let response = request
            .send()
            .await
            .map_err(|e| PanelError::Transport(format!("{:?}", e)))?;

        debug!("{} {} -> {}", method, path, response.status());

        response
            .json::<Value>()
            .await
            .map_err(|e| PanelError::Decode(format!("{:?}", e)))
    }
}

/// Writes into the page by element id. Missing elements are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomView;

fn element_by_id(id: &str) -> Option<Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

impl ViewPort for DomView {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn render_files(&self, view: &FileListView) {
        if let Some(list) = element_by_id(FILES_LIST_ID) {
            list.set_inner_html(&file_list_html(view));
        }
    }

    fn render_status(&self, state: StatusState) {
        if let Some(dot) = element_by_id(STATUS_DOT_ID) {
            dot.set_class_name(&format!("status-dot {}", state.css_class()));
        }
        if let Some(text) = element_by_id(STATUS_TEXT_ID) {
            text.set_text_content(Some(state.label()));
        }
    }

    fn render_report(&self, report: &ReportView) {
        if let Some(panel) = element_by_id(REPORT_ID) {
            panel.set_inner_html(&report_html(report));
        }
    }

    fn log_error(&self, message: &str) {
        console::error_1(&message.into());
    }
}

fn browser_panel() -> AdminPanel<BrowserTransport, DomView> {
    AdminPanel::new(BrowserTransport, DomView)
}

fn dispatch(action: AdminAction) {
    spawn_local(async move {
        if let Err(e) = browser_panel().run_action(&action).await {
            debug!("{} ended with: {}", action, e);
        }
    });
}

fn show_report(report: AdminReport) {
    spawn_local(async move {
        let _ = browser_panel().load_report(report).await;
    });
}

// Entry points for pages that ship their own markup and only need the
// behaviour bound to `files-list`, `statusDot` and `statusText`.

#[wasm_bindgen(js_name = deleteFile)]
pub fn delete_file(filename: String) {
    dispatch(AdminAction::DeleteFile(filename));
}

#[wasm_bindgen(js_name = deleteAllFiles)]
pub fn delete_all_files() {
    dispatch(AdminAction::DeleteAll);
}

#[wasm_bindgen(js_name = rebuildIndex)]
pub fn rebuild_index() {
    dispatch(AdminAction::Rebuild);
}

#[wasm_bindgen(js_name = updateEmbeddings)]
pub fn update_embeddings() {
    dispatch(AdminAction::UpdateEmbeddings);
}

#[wasm_bindgen(js_name = clearIndex)]
pub fn clear_index() {
    dispatch(AdminAction::ClearIndex);
}

#[wasm_bindgen(js_name = backupVectors)]
pub fn backup_vectors() {
    dispatch(AdminAction::BackupVectors);
}

#[wasm_bindgen(js_name = loadFiles)]
pub fn load_files() {
    spawn_local(async {
        let _ = browser_panel().load_files().await;
    });
}

#[wasm_bindgen(js_name = checkStatus)]
pub fn check_status() {
    spawn_local(async {
        let _ = browser_panel().load_status().await;
    });
}

#[wasm_bindgen(js_name = showCoverage)]
pub fn show_coverage() {
    show_report(AdminReport::Coverage);
}

#[wasm_bindgen(js_name = showVectorDbInfo)]
pub fn show_vector_db_info() {
    show_report(AdminReport::VectorDb);
}

#[wasm_bindgen(js_name = showServerStatus)]
pub fn show_server_status() {
    show_report(AdminReport::ServerStatus);
}

#[wasm_bindgen(js_name = showSettings)]
pub fn show_settings() {
    show_report(AdminReport::Settings);
}

/// Bind to an existing page without mounting any markup.
#[wasm_bindgen]
pub fn attach() {
    console_error_panic_hook::set_once();
    init_logging();
    spawn_local(async {
        let _ = browser_panel().refresh().await;
    });
}

#[component]
pub fn App() -> impl IntoView {
    // Initial load once the skeleton is in the document
    create_effect(move |_| {
        spawn_local(async move {
            let _ = browser_panel().refresh().await;
        });
    });

    // Row buttons are plain markup, so clicks are delegated from the list
    let on_files_click = move |ev: MouseEvent| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if let Ok(Some(button)) = target.closest(".delete-btn") {
            if let Some(filename) = button.get_attribute("data-filename") {
                dispatch(AdminAction::DeleteFile(filename));
            }
        }
    };

    view! {
        <div class="app">
            <StyleProvider />
            <div class="main-grid">
                <div class="header-section border-container">
                    <div style="display: flex; justify-content: space-between; align-items: center;">
                        <div>
                            <h1 style="color: #cdd6f4; margin: 0; font-size: 2.5rem; font-weight: 500;">
                                "ragdeck"
                            </h1>
                            <p style="color: #bac2de; font-size: 1.1rem; margin: 10px 0 0 0;">
                                "문서 및 임베딩 관리"
                            </p>
                        </div>
                        <div class="status-indicator">
                            <span id=STATUS_DOT_ID class="status-dot status-offline"></span>
                            <span id=STATUS_TEXT_ID>"상태 확인 중..."</span>
                        </div>
                    </div>
                </div>

                <div class="admin-section border-container">
                    <ActionButton label="임베딩 업데이트" action=AdminAction::UpdateEmbeddings />
                    <ActionButton label="인덱스 재구성" action=AdminAction::Rebuild />
                    <ActionButton label="벡터 백업" action=AdminAction::BackupVectors />
                    <ActionButton label="인덱스 초기화" action=AdminAction::ClearIndex danger=true />
                    <ActionButton label="전체 파일 삭제" action=AdminAction::DeleteAll danger=true />
                </div>

                <div class="admin-section border-container">
                    <ReportButton label="임베딩 현황" report=AdminReport::Coverage />
                    <ReportButton label="벡터 DB 정보" report=AdminReport::VectorDb />
                    <ReportButton label="서버 상태" report=AdminReport::ServerStatus />
                    <ReportButton label="시스템 설정" report=AdminReport::Settings />
                </div>

                <div id=REPORT_ID class="report-section border-container">
                    <div class="empty-state">"조회할 항목을 선택하세요."</div>
                </div>

                <div class="files-section border-container">
                    <div id=FILES_LIST_ID on:click=on_files_click>
                        <div class="empty-state">"파일 목록을 불러오는 중..."</div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ActionButton(
    label: &'static str,
    action: AdminAction,
    #[prop(optional)] danger: bool,
) -> impl IntoView {
    let class = if danger {
        "action-btn danger-btn border-container"
    } else {
        "action-btn border-container"
    };

    view! {
        <button
            type="button"
            class=class
            on:click=move |_| dispatch(action.clone())
        >
            {label}
        </button>
    }
}

#[component]
fn ReportButton(label: &'static str, report: AdminReport) -> impl IntoView {
    view! {
        <button
            type="button"
            class="action-btn border-container"
            on:click=move |_| show_report(report)
        >
            {label}
        </button>
    }
}

#[wasm_bindgen]
pub fn run() {
    console_error_panic_hook::set_once();
    init_logging();
    mount_to_body(|| view! { <App /> });
}

// Catppuccin Mocha palette, same grid layout for every section
const MAIN_STYLES: &str = r#"
@import url("https://fonts.googleapis.com/css2?family=DM+Mono:ital,wght@0,300;0,400;0,500&display=swap");

body {
    font-family: "DM Mono", monospace;
    letter-spacing: -0.05ch;
    background-color: #1e1e2e;
    color: #cdd6f4;
    margin: 0;
    padding: 20px;
}

.app {
    max-width: 1200px;
    margin: 0 auto;
}

.main-grid {
    display: grid;
    grid-template-columns: 1fr;
    gap: 20px;
}

.border-container {
    position: relative;
    padding: 20px;
    border: 2px solid #45475a;
    transition: border-color 0.2s ease-out;
    background-color: #1e1e2e;
}

.status-indicator {
    display: flex;
    align-items: center;
    gap: 10px;
    color: #bac2de;
}

.status-dot {
    width: 12px;
    height: 12px;
    border-radius: 50%;
    display: inline-block;
}

.status-ready { background-color: #a6e3a1; }
.status-warning { background-color: #f9e2af; }
.status-offline { background-color: #f38ba8; }

.admin-section {
    display: flex;
    gap: 10px;
    flex-wrap: wrap;
}

.action-btn {
    background-color: #1e1e2e;
    color: #cdd6f4;
    font-family: inherit;
    cursor: pointer;
    padding: 12px 18px;
}

.action-btn:hover {
    border-color: #89b4fa;
}

.danger-btn:hover {
    border-color: #f38ba8;
    color: #f38ba8;
}

.file-item {
    display: grid;
    grid-template-columns: 24px 1fr 90px 100px 120px 60px;
    align-items: center;
    gap: 12px;
    padding: 12px 0;
    border-bottom: 1px solid #313244;
}

.file-item:hover .file-name {
    color: #f38ba8;
}

.file-size,
.file-date {
    color: #a6adc8;
    font-size: 14px;
    text-align: right;
}

.embedding-badge {
    font-size: 12px;
    text-align: center;
    padding: 2px 6px;
    border: 1px solid #45475a;
}

.embedding-badge.embedded { color: #a6e3a1; }
.embedding-badge.pending { color: #f9e2af; }

.admin-report .report-title {
    margin: 0 0 12px 0;
    font-weight: 500;
}

.report-row {
    display: flex;
    justify-content: space-between;
    padding: 6px 0;
    border-bottom: 1px solid #313244;
}

.report-label { color: #bac2de; }

.delete-btn {
    background: none;
    border: 1px solid #45475a;
    color: #f38ba8;
    font-family: inherit;
    cursor: pointer;
}

.empty-state {
    text-align: center;
    padding: 40px 20px;
    color: #bac2de;
}
"#;

#[component]
fn StyleProvider() -> impl IntoView {
    view! {
        <style>{MAIN_STYLES}</style>
    }
}
