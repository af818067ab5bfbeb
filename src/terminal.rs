use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use crate::panel::ViewPort;
use crate::render::{FileListView, StorageSummary};
use crate::reports::ReportView;
use crate::status::StatusState;

/// Prompts on a reader, renders to a writer. Stdio in the binary.
pub struct TerminalView<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
    assume_yes: bool,
}

impl TerminalView<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), assume_yes)
    }
}

impl<R: BufRead, W: Write> TerminalView<R, W> {
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
            assume_yes,
        }
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    fn line(&self, text: &str) {
        let mut out = self.output.borrow_mut();
        let _ = writeln!(out, "{}", text);
        let _ = out.flush();
    }
}

fn status_marker(state: StatusState) -> &'static str {
    match state {
        StatusState::Ready => "[ok]",
        StatusState::NeedsUpload => "[!!]",
        StatusState::Offline => "[--]",
    }
}

impl<R: BufRead, W: Write> ViewPort for TerminalView<R, W> {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            self.line(&format!("{} [y/N] y", message));
            return true;
        }

        {
            let mut out = self.output.borrow_mut();
            let _ = write!(out, "{} [y/N] ", message);
            let _ = out.flush();
        }

        let mut answer = String::new();
        match self.input.borrow_mut().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn alert(&self, message: &str) {
        self.line(message);
    }

    fn render_files(&self, view: &FileListView) {
        match view {
            FileListView::Empty(message) => self.line(message),
            FileListView::Rows(rows) => {
                for row in rows {
                    self.line(&format!(
                        "{:<40} {:>10}  {:<14} {}",
                        row.name,
                        row.size,
                        row.updated,
                        row.embedding_label()
                    ));
                }
            }
        }
    }

    fn render_status(&self, state: StatusState) {
        self.line(&format!("{} {}", status_marker(state), state.label()));
    }

    fn render_storage(&self, summary: &StorageSummary) {
        self.line(&format!("저장소: {}", summary));
    }

    fn render_report(&self, report: &ReportView) {
        self.line(&format!("[{}]", report.title));
        for entry in &report.entries {
            self.line(&format!("  {}: {}", entry.label, entry.value));
        }
    }
}
