//! TUI application state and event handling.
//!
//! [`App`] wires terminal actions to the [`AnalysisController`] and keeps the bits of
//! state that only matter to the terminal: which pane has focus, the file prompt buffer
//! and the history cursor.
//!
//! Analysis requests run on a worker thread so the spinner keeps animating. The worker
//! reports back over an mpsc channel that the event loop polls once per tick.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::debug;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::client::Classifier;
use crate::controller::{AnalysisController, TextEdit};
use crate::errors::AnalysisError;
use crate::models::AnalysisResult;

type PendingAnalysis = Receiver<Result<AnalysisResult, AnalysisError>>;

/// Pane receiving key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    History,
    FilePrompt,
}

pub struct App {
    controller: AnalysisController,
    classifier: Arc<dyn Classifier>,
    pending: Option<PendingAnalysis>,
    focus: Focus,
    file_prompt: String,
    history_idx: usize,
    spinner_frame: usize,
    should_quit: bool,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(controller: AnalysisController, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            controller,
            classifier,
            pending: None,
            focus: Focus::Editor,
            file_prompt: String::new(),
            history_idx: 0,
            spinner_frame: 0,
            should_quit: false,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            if self.controller.clear_expired_status(Instant::now()) {
                self.needs_redraw = true;
            }
            if self.poll_pending() {
                self.needs_redraw = true;
            }

            // Draw if dirty or if it's been >100ms (spinner, terminal resize)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                if self.controller.state().is_analyzing() {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
                terminal.draw(|f| {
                    let state = RenderState {
                        ui: self.controller.state(),
                        result: self.controller.result_view(),
                        history: self.controller.history(),
                        focus: self.focus,
                        file_prompt: &self.file_prompt,
                        history_idx: self.history_idx,
                        spinner_frame: self.spinner_frame,
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        if action == Action::None {
            return;
        }
        self.needs_redraw = true;

        match action {
            Action::Quit => self.should_quit = true,
            Action::Analyze => self.start_analysis(),
            Action::CopyReply => {
                self.controller.copy_reply();
            }
            Action::NewAnalysis => {
                if self.controller.reset() {
                    self.focus = Focus::Editor;
                    self.file_prompt.clear();
                }
            }
            Action::OpenFilePrompt => {
                if !self.controller.state().is_analyzing() {
                    self.file_prompt.clear();
                    self.focus = Focus::FilePrompt;
                }
            }
            Action::RemoveFile => self.controller.remove_file(),
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Editor => Focus::History,
                    Focus::History => Focus::Editor,
                    Focus::FilePrompt => Focus::FilePrompt,
                };
            }
            Action::MoveUp => {
                if self.focus == Focus::History {
                    self.history_idx = self.history_idx.saturating_sub(1);
                }
            }
            Action::MoveDown => {
                let count = self.controller.history().len();
                if self.focus == Focus::History && self.history_idx + 1 < count {
                    self.history_idx += 1;
                }
            }
            Action::Cancel => {
                self.file_prompt.clear();
                self.focus = Focus::Editor;
            }
            Action::Enter => match self.focus {
                Focus::FilePrompt => self.submit_file_prompt(),
                Focus::Editor => {
                    self.controller.edit_text(TextEdit::Insert('\n'));
                }
                Focus::History => {}
            },
            Action::InsertChar(c) => match self.focus {
                Focus::FilePrompt => self.file_prompt.push(c),
                Focus::Editor => {
                    self.controller.edit_text(TextEdit::Insert(c));
                }
                Focus::History => {}
            },
            Action::DeleteChar => match self.focus {
                Focus::FilePrompt => {
                    self.file_prompt.pop();
                }
                Focus::Editor => {
                    self.controller.edit_text(TextEdit::Backspace);
                }
                Focus::History => {}
            },
            Action::Paste(text) => self.handle_paste(text),
            Action::None => {}
        }
    }

    /// A pasted path to an existing file is treated as a drop; anything else is text
    fn handle_paste(&mut self, text: String) {
        if self.focus == Focus::FilePrompt {
            self.file_prompt.push_str(text.trim_end_matches(['\r', '\n']));
            return;
        }

        if let Some(path) = dropped_path(&text) {
            debug!(path = %path.display(), "paste looks like a dropped file");
            // Errors are shown inline by the controller
            let _ = self.controller.select_file(&path);
            return;
        }

        if self.focus == Focus::Editor {
            self.controller.edit_text(TextEdit::InsertStr(text.replace("\r\n", "\n")));
        }
    }

    fn submit_file_prompt(&mut self) {
        let raw = std::mem::take(&mut self.file_prompt);
        self.focus = Focus::Editor;

        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }
        let _ = self.controller.select_file(&expand_home(raw));
    }

    fn start_analysis(&mut self) {
        let Ok(text) = self.controller.begin_analysis() else {
            return;
        };

        let (tx, rx) = mpsc::channel();
        let classifier = Arc::clone(&self.classifier);
        thread::spawn(move || {
            // Receiver may be gone if the user quit meanwhile
            let _ = tx.send(classifier.analyze(&text));
        });
        self.pending = Some(rx);
    }

    /// Deliver a finished request to the controller. Returns true when one settled.
    fn poll_pending(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };

        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(AnalysisError::Interrupted),
        };

        self.pending = None;
        self.controller.complete_analysis(outcome);
        self.history_idx = 0;
        true
    }
}

/// Interpret pasted text as a dropped file path.
///
/// Terminals paste dropped files as a single line, possibly quoted, `file://` prefixed
/// or with backslash-escaped spaces. Only paths to existing regular files count.
fn dropped_path(text: &str) -> Option<PathBuf> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains('\n') {
        return None;
    }

    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(trimmed);
    let without_scheme = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    let unescaped = without_scheme.replace("\\ ", " ");

    let path = expand_home(&unescaped);
    path.is_file().then_some(path)
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}
