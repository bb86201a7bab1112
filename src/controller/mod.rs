//! Analysis screen controller.
//!
//! [`AnalysisController`] owns the [`UiState`] and is the only thing that mutates it.
//! Each public method is one named event of the screen's state machine:
//!
//! ```text
//! Idle <-> HasInput --begin_analysis--> Analyzing --complete_analysis--> Result | Error
//!                                                                          |
//!                          reset --> Idle  <-------------------------------+
//! ```
//!
//! Network I/O is not performed here. The caller takes the text returned by
//! [`AnalysisController::begin_analysis`], runs it through a [`Classifier`] however it
//! likes (the TUI uses a worker thread), and reports back with
//! [`AnalysisController::complete_analysis`]. [`AnalysisController::analyze_with`] does
//! both in one blocking call.

pub mod state;
pub mod view;

use std::path::Path;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info, warn};

pub use state::{MessageType, Outcome, Screen, StatusMessage, UiState};
pub use view::{PRODUCTIVE_CAPTION, ResultView, UNPRODUCTIVE_CAPTION, render_result};

use crate::client::Classifier;
use crate::client::wire::UNKNOWN_ERROR;
use crate::clipboard::ClipboardWriter;
use crate::errors::{AnalysisError, ValidationError};
use crate::history::HistoryCache;
use crate::input::load_file;
use crate::models::{AnalysisResult, HistoryEntry, InputSource, UploadedFile};

/// How long the copy confirmation stays visible
const COPY_CONFIRMATION_DURATION_MS: u64 = 2000;
pub const COPY_CONFIRMATION: &str = "Copiado!";
pub const COPY_FAILED: &str = "Erro ao copiar texto";
/// Prefix of every failed-analysis message
pub const ANALYSIS_FAILED_PREFIX: &str = "Falha na análise";

/// A change to the editable text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    InsertStr(String),
    Backspace,
    Replace(String),
}

pub struct AnalysisController {
    state: UiState,
    history: HistoryCache,
    clipboard: Box<dyn ClipboardWriter>,
}

impl AnalysisController {
    pub fn new(history: HistoryCache, clipboard: Box<dyn ClipboardWriter>) -> Self {
        Self { state: UiState::default(), history, clipboard }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn result_view(&self) -> Option<ResultView<'_>> {
        self.state.result().map(render_result)
    }

    /// Load a dropped or picked file and make it the active input.
    ///
    /// On any error the current input is left as it was and the error is shown inline.
    pub fn select_file(&mut self, path: &Path) -> Result<(), ValidationError> {
        if self.state.analyzing {
            return Err(ValidationError::AnalysisInFlight);
        }

        match load_file(path) {
            Ok(file) => {
                self.accept_file(file);
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), "file rejected: {e:?}");
                self.state.status = Some(StatusMessage::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Make an already loaded file the active input, replacing any typed text
    pub fn accept_file(&mut self, file: UploadedFile) {
        if self.state.analyzing {
            debug!("ignoring file while analyzing");
            return;
        }
        info!(file = %file.name, size = file.size_bytes, "file selected");
        self.state.input = InputSource::UploadedFile(file);
        self.state.status = None;
    }

    /// Drop the selected file together with the text it put in the editor
    pub fn remove_file(&mut self) {
        if self.state.analyzing || self.state.input.file().is_none() {
            return;
        }
        self.state.input = InputSource::None;
    }

    /// Apply a manual edit. Editing cancels a file selection but keeps its text.
    ///
    /// Returns false when the edit was refused (request in flight).
    pub fn edit_text(&mut self, edit: TextEdit) -> bool {
        if self.state.analyzing {
            return false;
        }

        let mut text = match std::mem::take(&mut self.state.input) {
            InputSource::None => String::new(),
            InputSource::TypedText(text) => text,
            InputSource::UploadedFile(file) => file.extracted_text,
        };

        match edit {
            TextEdit::Insert(c) => text.push(c),
            TextEdit::InsertStr(s) => text.push_str(&s),
            TextEdit::Backspace => {
                text.pop();
            }
            TextEdit::Replace(s) => text = s,
        }

        self.state.input =
            if text.is_empty() { InputSource::None } else { InputSource::TypedText(text) };
        true
    }

    /// Enter `Analyzing`. Returns the trimmed text to send.
    ///
    /// # Errors
    /// - [`ValidationError::EmptyText`] when the trimmed input is empty (shown inline)
    /// - [`ValidationError::AnalysisInFlight`] while a request is outstanding
    pub fn begin_analysis(&mut self) -> Result<String, ValidationError> {
        if self.state.analyzing {
            return Err(ValidationError::AnalysisInFlight);
        }

        let text = self.state.input.text().trim().to_string();
        if text.is_empty() {
            let err = ValidationError::EmptyText;
            self.state.status = Some(StatusMessage::error(err.to_string()));
            return Err(err);
        }

        info!(chars = text.chars().count(), "analysis started");
        self.state.analyzing = true;
        self.state.outcome = None;
        self.state.status = None;
        self.state.pending_text = Some(text.clone());
        Ok(text)
    }

    /// Leave `Analyzing` with the request's outcome.
    ///
    /// A success is displayed and appended to history; anything else is displayed as
    /// an error. Returns false (and changes nothing) when no request was in flight.
    pub fn complete_analysis(&mut self, outcome: Result<AnalysisResult, AnalysisError>) -> bool {
        if !self.state.analyzing {
            debug!("ignoring analysis outcome with no request in flight");
            return false;
        }

        self.state.analyzing = false;
        let text = self.state.pending_text.take().unwrap_or_default();

        self.state.outcome = Some(match outcome {
            Ok(result) if result.is_success() => {
                info!(category = %result.category_label, "analysis succeeded");
                self.history.record(&text, &result, Utc::now());
                Outcome::Success(result)
            }
            Ok(result) => {
                let message = result.error_message.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
                warn!("analysis rejected by server: {message}");
                Outcome::Failure(format!("{}: {}", ANALYSIS_FAILED_PREFIX, message))
            }
            Err(e) => {
                warn!("analysis failed: {e}");
                Outcome::Failure(format!("{}: {}", ANALYSIS_FAILED_PREFIX, e))
            }
        });
        true
    }

    /// Run one blocking analysis through `classifier`
    pub fn analyze_with(&mut self, classifier: &dyn Classifier) -> Result<(), ValidationError> {
        let text = self.begin_analysis()?;
        let outcome = classifier.analyze(&text);
        self.complete_analysis(outcome);
        Ok(())
    }

    /// Copy the displayed reply. Failure is reported inline and changes nothing else.
    ///
    /// Returns false when there is no result to copy from.
    pub fn copy_reply(&mut self) -> bool {
        let Some(reply) = self.state.result().map(|r| r.suggested_reply.clone()) else {
            return false;
        };

        self.state.status = Some(match self.clipboard.write_text(&reply) {
            Ok(()) => StatusMessage::success_for(
                COPY_CONFIRMATION,
                Duration::from_millis(COPY_CONFIRMATION_DURATION_MS),
            ),
            Err(e) => {
                warn!("clipboard write failed: {e:#}");
                StatusMessage::error(COPY_FAILED)
            }
        });
        true
    }

    /// Back to `Idle`: clears input, displayed outcome and messages.
    /// Refused while a request is in flight.
    pub fn reset(&mut self) -> bool {
        if self.state.analyzing {
            return false;
        }
        self.state = UiState::default();
        true
    }

    /// Drop an expired status message. Returns true when something was cleared.
    pub fn clear_expired_status(&mut self, now: Instant) -> bool {
        if self.state.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.state.status = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::history::MemoryHistoryStore;
    use crate::models::{Category, MediaType};

    /// Returns a fixed outcome and counts calls
    struct ScriptedClassifier {
        reply: fn() -> Result<AnalysisResult, AnalysisError>,
        calls: AtomicUsize,
    }

    impl ScriptedClassifier {
        fn new(reply: fn() -> Result<AnalysisResult, AnalysisError>) -> Self {
            Self { reply, calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Classifier for ScriptedClassifier {
        fn analyze(&self, _text: &str) -> Result<AnalysisResult, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }
    }

    fn productive() -> Result<AnalysisResult, AnalysisError> {
        Ok(AnalysisResult::success("Produtivo", "We will address this shortly."))
    }

    fn server_error() -> Result<AnalysisResult, AnalysisError> {
        Err(AnalysisError::Status { status: 500, status_text: "Internal Server Error".to_string() })
    }

    fn controller() -> AnalysisController {
        AnalysisController::new(
            HistoryCache::new(Box::new(MemoryHistoryStore::new())),
            Box::new(MemoryClipboard::new()),
        )
    }

    fn pdf_file() -> UploadedFile {
        UploadedFile {
            name: "scan.pdf".to_string(),
            size_bytes: 2048,
            media_type: MediaType::Pdf,
            extracted_text: crate::input::pdf_placeholder("scan.pdf"),
        }
    }

    #[test]
    fn test_new_controller_is_idle() {
        let controller = controller();
        assert_eq!(controller.screen(), Screen::Idle);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_typing_moves_between_idle_and_has_input() {
        let mut controller = controller();

        controller.edit_text(TextEdit::Insert('a'));
        assert_eq!(controller.screen(), Screen::HasInput);

        controller.edit_text(TextEdit::Backspace);
        assert_eq!(controller.screen(), Screen::Idle);
        assert_eq!(controller.state().input(), &InputSource::None);
    }

    #[test]
    fn test_editing_cancels_file_but_keeps_text() {
        let mut controller = controller();
        controller.accept_file(pdf_file());
        assert!(controller.state().input().file().is_some());

        controller.edit_text(TextEdit::Insert('!'));

        let input = controller.state().input();
        assert!(input.file().is_none());
        assert!(input.text().starts_with("[Arquivo PDF: scan.pdf]"));
        assert!(input.text().ends_with('!'));
    }

    #[test]
    fn test_file_replaces_typed_text() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("typed".to_string()));
        controller.accept_file(pdf_file());

        assert_eq!(controller.state().input().file().map(|f| f.name.as_str()), Some("scan.pdf"));
        assert!(!controller.state().input().text().contains("typed"));
    }

    #[test]
    fn test_remove_file_clears_input() {
        let mut controller = controller();
        controller.accept_file(pdf_file());
        controller.remove_file();
        assert_eq!(controller.state().input(), &InputSource::None);
        assert_eq!(controller.screen(), Screen::Idle);
    }

    #[test]
    fn test_remove_file_keeps_typed_text() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("typed".to_string()));
        controller.remove_file();
        assert_eq!(controller.state().input().text(), "typed");
    }

    #[test]
    fn test_rejected_file_leaves_input_untouched() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("keep me".to_string()));

        let err = controller.select_file(Path::new("/tmp/photo.jpg")).unwrap_err();

        assert!(matches!(err, ValidationError::UnsupportedFileType { .. }));
        assert_eq!(controller.state().input(), &InputSource::TypedText("keep me".to_string()));
        let status = controller.state().status().unwrap();
        assert_eq!(status.message_type, MessageType::Error);
        assert_eq!(status.text, "Por favor, selecione apenas arquivos .txt ou .pdf");
    }

    #[test]
    fn test_empty_input_blocks_dispatch() {
        let mut controller = controller();
        let classifier = ScriptedClassifier::new(productive);

        let err = controller.analyze_with(&classifier).unwrap_err();

        assert!(matches!(err, ValidationError::EmptyText));
        assert_eq!(classifier.calls(), 0);
        assert_eq!(controller.screen(), Screen::Idle);
        assert_eq!(
            controller.state().status().unwrap().text,
            "Por favor, insira algum texto para análise"
        );
    }

    #[test]
    fn test_whitespace_input_blocks_dispatch() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace(" \n\t ".to_string()));
        let classifier = ScriptedClassifier::new(productive);

        assert!(controller.analyze_with(&classifier).is_err());
        assert_eq!(classifier.calls(), 0);
    }

    #[test]
    fn test_begin_analysis_trims_and_disables_trigger() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("  hello  ".to_string()));

        let text = controller.begin_analysis().unwrap();

        assert_eq!(text, "hello");
        assert_eq!(controller.screen(), Screen::Analyzing);
        assert!(!controller.state().trigger_enabled());
    }

    #[test]
    fn test_second_begin_is_refused_while_in_flight() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("hello".to_string()));
        controller.begin_analysis().unwrap();

        assert!(matches!(controller.begin_analysis(), Err(ValidationError::AnalysisInFlight)));
        assert_eq!(controller.screen(), Screen::Analyzing);
    }

    #[test]
    fn test_input_is_locked_while_analyzing() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("hello".to_string()));
        controller.begin_analysis().unwrap();

        assert!(!controller.edit_text(TextEdit::Insert('x')));
        assert!(!controller.reset());
        controller.accept_file(pdf_file());
        assert_eq!(controller.state().input().text(), "hello");
    }

    #[test]
    fn test_successful_analysis() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("Please resolve my invoice issue".to_string()));

        controller.analyze_with(&ScriptedClassifier::new(productive)).unwrap();

        assert_eq!(controller.screen(), Screen::Result);
        assert!(controller.state().trigger_enabled());
        let view = controller.result_view().unwrap();
        assert_eq!(view.category, Category::Productive);
        assert_eq!(view.label, "PRODUTIVO");
        assert_eq!(view.caption, "Requer ação ou resposta");
        assert_eq!(view.reply, "We will address this shortly.");

        assert_eq!(controller.history().len(), 1);
        assert_eq!(controller.history()[0].text, "Please resolve my invoice issue");
    }

    #[test]
    fn test_http_failure() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("hello".to_string()));

        controller.analyze_with(&ScriptedClassifier::new(server_error)).unwrap();

        assert_eq!(controller.screen(), Screen::Error);
        let message = controller.state().failure().unwrap();
        assert!(message.contains("Erro 500"));
        assert_eq!(message, "Falha na análise: Erro 500: Internal Server Error");
        assert!(controller.result_view().is_none());
        assert!(controller.state().trigger_enabled());
        assert!(controller.history().is_empty());
        // Input survives so the user can retry
        assert_eq!(controller.state().input().text(), "hello");
    }

    #[test]
    fn test_failure_result_is_never_rendered() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("hello".to_string()));
        controller.begin_analysis().unwrap();

        controller.complete_analysis(Ok(AnalysisResult::failure(None)));

        assert_eq!(controller.screen(), Screen::Error);
        assert_eq!(controller.state().failure(), Some("Falha na análise: Erro desconhecido"));
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_retry_after_error_clears_error() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("hello".to_string()));
        controller.analyze_with(&ScriptedClassifier::new(server_error)).unwrap();

        controller.begin_analysis().unwrap();
        assert!(controller.state().failure().is_none());

        controller.complete_analysis(productive());
        assert_eq!(controller.screen(), Screen::Result);
    }

    #[test]
    fn test_stray_completion_is_ignored() {
        let mut controller = controller();
        assert!(!controller.complete_analysis(productive()));
        assert_eq!(controller.screen(), Screen::Idle);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_edit_after_result_keeps_result_displayed() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("hello".to_string()));
        controller.analyze_with(&ScriptedClassifier::new(productive)).unwrap();

        controller.edit_text(TextEdit::Insert('!'));

        assert_eq!(controller.screen(), Screen::Result);
        assert_eq!(controller.state().input().text(), "hello!");
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("hello".to_string()));
        controller.analyze_with(&ScriptedClassifier::new(productive)).unwrap();

        assert!(controller.reset());

        assert_eq!(controller.screen(), Screen::Idle);
        assert!(controller.result_view().is_none());
        assert_eq!(controller.state().input(), &InputSource::None);
        // History survives a reset
        assert_eq!(controller.history().len(), 1);
    }

    #[test]
    fn test_copy_reply() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("hello".to_string()));
        controller.analyze_with(&ScriptedClassifier::new(productive)).unwrap();

        assert!(controller.copy_reply());

        let status = controller.state().status().unwrap();
        assert_eq!(status.text, COPY_CONFIRMATION);
        assert_eq!(status.message_type, MessageType::Success);
        assert!(status.expires_at.is_some());
    }

    #[test]
    fn test_copy_failure_is_non_fatal() {
        let mut controller = AnalysisController::new(
            HistoryCache::new(Box::new(MemoryHistoryStore::new())),
            Box::new(MemoryClipboard::failing()),
        );
        controller.edit_text(TextEdit::Replace("hello".to_string()));
        controller.analyze_with(&ScriptedClassifier::new(productive)).unwrap();

        assert!(controller.copy_reply());

        assert_eq!(controller.state().status().unwrap().text, COPY_FAILED);
        assert_eq!(controller.screen(), Screen::Result);
        assert!(controller.result_view().is_some());
    }

    #[test]
    fn test_copy_empty_reply_succeeds() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("hello".to_string()));
        controller.begin_analysis().unwrap();
        controller.complete_analysis(Ok(AnalysisResult::success("Improdutivo", "")));

        assert!(controller.copy_reply());

        let status = controller.state().status().unwrap();
        assert_eq!(status.text, COPY_CONFIRMATION);
        assert_eq!(status.message_type, MessageType::Success);
    }

    #[test]
    fn test_copy_without_result() {
        let mut controller = controller();
        assert!(!controller.copy_reply());
        assert!(controller.state().status().is_none());
    }

    #[test]
    fn test_clear_expired_status() {
        let mut controller = controller();
        controller.edit_text(TextEdit::Replace("hello".to_string()));
        controller.analyze_with(&ScriptedClassifier::new(productive)).unwrap();
        controller.copy_reply();

        let later = Instant::now() + Duration::from_millis(COPY_CONFIRMATION_DURATION_MS + 1);
        assert!(controller.clear_expired_status(later));
        assert!(controller.state().status().is_none());
        assert!(!controller.clear_expired_status(later));
    }

    #[test]
    fn test_error_status_does_not_expire() {
        let mut controller = controller();
        let _ = controller.begin_analysis();

        let much_later = Instant::now() + Duration::from_secs(3600);
        assert!(!controller.clear_expired_status(much_later));
        assert!(controller.state().status().is_some());
    }

    #[test]
    fn test_history_keeps_ten_newest() {
        let mut controller = controller();
        let classifier = ScriptedClassifier::new(productive);

        for i in 0..11 {
            controller.edit_text(TextEdit::Replace(format!("email {i}")));
            controller.analyze_with(&classifier).unwrap();
        }

        let texts: Vec<&str> = controller.history().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts.len(), 10);
        assert_eq!(texts[0], "email 10");
        assert_eq!(texts[9], "email 1");
        assert!(!texts.contains(&"email 0"));
        assert_eq!(classifier.calls(), 11);
    }
}
