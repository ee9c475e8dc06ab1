//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. Confirmations are answered from a
//! queue, then from per-question rules, then from a fallback answer.
//!
//! # Example
//!
//! ```
//! use update_discord::ui::{Confirmer, MockUI, UserInterface};
//!
//! let mut ui = MockUI::accepting();
//! ui.set_answer("Delete", false);
//!
//! assert!(ui.ask("Build Debian package for discord 0.0.51?", true).unwrap());
//! assert!(!ui.ask("Delete downloaded archive?", true).unwrap());
//! assert_eq!(ui.questions().len(), 2);
//! ```

use std::collections::VecDeque;

use crate::error::Result;

use super::{Confirmer, NoopSpinner, OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    questions: Vec<String>,
    queued_answers: VecDeque<bool>,
    answers: Vec<(String, bool)>,
    /// Answer for questions with no queued or per-question answer.
    /// `None` means "use the question's default".
    fallback_answer: Option<bool>,
}

impl MockUI {
    /// Create a MockUI that answers every question with its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MockUI that answers yes to everything.
    pub fn accepting() -> Self {
        Self {
            fallback_answer: Some(true),
            ..Default::default()
        }
    }

    /// Create a MockUI that answers no to everything.
    pub fn rejecting() -> Self {
        Self {
            fallback_answer: Some(false),
            ..Default::default()
        }
    }

    /// Answer questions containing `fragment` with `answer`.
    pub fn set_answer(&mut self, fragment: &str, answer: bool) {
        self.answers.push((fragment.to_string(), answer));
    }

    /// Queue answers consumed in order before any other rule applies.
    pub fn queue_answers(&mut self, answers: &[bool]) {
        self.queued_answers.extend(answers.iter().copied());
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get every question that was asked.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Whether a question containing `fragment` was asked.
    pub fn was_asked(&self, fragment: &str) -> bool {
        self.questions.iter().any(|q| q.contains(fragment))
    }

    /// Whether any message, success or header contains `fragment`.
    pub fn has_message(&self, fragment: &str) -> bool {
        self.messages
            .iter()
            .chain(&self.successes)
            .chain(&self.headers)
            .any(|m| m.contains(fragment))
    }
}

impl Confirmer for MockUI {
    fn ask(&mut self, question: &str, default: bool) -> Result<bool> {
        self.questions.push(question.to_string());

        if let Some(answer) = self.queued_answers.pop_front() {
            return Ok(answer);
        }

        if let Some((_, answer)) = self
            .answers
            .iter()
            .rev()
            .find(|(fragment, _)| question.contains(fragment.as_str()))
        {
            return Ok(*answer);
        }

        Ok(self.fallback_answer.unwrap_or(default))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn output(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(NoopSpinner)
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}
