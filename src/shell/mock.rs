//! Scriptable process runner for tests.
//!
//! `MockRunner` implements [`ProcessRunner`] without spawning anything. It
//! records every invocation and answers from handlers registered per tool
//! name (see [`Invocation::tool`]). Unhandled tools succeed with empty output.
//!
//! # Example
//!
//! ```
//! use update_discord::shell::{Invocation, MockRunner, ProcessOutput, ProcessRunner};
//!
//! let runner = MockRunner::new();
//! runner.respond("apt", ProcessOutput::ok("discord-electron/now 0.0.50 all [installed,local]\n"));
//!
//! let out = runner.run(&Invocation::new("apt").arg("list")).unwrap();
//! assert!(out.stdout.contains("0.0.50"));
//! assert_eq!(runner.calls_to("apt").len(), 1);
//! ```

use std::cell::RefCell;

use crate::error::Result;

use super::{Invocation, ProcessOutput, ProcessRunner};

type Handler = Box<dyn Fn(&Invocation) -> ProcessOutput>;

/// Mock process runner.
#[derive(Default)]
pub struct MockRunner {
    handlers: RefCell<Vec<(String, Handler)>>,
    calls: RefCell<Vec<Invocation>>,
}

impl MockRunner {
    /// Create a runner where every tool succeeds with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer calls to `tool` with the given handler.
    ///
    /// Later registrations for the same tool take precedence.
    pub fn on(&self, tool: &str, handler: impl Fn(&Invocation) -> ProcessOutput + 'static) {
        self.handlers
            .borrow_mut()
            .push((tool.to_string(), Box::new(handler)));
    }

    /// Answer every call to `tool` with a fixed output.
    pub fn respond(&self, tool: &str, output: ProcessOutput) {
        self.on(tool, move |_| output.clone());
    }

    /// All recorded invocations, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Recorded invocations of `tool`.
    pub fn calls_to(&self, tool: &str) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|inv| inv.tool() == tool)
            .cloned()
            .collect()
    }

    /// Recorded invocations of `tool` whose first argument is `subcommand`.
    pub fn calls_to_subcommand(&self, tool: &str, subcommand: &str) -> Vec<Invocation> {
        self.calls_to(tool)
            .into_iter()
            .filter(|inv| inv.tool_args().first().map(String::as_str) == Some(subcommand))
            .collect()
    }

    /// Whether `tool` was invoked at all.
    pub fn was_called(&self, tool: &str) -> bool {
        !self.calls_to(tool).is_empty()
    }

    /// Forget recorded invocations, keeping the handlers.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        self.calls.borrow_mut().push(invocation.clone());

        let handlers = self.handlers.borrow();
        let output = handlers
            .iter()
            .rev()
            .find(|(tool, _)| tool == invocation.tool())
            .map(|(_, handler)| handler(invocation))
            .unwrap_or_else(|| ProcessOutput::ok(""));

        Ok(output)
    }
}
