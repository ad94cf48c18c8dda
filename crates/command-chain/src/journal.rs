use std::fmt::Display;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};
use std::time::Instant;

use crate::command::Command;
use crate::error::ListenerError;
use crate::listener::CommandListener;

/// Status of a command in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandStatus {
    /// Command was announced but has not finished.
    Started,
    /// Command executed successfully.
    Succeeded,
    /// Command failed during execution.
    Failed,
}

/// Record of one command run observed by an [`ExecutionJournal`].
#[derive(Debug, Clone)]
pub struct CommandRecord {
    /// Name of the command.
    pub name: String,
    /// Current status.
    pub status: CommandStatus,
    /// When the command was announced.
    pub started_at: Instant,
    /// When the command finished.
    pub completed_at: Option<Instant>,
    /// Rendered error of a failed command.
    pub error: Option<String>,
    /// Thread the chain ran on.
    pub thread: ThreadId,
}

/// Listener keeping a record of every command a chain runs.
///
/// Attach it to a chain with [`ChainBuilder::listener`](crate::ChainBuilder::listener)
/// and inspect the records once the chain returns.
///
/// One journal may observe several runs at once. A chain runs on its caller's
/// thread, so a finish notification closes the open record started on the
/// same thread.
#[derive(Debug, Default)]
pub struct ExecutionJournal {
    records: Mutex<Vec<CommandRecord>>,
}

impl ExecutionJournal {
    /// Create a new empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CommandRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn record_start(&self, name: &str) {
        self.lock().push(CommandRecord {
            name: name.to_string(),
            status: CommandStatus::Started,
            started_at: Instant::now(),
            completed_at: None,
            error: None,
            thread: thread::current().id(),
        });
    }

    /// Close the most recent open record for `name` started on this thread.
    pub(crate) fn record_finish(&self, name: &str, error: Option<String>) {
        let current = thread::current().id();
        let mut records = self.lock();
        let open = records.iter_mut().rev().find(|r| {
            r.thread == current && r.name == name && r.status == CommandStatus::Started
        });
        if let Some(record) = open {
            record.status = if error.is_some() {
                CommandStatus::Failed
            } else {
                CommandStatus::Succeeded
            };
            record.completed_at = Some(Instant::now());
            record.error = error;
        }
    }

    /// Snapshot of all records, in the order the commands started.
    #[must_use]
    pub fn records(&self) -> Vec<CommandRecord> {
        self.lock().clone()
    }

    /// Drop all records.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Get a summary of the recorded commands for display.
    #[must_use]
    pub fn summary(&self) -> String {
        let records = self.lock();
        let mut lines = Vec::with_capacity(records.len());
        for record in records.iter() {
            let status = match record.status {
                CommandStatus::Started => "…",
                CommandStatus::Succeeded => "✓",
                CommandStatus::Failed => "✗",
            };
            match &record.error {
                Some(error) => lines.push(format!("{status} {}: {error}", record.name)),
                None => lines.push(format!("{status} {}", record.name)),
            }
        }
        lines.join("\n")
    }
}

impl<C, E> CommandListener<C, E> for ExecutionJournal
where
    E: Display,
{
    fn command_started(
        &self,
        command: &dyn Command<Context = C, Error = E>,
        _ctx: &C,
    ) -> Result<(), ListenerError> {
        self.record_start(command.name());
        Ok(())
    }

    fn command_finished(
        &self,
        command: &dyn Command<Context = C, Error = E>,
        _ctx: &C,
        error: Option<&E>,
    ) -> Result<(), ListenerError> {
        self.record_finish(command.name(), error.map(ToString::to_string));
        Ok(())
    }
}
