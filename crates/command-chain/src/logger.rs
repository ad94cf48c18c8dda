use std::error::Error;
use std::fmt;
use std::sync::Arc;

use tracing::error;

use crate::command::Command;

/// Stage of a chain execution in which an error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Phase {
    /// The listener failed while being told a command is about to run.
    CommandStarted,
    /// The command itself failed.
    Execute,
    /// The listener failed while being told a command has finished.
    CommandFinished,
    /// The failed command could not be reverted.
    Revert,
}

impl Phase {
    /// Name of the phase as it appears in log messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CommandStarted => "commandStarted",
            Self::Execute => "execute",
            Self::CommandFinished => "commandFinished",
            Self::Revert => "revert",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives every error a chain observes while running its commands.
///
/// Logging is infallible: a logger has no way to hand an error back to the
/// chain, so a failing listener can never replace a command's error.
pub trait ErrorLogger<C, E>: Send + Sync {
    /// Report `error`, raised in `phase` while the chain handled `command`.
    ///
    /// Must not panic: the chain does not catch panics, so a panicking logger
    /// unwinds out of [`Command::execute`] and the original error is lost.
    fn log_error(
        &self,
        phase: Phase,
        command: &dyn Command<Context = C, Error = E>,
        ctx: &C,
        error: &dyn Error,
    );
}

impl<C, E, L> ErrorLogger<C, E> for Arc<L>
where
    L: ErrorLogger<C, E> + ?Sized,
{
    fn log_error(
        &self,
        phase: Phase,
        command: &dyn Command<Context = C, Error = E>,
        ctx: &C,
        error: &dyn Error,
    ) {
        (**self).log_error(phase, command, ctx, error);
    }
}

/// Logger used by chains built without an explicit [`ErrorLogger`].
///
/// Emits one `tracing` event at error level per reported error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorLogger;

impl<C, E> ErrorLogger<C, E> for DefaultErrorLogger
where
    C: fmt::Debug,
{
    fn log_error(
        &self,
        phase: Phase,
        command: &dyn Command<Context = C, Error = E>,
        ctx: &C,
        error: &dyn Error,
    ) {
        let command = command.name();
        error!(
            %phase,
            command,
            error = %error,
            "Error in {phase}({command}, {ctx:?})"
        );
    }
}
