use std::fmt::Display;

use tracing::debug;

use crate::command::Command;
use crate::error::ListenerError;

/// Observer notified around every command a chain runs.
///
/// Both notifications default to doing nothing. Errors returned here are
/// logged by the chain and otherwise ignored.
pub trait CommandListener<C, E>: Send + Sync {
    /// Called before `command` executes.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot process the notification.
    fn command_started(
        &self,
        command: &dyn Command<Context = C, Error = E>,
        ctx: &C,
    ) -> Result<(), ListenerError> {
        let _ = (command, ctx);
        Ok(())
    }

    /// Called after `command` executed, whether it succeeded or not.
    ///
    /// `error` holds the command's failure, if any. Runs before the failed
    /// command is reverted.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot process the notification.
    fn command_finished(
        &self,
        command: &dyn Command<Context = C, Error = E>,
        ctx: &C,
        error: Option<&E>,
    ) -> Result<(), ListenerError> {
        let _ = (command, ctx, error);
        Ok(())
    }
}

/// Listener emitting a `tracing` debug event for each notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl<C, E> CommandListener<C, E> for TracingListener
where
    E: Display,
{
    fn command_started(
        &self,
        command: &dyn Command<Context = C, Error = E>,
        _ctx: &C,
    ) -> Result<(), ListenerError> {
        debug!(command = command.name(), "command started");
        Ok(())
    }

    fn command_finished(
        &self,
        command: &dyn Command<Context = C, Error = E>,
        _ctx: &C,
        error: Option<&E>,
    ) -> Result<(), ListenerError> {
        match error {
            Some(error) => debug!(command = command.name(), error = %error, "command failed"),
            None => debug!(command = command.name(), "command succeeded"),
        }
        Ok(())
    }
}
