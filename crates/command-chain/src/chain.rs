use std::error::Error;
use std::fmt::{self, Debug};
use std::sync::Arc;

use tracing::debug;

use crate::builder::ChainBuilder;
use crate::command::{BoxedCommand, Chain, Command};
use crate::listener::CommandListener;
use crate::logger::{ErrorLogger, Phase};

/// A chain running its commands in insertion order.
///
/// For every command the chain notifies the listener, executes the command,
/// notifies the listener again with the outcome, and reverts the command if it
/// failed. The first failure stops the chain and is returned unchanged;
/// commands after it are never announced or executed.
///
/// A `SimpleChain` is a [`Command`] and can be nested inside another chain.
/// Its [`revert`](Command::revert) is a no-op since the failing inner command
/// has already been reverted by the time the error leaves the chain.
///
/// Only `Err` results get this treatment. A panic in a command or in one of
/// the chain's observers unwinds straight out of [`execute`](Command::execute):
/// the finish notification and the revert of the command are skipped.
pub struct SimpleChain<C, E> {
    name: String,
    commands: Vec<BoxedCommand<C, E>>,
    listener: Option<Arc<dyn CommandListener<C, E>>>,
    error_logger: Box<dyn ErrorLogger<C, E>>,
}

impl<C, E> SimpleChain<C, E> {
    /// Create a chain with the default logger and no listener.
    #[must_use]
    pub fn new(commands: Vec<BoxedCommand<C, E>>) -> Self
    where
        C: Debug,
    {
        ChainBuilder::new().commands(commands).build()
    }

    /// Start building a chain.
    #[must_use]
    pub fn builder() -> ChainBuilder<C, E> {
        ChainBuilder::new()
    }

    pub(crate) fn from_parts(
        name: String,
        commands: Vec<BoxedCommand<C, E>>,
        listener: Option<Arc<dyn CommandListener<C, E>>>,
        error_logger: Box<dyn ErrorLogger<C, E>>,
    ) -> Self {
        Self {
            name,
            commands,
            listener,
            error_logger,
        }
    }
}

impl<C, E> SimpleChain<C, E>
where
    E: Error,
{
    fn notify_started(&self, command: &dyn Command<Context = C, Error = E>, ctx: &C) {
        let Some(listener) = &self.listener else {
            return;
        };
        if let Err(error) = listener.command_started(command, ctx) {
            self.error_logger
                .log_error(Phase::CommandStarted, command, ctx, &error);
        }
    }

    fn notify_finished(
        &self,
        command: &dyn Command<Context = C, Error = E>,
        ctx: &C,
        command_error: Option<&E>,
    ) {
        let Some(listener) = &self.listener else {
            return;
        };
        if let Err(error) = listener.command_finished(command, ctx, command_error) {
            self.error_logger
                .log_error(Phase::CommandFinished, command, ctx, &error);
        }
    }

    fn revert_failed(&self, command: &dyn Command<Context = C, Error = E>, ctx: &mut C) {
        debug!(chain = %self.name, command = command.name(), "reverting failed command");
        if let Err(error) = command.revert(ctx) {
            self.error_logger.log_error(Phase::Revert, command, ctx, &error);
        }
    }
}

impl<C, E> Command for SimpleChain<C, E>
where
    E: Error,
{
    type Context = C;
    type Error = E;

    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, ctx: &mut C) -> Result<(), E> {
        debug!(chain = %self.name, commands = self.commands.len(), "executing chain");

        for command in &self.commands {
            let command = command.as_ref();
            self.notify_started(command, ctx);

            let result = command.execute(ctx);
            if let Err(error) = &result {
                self.error_logger.log_error(Phase::Execute, command, ctx, error);
            }

            self.notify_finished(command, ctx, result.as_ref().err());

            if let Err(error) = result {
                self.revert_failed(command, ctx);
                debug!(
                    chain = %self.name,
                    command = command.name(),
                    "chain aborted"
                );
                return Err(error);
            }
        }

        debug!(chain = %self.name, "chain completed");
        Ok(())
    }
}

impl<C, E> Chain for SimpleChain<C, E>
where
    E: Error,
{
    fn commands(&self) -> &[BoxedCommand<C, E>] {
        &self.commands
    }
}

impl<C, E> Debug for SimpleChain<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let commands: Vec<&str> = self.commands.iter().map(|c| c.name()).collect();
        f.debug_struct("SimpleChain")
            .field("name", &self.name)
            .field("commands", &commands)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}
