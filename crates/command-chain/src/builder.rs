use std::fmt::Debug;
use std::sync::Arc;

use crate::chain::SimpleChain;
use crate::command::{BoxedCommand, Command};
use crate::listener::CommandListener;
use crate::logger::{DefaultErrorLogger, ErrorLogger};

const DEFAULT_CHAIN_NAME: &str = "SimpleChain";

/// Builder for [`SimpleChain`].
///
/// Commands run in the order they are added. The command list is frozen once
/// [`build`](ChainBuilder::build) is called.
///
/// ```
/// use command_chain::{Command, SimpleChain, command_fn};
///
/// let chain = SimpleChain::builder()
///     .name("counter")
///     .command(command_fn("add_one", |n: &mut i32| -> Result<(), std::io::Error> {
///         *n += 1;
///         Ok(())
///     }))
///     .command(command_fn("double", |n: &mut i32| {
///         *n *= 2;
///         Ok(())
///     }))
///     .build();
///
/// let mut ctx = 4;
/// chain.execute(&mut ctx)?;
/// assert_eq!(ctx, 10);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct ChainBuilder<C, E> {
    name: String,
    commands: Vec<BoxedCommand<C, E>>,
    listener: Option<Arc<dyn CommandListener<C, E>>>,
    error_logger: Option<Box<dyn ErrorLogger<C, E>>>,
}

impl<C, E> ChainBuilder<C, E> {
    /// Create a builder with no commands, no listener and the default logger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: DEFAULT_CHAIN_NAME.to_string(),
            commands: Vec::new(),
            listener: None,
            error_logger: None,
        }
    }

    /// Name reported for the chain when it runs nested inside another chain.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append a command.
    #[must_use]
    pub fn command<T>(mut self, command: T) -> Self
    where
        T: Command<Context = C, Error = E> + 'static,
    {
        self.commands.push(Box::new(command));
        self
    }

    /// Append already boxed commands, keeping their order.
    #[must_use]
    pub fn commands<I>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = BoxedCommand<C, E>>,
    {
        self.commands.extend(commands);
        self
    }

    /// Listener notified around every command.
    ///
    /// The listener is shared: callers may keep their own handle to it.
    #[must_use]
    pub fn listener(mut self, listener: Arc<dyn CommandListener<C, E>>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Logger receiving command, listener and revert errors.
    #[must_use]
    pub fn error_logger<L>(mut self, logger: L) -> Self
    where
        L: ErrorLogger<C, E> + 'static,
    {
        self.error_logger = Some(Box::new(logger));
        self
    }

    /// Build the chain, falling back to [`DefaultErrorLogger`] when no logger
    /// was set.
    #[must_use]
    pub fn build(self) -> SimpleChain<C, E>
    where
        C: Debug,
    {
        let error_logger: Box<dyn ErrorLogger<C, E>> = match self.error_logger {
            Some(logger) => logger,
            None => Box::new(DefaultErrorLogger),
        };
        SimpleChain::from_parts(self.name, self.commands, self.listener, error_logger)
    }

    /// Build the chain with `logger`, for contexts that cannot be logged by
    /// [`DefaultErrorLogger`].
    #[must_use]
    pub fn build_with_logger<L>(self, logger: L) -> SimpleChain<C, E>
    where
        L: ErrorLogger<C, E> + 'static,
    {
        SimpleChain::from_parts(self.name, self.commands, self.listener, Box::new(logger))
    }
}

impl<C, E> Default for ChainBuilder<C, E> {
    fn default() -> Self {
        Self::new()
    }
}
