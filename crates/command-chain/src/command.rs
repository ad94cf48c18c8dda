/// A stateless unit of work run against a shared context.
///
/// Commands keep no mutable state of their own between invocations; anything
/// that changes lives in the context passed to [`execute`](Command::execute).
///
/// # Type Parameters
///
/// - `Context`: Mutable state threaded through every command of a chain
/// - `Error`: The error type for command failures
pub trait Command: Send + Sync {
    /// State shared by all commands of a chain during one execution.
    type Context;

    /// Error type for command failures.
    type Error;

    /// Human-readable name for logging and listener notifications.
    ///
    /// Defaults to the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Run the command against the context.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails to complete. A chain stops at the
    /// first failing command and returns this error to its caller.
    fn execute(&self, ctx: &mut Self::Context) -> Result<(), Self::Error>;

    /// Undo the partial effects of a failed [`execute`](Command::execute).
    ///
    /// Only called on a command whose own execution failed, never after a
    /// successful one. The default implementation is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the revert fails. Chains log revert failures and
    /// still report the original execution error.
    fn revert(&self, ctx: &mut Self::Context) -> Result<(), Self::Error> {
        let _ = ctx;
        Ok(())
    }
}

/// An owned, type-erased command as stored by a chain.
pub type BoxedCommand<C, E> = Box<dyn Command<Context = C, Error = E>>;

/// A command made of zero or more sub-commands run in order.
pub trait Chain: Command {
    /// The sub-commands, in execution order.
    fn commands(&self) -> &[BoxedCommand<Self::Context, Self::Error>];

    /// Number of sub-commands.
    fn len(&self) -> usize {
        self.commands().len()
    }

    /// Whether the chain has no sub-commands.
    fn is_empty(&self) -> bool {
        self.commands().is_empty()
    }
}
