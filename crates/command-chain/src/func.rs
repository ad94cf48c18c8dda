use std::fmt;
use std::marker::PhantomData;

use crate::command::Command;

type RevertFn<C, E> = Box<dyn Fn(&mut C) -> Result<(), E> + Send + Sync>;

/// A [`Command`] backed by closures.
///
/// Built with [`command_fn`]. Without [`with_revert`](FnCommand::with_revert)
/// the command has nothing to undo.
pub struct FnCommand<C, E, F> {
    name: String,
    execute: F,
    revert: Option<RevertFn<C, E>>,
    _marker: PhantomData<fn(&mut C) -> Result<(), E>>,
}

/// Create a named command from an execute closure.
#[must_use]
pub fn command_fn<C, E, F>(name: impl Into<String>, execute: F) -> FnCommand<C, E, F>
where
    F: Fn(&mut C) -> Result<(), E> + Send + Sync,
{
    FnCommand {
        name: name.into(),
        execute,
        revert: None,
        _marker: PhantomData,
    }
}

impl<C, E, F> FnCommand<C, E, F> {
    /// Attach a closure run when the execute closure fails.
    #[must_use]
    pub fn with_revert<R>(mut self, revert: R) -> Self
    where
        R: Fn(&mut C) -> Result<(), E> + Send + Sync + 'static,
    {
        self.revert = Some(Box::new(revert));
        self
    }
}

impl<C, E, F> fmt::Debug for FnCommand<C, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand")
            .field("name", &self.name)
            .field("revertible", &self.revert.is_some())
            .finish_non_exhaustive()
    }
}

impl<C, E, F> Command for FnCommand<C, E, F>
where
    F: Fn(&mut C) -> Result<(), E> + Send + Sync,
{
    type Context = C;
    type Error = E;

    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, ctx: &mut C) -> Result<(), E> {
        (self.execute)(ctx)
    }

    fn revert(&self, ctx: &mut C) -> Result<(), E> {
        match &self.revert {
            Some(revert) => revert(ctx),
            None => Ok(()),
        }
    }
}
