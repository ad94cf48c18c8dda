//! Ordered command chains with lifecycle notification and revert on failure.
//!
//! A [`SimpleChain`] runs its commands one after another against a shared
//! mutable context. Each command is announced to an optional
//! [`CommandListener`] before and after it runs. The first command that fails
//! is reverted, the remaining commands are skipped, and its error is returned
//! to the caller unchanged. Listener failures never abort a chain: they are
//! handed to the chain's [`ErrorLogger`] and dropped.
//!
//! A chain is itself a [`Command`], so chains nest.

mod builder;
mod chain;
mod command;
mod error;
mod func;
mod journal;
mod listener;
mod logger;

pub use builder::ChainBuilder;
pub use chain::SimpleChain;
pub use command::{BoxedCommand, Chain, Command};
pub use error::{BoxError, ListenerError};
pub use func::{FnCommand, command_fn};
pub use journal::{CommandRecord, CommandStatus, ExecutionJournal};
pub use listener::{CommandListener, TracingListener};
pub use logger::{DefaultErrorLogger, ErrorLogger, Phase};
