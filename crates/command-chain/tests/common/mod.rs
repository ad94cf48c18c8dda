//! Commands, listener and logger that write every call into one shared trace,
//! plus a subscriber capturing `tracing` output as text.

#![allow(dead_code)]

use std::error::Error;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use command_chain::{BoxedCommand, Command, CommandListener, ErrorLogger, ListenerError, Phase};

pub type Trace = Arc<Mutex<Vec<String>>>;

#[derive(Debug, Default)]
pub struct Ctx {
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TestError(pub String);

pub fn new_trace() -> Trace {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(trace: &Trace) -> Vec<String> {
    trace.lock().expect("trace lock").clone()
}

fn push(trace: &Trace, event: String) {
    trace.lock().expect("trace lock").push(event);
}

pub struct TracedCommand {
    name: String,
    trace: Trace,
    execute_error: Option<String>,
    revert_error: Option<String>,
}

impl TracedCommand {
    pub fn new(name: &str, trace: &Trace) -> Self {
        Self {
            name: name.to_string(),
            trace: Arc::clone(trace),
            execute_error: None,
            revert_error: None,
        }
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.execute_error = Some(message.to_string());
        self
    }

    pub fn failing_revert(mut self, message: &str) -> Self {
        self.revert_error = Some(message.to_string());
        self
    }

    pub fn boxed(self) -> BoxedCommand<Ctx, TestError> {
        Box::new(self)
    }
}

impl Command for TracedCommand {
    type Context = Ctx;
    type Error = TestError;

    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, ctx: &mut Ctx) -> Result<(), TestError> {
        push(&self.trace, format!("execute:{}", self.name));
        ctx.values.push(self.name.clone());
        match &self.execute_error {
            Some(message) => Err(TestError(message.clone())),
            None => Ok(()),
        }
    }

    fn revert(&self, ctx: &mut Ctx) -> Result<(), TestError> {
        push(&self.trace, format!("revert:{}", self.name));
        ctx.values.retain(|value| *value != self.name);
        match &self.revert_error {
            Some(message) => Err(TestError(message.clone())),
            None => Ok(()),
        }
    }
}

/// Wraps a command so that reverts reaching it are visible in the trace.
pub struct RevertRecorder<T> {
    inner: T,
    trace: Trace,
}

impl<T> RevertRecorder<T> {
    pub fn new(inner: T, trace: &Trace) -> Self {
        Self {
            inner,
            trace: Arc::clone(trace),
        }
    }
}

impl<T> Command for RevertRecorder<T>
where
    T: Command<Context = Ctx, Error = TestError>,
{
    type Context = Ctx;
    type Error = TestError;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn execute(&self, ctx: &mut Ctx) -> Result<(), TestError> {
        self.inner.execute(ctx)
    }

    fn revert(&self, ctx: &mut Ctx) -> Result<(), TestError> {
        push(&self.trace, format!("revert:{}", self.inner.name()));
        self.inner.revert(ctx)
    }
}

pub struct TracedListener {
    trace: Trace,
    fail_started_on: Option<String>,
    fail_finished_on: Option<String>,
}

impl TracedListener {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: Arc::clone(trace),
            fail_started_on: None,
            fail_finished_on: None,
        }
    }

    pub fn failing_started_on(mut self, command: &str) -> Self {
        self.fail_started_on = Some(command.to_string());
        self
    }

    pub fn failing_finished_on(mut self, command: &str) -> Self {
        self.fail_finished_on = Some(command.to_string());
        self
    }
}

impl CommandListener<Ctx, TestError> for TracedListener {
    fn command_started(
        &self,
        command: &dyn Command<Context = Ctx, Error = TestError>,
        _ctx: &Ctx,
    ) -> Result<(), ListenerError> {
        push(&self.trace, format!("started:{}", command.name()));
        if self.fail_started_on.as_deref() == Some(command.name()) {
            return Err(ListenerError::new("listener error"));
        }
        Ok(())
    }

    fn command_finished(
        &self,
        command: &dyn Command<Context = Ctx, Error = TestError>,
        _ctx: &Ctx,
        error: Option<&TestError>,
    ) -> Result<(), ListenerError> {
        let outcome = match error {
            Some(error) => format!("err({error})"),
            None => "ok".to_string(),
        };
        push(&self.trace, format!("finished:{}:{outcome}", command.name()));
        if self.fail_finished_on.as_deref() == Some(command.name()) {
            return Err(ListenerError::new("listener error"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub phase: Phase,
    pub command: String,
    pub context: String,
    pub error: String,
}

pub struct TracedLogger {
    trace: Trace,
    entries: Mutex<Vec<LogEntry>>,
}

impl TracedLogger {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: Arc::clone(trace),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().expect("logger lock").clone()
    }
}

impl ErrorLogger<Ctx, TestError> for TracedLogger {
    fn log_error(
        &self,
        phase: Phase,
        command: &dyn Command<Context = Ctx, Error = TestError>,
        ctx: &Ctx,
        error: &dyn Error,
    ) {
        push(
            &self.trace,
            format!("log:{phase}:{}:{error}", command.name()),
        );
        self.entries.lock().expect("logger lock").push(LogEntry {
            phase,
            command: command.name().to_string(),
            context: format!("{ctx:?}"),
            error: error.to_string(),
        });
    }
}

#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().expect("capture lock").clone()).expect("utf-8 output")
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("capture lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a debug-level subscriber and return what it wrote.
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, captured.text())
}
