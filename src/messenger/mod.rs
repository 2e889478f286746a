//! Talking back to Konversation.
//!
//! Every message is one run of the bus client, e.g.
//! `qdbus org.kde.konversation /irc info "np: Song"`. The plain methods are
//! fire-and-forget: a script keeps going when the host cannot be reached. Use
//! the `try_` variants to find out whether the call went through.

use std::{ffi::OsString, process};

use crate::common::{CommandLine, Config, Error, InvocationContext, Runner, SystemRunner};
use crate::log::dev_warn;

pub const SERVICE: &str = "org.kde.konversation";
pub const OBJECT_PATH: &str = "/irc";

const STANDALONE_MSG: &str =
    "This script is meant to be run from within Konversation, not on its own.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Info,
    Error,
    Say,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Info => "info",
            Operation::Error => "error",
            Operation::Say => "say",
        }
    }
}

pub struct Messenger<R: Runner = SystemRunner> {
    command: CommandLine,
    context: InvocationContext,
    prefix: String,
    runner: R,
}

impl Messenger<SystemRunner> {
    pub fn new(config: &Config, context: InvocationContext) -> Self {
        Self::with_runner(config, context, SystemRunner)
    }

    /// Messenger for the running script: configuration from the process
    /// environment, context from the process arguments.
    pub fn from_env() -> Self {
        Self::new(
            &Config::from_process_env(),
            InvocationContext::from_process_args(),
        )
    }
}

impl<R: Runner> Messenger<R> {
    pub fn with_runner(config: &Config, context: InvocationContext, runner: R) -> Self {
        Messenger {
            command: CommandLine::new(config.dbus_bin.clone()).args([SERVICE, OBJECT_PATH]),
            context,
            prefix: String::new(),
            runner,
        }
    }

    /// Prefix used by every call that does not bring its own.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn context(&self) -> &InvocationContext {
        &self.context
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Show an informational notice in the active view.
    pub fn info(&self, message: &str, prefix: Option<&str>) {
        discard(Operation::Info, self.try_info(message, prefix));
    }

    /// Show an error notice in the active view, then exit with status 1 if
    /// `exit_on_error` is set.
    pub fn error(&self, message: &str, prefix: Option<&str>, exit_on_error: bool) {
        discard(Operation::Error, self.try_error(message, prefix));

        if exit_on_error {
            process::exit(1);
        }
    }

    /// Send `message` to the connection and target the script was started
    /// for.
    pub fn say(&self, message: &str, prefix: Option<&str>) {
        discard(Operation::Say, self.try_say(message, prefix));
    }

    pub fn try_info(&self, message: &str, prefix: Option<&str>) -> Result<(), Error> {
        self.dispatch(Operation::Info, [self.compose(message, prefix)])
    }

    pub fn try_error(&self, message: &str, prefix: Option<&str>) -> Result<(), Error> {
        self.dispatch(Operation::Error, [self.compose(message, prefix)])
    }

    pub fn try_say(&self, message: &str, prefix: Option<&str>) -> Result<(), Error> {
        let (Some(connection), Some(target)) = (&self.context.connection, &self.context.target)
        else {
            return Err(Error::Standalone);
        };

        self.dispatch(
            Operation::Say,
            [
                connection.clone(),
                target.clone(),
                OsString::from(self.compose(message, prefix)),
            ],
        )
    }

    /// Leave with a message on stderr and a zero exit status when there is
    /// nobody to talk to.
    pub fn abort_if_standalone(&self) {
        if self.context.is_standalone() {
            eprintln_ignore_io_error!("{STANDALONE_MSG}");
            process::exit(0);
        }
    }

    /// Run the bus client once for `operation` and wait for it.
    pub fn dispatch<I, S>(&self, operation: Operation, arguments: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let command = self
            .command
            .clone()
            .arg(operation.name())
            .args(arguments);

        let status = self.runner.status(&command).map_err(|source| Error::Spawn {
            program: command.program().to_owned(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Dispatch {
                operation: operation.name(),
                status,
            })
        }
    }

    fn compose(&self, message: &str, prefix: Option<&str>) -> String {
        let prefix = prefix.unwrap_or(&self.prefix);
        format!("{prefix}{message}")
    }
}

// dispatch failures never reach callers of the plain variants
fn discard(operation: Operation, result: Result<(), Error>) {
    if let Err(error) = result {
        dev_warn!("{} notice dropped: {error}", operation.name());
    }
}
