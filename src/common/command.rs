use std::{
    ffi::{OsStr, OsString},
    fmt::Display,
    io,
    process::{Command, ExitStatus, Output, Stdio},
};

/// A program and its arguments, kept around so that a fixed prefix (like the
/// bus client plus service and object path) can be extended per call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandLine {
    pub(crate) program: OsString,
    pub(crate) arguments: Vec<OsString>,
}

impl Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let program = self.program.to_string_lossy();
        let args = self
            .arguments
            .iter()
            .map(|a| a.to_string_lossy().escape_default().collect::<String>())
            .collect::<Vec<_>>()
            .join(" ");
        if args.is_empty() {
            write!(f, "{program}")
        } else {
            write!(f, "{program} {args}")
        }
    }
}

impl CommandLine {
    pub fn new(program: impl Into<OsString>) -> Self {
        CommandLine {
            program: program.into(),
            arguments: Vec::new(),
        }
    }

    pub fn arg(mut self, argument: impl Into<OsString>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn args<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.arguments
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.arguments);
        command
    }
}

/// Runs external programs to completion. Every call blocks until the child
/// has exited; there is no timeout.
pub trait Runner {
    fn status(&self, command: &CommandLine) -> io::Result<ExitStatus>;

    /// Capture stdout; stderr stays attached to ours.
    fn output(&self, command: &CommandLine) -> io::Result<Output>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn status(&self, command: &CommandLine) -> io::Result<ExitStatus> {
        command.to_command().stdin(Stdio::null()).status()
    }

    fn output(&self, command: &CommandLine) -> io::Result<Output> {
        command
            .to_command()
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
    }
}

impl<R: Runner + ?Sized> Runner for &R {
    fn status(&self, command: &CommandLine) -> io::Result<ExitStatus> {
        (**self).status(command)
    }

    fn output(&self, command: &CommandLine) -> io::Result<Output> {
        (**self).output(command)
    }
}
