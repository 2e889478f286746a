use std::{
    cell::RefCell,
    io,
    os::unix::process::ExitStatusExt,
    process::{ExitStatus, Output},
};

use super::{CommandLine, Runner};

/// What a [`RecordingRunner`] pretends the child did.
#[derive(Clone, Debug)]
pub enum Outcome {
    Exit(i32, Vec<u8>),
    NotFound,
}

/// Remembers every command instead of running it.
pub struct RecordingRunner {
    outcome: Outcome,
    calls: RefCell<Vec<CommandLine>>,
}

impl RecordingRunner {
    pub fn succeeding() -> Self {
        Self::with_outcome(Outcome::Exit(0, Vec::new()))
    }

    pub fn printing(stdout: &str) -> Self {
        Self::with_outcome(Outcome::Exit(0, stdout.as_bytes().to_vec()))
    }

    pub fn with_outcome(outcome: Outcome) -> Self {
        RecordingRunner {
            outcome,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls.borrow().clone()
    }

    /// Every recorded call rendered as plain strings, program first.
    pub fn argv(&self) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .map(|call| {
                std::iter::once(&call.program)
                    .chain(call.arguments.iter())
                    .map(|s| s.to_string_lossy().into_owned())
                    .collect()
            })
            .collect()
    }

    fn run(&self, command: &CommandLine) -> io::Result<(ExitStatus, Vec<u8>)> {
        self.calls.borrow_mut().push(command.clone());
        match &self.outcome {
            Outcome::Exit(code, stdout) => Ok((ExitStatus::from_raw(code << 8), stdout.clone())),
            Outcome::NotFound => Err(io::ErrorKind::NotFound.into()),
        }
    }
}

impl Runner for RecordingRunner {
    fn status(&self, command: &CommandLine) -> io::Result<ExitStatus> {
        self.run(command).map(|(status, _)| status)
    }

    fn output(&self, command: &CommandLine) -> io::Result<Output> {
        self.run(command).map(|(status, stdout)| Output {
            status,
            stdout,
            stderr: Vec::new(),
        })
    }
}
