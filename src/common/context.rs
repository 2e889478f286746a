use std::ffi::OsString;

/// Where the script was invoked from. Konversation starts scripts as
/// `<script> <connection> <target> [<argument>...]`; both are absent when the
/// script is run by hand.
///
/// Both are kept as raw arguments, since a target may be in whatever encoding
/// its channel uses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvocationContext {
    pub connection: Option<OsString>,
    pub target: Option<OsString>,
}

impl InvocationContext {
    pub fn new(connection: impl Into<OsString>, target: impl Into<OsString>) -> Self {
        InvocationContext {
            connection: Some(connection.into()),
            target: Some(target.into()),
        }
    }

    pub fn standalone() -> Self {
        Default::default()
    }

    /// Build from a full argument vector, program name included.
    pub fn from_args(arguments: impl IntoIterator<Item = OsString>) -> Self {
        let mut arguments = arguments.into_iter().skip(1);
        InvocationContext {
            connection: arguments.next(),
            target: arguments.next(),
        }
    }

    pub fn from_process_args() -> Self {
        Self::from_args(std::env::args_os())
    }

    pub fn is_standalone(&self) -> bool {
        self.connection.is_none() || self.target.is_none()
    }
}
