use std::{ffi::OsString, fmt, path::PathBuf, process::ExitStatus};

use super::LANGUAGE_VAR;

#[derive(Debug)]
pub enum Error {
    /// `say` needs a connection and a target, which only exist when the host
    /// started the script.
    Standalone,
    MissingLanguage(&'static str),
    Spawn {
        program: OsString,
        source: std::io::Error,
    },
    Dispatch {
        operation: &'static str,
        status: ExitStatus,
    },
    HelperFailed {
        program: OsString,
        status: ExitStatus,
    },
    CatalogNotFound {
        domain: String,
        dir: PathBuf,
    },
    Catalog {
        path: PathBuf,
        message: String,
    },
    Io(PathBuf, std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Standalone => {
                f.write_str("not started by Konversation: no connection or target available")
            }
            Error::MissingLanguage(var) => {
                write!(f, "the current language is unknown: {var} is not set")
            }
            Error::Spawn { program, source } => {
                write!(f, "cannot execute '{}': {source}", program.to_string_lossy())
            }
            Error::Dispatch { operation, status } => {
                write!(f, "dispatching '{operation}' to Konversation failed ({status})")
            }
            Error::HelperFailed { program, status } => {
                write!(f, "'{}' failed ({status})", program.to_string_lossy())
            }
            Error::CatalogNotFound { domain, dir } => {
                write!(f, "no '{domain}' catalog in '{}'", dir.display())
            }
            Error::Catalog { path, message } => {
                write!(f, "invalid catalog '{}': {message}", path.display())
            }
            Error::Io(path, e) => write!(f, "cannot read '{}': {e}", path.display()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Spawn { source, .. } => Some(source),
            Error::Io(_, e) => Some(e),
            _ => None,
        }
    }
}

impl Error {
    pub fn missing_language() -> Self {
        Self::MissingLanguage(LANGUAGE_VAR)
    }

    /// Returns `true` if the error is [`Standalone`].
    ///
    /// [`Standalone`]: Error::Standalone
    #[must_use]
    pub fn is_standalone(&self) -> bool {
        matches!(self, Self::Standalone)
    }
}
