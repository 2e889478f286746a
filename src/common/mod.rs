#![forbid(unsafe_code)]
use std::{collections::HashMap, ffi::OsString};

pub use command::{CommandLine, Runner, SystemRunner};
pub use config::Config;
pub use context::InvocationContext;
pub use error::Error;

pub mod command;
pub mod config;
pub mod context;
pub mod error;
#[cfg(test)]
pub(crate) mod testing;

pub type Environment = HashMap<OsString, OsString>;

/// Overrides the bus client used to reach Konversation.
pub const DBUS_BIN_VAR: &str = "KONVERSATION_DBUS_BIN";
/// Language code of Konversation's user interface, exported by the host.
pub const LANGUAGE_VAR: &str = "KONVERSATION_LANG";
/// Overrides the helper used to locate translation directories.
pub const QTPATHS_BIN_VAR: &str = "KONVERSATION_QTPATHS_BIN";

pub const DBUS_BIN_DEFAULT: &str = env!("KONVERSATION_DBUS_BIN_DEFAULT");
pub const QTPATHS_BIN_DEFAULT: &str = env!("KONVERSATION_QTPATHS_BIN_DEFAULT");
