#![forbid(unsafe_code)]
//! Helpers for Konversation scripts: notices and messages through the host's
//! D-Bus interface, and gettext-backed translations.

#[macro_use]
mod macros;
pub mod common;
pub mod i18n;
pub(crate) mod log;
pub mod messenger;

mod cli;

pub use common::{Config, Error, InvocationContext};
pub use i18n::{Localizer, DEFAULT_DOMAIN};
pub use messenger::Messenger;

pub use cli::main as script_main;
