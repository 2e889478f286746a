use std::ffi::OsString;

use super::{
    Environment, Error, DBUS_BIN_DEFAULT, DBUS_BIN_VAR, LANGUAGE_VAR, QTPATHS_BIN_DEFAULT,
    QTPATHS_BIN_VAR,
};

/// Everything a script takes from its environment, read once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub dbus_bin: OsString,
    pub qtpaths_bin: OsString,
    pub language: Option<String>,
}

impl Config {
    pub fn from_env(env: &Environment) -> Self {
        let lookup = |name: &str, default: &str| -> OsString {
            env.get(&OsString::from(name))
                .filter(|value| !value.is_empty())
                .cloned()
                .unwrap_or_else(|| default.into())
        };

        // a language code that is not valid UTF-8 cannot name a catalog
        let language = env
            .get(&OsString::from(LANGUAGE_VAR))
            .and_then(|value| value.to_str())
            .map(str::to_string);

        Config {
            dbus_bin: lookup(DBUS_BIN_VAR, DBUS_BIN_DEFAULT),
            qtpaths_bin: lookup(QTPATHS_BIN_VAR, QTPATHS_BIN_DEFAULT),
            language,
        }
    }

    pub fn from_process_env() -> Self {
        Self::from_env(&std::env::vars_os().collect())
    }

    /// The language Konversation's user interface is running in, e.g. `en_US`.
    /// Never falls back to a default language.
    pub fn language(&self) -> Result<&str, Error> {
        self.language.as_deref().ok_or_else(Error::missing_language)
    }
}
