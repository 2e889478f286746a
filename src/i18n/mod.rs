//! Translated strings for scripts, from gettext `.mo` catalogs.
//!
//! ```ignore
//! let messenger = Messenger::from_env();
//! let localizer = Localizer::init(DEFAULT_DOMAIN, &Config::from_process_env(), &messenger)?;
//! messenger.info(&i18np!(localizer, "One track", "%1 tracks", n, n), None);
//! ```
//!
//! Message contexts are encoded into the message id as `context\x04message`,
//! the way gettext stores them. The `\x04` separator never occurs in a real
//! translation, so finding it in a lookup result means the catalog had no
//! entry for that context.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

pub use gettext::Catalog;

pub use self::args::insert_args;
pub use self::locale::{
    available_languages, catalog_path, current_language, language_candidates, locale_directories,
};

use crate::common::{Config, Error, Runner};
use crate::messenger::Messenger;

mod args;
mod catalog;
mod locale;

pub const DEFAULT_DOMAIN: &str = "konversation";

const CONTEXT_SEPARATOR: char = '\x04';

pub struct Localizer {
    catalog: Catalog,
    source: Option<(PathBuf, String)>,
}

impl Localizer {
    /// Find the catalog for `domain` in the current language and build a
    /// localizer around it. Without a catalog every lookup returns its input.
    ///
    /// Fails only when catalogs would have to be searched but the current
    /// language is unknown.
    pub fn init<R: Runner>(
        domain: &str,
        config: &Config,
        messenger: &Messenger<R>,
    ) -> Result<Self, Error> {
        let dirs = locale_directories(config, messenger);
        Self::load(&dirs, domain, config)
    }

    /// Like [`Localizer::init`], with the directories already known.
    pub fn load(dirs: &[PathBuf], domain: &str, config: &Config) -> Result<Self, Error> {
        if dirs.is_empty() {
            return Ok(Self::noop());
        }

        let language = current_language(config)?;
        Ok(match catalog::find_catalog(dirs, domain, language) {
            Some(loaded) => Localizer {
                catalog: loaded.catalog,
                source: Some((loaded.path, loaded.language)),
            },
            None => Self::noop(),
        })
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Localizer {
            catalog,
            source: None,
        }
    }

    pub fn noop() -> Self {
        Self::from_catalog(Catalog::empty())
    }

    /// File the catalog was read from, if it came from disk.
    pub fn catalog_path(&self) -> Option<&Path> {
        self.source.as_ref().map(|(path, _)| path.as_path())
    }

    /// Language directory the catalog was found under, e.g. `de` for a
    /// `de_DE` user interface.
    pub fn language(&self) -> Option<&str> {
        self.source.as_ref().map(|(_, language)| language.as_str())
    }

    pub fn i18n(&self, message: &str, args: &[&dyn Display]) -> String {
        insert_args(self.catalog.gettext(message), args)
    }

    pub fn i18np(&self, singular: &str, plural: &str, count: u64, args: &[&dyn Display]) -> String {
        let count = count.try_into().unwrap_or_default();
        insert_args(self.catalog.ngettext(singular, plural, count), args)
    }

    pub fn i18nc(&self, context: &str, message: &str, args: &[&dyn Display]) -> String {
        let key = with_context(context, message);
        let translated = self.catalog.gettext(&key);

        if translated.contains(CONTEXT_SEPARATOR) {
            insert_args(message, args)
        } else {
            insert_args(translated, args)
        }
    }

    pub fn i18ncp(
        &self,
        context: &str,
        singular: &str,
        plural: &str,
        count: u64,
        args: &[&dyn Display],
    ) -> String {
        let singular_key = with_context(context, singular);
        let plural_key = with_context(context, plural);
        let translated = self.catalog.ngettext(
            &singular_key,
            &plural_key,
            count.try_into().unwrap_or_default(),
        );

        if translated.contains(CONTEXT_SEPARATOR) {
            // untranslated: singular for exactly one, plural otherwise
            insert_args(if count == 1 { singular } else { plural }, args)
        } else {
            insert_args(translated, args)
        }
    }
}

fn with_context(context: &str, message: &str) -> String {
    format!("{context}{CONTEXT_SEPARATOR}{message}")
}

/// `i18n!(localizer, message, args...)`
#[macro_export]
macro_rules! i18n {
    ($localizer:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $localizer.i18n($message, &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// `i18np!(localizer, singular, plural, count, args...)`
#[macro_export]
macro_rules! i18np {
    ($localizer:expr, $singular:expr, $plural:expr, $count:expr $(, $arg:expr)* $(,)?) => {
        $localizer.i18np(
            $singular,
            $plural,
            $count,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// `i18nc!(localizer, context, message, args...)`
#[macro_export]
macro_rules! i18nc {
    ($localizer:expr, $context:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $localizer.i18nc(
            $context,
            $message,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// `i18ncp!(localizer, context, singular, plural, count, args...)`
#[macro_export]
macro_rules! i18ncp {
    ($localizer:expr, $context:expr, $singular:expr, $plural:expr, $count:expr $(, $arg:expr)* $(,)?) => {
        $localizer.i18ncp(
            $context,
            $singular,
            $plural,
            $count,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}
