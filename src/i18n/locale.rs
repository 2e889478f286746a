use std::{
    collections::BTreeSet,
    ffi::OsStr,
    os::unix::ffi::OsStrExt,
    path::{Path, PathBuf},
};

use crate::common::{CommandLine, Config, Error, Runner};
use crate::log::{dev_debug, dev_warn};
use crate::messenger::Messenger;

const DISCOVERY_FAILED_MSG: &str = "A problem occurred while looking for directories \
    containing translation files. The output of this script will not be translated.";

/// The language code Konversation's user interface currently uses, e.g.
/// `en_US`.
pub fn current_language(config: &Config) -> Result<&str, Error> {
    config.language()
}

/// Directories searched for `.mo` files, using the desktop's normal lookup
/// logic for locale data. When the lookup fails the user is told once through
/// `messenger`, and the list is empty.
pub fn locale_directories<R: Runner>(config: &Config, messenger: &Messenger<R>) -> Vec<PathBuf> {
    match discover(config, messenger.runner()) {
        Ok(dirs) => dirs,
        Err(error) => {
            dev_warn!("locale directory lookup failed: {error}");
            messenger.error(DISCOVERY_FAILED_MSG, None, false);
            Vec::new()
        }
    }
}

fn discover(config: &Config, runner: &impl Runner) -> Result<Vec<PathBuf>, Error> {
    let command = CommandLine::new(config.qtpaths_bin.clone()).args([
        "--locate-dirs",
        "GenericDataLocation",
        "locale",
    ]);
    dev_debug!("running {command}");

    let output = runner.output(&command).map_err(|source| Error::Spawn {
        program: command.program().to_owned(),
        source,
    })?;

    if !output.status.success() {
        return Err(Error::HelperFailed {
            program: command.program().to_owned(),
            status: output.status,
        });
    }

    Ok(split_directories(&output.stdout))
}

/// The helper prints one line of `:`-separated paths.
fn split_directories(stdout: &[u8]) -> Vec<PathBuf> {
    let end = stdout
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |last| last + 1);
    stdout[..end]
        .split(|&b| b == b':')
        .filter(|dir| !dir.is_empty())
        .map(|dir| PathBuf::from(OsStr::from_bytes(dir)))
        .collect()
}

/// Territory a bare language code stands for, as the C library's locale
/// aliases have it. Sorted by language.
const DEFAULT_TERRITORIES: &[(&str, &str)] = &[
    ("af", "_ZA"),
    ("am", "_ET"),
    ("ar", "_AA"),
    ("be", "_BY"),
    ("bg", "_BG"),
    ("br", "_FR"),
    ("bs", "_BA"),
    ("ca", "_ES"),
    ("cs", "_CZ"),
    ("cy", "_GB"),
    ("da", "_DK"),
    ("de", "_DE"),
    ("el", "_GR"),
    ("en", "_US"),
    ("es", "_ES"),
    ("et", "_EE"),
    ("eu", "_ES"),
    ("fa", "_IR"),
    ("fi", "_FI"),
    ("fo", "_FO"),
    ("fr", "_FR"),
    ("ga", "_IE"),
    ("gd", "_GB"),
    ("gl", "_ES"),
    ("gv", "_GB"),
    ("he", "_IL"),
    ("hi", "_IN"),
    ("hr", "_HR"),
    ("hu", "_HU"),
    ("hy", "_AM"),
    ("id", "_ID"),
    ("is", "_IS"),
    ("it", "_IT"),
    ("ja", "_JP"),
    ("ka", "_GE"),
    ("kk", "_KZ"),
    ("kl", "_GL"),
    ("km", "_KH"),
    ("kn", "_IN"),
    ("ko", "_KR"),
    ("kw", "_GB"),
    ("ky", "_KG"),
    ("lo", "_LA"),
    ("lt", "_LT"),
    ("lv", "_LV"),
    ("mi", "_NZ"),
    ("mk", "_MK"),
    ("ml", "_IN"),
    ("mr", "_IN"),
    ("ms", "_MY"),
    ("mt", "_MT"),
    ("nb", "_NO"),
    ("nl", "_NL"),
    ("nn", "_NO"),
    ("no", "_NO"),
    ("oc", "_FR"),
    ("pa", "_IN"),
    ("pl", "_PL"),
    ("pt", "_PT"),
    ("ro", "_RO"),
    ("ru", "_RU"),
    ("rw", "_RW"),
    ("se", "_NO"),
    ("si", "_LK"),
    ("sk", "_SK"),
    ("sl", "_SI"),
    ("sq", "_AL"),
    ("sr", "_RS"),
    ("sv", "_SE"),
    ("ta", "_IN"),
    ("te", "_IN"),
    ("tg", "_TJ"),
    ("th", "_TH"),
    ("tr", "_TR"),
    ("tt", "_RU"),
    ("uk", "_UA"),
    ("ur", "_PK"),
    ("uz", "_UZ"),
    ("vi", "_VN"),
    ("wa", "_BE"),
    ("xh", "_ZA"),
    ("yi", "_US"),
    ("zh", "_CN"),
    ("zu", "_ZA"),
];

/// Names a catalog may be filed under for `language`, most specific first:
/// `de_DE.UTF-8@euro` expands to `de_DE.UTF-8@euro`, `de_DE@euro`,
/// `de.UTF-8@euro`, `de@euro`, `de_DE.UTF-8`, `de_DE`, `de.UTF-8`, `de`.
///
/// A bare language code gets its usual territory first, so `de` expands to
/// `de_DE`, `de`. The `C` locale never has a catalog.
pub fn language_candidates(language: &str) -> Vec<String> {
    const CODESET: u8 = 1 << 0;
    const TERRITORY: u8 = 1 << 1;
    const MODIFIER: u8 = 1 << 2;

    let mut mask = 0;
    let (rest, modifier) = split_component(language, '@', MODIFIER, &mut mask);
    let (rest, codeset) = split_component(rest, '.', CODESET, &mut mask);
    let (base, mut territory) = split_component(rest, '_', TERRITORY, &mut mask);

    if base.is_empty() || base == "C" {
        return Vec::new();
    }

    if mask & TERRITORY == 0 {
        if let Some(default) = default_territory(base) {
            territory = default;
            mask |= TERRITORY;
        }
    }

    let mut candidates = Vec::new();
    for combination in (0..=mask).rev().filter(|i| i & !mask == 0) {
        let mut name = base.to_string();
        if combination & TERRITORY != 0 {
            name.push_str(territory);
        }
        if combination & CODESET != 0 {
            name.push_str(codeset);
        }
        if combination & MODIFIER != 0 {
            name.push_str(modifier);
        }
        if !candidates.contains(&name) {
            candidates.push(name);
        }
    }

    candidates
}

fn default_territory(language: &str) -> Option<&'static str> {
    DEFAULT_TERRITORIES
        .binary_search_by_key(&language, |&(code, _)| code)
        .ok()
        .map(|index| DEFAULT_TERRITORIES[index].1)
}

// splits at the first `separator`; the separator stays on the component
fn split_component<'a>(
    text: &'a str,
    separator: char,
    bit: u8,
    mask: &mut u8,
) -> (&'a str, &'a str) {
    match text.find(separator) {
        Some(pos) => {
            *mask |= bit;
            text.split_at(pos)
        }
        None => (text, ""),
    }
}

/// Where the catalog for `domain` in `language` lives below `dir`.
pub fn catalog_path(dir: &Path, language: &str, domain: &str) -> PathBuf {
    dir.join(language)
        .join("LC_MESSAGES")
        .join(format!("{domain}.mo"))
}

/// Every language with a `domain` catalog in any of `dirs`.
pub fn available_languages(dirs: &[PathBuf], domain: &str) -> Vec<String> {
    let mut languages = BTreeSet::new();

    for dir in dirs {
        let Some(dir) = dir.to_str() else {
            continue;
        };
        let pattern = format!(
            "{}/*/LC_MESSAGES/{}.mo",
            glob::Pattern::escape(dir),
            glob::Pattern::escape(domain)
        );
        let Ok(paths) = glob::glob(&pattern) else {
            continue;
        };

        for path in paths.flatten() {
            let language = path
                .parent()
                .and_then(Path::parent)
                .and_then(Path::file_name)
                .and_then(OsStr::to_str);
            if let Some(language) = language {
                languages.insert(language.to_string());
            }
        }
    }

    languages.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::{
        catalog_path, language_candidates, locale_directories, split_directories,
        DEFAULT_TERRITORIES,
    };
    use crate::common::testing::{Outcome, RecordingRunner};
    use crate::common::{Config, Environment, InvocationContext};
    use crate::messenger::Messenger;

    fn config() -> Config {
        let mut env = Environment::new();
        env.insert("KONVERSATION_DBUS_BIN".into(), "qdbus".into());
        env.insert("KONVERSATION_QTPATHS_BIN".into(), "qtpaths6".into());
        Config::from_env(&env)
    }

    fn messenger(runner: RecordingRunner) -> Messenger<RecordingRunner> {
        Messenger::with_runner(&config(), InvocationContext::standalone(), runner)
    }

    #[test]
    fn splits_helper_output() {
        assert_eq!(
            split_directories(b"/home/me/.local/share/locale:/usr/share/locale\n"),
            vec![
                PathBuf::from("/home/me/.local/share/locale"),
                PathBuf::from("/usr/share/locale")
            ]
        );
        assert_eq!(split_directories(b"\n"), Vec::<PathBuf>::new());
        assert_eq!(
            split_directories(b"/a::/b"),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn asks_the_helper_for_generic_locale_dirs() {
        let messenger = messenger(RecordingRunner::printing("/usr/share/locale\n"));
        let dirs = locale_directories(&config(), &messenger);

        assert_eq!(dirs, vec![PathBuf::from("/usr/share/locale")]);
        assert_eq!(
            messenger.runner().argv(),
            vec![vec![
                "qtpaths6".to_string(),
                "--locate-dirs".to_string(),
                "GenericDataLocation".to_string(),
                "locale".to_string()
            ]]
        );
    }

    #[test]
    fn failed_lookup_is_reported_once() {
        for outcome in [Outcome::NotFound, Outcome::Exit(1, b"/ignored".to_vec())] {
            let messenger = messenger(RecordingRunner::with_outcome(outcome));
            let dirs = locale_directories(&config(), &messenger);

            assert!(dirs.is_empty());
            let calls = messenger.runner().argv();
            // the helper, then exactly one error notice
            assert_eq!(calls.len(), 2);
            assert_eq!(
                &calls[1][..4],
                &["qdbus", "org.kde.konversation", "/irc", "error"]
            );
            assert!(calls[1][4].starts_with("A problem occurred"));
        }
    }

    #[test]
    fn expands_language_codes() {
        assert_eq!(language_candidates("pt_BR"), vec!["pt_BR", "pt"]);
        assert_eq!(
            language_candidates("de_DE.UTF-8"),
            vec!["de_DE.UTF-8", "de_DE", "de.UTF-8", "de"]
        );
        assert_eq!(
            language_candidates("sr_RS@latin"),
            vec!["sr_RS@latin", "sr@latin", "sr_RS", "sr"]
        );
        assert_eq!(
            language_candidates("de_DE.UTF-8@euro"),
            vec![
                "de_DE.UTF-8@euro",
                "de_DE@euro",
                "de.UTF-8@euro",
                "de@euro",
                "de_DE.UTF-8",
                "de_DE",
                "de.UTF-8",
                "de"
            ]
        );
    }

    #[test]
    fn bare_languages_get_their_usual_territory() {
        assert_eq!(language_candidates("de"), vec!["de_DE", "de"]);
        assert_eq!(language_candidates("pt"), vec!["pt_PT", "pt"]);
        assert_eq!(
            language_candidates("sr@latin"),
            vec!["sr_RS@latin", "sr@latin", "sr_RS", "sr"]
        );
        // unknown codes are left alone
        assert_eq!(language_candidates("tlh"), vec!["tlh"]);
    }

    #[test]
    fn territory_table_is_sorted() {
        assert!(DEFAULT_TERRITORIES.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn c_locale_has_no_candidates() {
        assert!(language_candidates("C").is_empty());
        assert!(language_candidates("C.UTF-8").is_empty());
        assert!(language_candidates("").is_empty());
    }

    #[test]
    fn catalog_layout() {
        assert_eq!(
            catalog_path(&PathBuf::from("/usr/share/locale"), "de", "konversation"),
            PathBuf::from("/usr/share/locale/de/LC_MESSAGES/konversation.mo")
        );
    }
}
