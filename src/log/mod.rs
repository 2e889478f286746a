#![allow(unused_macros)]
use self::simple_logger::SimpleLogger;
use std::fmt;

mod simple_logger;

macro_rules! logger_macro {
    ($name:ident is $rule_level:ident to $target:expr, $d:tt) => {
        macro_rules! $name {
            ($d($d arg:tt)+) => (::log::log!(target: $target, ::log::Level::$rule_level, $d($d arg)+));
        }

        #[allow(unused_imports)]
        pub(crate) use $name;
    };
    ($name:ident is $rule_level:ident to $target:expr) => {
        logger_macro!($name is $rule_level to $target, $);
    };
}

logger_macro!(user_error is Error to "konversation::user");
// logger_macro!(user_warn is Warn to "konversation::user");
// logger_macro!(user_info is Info to "konversation::user");

macro_rules! dev_logger_macro {
    ($name:ident is $rule_level:ident to $target:expr, $d:tt) => {
        macro_rules! $name {
            ($d($d arg:tt)+) => {
                if std::cfg!(feature = "dev") {
                    (::log::log!(
                        target: $target,
                        ::log::Level::$rule_level,
                        "{}: {}",
                        std::panic::Location::caller(),
                        format_args!($d($d arg)+)
                    ));
                }
            };
        }

        #[allow(unused_imports)]
        pub(crate) use $name;
    };
    ($name:ident is $rule_level:ident to $target:expr) => {
        dev_logger_macro!($name is $rule_level to $target, $);
    };
}

dev_logger_macro!(dev_warn is Warn to "konversation::dev");
// dev_logger_macro!(dev_info is Info to "konversation::dev");
dev_logger_macro!(dev_debug is Debug to "konversation::dev");

/// Routes `log` records to a sink by target prefix.
///
/// `konversation::user` goes to stderr, since a script's stdout usually ends
/// up in the host's view. `konversation::dev` is only wired up with the `dev`
/// feature and goes to a file.
#[derive(Default)]
pub struct ScriptLogger(Vec<(String, Box<dyn Log>)>);

impl ScriptLogger {
    pub fn new(prefix: &'static str) -> Self {
        let mut logger: Self = Default::default();

        logger.add_logger("konversation::user", SimpleLogger::to_stderr(prefix));

        #[cfg(feature = "dev")]
        {
            let path = option_env!("KONVERSATION_SCRIPT_DEV_LOGS")
                .map(|s| s.into())
                .unwrap_or_else(|| {
                    std::env::temp_dir().join(format!(
                        "konversation-script-dev-{}.log",
                        std::process::id()
                    ))
                });
            if let Ok(file_logger) = SimpleLogger::to_file(path, "") {
                logger.add_logger("konversation::dev", file_logger);
            }
        }

        logger
    }

    /// Install as the `log` backend. A script that already installed its own
    /// logger keeps it.
    pub fn into_global_logger(self) {
        if log::set_boxed_logger(Box::new(self)).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    }

    // `konversation::user` matches itself and `konversation::user::*`, never
    // `konversation::username`
    fn add_logger(&mut self, target: &str, logger: impl Log + 'static) {
        let prefix = format!("{}::", target.trim_end_matches("::"));
        self.0.push((prefix, Box::new(logger)))
    }
}

impl log::Log for ScriptLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.level() <= log::STATIC_MAX_LEVEL
    }

    fn log(&self, record: &log::Record) {
        let loggers = self.0.iter().filter(|(prefix, _)| routes(prefix, record.target()));
        for (_, logger) in loggers {
            logger.log(record.level().into(), record.args());
        }
    }

    fn flush(&self) {
        for (_, logger) in self.0.iter() {
            logger.flush();
        }
    }
}

fn routes(prefix: &str, target: &str) -> bool {
    target.starts_with(prefix) || Some(target) == prefix.strip_suffix("::")
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
enum Level {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}

trait Log: Send + Sync {
    fn log(&self, level: Level, args: &fmt::Arguments<'_>);
    fn flush(&self);
}
