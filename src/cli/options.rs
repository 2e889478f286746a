use std::{
    ffi::{OsStr, OsString},
    mem,
    os::unix::ffi::OsStrExt,
};

use crate::i18n::DEFAULT_DOMAIN;

#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum ScriptAction {
    Help,
    Version,
    Message(MessageOptions),
    Translate(TranslateOptions),
}

impl ScriptAction {
    pub fn from_env() -> Result<Self, String> {
        ScriptOptions::parse_arguments(std::env::args_os())?.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
    Say,
}

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct MessageOptions {
    pub kind: MessageKind,
    // -c
    pub connection: Option<OsString>,
    // -t
    pub target: Option<OsString>,
    // -p
    pub prefix: Option<String>,
    // -x
    pub exit: bool,

    pub message: String,
}

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct TranslateOptions {
    // -d
    pub domain: String,
    // -C
    pub context: Option<String>,
    // -P and -n
    pub plural: Option<(String, u64)>,

    pub message: String,
    pub arguments: Vec<String>,
}

impl TryFrom<ScriptOptions> for MessageOptions {
    type Error = String;

    fn try_from(mut opts: ScriptOptions) -> Result<Self, Self::Error> {
        let kind = match mem::take(&mut opts.command).as_deref() {
            Some("info") => MessageKind::Info,
            Some("error") => MessageKind::Error,
            Some("say") => MessageKind::Say,
            _ => return Err("unknown message command".into()),
        };
        let connection = mem::take(&mut opts.connection);
        let target = mem::take(&mut opts.target);
        let prefix = mem::take(&mut opts.prefix);
        let exit = mem::take(&mut opts.exit);
        let positional_args = mem::take(&mut opts.positional_args);

        if exit && kind != MessageKind::Error {
            return Err("--exit can only be used with 'error'".into());
        }

        reject_all("message commands", opts)?;

        if positional_args.is_empty() {
            return Err("no message provided".into());
        }

        Ok(Self {
            kind,
            connection,
            target,
            prefix,
            exit,
            message: positional_args.join(" "),
        })
    }
}

impl TryFrom<ScriptOptions> for TranslateOptions {
    type Error = String;

    fn try_from(mut opts: ScriptOptions) -> Result<Self, Self::Error> {
        let command = mem::take(&mut opts.command);
        debug_assert_eq!(command.as_deref(), Some("i18n"));
        let domain = mem::take(&mut opts.domain);
        let context = mem::take(&mut opts.context);
        let plural = mem::take(&mut opts.plural);
        let count = mem::take(&mut opts.count);
        let mut positional_args = mem::take(&mut opts.positional_args);

        reject_all("i18n", opts)?;

        let plural = match (plural, count) {
            (Some(plural), Some(count)) => Some((plural, count)),
            (None, None) => None,
            (Some(_), None) => return Err("--plural needs --count".into()),
            (None, Some(_)) => return Err("--count needs --plural".into()),
        };

        if positional_args.is_empty() {
            return Err("no message provided".into());
        }
        let message = positional_args.remove(0);

        Ok(Self {
            domain: domain.unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            context,
            plural,
            message,
            arguments: positional_args,
        })
    }
}

fn reject_all(mode: &str, opts: ScriptOptions) -> Result<(), String> {
    macro_rules! ensure_options_absent {
        ($($opt:ident,)*) => {
            let ScriptOptions {
                $($opt),*
            } = opts;

            $(if !$opt.is_absent() {
                let name = concat!("--", stringify!($opt)).replace('_', "-");
                return Err(format!("{mode} conflict with {name}"));
            })*
        };
    }

    ensure_options_absent! {
        command,
        connection,
        context,
        count,
        domain,
        exit,
        help,
        plural,
        prefix,
        target,
        version,
        positional_args,
    };

    Ok(())
}

trait IsAbsent {
    fn is_absent(&self) -> bool;
}

impl IsAbsent for bool {
    fn is_absent(&self) -> bool {
        !*self
    }
}

impl<T> IsAbsent for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<T> IsAbsent for Vec<T> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

#[derive(Debug, Default, PartialEq)]
pub(super) struct ScriptOptions {
    command: Option<String>,
    // -c
    connection: Option<OsString>,
    // -C
    context: Option<String>,
    // -n
    count: Option<u64>,
    // -d
    domain: Option<String>,
    // -x
    exit: bool,
    // -h
    help: bool,
    // -P
    plural: Option<String>,
    // -p
    prefix: Option<String>,
    // -t
    target: Option<OsString>,
    // -V
    version: bool,

    positional_args: Vec<String>,
}

type OptionSetter = fn(&mut ScriptOptions, Option<OsString>) -> Result<(), String>;

struct ScriptOption {
    short: char,
    long: &'static str,
    takes_argument: bool,
    set: OptionSetter,
}

impl ScriptOptions {
    const SCRIPT_OPTIONS: &'static [ScriptOption] = &[
        ScriptOption {
            short: 'c',
            long: "connection",
            takes_argument: true,
            set: |options, argument| match argument {
                Some(_) if options.connection.is_some() => Err(more_than_once("--connection")),
                Some(value) => {
                    options.connection = Some(value);
                    Ok(())
                }
                None => Err("no connection provided".into()),
            },
        },
        ScriptOption {
            short: 't',
            long: "target",
            takes_argument: true,
            set: |options, argument| match argument {
                Some(_) if options.target.is_some() => Err(more_than_once("--target")),
                Some(value) => {
                    options.target = Some(value);
                    Ok(())
                }
                None => Err("no target provided".into()),
            },
        },
        ScriptOption {
            short: 'p',
            long: "prefix",
            takes_argument: true,
            set: |options, argument| {
                if argument.is_some() {
                    options.prefix = argument.map(into_text);
                    Ok(())
                } else {
                    Err("no prefix provided".into())
                }
            },
        },
        ScriptOption {
            short: 'x',
            long: "exit",
            takes_argument: false,
            set: |options, _| {
                if options.exit {
                    Err(more_than_once("--exit"))
                } else {
                    options.exit = true;
                    Ok(())
                }
            },
        },
        ScriptOption {
            short: 'd',
            long: "domain",
            takes_argument: true,
            set: |options, argument| match argument.map(into_text) {
                Some(value) if value.is_empty() => Err("empty domain".into()),
                Some(value) => {
                    options.domain = Some(value);
                    Ok(())
                }
                None => Err("no domain provided".into()),
            },
        },
        ScriptOption {
            short: 'C',
            long: "context",
            takes_argument: true,
            set: |options, argument| {
                if argument.is_some() {
                    options.context = argument.map(into_text);
                    Ok(())
                } else {
                    Err("no context provided".into())
                }
            },
        },
        ScriptOption {
            short: 'P',
            long: "plural",
            takes_argument: true,
            set: |options, argument| {
                if argument.is_some() {
                    options.plural = argument.map(into_text);
                    Ok(())
                } else {
                    Err("no plural form provided".into())
                }
            },
        },
        ScriptOption {
            short: 'n',
            long: "count",
            takes_argument: true,
            set: |options, argument| {
                let Some(value) = argument.map(into_text) else {
                    return Err("no count provided".into());
                };
                match value.parse() {
                    Ok(count) => {
                        options.count = Some(count);
                        Ok(())
                    }
                    Err(_) => Err(format!("invalid count '{value}'")),
                }
            },
        },
        ScriptOption {
            short: 'V',
            long: "version",
            takes_argument: false,
            set: |options, _| {
                if options.version {
                    Err(more_than_once("--version"))
                } else {
                    options.version = true;
                    Ok(())
                }
            },
        },
        ScriptOption {
            short: 'h',
            long: "help",
            takes_argument: false,
            set: |options, _| {
                if options.help {
                    Err(more_than_once("--help"))
                } else {
                    options.help = true;
                    Ok(())
                }
            },
        },
    ];

    /// parse arguments into ScriptOptions struct
    pub(super) fn parse_arguments(
        arguments: impl IntoIterator<Item = OsString>,
    ) -> Result<ScriptOptions, String> {
        let mut options: ScriptOptions = ScriptOptions::default();
        let mut arg_iter = arguments.into_iter().skip(1);

        while let Some(raw) = arg_iter.next() {
            // option names are ASCII, so byte offsets into `arg` up to an
            // option value are the same in `raw`
            let arg = raw.to_string_lossy();

            if arg == "--" {
                // only positional arguments after this point
                options.positional_args.extend(arg_iter.map(into_text));

                break;

                // if the argument starts with -- it must be a full length option name
            } else if let Some(unprefixed) = arg.strip_prefix("--") {
                // parse assignments like '--prefix=media: '
                if let Some((key, _)) = unprefixed.split_once('=') {
                    if let Some(option) = Self::SCRIPT_OPTIONS.iter().find(|o| o.long == key) {
                        if option.takes_argument {
                            let value = tail(&raw, "--".len() + key.len() + 1);
                            (option.set)(&mut options, Some(value))?;
                        } else {
                            Err(format!("'--{}' does not take any arguments", option.long))?;
                        }
                    } else {
                        Err(format!("unrecognized option '{arg}'"))?;
                    }
                } else if let Some(option) =
                    Self::SCRIPT_OPTIONS.iter().find(|o| o.long == unprefixed)
                {
                    if option.takes_argument {
                        let next_arg = arg_iter.next();
                        (option.set)(&mut options, next_arg)?;
                    } else {
                        (option.set)(&mut options, None)?;
                    }
                } else {
                    Err(format!("unrecognized option '{arg}'"))?;
                }
            } else if let Some(unprefixed) = arg.strip_prefix('-').filter(|s| !s.is_empty()) {
                // flags can be grouped, so we loop over the the characters
                let mut chars = unprefixed.chars();
                while let Some(curr) = chars.next() {
                    if let Some(option) = Self::SCRIPT_OPTIONS.iter().find(|o| o.short == curr) {
                        // the argument is either the rest of the current flag group or the next argument
                        let rest = chars.as_str();

                        if option.takes_argument {
                            let next_arg = if rest.is_empty() {
                                arg_iter.next()
                            } else {
                                Some(tail(&raw, arg.len() - rest.len()))
                            };
                            (option.set)(&mut options, next_arg)?;
                            break;
                        } else {
                            (option.set)(&mut options, None)?;
                        }
                    } else {
                        Err(format!("unrecognized option '{curr}'"))?;
                    }
                }
            } else if options.command.is_none() {
                options.command = Some(arg.into_owned());
            } else {
                options.positional_args.push(arg.into_owned());
            }
        }

        Ok(options)
    }

    pub(super) fn validate(self) -> Result<ScriptAction, String> {
        let action = if self.help {
            ScriptAction::Help
        } else if self.version {
            ScriptAction::Version
        } else {
            let command = self.command.clone();
            match command.as_deref() {
                Some("info" | "error" | "say") => ScriptAction::Message(self.try_into()?),
                Some("i18n") => ScriptAction::Translate(self.try_into()?),
                Some(other) => return Err(format!("unknown command '{other}'")),
                None => return Err("no command provided".into()),
            }
        };
        Ok(action)
    }
}

/// `raw` from byte `offset` on.
fn tail(raw: &OsStr, offset: usize) -> OsString {
    OsStr::from_bytes(&raw.as_bytes()[offset..]).to_os_string()
}

/// Messages and lookups are text; undecodable bytes become U+FFFD.
fn into_text(raw: OsString) -> String {
    raw.into_string()
        .unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
}

fn more_than_once(flag: &str) -> String {
    format!("argument '{flag}' was provided more than once, but cannot be used multiple times")
}
