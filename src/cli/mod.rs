use std::process;

use crate::common::{Config, Error, InvocationContext};
use crate::i18n::Localizer;
use crate::log::{user_error, ScriptLogger};
use crate::messenger::Messenger;

use help::{long_help_message, USAGE_MSG};
use options::{MessageKind, MessageOptions, ScriptAction, TranslateOptions};

mod help;
mod options;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn main() {
    ScriptLogger::new("konversation-script: ").into_global_logger();

    let action = match ScriptAction::from_env() {
        Ok(action) => action,
        Err(error) => {
            eprintln_ignore_io_error!("konversation-script: {error}\n{USAGE_MSG}");
            process::exit(1);
        }
    };

    match action {
        ScriptAction::Help => {
            println_ignore_io_error!("{}", long_help_message());
        }
        ScriptAction::Version => {
            println_ignore_io_error!("konversation-script {VERSION}");
        }
        ScriptAction::Message(options) => send(options),
        ScriptAction::Translate(options) => match translate(options, &Config::from_process_env()) {
            Ok(text) => println_ignore_io_error!("{text}"),
            Err(error) => {
                user_error!("{error}");
                process::exit(1);
            }
        },
    }
}

fn send(options: MessageOptions) {
    let context = InvocationContext {
        connection: options.connection,
        target: options.target,
    };
    let messenger = Messenger::new(&Config::from_process_env(), context);
    let prefix = options.prefix.as_deref();

    match options.kind {
        MessageKind::Info => messenger.info(&options.message, prefix),
        MessageKind::Error => messenger.error(&options.message, prefix, options.exit),
        MessageKind::Say => {
            messenger.abort_if_standalone();
            messenger.say(&options.message, prefix);
        }
    }
}

fn translate(options: TranslateOptions, config: &Config) -> Result<String, Error> {
    let messenger = Messenger::new(config, InvocationContext::standalone());
    let localizer = Localizer::init(&options.domain, config, &messenger)?;

    let args = options
        .arguments
        .iter()
        .map(|arg| arg as &dyn std::fmt::Display)
        .collect::<Vec<_>>();

    let text = match (&options.context, &options.plural) {
        (None, None) => localizer.i18n(&options.message, &args),
        (None, Some((plural, count))) => {
            localizer.i18np(&options.message, plural, *count, &args)
        }
        (Some(context), None) => localizer.i18nc(context, &options.message, &args),
        (Some(context), Some((plural, count))) => {
            localizer.i18ncp(context, &options.message, plural, *count, &args)
        }
    };

    Ok(text)
}
