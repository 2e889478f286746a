pub const USAGE_MSG: &str = "Usage: konversation-script [options] <command> [<argument>...]";

const DESCRIPTOR: &str = "Send notices and messages to Konversation, or print translated strings.";

const HELP_MSG: &str = "Commands:
info <message>                  show an informational notice in the active view
error <message>                 show an error notice in the active view
say <message>                   send a message to the connection and target
i18n <message> [<argument>...]  print <message> translated, with %1, %2, ...
                                replaced by the arguments

Options:
-c, --connection <id>           connection the script was started for
-t, --target <name>             channel or nick the script was started for
-p, --prefix <text>             put <text> in front of the message
-x, --exit                      exit with status 1 after an error notice

-d, --domain <domain>           translation domain (default: konversation)
-C, --context <context>         disambiguating context of <message>
-P, --plural <message>          plural form of <message>, needs --count
-n, --count <number>            number that selects the plural form

-h, --help                      display this help
-V, --version                   display version

Environment:
KONVERSATION_DBUS_BIN           bus client used to reach Konversation
KONVERSATION_QTPATHS_BIN        helper used to locate translations
KONVERSATION_LANG               language of Konversation's user interface
";

pub fn long_help_message() -> String {
    format!("{USAGE_MSG}\n\n{DESCRIPTOR}\n\n{HELP_MSG}")
}
