use std::fmt::Display;

/// Replace `%1`, `%2`, ... with the arguments in order.
///
/// Replacement is textual and sequential, so with ten or more arguments `%1`
/// also rewrites the start of `%10`.
pub fn insert_args(message: &str, args: &[&dyn Display]) -> String {
    let mut message = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        let placeholder = format!("%{}", i + 1);
        if message.contains(&placeholder) {
            message = message.replace(&placeholder, &arg.to_string());
        }
    }
    message
}
