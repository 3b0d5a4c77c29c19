use colored::Colorize;
use zk::commands::{CmdMessage, MessageLevel};
use zk::error::ZkError;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

/// Print a fatal error. Usage errors carry their own help text.
pub fn report(err: &ZkError) {
    match err {
        ZkError::Usage(help) | ZkError::MissingArguments(help) => println!("{}", help),
        ZkError::RewriteIncomplete { failures } => {
            for failure in failures {
                eprintln!("{} {}", "skipped".yellow(), failure);
            }
            eprintln!("{} {}", "Error:".red(), err);
        }
        other => eprintln!("{} {}", "Error:".red(), other),
    }
}
