//! # Command Layer
//!
//! One module per user-facing operation. Commands take plain Rust arguments
//! and return a [`CmdResult`]: structured data plus the messages a client may
//! want to show. Nothing in here prints or exits.

use std::path::PathBuf;

pub mod init;
pub mod mv;
pub mod serve;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub root: Option<PathBuf>,
    pub move_report: Option<mv::MoveReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_move_report(mut self, report: mv::MoveReport) -> Self {
        self.move_report = Some(report);
        self
    }
}
