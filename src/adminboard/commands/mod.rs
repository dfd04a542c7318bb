use crate::config::AdminConfig;
use crate::model::Record;
use crate::view::ListView;

pub mod config;
pub mod create;
pub mod delete;
pub mod list;
pub mod seed;
pub mod update;
pub mod view;

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

/// What a command did, for a UI to present.
#[derive(Debug)]
pub struct CmdResult<T = ()> {
    /// Records created, changed, removed or looked up.
    pub affected: Vec<Record<T>>,
    pub listed: Option<ListView<T>>,
    pub config: Option<AdminConfig>,
    pub messages: Vec<CmdMessage>,
}

impl<T> Default for CmdResult<T> {
    fn default() -> Self {
        Self {
            affected: Vec::new(),
            listed: None,
            config: None,
            messages: Vec::new(),
        }
    }
}

impl<T> CmdResult<T> {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, records: Vec<Record<T>>) -> Self {
        self.affected = records;
        self
    }

    pub fn with_listed(mut self, view: ListView<T>) -> Self {
        self.listed = Some(view);
        self
    }

    pub fn with_config(mut self, config: AdminConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
