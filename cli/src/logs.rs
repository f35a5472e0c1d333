//! Pipeline logging.
//!
//! Every entry is printed to stderr and broadcast to subscribers,
//! so callers (and tests) can observe pipeline events as they happen.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Position of the record an entry refers to (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPosition {
    pub index: usize,
    pub total: usize,
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth for display
    #[serde(default)]
    pub indent: u8,
    /// Record being processed, if the entry is about one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordPosition>,
}

impl LogEntry {
    fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), indent: 0, record: None }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Tag the entry with a record position; `index` is 1-based.
    pub fn for_record(mut self, index: usize, total: usize) -> Self {
        self.record = Some(RecordPosition { index, total });
        self
    }

    /// Render the line printed to stderr.
    pub fn render(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        let indent = "   ".repeat(self.indent as usize);
        match self.record {
            Some(pos) => {
                format!("{}{} [{}/{}] {}", indent, prefix, pos.index, pos.total, self.message)
            }
            None => format!("{}{} {}", indent, prefix, self.message),
        }
    }
}

/// Global log broadcaster
pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

/// Fans log entries out to stderr and all subscribers
pub struct LogBroadcaster {
    sender: broadcast::Sender<LogEntry>,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Print an entry and send it to all subscribers
    pub fn log(&self, entry: LogEntry) {
        eprintln!("{}", entry.render());

        // No receivers is the normal CLI case
        let _ = self.sender.send(entry);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_info(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOG_BROADCASTER.log(LogEntry::info(msg).with_indent(indent));
}

/// Progress line for record `index` of `total`.
pub fn log_record(index: usize, total: usize, msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::info(msg).for_record(index, total));
}

/// Warning about record `index` of `total` (e.g. a skipped record).
pub fn log_record_warning(index: usize, total: usize, msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::warning(msg).for_record(index, total));
}

/// Drain everything currently queued on a receiver.
#[cfg(test)]
pub(crate) fn drain(rx: &mut broadcast::Receiver<LogEntry>) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(entry) => entries.push(entry),
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_receives_entries() {
        let broadcaster = LogBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.log(LogEntry::warning("skipped record 3"));
        broadcaster.log(LogEntry::info("nested").with_indent(2));

        let entries = drain(&mut rx);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, LogLevel::Warning);
        assert_eq!(entries[0].message, "skipped record 3");
        assert_eq!(entries[1].indent, 2);
    }

    #[test]
    fn test_log_without_subscribers_does_not_panic() {
        let broadcaster = LogBroadcaster::new();
        broadcaster.log(LogEntry::error("nobody listening"));
    }

    #[test]
    fn test_entry_serializes_lowercase_level() {
        let json = serde_json::to_value(LogEntry::success("done")).unwrap();
        assert_eq!(json["level"], "success");
        assert_eq!(json["indent"], 0);
        assert!(json.get("record").is_none());
    }

    #[test]
    fn test_record_position_rendered_and_serialized() {
        let entry = LogEntry::warning("too short").for_record(2, 5);
        assert_eq!(entry.record, Some(RecordPosition { index: 2, total: 5 }));
        assert_eq!(entry.render(), "   ⚠️ [2/5] too short");

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["record"]["index"], 2);
        assert_eq!(json["record"]["total"], 5);
    }

    #[test]
    fn test_render_indents_plain_entries() {
        assert_eq!(LogEntry::info("POST").with_indent(1).render(), "       POST");
        assert_eq!(LogEntry::error("boom").render(), "   ❌ boom");
    }
}
