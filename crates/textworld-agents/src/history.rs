//! Append-only per-actor history log.

use serde::{Deserialize, Serialize};

/// Ordered record of everything an actor has done, seen or heard.
///
/// Stored oldest-first. Hosts that render newest-first use
/// [`HistoryLog::newest_first`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vec<String>,
}

impl HistoryLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first.
    pub fn oldest_first(&self) -> &[String] {
        &self.entries
    }

    /// All entries, newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().rev()
    }

    /// The last `count` entries, oldest first.
    pub fn recent(&self, count: usize) -> &[String] {
        let start = self.entries.len().saturating_sub(count);
        self.entries.get(start..).unwrap_or_default()
    }

    /// Entries appended at or after position `cursor`, oldest first.
    pub fn since(&self, cursor: usize) -> &[String] {
        self.entries.get(cursor..).unwrap_or_default()
    }

    /// Whether any entry equals `entry`.
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> HistoryLog {
        let mut log = HistoryLog::new();
        log.push("first");
        log.push("second");
        log.push("third");
        log
    }

    #[test]
    fn views_are_ordered() {
        let log = log();
        assert_eq!(log.oldest_first(), ["first", "second", "third"]);
        let newest: Vec<&String> = log.newest_first().collect();
        assert_eq!(newest, ["third", "second", "first"]);
    }

    #[test]
    fn recent_and_since_windows() {
        let log = log();
        assert_eq!(log.recent(2), ["second", "third"]);
        assert_eq!(log.recent(10).len(), 3);
        assert_eq!(log.since(2), ["third"]);
        assert!(log.since(5).is_empty());
    }
}
