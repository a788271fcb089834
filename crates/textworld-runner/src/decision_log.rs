//! Append-only JSON-lines record of every decision exchange.
//!
//! One object per line: timestamp, actor, both prompts, the raw reply and
//! the parsed decision (or `null`). Write failures are logged and never
//! interrupt the simulation.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use textworld_types::Decision;
use tracing::warn;

use crate::error::RunnerError;
use crate::prompt::RenderedPrompt;

/// A single logged exchange.
#[derive(Debug, Serialize)]
pub struct DecisionLogEntry<'a> {
    /// RFC 3339 timestamp of the reply.
    pub timestamp: String,
    /// Name of the deciding actor.
    pub actor: &'a str,
    /// Rendered system prompt.
    pub system: &'a str,
    /// Rendered user prompt.
    pub user: &'a str,
    /// Raw model output.
    pub raw: &'a str,
    /// Parsed decision, if parsing succeeded.
    pub parsed: Option<&'a Decision>,
}

/// Appends exchanges to a file.
#[derive(Debug, Clone)]
pub struct DecisionLog {
    path: PathBuf,
}

impl DecisionLog {
    /// Create a log writing to `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one exchange, logging rather than returning any failure.
    pub fn record(
        &self,
        actor: &str,
        prompt: &RenderedPrompt,
        raw: &str,
        parsed: Option<&Decision>,
    ) {
        let entry = DecisionLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            actor,
            system: &prompt.system,
            user: &prompt.user,
            raw,
            parsed,
        };
        if let Err(e) = self.append(&entry) {
            warn!(path = %self.path.display(), error = %e, "failed to write decision log");
        }
    }

    fn append(&self, entry: &DecisionLogEntry<'_>) -> Result<(), RunnerError> {
        let line = serde_json::to_string(entry)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_one_json_object_per_exchange() {
        let path =
            std::env::temp_dir().join(format!("textworld-decisions-{}.log", std::process::id()));
        std::fs::remove_file(&path).ok();

        let log = DecisionLog::new(&path);
        let prompt = RenderedPrompt {
            system: "You are Mary".to_owned(),
            user: "<Not engaged in conversation>".to_owned(),
        };
        let decision = Decision {
            response: Some("Hello".to_owned()),
            move_direction: None,
        };
        log.record("Mary", &prompt, "{\"response\": \"Hello\"}", Some(&decision));
        log.record("Mary", &prompt, "garbage", None);

        let contents = std::fs::read_to_string(&path).unwrap_or_default();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .filter_map(|l| serde_json::from_str(l).ok())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines.first().and_then(|v| v.pointer("/parsed/response")),
            Some(&serde_json::json!("Hello"))
        );
        assert_eq!(
            lines.get(1).and_then(|v| v.get("parsed")),
            Some(&serde_json::Value::Null)
        );
        assert_eq!(
            lines.get(1).and_then(|v| v.get("actor")),
            Some(&serde_json::json!("Mary"))
        );

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn unwritable_path_does_not_panic() {
        let log = DecisionLog::new("/nonexistent/dir/decisions.log");
        let prompt = RenderedPrompt {
            system: String::new(),
            user: String::new(),
        };
        log.record("Mary", &prompt, "", None);
        assert_eq!(log.path(), Path::new("/nonexistent/dir/decisions.log"));
    }
}
