//! History log - structured event logging to a JSON Lines file
//!
//! Provides a privacy-safe event history stored in history.jsonl. No user
//! data (credentials, comment text, profile fields) is ever logged; entries
//! carry event names, route paths and error messages only.
//!
//! Backs the admin history view and records navigation outcomes and
//! command executions from both CLI and desktop applications.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Counter for generating unique IDs within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique ID based on timestamp + counter
fn generate_id() -> u64 {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64;

    // Use lower 48 bits for timestamp (good for ~8900 years)
    // Use upper 16 bits for counter (65536 unique IDs per millisecond)
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    (timestamp << 16) | counter
}

/// Get current unix timestamp in milliseconds
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

/// Detect the current platform
fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// Entry point for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    Cli,
    Desktop,
}

impl EntryPoint {
    fn as_str(&self) -> &'static str {
        match self {
            EntryPoint::Cli => "cli",
            EntryPoint::Desktop => "desktop",
        }
    }
}

/// A history event to be recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl HistoryEvent {
    /// Create a new history event with just an event name
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            route: None,
            command: None,
            error_message: None,
            error_details: None,
        }
    }

    /// Set the route context (for navigation events)
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Set the command context (for CLI events)
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set error information
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Set error details (additional context)
    pub fn with_error_details(mut self, details: impl Into<String>) -> Self {
        self.error_details = Some(details.into());
        self
    }
}

/// A history entry as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub timestamp: i64,
    pub entry_point: String,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_details: Option<String>,
}

/// Structured event history
///
/// Appends one JSON object per line to history.jsonl and reads the file
/// back for queries. The file lock only serializes writers within this
/// process; entries from older runs are plain data.
pub struct HistoryLog {
    path: PathBuf,
    write_lock: Mutex<()>,
    entry_point: EntryPoint,
    app_version: String,
    platform: &'static str,
}

impl HistoryLog {
    /// Create a new history log
    ///
    /// Creates history.jsonl in the factline directory if it doesn't exist.
    pub fn new(
        factline_dir: &Path,
        entry_point: EntryPoint,
        app_version: impl Into<String>,
    ) -> Result<Self> {
        let path = factline_dir.join("history.jsonl");
        if !path.exists() {
            std::fs::write(&path, "")?;
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
            entry_point,
            app_version: app_version.into(),
            platform: detect_platform(),
        })
    }

    /// Record an event
    ///
    /// This is the main method for recording events. The entry_point,
    /// app_version, and platform are automatically added from the log
    /// configuration.
    pub fn log(&self, event: HistoryEvent) -> Result<()> {
        let entry = HistoryEntry {
            id: generate_id(),
            timestamp: now_ms(),
            entry_point: self.entry_point.as_str().to_string(),
            app_version: self.app_version.clone(),
            platform: self.platform.to_string(),
            event: event.event,
            route: event.route,
            command: event.command,
            error_message: event.error_message,
            error_details: event.error_details,
        };

        let line = serde_json::to_string(&entry)?;
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Record a simple event with just a name
    pub fn log_event(&self, event: &str) -> Result<()> {
        self.log(HistoryEvent::new(event))
    }

    /// Record a CLI command execution
    pub fn log_command(&self, command: &str) -> Result<()> {
        self.log(HistoryEvent::new("command_executed").with_command(command))
    }

    /// Record a navigation outcome
    pub fn log_navigation(&self, event: &str, route: &str) -> Result<()> {
        self.log(HistoryEvent::new(event).with_route(route))
    }

    /// Record an error
    pub fn log_error(&self, event: &str, message: &str, details: Option<&str>) -> Result<()> {
        let mut history_event = HistoryEvent::new(event).with_error(message);
        if let Some(d) = details {
            history_event = history_event.with_error_details(d);
        }
        self.log(history_event)
    }

    /// Read all parseable entries, oldest first. Damaged lines are skipped.
    fn read_all(&self) -> Result<Vec<HistoryEntry>> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let content = std::fs::read_to_string(&self.path)?;
        let entries = content
            .lines()
            .filter_map(|line| serde_json::from_str::<HistoryEntry>(line).ok())
            .collect();
        Ok(entries)
    }

    /// Query recent entries, newest first, up to the specified limit
    pub fn get_recent(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.read_all()?;
        entries.sort_by_key(|e| std::cmp::Reverse(e.timestamp));
        entries.truncate(limit);
        Ok(entries)
    }

    /// Query entries with errors, newest first
    pub fn get_errors(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.read_all()?;
        entries.retain(|e| e.error_message.is_some());
        entries.sort_by_key(|e| std::cmp::Reverse(e.timestamp));
        entries.truncate(limit);
        Ok(entries)
    }

    /// Get the total number of entries
    pub fn count(&self) -> Result<u64> {
        Ok(self.read_all()?.len() as u64)
    }

    /// Remove all entries
    pub fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        std::fs::write(&self.path, "")?;
        Ok(())
    }

    /// Get the path to the history file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_history_log_creation() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        assert!(log.path().exists());
    }

    #[test]
    fn test_log_event() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        log.log_event("session_restored").unwrap();

        let entries = log.get_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "session_restored");
        assert_eq!(entries[0].entry_point, "cli");
        assert_eq!(entries[0].app_version, "1.0.0");
    }

    #[test]
    fn test_log_with_context() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::new(dir.path(), EntryPoint::Desktop, "2.0.0").unwrap();

        log.log(
            HistoryEvent::new("navigation_entered")
                .with_route("/news/5")
                .with_command("open"),
        )
        .unwrap();

        let entries = log.get_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "navigation_entered");
        assert_eq!(entries[0].route, Some("/news/5".to_string()));
        assert_eq!(entries[0].command, Some("open".to_string()));
        assert_eq!(entries[0].entry_point, "desktop");
    }

    #[test]
    fn test_log_error() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        log.log_error("listing_fetch_failed", "Connection timeout", Some("GET /news"))
            .unwrap();

        let errors = log.get_errors(10).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].event, "listing_fetch_failed");
        assert_eq!(errors[0].error_message, Some("Connection timeout".to_string()));
        assert_eq!(errors[0].error_details, Some("GET /news".to_string()));
    }

    #[test]
    fn test_count_and_clear() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        log.log_event("event1").unwrap();
        log.log_event("event2").unwrap();
        log.log_event("event3").unwrap();

        assert_eq!(log.count().unwrap(), 3);

        log.clear().unwrap();
        assert_eq!(log.count().unwrap(), 0);
    }

    #[test]
    fn test_damaged_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        log.log_event("good").unwrap();
        {
            let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
            writeln!(file, "{{half a line").unwrap();
        }
        log.log_event("also_good").unwrap();

        let entries = log.get_recent(10).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        log.log_event("first").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        log.log_event("second").unwrap();

        let entries = log.get_recent(1).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "second");
    }
}
