//! JSON Lines feedback log.
//!
//! Each entry is serialized to one compact JSON object followed by `\n` and
//! appended to the log file. A mutex serializes writers so concurrent
//! submissions never interleave within a line.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use copilot_core::feedback::FeedbackSink;
use copilot_types::error::FeedbackError;
use copilot_types::feedback::FeedbackEntry;

/// Append-only feedback log backed by a local file.
pub struct JsonlFeedbackLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlFeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedbackSink for JsonlFeedbackLog {
    async fn append(&self, entry: &FeedbackEntry) -> Result<(), FeedbackError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::info!(path = %self.path.display(), "feedback recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_append_writes_one_json_line() {
        let tmp = TempDir::new().unwrap();
        let log = JsonlFeedbackLog::new(tmp.path().join("feedback.jsonl"));

        log.append(&FeedbackEntry::new("x", "y")).await.unwrap();

        let content = tokio::fs::read_to_string(log.path()).await.unwrap();
        assert_eq!(content, "{\"positive\":\"x\",\"negative\":\"y\"}\n");
    }

    #[tokio::test]
    async fn test_append_preserves_existing_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("feedback.jsonl");
        tokio::fs::write(&path, "{\"positive\":\"old\",\"negative\":\"\"}\n")
            .await
            .unwrap();

        let log = JsonlFeedbackLog::new(&path);
        log.append(&FeedbackEntry::new("Clear steps", "Too many tabs"))
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: FeedbackEntry = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed, FeedbackEntry::new("Clear steps", "Too many tabs"));
    }

    #[tokio::test]
    async fn test_append_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let log = JsonlFeedbackLog::new(tmp.path().join("nested").join("feedback.jsonl"));

        log.append(&FeedbackEntry::default()).await.unwrap();

        assert!(log.path().exists());
    }

    #[tokio::test]
    async fn test_concurrent_appends_do_not_interleave() {
        let tmp = TempDir::new().unwrap();
        let log = Arc::new(JsonlFeedbackLog::new(tmp.path().join("feedback.jsonl")));

        let mut handles = Vec::new();
        for i in 0..20 {
            let log = Arc::clone(&log);
            handles.push(tokio::spawn(async move {
                log.append(&FeedbackEntry::new(format!("good {i}"), "multi\nline"))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let content = tokio::fs::read_to_string(log.path()).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 20);
        for line in lines {
            let entry: FeedbackEntry = serde_json::from_str(line).unwrap();
            assert_eq!(entry.negative, "multi\nline");
        }
    }
}
