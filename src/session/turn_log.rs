use crate::config::Config;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Which interactive surface produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Surface {
    React,
    Graph,
    Chat,
}

/// One line of the history file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub timestamp: DateTime<Utc>,
    pub surface: Surface,
    pub user: String,
    pub assistant: String,
}

impl TurnRecord {
    pub fn now(surface: Surface, user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            surface,
            user: user.into(),
            assistant: assistant.into(),
        }
    }
}

/// Append-only JSONL log of completed turns. Never read back.
#[derive(Debug, Clone)]
pub struct TurnLog {
    path: Option<PathBuf>,
}

impl TurnLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn from_config(config: &Config) -> Self {
        if config.history.enabled {
            Self::new(config.history_path())
        } else {
            Self::disabled()
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn append(&self, record: &TurnRecord) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("Failed to open history file {}", path.display()))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Append, logging instead of failing. Turn logging never ends a session.
    pub async fn record(&self, surface: Surface, user: &str, assistant: &str) {
        let record = TurnRecord::now(surface, user, assistant);
        if let Err(e) = self.append(&record).await {
            tracing::warn!(surface = %surface, error = %e, "failed to append turn log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn appends_one_json_line_per_turn() {
        let tmp = TempDir::new().unwrap();
        let log = TurnLog::new(tmp.path().join("nested/history.jsonl"));

        log.record(Surface::Graph, "hi", "hello").await;
        log.record(Surface::React, "2+2", "4").await;

        let text = std::fs::read_to_string(tmp.path().join("nested/history.jsonl")).unwrap();
        let records: Vec<TurnRecord> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].surface, Surface::Graph);
        assert_eq!(records[1].assistant, "4");
        assert!(text.contains("\"surface\":\"react\""));
    }

    #[tokio::test]
    async fn disabled_log_writes_nothing() {
        let log = TurnLog::disabled();
        assert!(log.path().is_none());
        log.append(&TurnRecord::now(Surface::Chat, "a", "b"))
            .await
            .unwrap();
    }

    #[test]
    fn from_config_respects_enabled_flag() {
        let mut config = Config {
            workspace_dir: PathBuf::from("/tmp/ws"),
            ..Config::default()
        };
        assert_eq!(
            TurnLog::from_config(&config).path(),
            Some(Path::new("/tmp/ws/history.jsonl"))
        );
        config.history.enabled = false;
        assert!(TurnLog::from_config(&config).path().is_none());
    }
}
