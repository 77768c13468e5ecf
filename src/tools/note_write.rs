use super::common::{failed_tool_result, ok_tool_result};
use super::traits::Tool;
use super::types::{ToolKind, ToolResult};
use crate::config::NoteStrategy;
use crate::error::ToolError;
use chrono::Utc;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use tokio::io::AsyncWriteExt;

const MAX_DERIVED_TITLE_CHARS: usize = 60;

/// A note ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteArgs {
    pub title: String,
    pub body: String,
}

impl NoteArgs {
    /// Parse `title | body`, or a bare body whose first line becomes the title.
    pub fn parse(argument: &str) -> Result<Self, ToolError> {
        let (title, body) = match argument.split_once('|') {
            Some((title, body)) => (title.trim(), body.trim()),
            None => ("", argument.trim()),
        };

        if body.is_empty() {
            return Err(ToolError::InvalidArgument {
                tool: ToolKind::SaveNote.to_string(),
                message: "note body is empty (expected `title | body`)".into(),
            });
        }

        let title = if title.is_empty() {
            derive_title(body)
        } else {
            title.to_string()
        };

        Ok(Self {
            title,
            body: body.to_string(),
        })
    }

    /// Take a finished draft as the body, unsplit. The title is derived from
    /// its first non-empty line.
    pub fn from_draft(draft: &str) -> Result<Self, ToolError> {
        let body = draft.trim();
        if body.is_empty() {
            return Err(ToolError::InvalidArgument {
                tool: ToolKind::SaveNote.to_string(),
                message: "note body is empty".into(),
            });
        }
        Ok(Self {
            title: derive_title(body),
            body: body.to_string(),
        })
    }
}

fn derive_title(body: &str) -> String {
    let first = body
        .lines()
        .map(|line| line.trim_start_matches(['-', '*', '#', '_', ' ', '\t']).trim())
        .find(|line| !line.is_empty())
        .unwrap_or("");
    let title: String = first.chars().take(MAX_DERIVED_TITLE_CHARS).collect();
    if title.is_empty() {
        "note".into()
    } else {
        title
    }
}

/// File stem for a title: `[A-Za-z0-9 _-]` kept, spaces to underscores, lowercase.
pub fn note_file_stem(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    let stem = kept.trim().replace(' ', "_").to_lowercase();
    if stem.is_empty() {
        "untitled".into()
    } else {
        stem
    }
}

/// Persists notes under one directory, one file per note or as a shared log.
pub struct NoteWriteTool {
    dir: PathBuf,
    strategy: NoteStrategy,
    session_log_file: String,
}

impl NoteWriteTool {
    pub fn new(dir: PathBuf, strategy: NoteStrategy, session_log_file: impl Into<String>) -> Self {
        Self {
            dir,
            strategy,
            session_log_file: session_log_file.into(),
        }
    }

    /// Write an already-parsed note. Failures come back as a failed result.
    pub async fn save(&self, note: &NoteArgs) -> ToolResult {
        match self.write_note(note).await {
            Ok(result) => result,
            Err(e) => failed_tool_result(format!("Failed to write note: {e}")),
        }
    }

    async fn write_note(&self, note: &NoteArgs) -> anyhow::Result<ToolResult> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let target = match self.strategy {
            NoteStrategy::PerNote => self
                .dir
                .join(format!("{}.md", note_file_stem(&note.title))),
            NoteStrategy::SessionLog => self.dir.join(&self.session_log_file),
        };

        // Refuse to write through a symlink planted in the notes directory.
        if let Ok(meta) = tokio::fs::symlink_metadata(&target).await
            && meta.file_type().is_symlink()
        {
            return Ok(failed_tool_result(format!(
                "Refusing to write through symlink: {}",
                target.display()
            )));
        }

        match self.strategy {
            NoteStrategy::PerNote => {
                let content = format!("# {}\n\n{}\n", note.title, note.body);
                tokio::fs::write(&target, content).await?;
            }
            NoteStrategy::SessionLog => {
                let entry = format!(
                    "## {} \u{2014} {}\n\n{}\n\n",
                    Utc::now().to_rfc3339(),
                    note.title,
                    note.body
                );
                let mut file = tokio::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&target)
                    .await?;
                file.write_all(entry.as_bytes()).await?;
                file.flush().await?;
            }
        }

        let shown = tokio::fs::canonicalize(&target).await.unwrap_or(target);
        tracing::info!(path = %shown.display(), strategy = %self.strategy, "note written");
        Ok(ok_tool_result(format!("Note written to: {}", shown.display())))
    }
}

impl Tool for NoteWriteTool {
    fn kind(&self) -> ToolKind {
        ToolKind::SaveNote
    }

    fn description(&self) -> &str {
        "save a markdown note as `title | body`."
    }

    fn usage(&self) -> &str {
        "save_note[AI Agents | Agents perceive, reason and act.]"
    }

    fn execute<'a>(
        &'a self,
        argument: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            Ok(match NoteArgs::parse(argument) {
                Ok(note) => self.save(&note).await,
                Err(e) => failed_tool_result(e.to_string()),
            })
        })
    }
}
