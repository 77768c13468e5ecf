#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};

use reagent::Config;
use reagent::providers::{CompletionClient, Provider};
use reagent::security::{ApprovalBroker, ApprovalDecision, ApprovalRequest};

/// Replays canned completions in order and records every prompt it was sent.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn client(self: &Arc<Self>) -> CompletionClient {
        CompletionClient::new(Arc::clone(self) as Arc<dyn Provider>, "scripted-model")
    }
}

impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        _model: &'a str,
        _temperature: Option<f64>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            self.prompts
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(prompt.to_string());
            self.replies
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no scripted reply left"))
        })
    }
}

/// Answers approval requests from a fixed list and keeps the drafts it saw.
#[derive(Debug, Default)]
pub struct ScriptedBroker {
    answers: Mutex<VecDeque<bool>>,
    drafts: Mutex<Vec<String>>,
}

impl ScriptedBroker {
    pub fn new(answers: &[bool]) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            drafts: Mutex::new(Vec::new()),
        })
    }

    pub fn drafts(&self) -> Vec<String> {
        self.drafts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ApprovalBroker for ScriptedBroker {
    fn request_approval<'a>(
        &'a self,
        request: &'a ApprovalRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ApprovalDecision>> + Send + 'a>> {
        Box::pin(async move {
            self.drafts
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request.draft.clone());
            let approve = self
                .answers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or(false);
            Ok(if approve {
                ApprovalDecision::Approved
            } else {
                ApprovalDecision::Denied {
                    reason: "scripted denial".to_string(),
                }
            })
        })
    }
}

/// Default config rooted in a temporary workspace.
pub fn workspace_config(workspace: &Path) -> Config {
    Config {
        workspace_dir: workspace.to_path_buf(),
        config_path: workspace.join("config.toml"),
        ..Config::default()
    }
}

/// Every file under `dir`, recursively. Empty if `dir` does not exist.
pub fn files_under(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut found = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return found;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            found.extend(files_under(&path));
        } else {
            found.push(path);
        }
    }
    found
}
