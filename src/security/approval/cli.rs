use crate::cli::console::Console;
use crate::security::approval::{ApprovalBroker, ApprovalDecision, ApprovalRequest};
use anyhow::Result;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Shows the draft on stderr and waits for the approve token on the console.
pub struct CliApprovalBroker {
    console: Arc<Console>,
    approve_token: String,
}

impl CliApprovalBroker {
    pub fn new(console: Arc<Console>, approve_token: impl Into<String>) -> Self {
        Self {
            console,
            approve_token: approve_token.into(),
        }
    }

    fn decide(&self, answer: Option<&str>) -> ApprovalDecision {
        match answer.map(str::trim) {
            Some(answer) if answer.eq_ignore_ascii_case(self.approve_token.trim()) => {
                ApprovalDecision::Approved
            }
            Some(answer) => ApprovalDecision::Denied {
                reason: format!("answered '{answer}'"),
            },
            None => ApprovalDecision::Denied {
                reason: "no input received".to_string(),
            },
        }
    }
}

impl ApprovalBroker for CliApprovalBroker {
    fn request_approval<'a>(
        &'a self,
        request: &'a ApprovalRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApprovalDecision>> + Send + 'a>> {
        Box::pin(async move {
            eprintln!();
            eprintln!("┌─ Approval Required: {} ─────────────────────────", request.tool);
            for line in request.draft.lines() {
                eprintln!("│ {line}");
            }
            eprintln!("└──────────────────────────────────────────────────");

            let label = format!("Do you approve saving this note? ({}/no): ", self.approve_token);
            let answer = self.console.prompt(&label).await?;
            Ok(self.decide(answer.as_deref()))
        })
    }
}
