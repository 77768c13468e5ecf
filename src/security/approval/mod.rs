pub mod cli;

pub use cli::CliApprovalBroker;

use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// An effect waiting for a human decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub tool: ToolKind,
    /// Exactly what will be written if approved.
    pub draft: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalDecision {
    Approved,
    Denied { reason: String },
}

impl ApprovalDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// Transport-agnostic yes/no boundary in front of effectful tools.
pub trait ApprovalBroker: Send + Sync {
    fn request_approval<'a>(
        &'a self,
        request: &'a ApprovalRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ApprovalDecision>> + Send + 'a>>;
}

pub struct AutoDenyBroker {
    pub reason: String,
}

impl ApprovalBroker for AutoDenyBroker {
    fn request_approval<'a>(
        &'a self,
        _request: &'a ApprovalRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ApprovalDecision>> + Send + 'a>> {
        Box::pin(async move {
            Ok(ApprovalDecision::Denied {
                reason: self.reason.clone(),
            })
        })
    }
}

/// Approves everything; used for `graph --yes`.
pub struct AutoApproveBroker;

impl ApprovalBroker for AutoApproveBroker {
    fn request_approval<'a>(
        &'a self,
        request: &'a ApprovalRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ApprovalDecision>> + Send + 'a>> {
        Box::pin(async move {
            tracing::info!(tool = %request.tool, "auto-approved");
            Ok(ApprovalDecision::Approved)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_request() -> ApprovalRequest {
        ApprovalRequest {
            tool: ToolKind::SaveNote,
            draft: "- agents act".to_string(),
        }
    }

    #[tokio::test]
    async fn auto_deny_broker_denies_all_requests() {
        let broker = AutoDenyBroker {
            reason: "non-interactive context".to_string(),
        };

        let decision = broker
            .request_approval(&note_request())
            .await
            .expect("auto deny broker should not fail");

        assert_eq!(
            decision,
            ApprovalDecision::Denied {
                reason: "non-interactive context".to_string()
            }
        );
        assert!(!decision.is_approved());
    }

    #[tokio::test]
    async fn auto_approve_broker_approves() {
        let decision = AutoApproveBroker
            .request_approval(&note_request())
            .await
            .unwrap();
        assert!(decision.is_approved());
    }
}
