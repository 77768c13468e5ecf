pub mod approval;

pub use approval::{
    ApprovalBroker, ApprovalDecision, ApprovalRequest, AutoApproveBroker, AutoDenyBroker,
    CliApprovalBroker,
};
