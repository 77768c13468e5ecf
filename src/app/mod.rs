pub mod chat;
pub mod dispatch;

pub use chat::StudyBuddy;
pub use dispatch::dispatch;
