pub mod turn_log;

pub use turn_log::{Surface, TurnLog, TurnRecord};
