pub mod commands;
pub mod console;

pub use commands::{Cli, Commands};
pub use console::Console;
