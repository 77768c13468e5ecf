use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `reagent` - a ReAct loop and a supervised conversation graph for local LLMs.
#[derive(Parser, Debug)]
#[command(name = "reagent")]
#[command(version = "0.1.0")]
#[command(about = "Reason/act agents with a human approval gate.", long_about = None)]
pub struct Cli {
    /// Log at debug level (raw model steps, stage transitions)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load this config file instead of ~/.reagent/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the ReAct loop (calculator, knowledge base, notes)
    React {
        /// Single message mode (don't enter interactive mode)
        #[arg(short, long)]
        message: Option<String>,

        /// Override agent.max_steps for this run
        #[arg(long)]
        max_steps: Option<u32>,
    },

    /// Run the conversation graph with the note approval gate
    Graph {
        /// Single message mode (don't enter interactive mode)
        #[arg(short, long)]
        message: Option<String>,

        /// Approve every note without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Plain tutor chat with short-term memory and /summary
    Chat {
        /// Single message mode (don't enter interactive mode)
        #[arg(short, long)]
        message: Option<String>,

        /// Learning goal the tutor keeps in mind
        #[arg(long)]
        goal: Option<String>,
    },

    /// Print the effective configuration
    Config,
}
