use crate::agent::ReactLoop;
use crate::app::chat::StudyBuddy;
use crate::cli::{Cli, Commands, Console};
use crate::error::Result;
use crate::graph::{Graph, GraphSession, RouterKeywords, StageContext};
use crate::providers::create_client;
use crate::security::{ApprovalBroker, AutoApproveBroker, CliApprovalBroker};
use crate::session::{Surface, TurnLog};
use crate::tools::default_registry;
use std::sync::Arc;
use tracing::info;

use crate::Config;

/// Run the ReAct loop once, or as a line-oriented session.
async fn run_react(config: &Config, message: Option<String>, console: &Console) -> Result<()> {
    let client = create_client(&config.provider);
    let registry = Arc::new(default_registry(config));
    let react = ReactLoop::from_config(config, client, registry);
    let log = TurnLog::from_config(config);

    if let Some(message) = message {
        let outcome = react.run(&message).await;
        println!("{}", outcome.answer);
        info!(
            steps = outcome.steps,
            tool_calls = outcome.tool_calls.len(),
            stop_reason = ?outcome.stop_reason,
            "react loop complete"
        );
        log.record(Surface::React, &message, &outcome.answer).await;
        return Ok(());
    }

    println!("=== ReAct Agent ({}) ===", config.provider.model);
    println!("Tools: calculator, kb_lookup, save_note");
    println!("Type 'exit' to quit.\n");

    while let Some(query) = console
        .next_request("You: ", &config.interactive.exit_keywords)
        .await?
    {
        let outcome = react.run(&query).await;
        println!("\nFinal Answer: {}\n", outcome.answer);
        log.record(Surface::React, &query, &outcome.answer).await;
    }
    println!("Goodbye!");
    Ok(())
}

/// Run graph passes; history carries across turns within the session.
async fn run_graph(
    config: &Config,
    message: Option<String>,
    auto_approve: bool,
    console: Arc<Console>,
) -> Result<()> {
    let broker: Arc<dyn ApprovalBroker> = if auto_approve {
        Arc::new(AutoApproveBroker)
    } else {
        Arc::new(CliApprovalBroker::new(
            Arc::clone(&console),
            config.interactive.approve_token.clone(),
        ))
    };
    let ctx = StageContext {
        client: create_client(&config.provider),
        registry: Arc::new(default_registry(config)),
        broker,
        keywords: RouterKeywords::from_config(&config.router),
    };
    let mut session = GraphSession::new(Graph::compile()?, ctx);
    let log = TurnLog::from_config(config);

    if let Some(message) = message {
        let turn = session.turn(&message).await;
        println!("{}", turn.reply);
        log.record(Surface::Graph, &message, &turn.reply).await;
        return Ok(());
    }

    println!("=== Conversation Graph ({}) ===", config.provider.model);
    println!("Ask a question (type 'exit' to quit).\n");

    while let Some(input) = console
        .next_request("You: ", &config.interactive.exit_keywords)
        .await?
    {
        let turn = session.turn(&input).await;
        println!("\nAssistant: {}\n", turn.reply);
        log.record(Surface::Graph, &input, &turn.reply).await;
    }
    println!("Goodbye!");
    Ok(())
}

/// Tutor chat; `/summary` recaps recent turns.
async fn run_chat(
    config: &Config,
    message: Option<String>,
    goal: Option<String>,
    console: &Console,
) -> Result<()> {
    let mut buddy = StudyBuddy::new(create_client(&config.provider), goal.as_deref());
    let log = TurnLog::from_config(config);

    if let Some(message) = message {
        let reply = buddy.ask(&message).await;
        println!("{reply}");
        log.record(Surface::Chat, &message, &reply).await;
        return Ok(());
    }

    println!("=== Study Buddy ({}) ===", config.provider.model);
    println!("Commands: /summary (summarize), /exit (quit)");
    println!("Your current learning goal: {}\n", buddy.goal());

    while let Some(input) = console
        .next_request("You: ", &config.interactive.exit_keywords)
        .await?
    {
        if StudyBuddy::is_summary_command(&input) {
            println!("\n{}\n", buddy.summarize().await);
            continue;
        }
        let reply = buddy.ask(&input).await;
        println!("\nTutor: {reply}\n");
        log.record(Surface::Chat, &input, &reply).await;
    }
    println!("Goodbye!");
    Ok(())
}

pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    let console = Arc::new(Console::stdin());

    match cli.command {
        Commands::React { message, max_steps } => {
            if let Some(max_steps) = max_steps {
                config.agent.max_steps = max_steps;
                config.validate()?;
            }
            run_react(&config, message, &console).await
        }

        Commands::Graph { message, yes } => run_graph(&config, message, yes, console).await,

        Commands::Chat { message, goal } => run_chat(&config, message, goal, &console).await,

        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
