use std::sync::Arc;

use reagent::Config;
use reagent::graph::{
    ConversationState, Graph, Message, Role, RouterKeywords, Stage, StageContext,
};
use reagent::tools::default_registry;
use tempfile::TempDir;

use crate::agent_harness::{ScriptedBroker, ScriptedProvider, files_under, workspace_config};

fn context(
    config: &Config,
    provider: &Arc<ScriptedProvider>,
    broker: &Arc<ScriptedBroker>,
) -> StageContext {
    StageContext {
        client: provider.client(),
        registry: Arc::new(default_registry(config)),
        broker: Arc::clone(broker) as _,
        keywords: RouterKeywords::from_config(&config.router),
    }
}

fn user_turn(text: &str) -> ConversationState {
    ConversationState::with_messages(vec![Message::user(text)])
}

fn assistant_messages(state: &ConversationState) -> Vec<&str> {
    state
        .messages()
        .iter()
        .filter(|m| m.role() == Role::Assistant)
        .map(Message::content)
        .collect()
}

#[tokio::test]
async fn knowledge_question_runs_lookup_then_generation() {
    let workspace = TempDir::new().unwrap();
    let config = workspace_config(workspace.path());
    let provider = ScriptedProvider::new(["An AI agent perceives, reasons and acts."]);
    let broker = ScriptedBroker::new(&[]);
    let ctx = context(&config, &provider, &broker);

    let outcome = Graph::compile()
        .unwrap()
        .run(user_turn("what is an ai agent?"), &ctx)
        .await;

    assert_eq!(
        outcome.path,
        [
            Stage::Router,
            Stage::Tools,
            Stage::Generate,
            Stage::Review,
            Stage::Persist,
            Stage::Summarize
        ]
    );
    let messages = outcome.state.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role(), Role::Tool);
    assert!(messages[1].content().starts_with("An AI agent is a system that perceives"));
    assert_eq!(
        messages[2],
        Message::assistant("An AI agent perceives, reasons and acts.")
    );
    assert!(provider.prompts()[0].contains("TOOL: An AI agent is a system"));
    assert_eq!(provider.calls(), 1);
    assert!(broker.drafts().is_empty());
    assert!(!outcome.state.need_tool && !outcome.state.summarize);
}

#[tokio::test]
async fn denied_note_cancels_without_writing() {
    let workspace = TempDir::new().unwrap();
    let config = workspace_config(workspace.path());
    let provider = ScriptedProvider::new(["- Agents act on goals"]);
    let broker = ScriptedBroker::new(&[false]);
    let ctx = context(&config, &provider, &broker);

    let outcome = Graph::compile()
        .unwrap()
        .run(user_turn("please save a note about agents"), &ctx)
        .await;

    assert_eq!(
        outcome.path,
        [Stage::Router, Stage::Review, Stage::Persist, Stage::Summarize]
    );
    let state = &outcome.state;
    assert!(!state.need_note);
    assert!(!state.note_approved);
    assert_eq!(state.pending_note, "");
    assert_eq!(assistant_messages(state), ["Note save cancelled by user."]);
    assert_eq!(broker.drafts(), ["- Agents act on goals"]);
    assert!(provider.prompts()[0].contains("please save a note about agents"));
    assert!(files_under(&config.notes_dir()).is_empty());
}

#[tokio::test]
async fn approved_note_is_persisted() {
    let workspace = TempDir::new().unwrap();
    let config = workspace_config(workspace.path());
    let provider = ScriptedProvider::new(["- Agents act on goals\n- They call tools"]);
    let broker = ScriptedBroker::new(&[true]);
    let ctx = context(&config, &provider, &broker);

    let outcome = Graph::compile()
        .unwrap()
        .run(user_turn("record a note on agents"), &ctx)
        .await;

    let messages = outcome.state.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role(), Role::Tool);
    assert!(messages[1].content().starts_with("Note written to: "));
    assert_eq!(messages[2], Message::assistant("Note saved (approved)."));

    let note = config.notes_dir().join("agents_act_on_goals.md");
    let content = std::fs::read_to_string(note).unwrap();
    assert!(content.starts_with("# Agents act on goals\n\n- Agents act on goals"));
    assert!(!outcome.state.need_note && !outcome.state.note_approved);
    assert!(outcome.state.pending_note.is_empty());
}

#[tokio::test]
async fn tool_and_note_intents_share_one_pass() {
    let workspace = TempDir::new().unwrap();
    let config = workspace_config(workspace.path());
    let provider = ScriptedProvider::new([
        "LangGraph models workflows as graphs.",
        "- LangGraph builds graphs",
    ]);
    let broker = ScriptedBroker::new(&[true]);
    let ctx = context(&config, &provider, &broker);

    let outcome = Graph::compile()
        .unwrap()
        .run(user_turn("save a note about langgraph"), &ctx)
        .await;

    assert_eq!(outcome.path[1], Stage::Tools);
    assert!(provider.prompts()[1].contains("LangGraph models workflows as graphs."));
    assert!(
        config
            .notes_dir()
            .join("langgraph_builds_graphs.md")
            .exists()
    );
}

#[tokio::test]
async fn summary_request_appends_marked_summary() {
    let workspace = TempDir::new().unwrap();
    let config = workspace_config(workspace.path());
    let provider = ScriptedProvider::new(["Here you go.", "We talked about agents."]);
    let broker = ScriptedBroker::new(&[]);
    let ctx = context(&config, &provider, &broker);

    let state = ConversationState::with_messages(vec![
        Message::user("what is an agent?"),
        Message::assistant("Something that acts."),
        Message::user("give me a summary"),
    ]);
    let outcome = Graph::compile().unwrap().run(state, &ctx).await;

    assert_eq!(
        outcome.state.last(),
        Some(&Message::assistant("(Summary) We talked about agents."))
    );
    assert!(!outcome.state.summarize);
    let summary_prompt = &provider.prompts()[1];
    assert!(summary_prompt.contains("USER: what is an agent?\nASSISTANT: Something that acts."));
    assert!(summary_prompt.ends_with("Summary:"));
}

#[tokio::test]
async fn backend_failure_surfaces_as_text() {
    let workspace = TempDir::new().unwrap();
    let config = workspace_config(workspace.path());
    let provider = ScriptedProvider::new(Vec::<String>::new());
    let broker = ScriptedBroker::new(&[]);
    let ctx = context(&config, &provider, &broker);

    let outcome = Graph::compile()
        .unwrap()
        .run(user_turn("hello there"), &ctx)
        .await;

    let reply = outcome.state.last().unwrap();
    assert_eq!(reply.role(), Role::Assistant);
    assert!(reply.content().starts_with("Error: "));
}
