use std::sync::Arc;

use reagent::graph::{Graph, GraphSession, Role, RouterKeywords, StageContext};
use reagent::tools::default_registry;
use tempfile::TempDir;

use crate::agent_harness::{ScriptedBroker, ScriptedProvider, workspace_config};

fn session(
    workspace: &TempDir,
    provider: &Arc<ScriptedProvider>,
    broker: &Arc<ScriptedBroker>,
) -> GraphSession {
    let config = workspace_config(workspace.path());
    let ctx = StageContext {
        client: provider.client(),
        registry: Arc::new(default_registry(&config)),
        broker: Arc::clone(broker) as _,
        keywords: RouterKeywords::from_config(&config.router),
    };
    GraphSession::new(Graph::compile().unwrap(), ctx)
}

#[tokio::test]
async fn carries_user_and_reply_but_not_tool_output() {
    let workspace = TempDir::new().unwrap();
    let provider = ScriptedProvider::new(["Agents act.", "You asked about agents."]);
    let broker = ScriptedBroker::new(&[]);
    let mut session = session(&workspace, &provider, &broker);

    let first = session.turn("what is an ai agent?").await;
    assert_eq!(first.reply, "Agents act.");

    let second = session.turn("what did I ask?").await;
    assert_eq!(second.reply, "You asked about agents.");

    let history = session.history();
    assert_eq!(history.len(), 4);
    assert!(history.iter().all(|m| m.role() != Role::Tool));
    assert_eq!(history[2].content(), "what did I ask?");

    let second_prompt = &provider.prompts()[1];
    assert!(second_prompt.contains("USER: what is an ai agent?\nASSISTANT: Agents act.\nUSER: what did I ask?"));
    assert!(!second_prompt.contains("TOOL:"));
}

#[tokio::test]
async fn denial_is_the_visible_reply() {
    let workspace = TempDir::new().unwrap();
    let provider = ScriptedProvider::new(["- Agents"]);
    let broker = ScriptedBroker::new(&[false]);
    let mut session = session(&workspace, &provider, &broker);

    let turn = session.turn("please save a note about agents").await;

    assert_eq!(turn.reply, "Note save cancelled by user.");
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn approved_note_reply_is_the_confirmation() {
    let workspace = TempDir::new().unwrap();
    let provider = ScriptedProvider::new(["- Agents act on goals"]);
    let broker = ScriptedBroker::new(&[true]);
    let mut session = session(&workspace, &provider, &broker);

    let turn = session.turn("save this note").await;

    assert_eq!(turn.reply, "Note saved (approved).");
    assert_eq!(session.history()[1].role(), Role::Assistant);
}
