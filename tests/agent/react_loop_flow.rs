use std::sync::Arc;

use reagent::agent::{ReactLoop, ReactStopReason};
use reagent::tools::default_registry;
use tempfile::TempDir;

use crate::agent_harness::{ScriptedProvider, files_under, workspace_config};

fn react_loop(
    provider: &Arc<ScriptedProvider>,
    workspace: &TempDir,
    max_steps: u32,
    save_note_cap: u32,
) -> ReactLoop {
    let mut config = workspace_config(workspace.path());
    config.agent.max_steps = max_steps;
    config.agent.save_note_cap = save_note_cap;
    let registry = Arc::new(default_registry(&config));
    ReactLoop::from_config(&config, provider.client(), registry)
}

#[tokio::test]
async fn action_line_wins_and_trailing_text_is_dropped() {
    let workspace = TempDir::new().unwrap();
    let provider = ScriptedProvider::new([
        "Thought: I should compute it.\nAction: calculator[2+3*4]\nObservation: 99\nFinal Answer: 99",
        "Thought: The tool said 14.\nFinal Answer: 14",
    ]);

    let outcome = react_loop(&provider, &workspace, 5, 3)
        .run("What is 2+3*4?")
        .await;

    assert_eq!(outcome.answer, "14");
    assert_eq!(outcome.stop_reason, ReactStopReason::FinalAnswer);
    assert_eq!(outcome.steps, 2);

    let second_prompt = &provider.prompts()[1];
    assert!(second_prompt.contains("Action: calculator[2+3*4]\nObservation: 14\n"));
    assert!(!second_prompt.contains("Observation: 99"));
    assert!(!second_prompt.contains("Final Answer: 99"));
}

#[tokio::test]
async fn save_note_cap_stops_before_the_next_completion() {
    let workspace = TempDir::new().unwrap();
    let provider = ScriptedProvider::new([
        "Action: save_note[First | one]",
        "Action: save_note[Second | two]",
        "Final Answer: never requested",
    ]);

    let outcome = react_loop(&provider, &workspace, 5, 2)
        .run("keep saving notes")
        .await;

    assert_eq!(outcome.stop_reason, ReactStopReason::EffectLimit);
    assert_eq!(provider.calls(), 2);
    assert!(outcome.answer.contains("second.md"), "{}", outcome.answer);
    assert_eq!(files_under(&workspace.path().join("notes")).len(), 2);
}

#[tokio::test]
async fn cap_is_reset_for_each_run() {
    let workspace = TempDir::new().unwrap();
    let provider = ScriptedProvider::new([
        "Action: save_note[A | one]",
        "Final Answer: saved a",
        "Action: save_note[B | two]",
        "Final Answer: saved b",
    ]);
    let agent = react_loop(&provider, &workspace, 5, 1);

    assert_eq!(agent.run("save a").await.answer, "saved a");
    assert_eq!(agent.run("save b").await.answer, "saved b");
}

#[tokio::test]
async fn step_budget_is_enforced() {
    let workspace = TempDir::new().unwrap();
    let provider = ScriptedProvider::new(std::iter::repeat_n("Action: calculator[1+1]", 10));

    let outcome = react_loop(&provider, &workspace, 3, 3).run("loop forever").await;

    assert_eq!(outcome.stop_reason, ReactStopReason::StepLimit);
    assert_eq!(
        outcome.answer,
        "I reached the maximum number of reasoning steps without a final answer."
    );
    assert_eq!(provider.calls(), 3);
    assert_eq!(outcome.tool_calls.len(), 3);
}

#[tokio::test]
async fn unrecognized_step_is_not_retried() {
    let workspace = TempDir::new().unwrap();
    let provider = ScriptedProvider::new(["Let me think about that.", "Final Answer: late"]);

    let outcome = react_loop(&provider, &workspace, 5, 3).run("hmm").await;

    assert_eq!(outcome.stop_reason, ReactStopReason::Unrecognized);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn saved_note_round_trips_title_and_body() {
    let workspace = TempDir::new().unwrap();
    let provider = ScriptedProvider::new([
        "Action: save_note[AI Agents | line one]",
        "Final Answer: Saved.",
    ]);

    let outcome = react_loop(&provider, &workspace, 5, 3)
        .run("save a note about agents")
        .await;

    assert_eq!(outcome.answer, "Saved.");
    let content =
        std::fs::read_to_string(workspace.path().join("notes").join("ai_agents.md")).unwrap();
    assert!(content.starts_with("# AI Agents\n\nline one"));
}

#[tokio::test]
async fn tool_failures_become_observations() {
    let workspace = TempDir::new().unwrap();
    let provider = ScriptedProvider::new([
        "Action: calculator[1/0]",
        "Action: kb_lookup[what is langgraph?]",
        "Final Answer: done",
    ]);

    let outcome = react_loop(&provider, &workspace, 5, 3).run("try things").await;

    assert_eq!(outcome.answer, "done");
    assert_eq!(
        outcome.tool_calls[0].observation,
        "[ERROR] calculation failed: division by zero"
    );
    assert!(outcome.tool_calls[1].observation.contains("LangGraph"));
    assert!(provider.prompts()[2].contains("Observation: [ERROR] calculation failed"));
}
