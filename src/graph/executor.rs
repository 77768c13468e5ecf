use super::router::{route, router_stage};
use super::stages::{
    StageContext, generate_stage, persist_stage, review_stage, summarize_stage, tools_stage,
};
use super::state::ConversationState;
use crate::error::GraphError;
use std::collections::{HashMap, HashSet};

/// Nodes of the conversation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Router,
    Tools,
    Generate,
    Review,
    Persist,
    Summarize,
}

impl Stage {
    pub const ALL: [Self; 6] = [
        Self::Router,
        Self::Tools,
        Self::Generate,
        Self::Review,
        Self::Persist,
        Self::Summarize,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Stage(Stage),
    End,
}

impl From<Stage> for Target {
    fn from(stage: Stage) -> Self {
        Self::Stage(stage)
    }
}

pub type RouteFn = fn(&ConversationState) -> Stage;

#[derive(Debug, Clone)]
pub enum Edge {
    Fixed(Target),
    /// Branch chosen by `route`; it must land on one of `targets`.
    Conditional { route: RouteFn, targets: Vec<Stage> },
}

impl Edge {
    fn successors(&self) -> Vec<Target> {
        match self {
            Self::Fixed(target) => vec![*target],
            Self::Conditional { targets, .. } => {
                targets.iter().copied().map(Target::Stage).collect()
            }
        }
    }
}

/// Result of one entry-to-terminal traversal.
#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub state: ConversationState,
    /// Stages visited, in order.
    pub path: Vec<Stage>,
}

pub struct GraphBuilder {
    entry: Stage,
    edges: Vec<(Stage, Edge)>,
}

impl GraphBuilder {
    pub fn new(entry: Stage) -> Self {
        Self {
            entry,
            edges: Vec::new(),
        }
    }

    pub fn edge(mut self, from: Stage, to: impl Into<Target>) -> Self {
        self.edges.push((from, Edge::Fixed(to.into())));
        self
    }

    pub fn conditional(mut self, from: Stage, route: RouteFn, targets: &[Stage]) -> Self {
        self.edges.push((
            from,
            Edge::Conditional {
                route,
                targets: targets.to_vec(),
            },
        ));
        self
    }

    /// Check the edge table and freeze it.
    ///
    /// Every stage needs exactly one outgoing edge, the terminal state must be
    /// reachable from the entry, and no path may revisit a stage.
    pub fn compile(self) -> Result<Graph, GraphError> {
        let mut edges: HashMap<Stage, Edge> = HashMap::new();
        for (from, edge) in self.edges {
            if edges.insert(from, edge).is_some() {
                return Err(GraphError::DuplicateEdge {
                    stage: from.to_string(),
                });
            }
        }
        for stage in Stage::ALL {
            match edges.get(&stage) {
                None => {
                    return Err(GraphError::MissingEdge {
                        stage: stage.to_string(),
                    });
                }
                Some(Edge::Conditional { targets, .. }) if targets.is_empty() => {
                    return Err(GraphError::MissingEdge {
                        stage: stage.to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        let mut visiting = HashSet::new();
        let mut done = HashSet::new();
        let terminates = check_acyclic(self.entry, &edges, &mut visiting, &mut done)?;
        if !terminates {
            return Err(GraphError::Unterminated {
                entry: self.entry.to_string(),
            });
        }

        Ok(Graph {
            entry: self.entry,
            edges,
        })
    }
}

/// Depth-first walk; returns whether `End` is reachable from `stage`.
fn check_acyclic(
    stage: Stage,
    edges: &HashMap<Stage, Edge>,
    visiting: &mut HashSet<Stage>,
    done: &mut HashSet<Stage>,
) -> Result<bool, GraphError> {
    if done.contains(&stage) {
        return Ok(true);
    }
    if !visiting.insert(stage) {
        return Err(GraphError::Cycle {
            stage: stage.to_string(),
        });
    }

    let mut terminates = false;
    if let Some(edge) = edges.get(&stage) {
        for target in edge.successors() {
            terminates |= match target {
                Target::End => true,
                Target::Stage(next) => check_acyclic(next, edges, visiting, done)?,
            };
        }
    }

    visiting.remove(&stage);
    if terminates {
        done.insert(stage);
    }
    Ok(terminates)
}

/// The compiled conversation graph.
///
/// ```text
/// router ─┬─> tools ──> generate ──> review ──> persist ──> summarize ──> END
///         ├────────────> generate
///         └───────────────────────> review
/// ```
#[derive(Debug)]
pub struct Graph {
    entry: Stage,
    edges: HashMap<Stage, Edge>,
}

impl Graph {
    pub fn compile() -> Result<Self, GraphError> {
        GraphBuilder::new(Stage::Router)
            .conditional(
                Stage::Router,
                route,
                &[Stage::Tools, Stage::Review, Stage::Generate],
            )
            .edge(Stage::Tools, Stage::Generate)
            .edge(Stage::Generate, Stage::Review)
            .edge(Stage::Review, Stage::Persist)
            .edge(Stage::Persist, Stage::Summarize)
            .edge(Stage::Summarize, Target::End)
            .compile()
    }

    pub fn entry(&self) -> Stage {
        self.entry
    }

    fn next(&self, stage: Stage, state: &ConversationState) -> Target {
        match self.edges.get(&stage) {
            Some(Edge::Fixed(target)) => *target,
            Some(Edge::Conditional { route, targets }) => {
                let chosen = route(state);
                if targets.contains(&chosen) {
                    Target::Stage(chosen)
                } else {
                    tracing::warn!(stage = %stage, route = %chosen, "route outside edge table");
                    Target::End
                }
            }
            None => Target::End,
        }
    }

    /// One pass from the entry stage to the terminal state.
    pub async fn run(&self, state: ConversationState, ctx: &StageContext) -> PassOutcome {
        let mut state = state;
        let mut path = Vec::new();
        let mut current = Target::Stage(self.entry);

        while let Target::Stage(stage) = current {
            if path.contains(&stage) {
                tracing::warn!(stage = %stage, "stage revisited; ending pass");
                break;
            }
            tracing::debug!(stage = %stage, "entering stage");
            state = visit(stage, state, ctx).await;
            path.push(stage);
            current = self.next(stage, &state);
        }

        PassOutcome { state, path }
    }
}

async fn visit(stage: Stage, state: ConversationState, ctx: &StageContext) -> ConversationState {
    match stage {
        Stage::Router => router_stage(state, &ctx.keywords),
        Stage::Tools => tools_stage(state, ctx).await,
        Stage::Generate => generate_stage(state, ctx).await,
        Stage::Review => review_stage(state, ctx).await,
        Stage::Persist => persist_stage(state, ctx).await,
        Stage::Summarize => summarize_stage(state, ctx).await,
    }
}
