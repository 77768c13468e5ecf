//! Single-pass conversation graph: router, knowledge lookup, generation,
//! approval gate, persistence and summarization.

pub mod executor;
pub mod router;
pub mod session;
pub mod stages;
pub mod state;

pub use executor::{Edge, Graph, GraphBuilder, PassOutcome, Stage, Target};
pub use router::{RouterKeywords, route, router_stage};
pub use session::{GraphSession, TurnReply};
pub use stages::StageContext;
pub use state::{ConversationState, Message, Role};
