pub mod collect;
pub mod interface;

#[cfg(test)]
pub mod mock;

pub use collect::collect_text;
pub use interface::{
    AgentInterface, Message, TextStream, WorkflowInput, WorkflowInterface, WorkflowOutcome,
};
