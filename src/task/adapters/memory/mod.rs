//! In-memory task adapters.

mod completion;
mod task;

pub use completion::ScriptedCompletionClient;
pub use task::InMemoryTaskRepository;
