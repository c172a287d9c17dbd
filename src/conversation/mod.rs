//! Conversation state and prompt assembly.
//!
//! Titan Text has no notion of roles or sessions, so the whole exchange is
//! flattened into one prompt per turn: preamble, every recorded utterance,
//! then the `Assistant:` cue.

pub mod history;
pub mod prompt;

pub use history::{History, Role, Utterance};
pub use prompt::{
    ASSISTANT_CUE, DEFAULT_SYSTEM_PREAMBLE, GenerationConfig, PromptRequest, USER_STOP_SEQUENCE,
    compile, compile_with,
};
