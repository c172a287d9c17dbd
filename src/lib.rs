#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod providers;
pub mod session;

pub use cli::Cli;
pub use config::{Config, ErrorPolicy};
pub use conversation::{GenerationConfig, History, PromptRequest, Role, compile};
pub use error::{BackendError, ChatError, ConfigError, InputError};
pub use providers::{Backend, BedrockProvider};
pub use session::{Session, SessionEnd, SessionState, TurnOutcome};
