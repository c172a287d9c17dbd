//! The turn orchestrator: one owned history, one backend, one turn at a time.

pub mod input;
pub mod terminal;

pub use input::{EXIT_SENTINEL, Input, parse_input};
pub use terminal::{SessionEnd, run_once, run_repl};

use crate::config::ErrorPolicy;
use crate::conversation::{GenerationConfig, History, Role, compile_with};
use crate::error::{BackendError, InputError};
use crate::providers::Backend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    GeneratingResponse,
    Terminated,
}

/// What one call to [`Session::handle_input`] did.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The exit sentinel was entered; nothing was sent or recorded.
    Exited,
    /// The backend answered; the reply is now the last utterance.
    Replied(String),
    /// The backend failed. The user turn stays in history without a reply.
    Failed(BackendError),
    /// Input was refused before reaching history.
    Rejected(InputError),
    /// The session had already terminated.
    Ignored,
}

pub struct Session<B: Backend> {
    backend: B,
    history: History,
    preamble: String,
    generation: GenerationConfig,
    on_backend_error: ErrorPolicy,
    state: SessionState,
}

impl<B: Backend> Session<B> {
    pub fn new(backend: B, preamble: impl Into<String>, on_backend_error: ErrorPolicy) -> Self {
        Self {
            backend,
            history: History::new(),
            preamble: preamble.into(),
            generation: GenerationConfig::default(),
            on_backend_error,
            state: SessionState::AwaitingInput,
        }
    }

    pub fn with_generation_config(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn model_id(&self) -> &str {
        self.backend.model_id()
    }

    /// End the session without a turn, e.g. when input runs out.
    pub fn terminate(&mut self) {
        self.state = SessionState::Terminated;
    }

    /// Run one full turn for a line of user input.
    pub async fn handle_input(&mut self, raw: &str) -> TurnOutcome {
        if self.state == SessionState::Terminated {
            return TurnOutcome::Ignored;
        }

        let text = match parse_input(raw) {
            Ok(Input::Exit) => {
                tracing::debug!(turns = self.history.len(), "exit requested");
                self.state = SessionState::Terminated;
                return TurnOutcome::Exited;
            }
            Ok(Input::Message(text)) => text,
            Err(err) => return TurnOutcome::Rejected(err),
        };

        self.history.append(Role::User, text);
        self.state = SessionState::GeneratingResponse;

        let request = compile_with(&self.history, &self.preamble, self.generation.clone());
        tracing::debug!(
            utterances = self.history.len(),
            prompt_bytes = request.rendered_prompt.len(),
            "compiled prompt"
        );

        let result = self
            .backend
            .generate(&request)
            .await
            .and_then(|reply| {
                let reply = reply.trim();
                if reply.is_empty() {
                    Err(BackendError::MalformedResponse("empty reply".into()))
                } else {
                    Ok(reply.to_string())
                }
            });

        match result {
            Ok(reply) => {
                self.history.append(Role::Assistant, reply.clone());
                self.state = SessionState::AwaitingInput;
                TurnOutcome::Replied(reply)
            }
            Err(err) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    model = self.backend.model_id(),
                    transient = err.is_transient(),
                    policy = ?self.on_backend_error,
                    "turn failed: {err}"
                );
                self.state = match self.on_backend_error {
                    ErrorPolicy::Continue => SessionState::AwaitingInput,
                    ErrorPolicy::Exit => SessionState::Terminated,
                };
                TurnOutcome::Failed(err)
            }
        }
    }
}
