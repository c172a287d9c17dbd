use super::history::History;
use crate::error::ConfigError;

/// Stock preamble. Titan has no system role, so this is simply the first
/// text of every prompt.
pub const DEFAULT_SYSTEM_PREAMBLE: &str = "You are a helpful, concise, and knowledgeable assistant. \
Use the conversation history to answer naturally.\n";

/// Trailing cue telling the model to continue as the assistant.
pub const ASSISTANT_CUE: &str = "Assistant:";

/// Halts generation as soon as the model starts inventing the next user turn.
pub const USER_STOP_SEQUENCE: &str = "User:";

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 512;
pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_TOP_P: f64 = 1.0;

/// Sampling parameters sent with every request.
///
/// Built once per session and never changed at runtime. Values other than
/// the defaults go through [`GenerationConfig::new`], which enforces
/// `max_output_tokens > 0` and `temperature`, `top_p` in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f64,
    top_p: f64,
    stop_sequences: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            stop_sequences: vec![USER_STOP_SEQUENCE.to_string()],
        }
    }
}

impl GenerationConfig {
    pub fn new(
        max_output_tokens: u32,
        temperature: f64,
        top_p: f64,
        stop_sequences: Vec<String>,
    ) -> Result<Self, ConfigError> {
        if max_output_tokens == 0 {
            return Err(ConfigError::Validation(
                "max_output_tokens must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(ConfigError::Validation(format!(
                "temperature must be within [0, 1], got {temperature}"
            )));
        }
        if !(0.0..=1.0).contains(&top_p) {
            return Err(ConfigError::Validation(format!(
                "top_p must be within [0, 1], got {top_p}"
            )));
        }
        Ok(Self {
            max_output_tokens,
            temperature,
            top_p,
            stop_sequences,
        })
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn top_p(&self) -> f64 {
        self.top_p
    }

    pub fn stop_sequences(&self) -> &[String] {
        &self.stop_sequences
    }

    pub fn has_user_stop(&self) -> bool {
        self.stop_sequences.iter().any(|s| s == USER_STOP_SEQUENCE)
    }
}

/// One turn's worth of backend input. Recomputed every turn, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub rendered_prompt: String,
    pub config: GenerationConfig,
}

/// Compile with the stock generation parameters.
pub fn compile(history: &History, preamble: &str) -> PromptRequest {
    compile_with(history, preamble, GenerationConfig::default())
}

/// Render `preamble`, a blank line, the history lines, and the cue:
///
/// ```text
/// {preamble}\n{line}\n{line}...\nAssistant:
/// ```
///
/// The `User:` stop sequence is added when `config` lacks it.
pub fn compile_with(
    history: &History,
    preamble: &str,
    mut config: GenerationConfig,
) -> PromptRequest {
    let conversation = history.render().collect::<Vec<_>>().join("\n");
    let rendered_prompt = format!("{preamble}\n{conversation}\n{ASSISTANT_CUE}");

    if !config.has_user_stop() {
        config.stop_sequences.push(USER_STOP_SEQUENCE.to_string());
    }

    PromptRequest {
        rendered_prompt,
        config,
    }
}
