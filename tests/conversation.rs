//! End-to-end conversation properties through the public API.

use async_trait::async_trait;
use std::sync::Mutex;
use titanchat::conversation::{
    ASSISTANT_CUE, DEFAULT_SYSTEM_PREAMBLE, GenerationConfig, USER_STOP_SEQUENCE, compile_with,
};
use titanchat::{
    Backend, BackendError, ErrorPolicy, History, PromptRequest, Role, Session, SessionState,
    TurnOutcome, compile,
};

#[derive(Default)]
struct CountingBackend {
    fail: bool,
    calls: Mutex<usize>,
}

#[async_trait]
impl Backend for CountingBackend {
    fn name(&self) -> &str {
        "counting"
    }

    fn model_id(&self) -> &str {
        "amazon.titan-text-express-v1"
    }

    async fn generate(&self, _request: &PromptRequest) -> Result<String, BackendError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            Err(BackendError::Transport {
                provider: "Amazon Bedrock".into(),
                message: "connection reset".into(),
            })
        } else {
            Ok("Hello!".into())
        }
    }
}

fn sample_histories() -> Vec<History> {
    let mut out = vec![History::new()];
    let mut h = History::new();
    h.append(Role::User, "Hi");
    out.push(h.clone());
    h.append(Role::Assistant, "Hello!");
    h.append(Role::User, "What's 2+2?");
    out.push(h.clone());
    h.append(Role::Assistant, "4\n\nAnything else?");
    out.push(h);
    out
}

#[test]
fn scenario_one_prompt_layout() {
    let mut history = History::new();
    history.append(Role::User, "Hi");

    let request = compile(&history, DEFAULT_SYSTEM_PREAMBLE);

    assert_eq!(
        request.rendered_prompt,
        format!("{DEFAULT_SYSTEM_PREAMBLE}\nUser: Hi\nAssistant:")
    );
}

#[test]
fn scenario_two_lines_appear_in_order_before_cue() {
    let mut history = History::new();
    history.append(Role::User, "Hi");
    history.append(Role::Assistant, "Hello!");
    history.append(Role::User, "What's 2+2?");

    let lines: Vec<String> = history.render().collect();
    assert_eq!(lines.len(), 3);

    let prompt = compile(&history, DEFAULT_SYSTEM_PREAMBLE).rendered_prompt;
    let body = prompt
        .strip_prefix(DEFAULT_SYSTEM_PREAMBLE)
        .and_then(|rest| rest.strip_suffix(ASSISTANT_CUE))
        .unwrap();
    assert_eq!(body, format!("\n{}\n", lines.join("\n")));
}

#[test]
fn every_prompt_ends_with_cue_and_carries_user_stop() {
    for history in sample_histories() {
        let request = compile(&history, DEFAULT_SYSTEM_PREAMBLE);
        assert!(request.rendered_prompt.ends_with(ASSISTANT_CUE));
        assert!(
            request
                .config
                .stop_sequences()
                .iter()
                .any(|s| s == USER_STOP_SEQUENCE)
        );
    }
}

#[test]
fn compile_is_byte_identical_across_calls() {
    for history in sample_histories() {
        let config = GenerationConfig::new(512, 0.0, 1.0, vec![USER_STOP_SEQUENCE.into()]).unwrap();
        let a = compile_with(&history, DEFAULT_SYSTEM_PREAMBLE, config.clone());
        let b = compile_with(&history, DEFAULT_SYSTEM_PREAMBLE, config);
        assert_eq!(a.rendered_prompt.as_bytes(), b.rendered_prompt.as_bytes());
    }
}

#[tokio::test]
async fn retention_on_failure() {
    let mut session = Session::new(
        CountingBackend {
            fail: true,
            ..CountingBackend::default()
        },
        DEFAULT_SYSTEM_PREAMBLE,
        ErrorPolicy::Continue,
    );

    let outcome = session.handle_input("Hi").await;

    assert!(matches!(outcome, TurnOutcome::Failed(_)));
    assert_eq!(session.state(), SessionState::AwaitingInput);
    let lines: Vec<String> = session.history().render().collect();
    assert_eq!(lines, vec!["User: Hi"]);
}

#[tokio::test]
async fn mixed_case_exit_makes_no_call_and_no_mutation() {
    let mut session = Session::new(
        CountingBackend::default(),
        DEFAULT_SYSTEM_PREAMBLE,
        ErrorPolicy::Continue,
    );

    let outcome = session.handle_input("Exit").await;

    assert!(matches!(outcome, TurnOutcome::Exited));
    assert_eq!(session.state(), SessionState::Terminated);
    assert_eq!(*session.backend().calls.lock().unwrap(), 0);
    assert!(session.history().is_empty());
}
