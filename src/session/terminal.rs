//! Line-oriented terminal front end for a [`Session`].

use super::{Session, SessionState, TurnOutcome};
use crate::error::{ChatError, InputError, Result};
use crate::providers::Backend;
use std::process::ExitCode;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const GREETING: &str = "🤖 Bot: Hello! I am your chatbot. Type 'exit' to quit.\n\n";
pub const INPUT_PROMPT: &str = "User: ";
pub const FAREWELL: &str = "👋 Bot: Goodbye!\n";

/// How a terminal session finished once its output has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user left, input ran out, or the single message was answered.
    Completed,
    /// A backend failure ended the session; the error line is already printed.
    BackendFailed,
}

impl SessionEnd {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Completed => ExitCode::SUCCESS,
            Self::BackendFailed => ExitCode::FAILURE,
        }
    }
}

async fn write_str<W>(out: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

fn failure_line(model_id: &str, err: &impl std::fmt::Display) -> String {
    format!("❌ ERROR invoking {model_id}: {err}\n")
}

/// Interactive loop: prompt, read a line, run the turn, print the outcome.
///
/// Lines that are not valid UTF-8 are rejected like blank ones. Only
/// terminal I/O failures come back as `Err`.
pub async fn run_repl<B, R, W>(
    session: &mut Session<B>,
    mut input: R,
    out: &mut W,
) -> Result<SessionEnd>
where
    B: Backend,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    write_str(out, GREETING).await?;

    loop {
        write_str(out, INPUT_PROMPT).await?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            tracing::debug!("input closed");
            session.terminate();
            write_str(out, "\n").await?;
            write_str(out, FAREWELL).await?;
            return Ok(SessionEnd::Completed);
        }

        let outcome = match std::str::from_utf8(&buf) {
            Ok(line) => session.handle_input(line).await,
            Err(err) => {
                tracing::debug!(bytes = buf.len(), "undecodable input line: {err}");
                TurnOutcome::Rejected(InputError::InvalidUtf8)
            }
        };

        match outcome {
            TurnOutcome::Exited => {
                write_str(out, FAREWELL).await?;
                return Ok(SessionEnd::Completed);
            }
            TurnOutcome::Replied(reply) => {
                write_str(out, &format!("\n🤖 Bot: {reply}\n\n")).await?;
            }
            TurnOutcome::Rejected(err) => {
                write_str(
                    out,
                    &format!("⚠️  {err}; type something, or 'exit' to quit.\n"),
                )
                .await?;
            }
            TurnOutcome::Failed(err) => {
                write_str(out, &failure_line(session.model_id(), &err)).await?;
                if session.state() == SessionState::Terminated {
                    return Ok(SessionEnd::BackendFailed);
                }
            }
            TurnOutcome::Ignored => return Ok(SessionEnd::Completed),
        }
    }
}

/// One turn for `--message`: print just the reply and stop.
pub async fn run_once<B, W>(
    session: &mut Session<B>,
    message: &str,
    out: &mut W,
) -> Result<SessionEnd>
where
    B: Backend,
    W: AsyncWrite + Unpin,
{
    let outcome = session.handle_input(message).await;
    session.terminate();

    match outcome {
        TurnOutcome::Replied(reply) => {
            write_str(out, &format!("{reply}\n")).await?;
            Ok(SessionEnd::Completed)
        }
        TurnOutcome::Exited | TurnOutcome::Ignored => Ok(SessionEnd::Completed),
        TurnOutcome::Rejected(err) => Err(ChatError::Input(err)),
        TurnOutcome::Failed(err) => {
            write_str(out, &failure_line(session.model_id(), &err)).await?;
            Ok(SessionEnd::BackendFailed)
        }
    }
}
