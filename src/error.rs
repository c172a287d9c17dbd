use std::path::PathBuf;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `titanchat`.
///
/// The conversation core (history and prompt compiler) never fails. Backend
/// failures are turn outcomes the session reports itself, and configuration
/// fails as [`ConfigError`] before a session exists, so what is left here is
/// rejected one-shot input and terminal I/O.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("input: {0}")]
    Input(#[from] InputError),

    #[error("terminal io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Input errors ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("message is empty")]
    Empty,

    #[error("input is not valid UTF-8")]
    InvalidUtf8,
}

// ─── Backend errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{provider} authentication failed: {message}")]
    Auth { provider: String, message: String },

    #[error("{provider} throttled the request: {message}")]
    Throttled { provider: String, message: String },

    #[error("model {model} not found on {provider}")]
    ModelNotFound { provider: String, model: String },

    #[error("{provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("{provider} transport error: {message}")]
    Transport { provider: String, message: String },

    /// The backend answered 2xx but the body lacked `results[0].outputText`
    /// or could not be decoded at all.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl BackendError {
    /// Throttling and transport hiccups are the failures a later turn may
    /// not hit again.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Throttled { .. } | Self::Transport { .. })
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = ConfigError::Validation("bad region".into());
        assert!(err.to_string().contains("validation failed"));
        assert!(err.to_string().contains("bad region"));
    }

    #[test]
    fn config_io_error_names_the_file() {
        let err = ConfigError::Io {
            path: PathBuf::from("/etc/titanchat/config.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "/etc/titanchat/config.toml: denied");
    }

    #[test]
    fn throttled_names_provider() {
        let err = BackendError::Throttled {
            provider: "Amazon Bedrock".into(),
            message: "slow down".into(),
        };
        assert!(err.to_string().contains("Amazon Bedrock"));
        assert!(err.to_string().contains("slow down"));
    }

    #[test]
    fn input_error_wraps_into_chat_error() {
        let err: ChatError = InputError::Empty.into();
        assert!(matches!(err, ChatError::Input(InputError::Empty)));
        assert_eq!(err.to_string(), "input: message is empty");
    }

    #[test]
    fn transient_classification() {
        let throttled = BackendError::Throttled {
            provider: "p".into(),
            message: "m".into(),
        };
        let auth = BackendError::Auth {
            provider: "p".into(),
            message: "m".into(),
        };
        assert!(throttled.is_transient());
        assert!(!auth.is_transient());
        assert!(!BackendError::MalformedResponse("x".into()).is_transient());
    }

    #[test]
    fn input_error_displays() {
        assert_eq!(InputError::Empty.to_string(), "message is empty");
        assert_eq!(
            InputError::InvalidUtf8.to_string(),
            "input is not valid UTF-8"
        );
    }
}
