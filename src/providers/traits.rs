use crate::conversation::PromptRequest;
use crate::error::BackendError;
use async_trait::async_trait;

/// A text-generation service that completes one flattened prompt.
///
/// Exactly one attempt per call; retries are the caller's business.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Human-readable service name used in error messages.
    fn name(&self) -> &str;

    /// Identifier of the model behind this backend, shown to the user when a
    /// turn fails.
    fn model_id(&self) -> &str;

    async fn generate(&self, request: &PromptRequest) -> Result<String, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{DEFAULT_SYSTEM_PREAMBLE, History, compile};

    struct EchoBackend;

    #[async_trait]
    impl Backend for EchoBackend {
        fn name(&self) -> &str {
            "echo"
        }

        fn model_id(&self) -> &str {
            "echo-1"
        }

        async fn generate(&self, request: &PromptRequest) -> Result<String, BackendError> {
            Ok(request.rendered_prompt.clone())
        }
    }

    #[tokio::test]
    async fn backend_is_object_safe() {
        let backend: Box<dyn Backend> = Box::new(EchoBackend);
        let request = compile(&History::new(), DEFAULT_SYSTEM_PREAMBLE);

        let reply = backend.generate(&request).await.unwrap();

        assert_eq!(reply, request.rendered_prompt);
        assert_eq!(backend.model_id(), "echo-1");
    }
}
