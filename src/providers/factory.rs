use super::bedrock::BedrockProvider;
use super::credentials::{BedrockAuth, resolve_auth};
use crate::config::Config;

/// Build the Bedrock backend from resolved configuration and the process
/// environment's AWS credentials.
pub fn create_backend(config: &Config) -> anyhow::Result<BedrockProvider> {
    create_backend_with_auth(config, resolve_auth())
}

pub fn create_backend_with_auth(
    config: &Config,
    auth: Option<BedrockAuth>,
) -> anyhow::Result<BedrockProvider> {
    if auth.is_none() {
        tracing::warn!("no AWS credentials found; every turn will fail until they are set");
    }

    let provider = BedrockProvider::new(
        &config.region,
        &config.model_id,
        config.endpoint_url.as_deref(),
        auth,
        config.request_timeout_secs,
    )?;
    tracing::info!(
        model = %config.model_id,
        region = %config.region,
        url = provider.invoke_url(),
        "backend ready"
    );
    Ok(provider)
}
