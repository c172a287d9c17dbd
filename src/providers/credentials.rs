use std::fmt;

pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
pub const SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";
pub const BEDROCK_BEARER_TOKEN_VAR: &str = "AWS_BEARER_TOKEN_BEDROCK";

/// Long-term or temporary IAM credentials for SigV4 signing.
#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// How requests to Bedrock are authenticated.
#[derive(Clone)]
pub enum BedrockAuth {
    SigV4(AwsCredentials),
    /// Bedrock API key, sent as `Authorization: Bearer`.
    BearerToken(String),
}

impl BedrockAuth {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SigV4(_) => "sigv4",
            Self::BearerToken(_) => "bearer",
        }
    }
}

impl fmt::Debug for BedrockAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SigV4(creds) => f.debug_tuple("SigV4").field(creds).finish(),
            Self::BearerToken(_) => f.debug_tuple("BearerToken").field(&"[REDACTED]").finish(),
        }
    }
}

/// Resolve credentials from the process environment.
pub fn resolve_auth() -> Option<BedrockAuth> {
    resolve_auth_with(|name| std::env::var(name).ok())
}

/// A Bedrock API key wins over IAM keys when both are present. Blank values
/// count as unset.
pub fn resolve_auth_with<F>(lookup: F) -> Option<BedrockAuth>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(token) = non_empty(BEDROCK_BEARER_TOKEN_VAR) {
        return Some(BedrockAuth::BearerToken(token));
    }

    let access_key_id = non_empty(ACCESS_KEY_ID_VAR)?;
    let secret_access_key = non_empty(SECRET_ACCESS_KEY_VAR)?;
    Some(BedrockAuth::SigV4(AwsCredentials {
        access_key_id,
        secret_access_key,
        session_token: non_empty(SESSION_TOKEN_VAR),
    }))
}
