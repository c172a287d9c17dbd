pub mod bedrock;
pub mod credentials;
pub mod factory;
pub mod http_client;
pub mod scrub;
pub mod sigv4;
pub mod traits;

pub use bedrock::BedrockProvider;
pub use credentials::{AwsCredentials, BedrockAuth};
pub use factory::{create_backend, create_backend_with_auth};
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::Backend;
