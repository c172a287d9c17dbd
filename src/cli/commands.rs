use crate::config::{Config, ErrorPolicy};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// `titanchat` - chat with Amazon Titan Text from the terminal.
#[derive(Parser, Debug)]
#[command(name = "titanchat")]
#[command(version)]
#[command(about = "A terminal chatbot for Amazon Titan Text on Bedrock.", long_about = None)]
pub struct Cli {
    /// Send a single message, print the reply, and exit
    #[arg(short, long)]
    pub message: Option<String>,

    /// Bedrock model id (default: amazon.titan-text-express-v1)
    #[arg(long)]
    pub model: Option<String>,

    /// AWS region (default: us-east-1)
    #[arg(long)]
    pub region: Option<String>,

    /// Override the Bedrock runtime endpoint URL
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// What a failed backend call does to the session
    #[arg(long, value_enum)]
    pub on_error: Option<ErrorPolicy>,

    /// Config file to use instead of ~/.titanchat/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Flags win over environment and file settings.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.model_id.clone_from(model);
        }
        if let Some(region) = &self.region {
            config.region.clone_from(region);
        }
        if let Some(endpoint) = &self.endpoint_url {
            config.endpoint_url = Some(endpoint.clone());
        }
        if let Some(policy) = self.on_error {
            config.session.on_backend_error = policy;
        }
    }

    /// Effective log level: `-v` flags beat the configured level.
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        match self.verbose {
            0 => configured,
            1 => "info",
            _ => "debug",
        }
    }
}
