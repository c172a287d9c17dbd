use crate::conversation::DEFAULT_SYSTEM_PREAMBLE;
use crate::error::ConfigError;
use crate::providers::bedrock::{DEFAULT_MODEL_ID, DEFAULT_REGION};
use crate::providers::http_client::DEFAULT_REQUEST_TIMEOUT_SECS;
use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

// ── Top-level config ──────────────────────────────────────────────

/// Runtime settings. Generation parameters are absent: they are
/// fixed per build, see `conversation::GenerationConfig`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// AWS region hosting the Bedrock runtime endpoint
    #[serde(default = "default_region")]
    pub region: String,

    /// Bedrock model identifier
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Override for the runtime endpoint (VPC endpoints, local mocks)
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Text placed verbatim at the top of every prompt
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// HTTP timeout for one backend call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log level when no `-v` flag is given
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub session: SessionConfig,
}

fn default_region() -> String {
    DEFAULT_REGION.into()
}

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.into()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PREAMBLE.into()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            region: default_region(),
            model_id: default_model_id(),
            endpoint_url: None,
            system_prompt: default_system_prompt(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
            session: SessionConfig::default(),
        }
    }
}

// ── Session ───────────────────────────────────────────────────────

/// What a failed backend call does to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Report the failure and wait for the next input.
    #[default]
    Continue,
    /// Report the failure and end the program with a failure status.
    Exit,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    #[serde(default)]
    pub on_backend_error: ErrorPolicy,
}

// ── Loading ───────────────────────────────────────────────────────

impl Config {
    /// Load `~/.titanchat/config.toml`, writing defaults on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let titanchat_dir = home.join(".titanchat");

        if !titanchat_dir.exists() {
            fs::create_dir_all(&titanchat_dir).context("Failed to create .titanchat directory")?;
        }

        Ok(Self::load_or_init_at(&titanchat_dir.join("config.toml"))?)
    }

    /// Load from an explicit path; a missing file is created with defaults.
    pub fn load_or_init_at(config_path: &Path) -> std::result::Result<Self, ConfigError> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            })?;
            let mut config: Config = toml::from_str(&contents).map_err(|e| {
                ConfigError::Load(format!("{}: {e}", config_path.display()))
            })?;
            config.config_path = config_path.to_path_buf();
            config.validate()?;
            Ok(config)
        } else {
            let config = Self {
                config_path: config_path.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    /// Apply environment variable overrides to config
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_with(|name| std::env::var(name).ok());
    }

    pub fn apply_env_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        // Model: TITANCHAT_MODEL
        if let Some(model) = non_empty("TITANCHAT_MODEL") {
            self.model_id = model;
        }

        // Region: TITANCHAT_REGION, then the standard AWS variables
        if let Some(region) = non_empty("TITANCHAT_REGION")
            .or_else(|| non_empty("AWS_REGION"))
            .or_else(|| non_empty("AWS_DEFAULT_REGION"))
        {
            self.region = region;
        }

        // Endpoint: TITANCHAT_ENDPOINT
        if let Some(endpoint) = non_empty("TITANCHAT_ENDPOINT") {
            self.endpoint_url = Some(endpoint);
        }

        // Timeout: TITANCHAT_TIMEOUT_SECS (ignored unless a positive integer)
        if let Some(secs) = non_empty("TITANCHAT_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|s| *s > 0)
        {
            self.request_timeout_secs = secs;
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.region.trim().is_empty() {
            return Err(ConfigError::Validation("region must not be empty".into()));
        }
        if self.model_id.trim().is_empty() {
            return Err(ConfigError::Validation("model_id must not be empty".into()));
        }
        if self.system_prompt.trim().is_empty() {
            return Err(ConfigError::Validation(
                "system_prompt must not be empty".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be positive".into(),
            ));
        }
        if self.log_level.trim().parse::<Level>().is_err() {
            return Err(ConfigError::Validation(format!(
                "log_level must be one of trace, debug, info, warn, error; got {:?}",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn save(&self) -> std::result::Result<(), ConfigError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Load(format!("cannot serialize config: {e}")))?;
        fs::write(&self.config_path, toml_str).map_err(|source| ConfigError::Io {
            path: self.config_path.clone(),
            source,
        })
    }
}
