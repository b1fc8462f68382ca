pub mod file_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_range, validate_record_ttl, validate_required_string, validate_url, Validate,
};
use clap::Parser;
use file_config::FileConfig;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
pub const DEFAULT_PROPAGATION_DELAY_SECS: u64 = 30;
pub const DEFAULT_RECORD_TTL: u32 = 120;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Parser)]
#[command(name = "dehydrated-cloudflare-hook")]
#[command(about = "dehydrated hook answering DNS-01 challenges with Cloudflare TXT records")]
#[command(version)]
pub struct CliConfig {
    #[arg(long, env = "CF_API_EMAIL", hide_env_values = true)]
    pub email: Option<String>,

    #[arg(long, env = "CF_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "CF_API_BASE_URL")]
    pub api_base_url: Option<String>,

    #[arg(long, env = "CF_PROPAGATION_DELAY", help = "Seconds to wait after deploying records")]
    pub propagation_delay: Option<u64>,

    #[arg(long, env = "CF_RECORD_TTL")]
    pub record_ttl: Option<u32>,

    #[arg(long, env = "CF_REQUEST_TIMEOUT", help = "HTTP request timeout in seconds")]
    pub request_timeout: Option<u64>,

    #[arg(long, env = "CF_HOOK_CONFIG", help = "Optional TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Hook name passed by dehydrated (deploy_challenge, clean_challenge, ...)
    pub operation: String,

    /// Groups of `<domain> <token_filename> <token_value>`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Fully resolved settings for one hook invocation.
#[derive(Debug, Clone)]
pub struct HookSettings {
    pub email: String,
    pub api_key: String,
    pub api_base_url: String,
    pub propagation_delay: Duration,
    pub record_ttl: u32,
    pub request_timeout: Duration,
}

impl CliConfig {
    /// Merges flags and environment over the optional settings file, then validates.
    pub fn resolve(&self) -> Result<HookSettings> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                FileConfig::from_file(path)?
            }
            None => FileConfig::default(),
        };
        self.merge(file)
    }

    fn merge(&self, file: FileConfig) -> Result<HookSettings> {
        let email = self.email.clone().or(file.cloudflare.email);
        let api_key = self.api_key.clone().or(file.cloudflare.api_key);
        let email = validate_required_string("CF_API_EMAIL", &email)?.to_string();
        let api_key = validate_required_string("CF_API_KEY", &api_key)?.to_string();

        let settings = HookSettings {
            email,
            api_key,
            api_base_url: self
                .api_base_url
                .clone()
                .or(file.cloudflare.base_url)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            propagation_delay: Duration::from_secs(
                self.propagation_delay
                    .or(file.challenge.propagation_delay_seconds)
                    .unwrap_or(DEFAULT_PROPAGATION_DELAY_SECS),
            ),
            record_ttl: self
                .record_ttl
                .or(file.challenge.record_ttl)
                .unwrap_or(DEFAULT_RECORD_TTL),
            request_timeout: Duration::from_secs(
                self.request_timeout
                    .or(file.cloudflare.request_timeout_seconds)
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        };

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for HookSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_record_ttl("record_ttl", self.record_ttl)?;
        validate_range("propagation_delay", self.propagation_delay.as_secs(), 0, 3600)?;
        validate_range("request_timeout", self.request_timeout.as_secs(), 1, 600)?;
        Ok(())
    }
}
