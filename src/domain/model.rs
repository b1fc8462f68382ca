use crate::utils::error::{HookError, Result};
use serde::Deserialize;

pub const CHALLENGE_PREFIX: &str = "_acme-challenge.";
pub const ARGS_PER_DOMAIN: usize = 3;

/// Hook names dehydrated passes as the first argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOperation {
    DeployChallenge,
    CleanChallenge,
    /// Any other hook (`deploy_cert`, `startup_hook`, ...). These are ignored.
    Unhandled(String),
}

impl HookOperation {
    pub fn parse(name: &str) -> Self {
        match name {
            "deploy_challenge" => HookOperation::DeployChallenge,
            "clean_challenge" => HookOperation::CleanChallenge,
            other => HookOperation::Unhandled(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HookOperation::DeployChallenge => "deploy_challenge",
            HookOperation::CleanChallenge => "clean_challenge",
            HookOperation::Unhandled(name) => name,
        }
    }
}

impl std::fmt::Display for HookOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub domain: String,
    /// Passed by dehydrated for HTTP-01; unused for DNS-01.
    pub token_filename: String,
    pub token_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

fn normalize(domain: &str) -> &str {
    domain.trim_end_matches('.')
}

/// Parent zone of `domain`: its last two labels.
pub fn zone_from_domain(domain: &str) -> Result<String> {
    let name = normalize(domain);
    let labels: Vec<&str> = name.split('.').collect();

    if labels.iter().any(|label| label.is_empty()) {
        return Err(HookError::InvalidDomainError {
            domain: domain.to_string(),
            reason: "empty label".to_string(),
        });
    }
    if labels.len() < 2 {
        return Err(HookError::InvalidDomainError {
            domain: domain.to_string(),
            reason: "no parent zone".to_string(),
        });
    }

    Ok(labels[labels.len() - 2..].join("."))
}

pub fn challenge_record_name(domain: &str) -> String {
    format!("{}{}", CHALLENGE_PREFIX, normalize(domain))
}

/// Groups `args` into `(domain, token_filename, token_value)` triples.
pub fn parse_challenges(args: &[String]) -> Vec<Challenge> {
    let chunks = args.chunks_exact(ARGS_PER_DOMAIN);
    let leftover = chunks.remainder();
    if !leftover.is_empty() {
        tracing::warn!(
            "Ignoring {} trailing argument(s) that do not form a full domain group: {:?}",
            leftover.len(),
            leftover
        );
    }

    chunks
        .map(|group| Challenge {
            domain: group[0].clone(),
            token_filename: group[1].clone(),
            token_value: group[2].clone(),
        })
        .collect()
}
