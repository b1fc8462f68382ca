pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::CloudflareClient;
pub use config::{CliConfig, HookSettings};
pub use core::{ChallengeHook, HookOutcome};
pub use domain::model::HookOperation;
pub use utils::error::{HookError, Result};
