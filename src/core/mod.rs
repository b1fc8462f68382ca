pub mod hook;

pub use crate::domain::model::{Challenge, DnsRecord, HookOperation};
pub use crate::domain::ports::DnsProvider;
pub use crate::utils::error::Result;
pub use hook::{ChallengeHook, HookOutcome};
