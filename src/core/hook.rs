use crate::domain::model::{
    challenge_record_name, parse_challenges, zone_from_domain, Challenge, HookOperation,
};
use crate::domain::ports::DnsProvider;
use crate::utils::error::Result;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// Number of TXT records created.
    Deployed(usize),
    /// Number of TXT records deleted.
    Cleaned(usize),
    Ignored,
}

/// Publishes and withdraws `_acme-challenge` TXT records, one domain at a time.
pub struct ChallengeHook<P: DnsProvider> {
    provider: P,
    propagation_delay: Duration,
}

impl<P: DnsProvider> ChallengeHook<P> {
    pub fn new(provider: P, propagation_delay: Duration) -> Self {
        Self {
            provider,
            propagation_delay,
        }
    }

    pub async fn run(&self, operation: &HookOperation, args: &[String]) -> Result<HookOutcome> {
        match operation {
            HookOperation::DeployChallenge => {
                let challenges = parse_challenges(args);
                self.deploy_challenges(&challenges)
                    .await
                    .map(HookOutcome::Deployed)
            }
            HookOperation::CleanChallenge => {
                let challenges = parse_challenges(args);
                self.clean_challenges(&challenges)
                    .await
                    .map(HookOutcome::Cleaned)
            }
            HookOperation::Unhandled(name) => {
                tracing::debug!("Ignoring hook {}", name);
                Ok(HookOutcome::Ignored)
            }
        }
    }

    /// Creates every record, then waits for propagation before returning.
    pub async fn deploy_challenges(&self, challenges: &[Challenge]) -> Result<usize> {
        for challenge in challenges {
            self.deploy_challenge(challenge).await?;
        }

        if !self.propagation_delay.is_zero() {
            tracing::info!(
                "Waiting {:?} for DNS propagation",
                self.propagation_delay
            );
            tokio::time::sleep(self.propagation_delay).await;
        }

        Ok(challenges.len())
    }

    async fn deploy_challenge(&self, challenge: &Challenge) -> Result<()> {
        let zone = zone_from_domain(&challenge.domain)?;
        let zone_id = self.provider.zone_id_by_name(&zone).await?;
        let name = challenge_record_name(&challenge.domain);

        let record = self
            .provider
            .create_txt_record(&zone_id, &name, &challenge.token_value)
            .await?;
        tracing::info!("Deployed TXT record {} ({})", name, record.id);
        Ok(())
    }

    pub async fn clean_challenges(&self, challenges: &[Challenge]) -> Result<usize> {
        let mut deleted = 0;
        for challenge in challenges {
            deleted += self.clean_challenge(challenge).await?;
        }
        Ok(deleted)
    }

    async fn clean_challenge(&self, challenge: &Challenge) -> Result<usize> {
        let zone = zone_from_domain(&challenge.domain)?;
        let zone_id = self.provider.zone_id_by_name(&zone).await?;
        let name = challenge_record_name(&challenge.domain);

        let records = self.provider.list_txt_records(&zone_id, &name).await?;
        if records.is_empty() {
            tracing::warn!("No TXT records named {} to clean", name);
        }

        for record in &records {
            self.provider.delete_record(&zone_id, &record.id).await?;
            tracing::info!("Removed TXT record {} ({})", name, record.id);
        }
        Ok(records.len())
    }
}
