use crate::domain::model::DnsRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// DNS provider operations needed to publish and withdraw challenge records.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    async fn zone_id_by_name(&self, name: &str) -> Result<String>;

    async fn create_txt_record(&self, zone_id: &str, name: &str, content: &str) -> Result<DnsRecord>;

    async fn list_txt_records(&self, zone_id: &str, name: &str) -> Result<Vec<DnsRecord>>;

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
}
