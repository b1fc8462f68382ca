use crate::config::HookSettings;
use crate::domain::model::{DnsRecord, Zone};
use crate::domain::ports::DnsProvider;
use crate::utils::error::{HookError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Envelope wrapping every Cloudflare v4 response.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: i64,
    message: String,
}

#[derive(Debug, Serialize)]
struct CreateRecordRequest<'a> {
    #[serde(rename = "type")]
    record_type: &'a str,
    name: &'a str,
    content: &'a str,
    ttl: u32,
}

const MAX_ERROR_BODY: usize = 512;

/// Cuts non-JSON error bodies (usually HTML pages) down to a loggable size.
fn truncate_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes total)", &body[..end], body.len())
}

pub struct CloudflareClient {
    client: Client,
    base_url: String,
    email: String,
    api_key: String,
    record_ttl: u32,
}

impl CloudflareClient {
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_key: impl Into<String>,
        record_ttl: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dehydrated-cloudflare-hook/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            email: email.into(),
            api_key: api_key.into(),
            record_ttl,
        })
    }

    pub fn from_settings(settings: &HookSettings) -> Result<Self> {
        Self::new(
            settings.api_base_url.clone(),
            settings.email.clone(),
            settings.api_key.clone(),
            settings.record_ttl,
            settings.request_timeout,
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Auth-Email", &self.email)
            .header("X-Auth-Key", &self.api_key)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        tracing::debug!("Cloudflare API response status: {}", status);

        let body = response.text().await?;
        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(HookError::SerializationError(e)),
            Err(_) => {
                return Err(HookError::HttpStatusError {
                    status: status.as_u16(),
                    body: truncate_body(body),
                })
            }
        };

        if !envelope.success {
            let (code, message) = envelope
                .errors
                .into_iter()
                .next()
                .map(|e| (e.code, e.message))
                .unwrap_or((0, "unknown error".to_string()));
            return Err(HookError::ApiError { code, message });
        }

        envelope.result.ok_or_else(|| HookError::ApiError {
            code: 0,
            message: "response carried no result".to_string(),
        })
    }
}

#[async_trait]
impl DnsProvider for CloudflareClient {
    async fn zone_id_by_name(&self, name: &str) -> Result<String> {
        tracing::debug!("Looking up zone {}", name);
        let request = self
            .client
            .get(self.url("/zones"))
            .query(&[("name", name)]);
        let zones: Vec<Zone> = self.send(request).await?;

        zones
            .into_iter()
            .next()
            .map(|zone| zone.id)
            .ok_or_else(|| HookError::ZoneNotFoundError {
                zone: name.to_string(),
            })
    }

    async fn create_txt_record(&self, zone_id: &str, name: &str, content: &str) -> Result<DnsRecord> {
        tracing::debug!("Creating TXT record {} in zone {}", name, zone_id);
        let body = CreateRecordRequest {
            record_type: "TXT",
            name,
            content,
            ttl: self.record_ttl,
        };
        let request = self
            .client
            .post(self.url(&format!("/zones/{}/dns_records", zone_id)))
            .json(&body);
        self.send(request).await
    }

    async fn list_txt_records(&self, zone_id: &str, name: &str) -> Result<Vec<DnsRecord>> {
        tracing::debug!("Listing TXT records {} in zone {}", name, zone_id);
        let request = self
            .client
            .get(self.url(&format!("/zones/{}/dns_records", zone_id)))
            .query(&[("type", "TXT"), ("name", name)]);
        self.send(request).await
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        tracing::debug!("Deleting record {} in zone {}", record_id, zone_id);
        let request = self.client.delete(self.url(&format!(
            "/zones/{}/dns_records/{}",
            zone_id, record_id
        )));
        let _: IgnoredAny = self.send(request).await?;
        Ok(())
    }
}
