use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use backend_domain::ports::PriceSource;
use backend_domain::{PriceRecord, RuntimeConfig};

/// Market-data API client. Failures are logged and reported as "no data".
pub struct HttpPriceSource {
    client: Client,
    base_url: String,
}

impl HttpPriceSource {
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
            .build()?;
        Ok(Self {
            client,
            base_url: config.price_api_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch(&self, url: &str) -> Result<Vec<PriceRecord>> {
        let records = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<PriceRecord>>()
            .await?;
        Ok(records)
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn fetch_prices(
        &self,
        item_ids: &[String],
        locations: &[String],
        qualities: &[u8],
    ) -> Option<Vec<PriceRecord>> {
        if item_ids.is_empty() {
            return Some(Vec::new());
        }
        let url = price_url(&self.base_url, item_ids, locations, qualities);
        match self.fetch(&url).await {
            Ok(records) => {
                debug!(records = records.len(), "fetched market prices");
                Some(records)
            }
            Err(err) => {
                warn!(url = %url, "market price fetch failed: {:#}", err);
                None
            }
        }
    }
}

pub fn price_url(base_url: &str, item_ids: &[String], locations: &[String], qualities: &[u8]) -> String {
    let qualities = qualities
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{}/{}.json?locations={}&qualities={}",
        base_url.trim_end_matches('/'),
        item_ids.join(","),
        locations.join(","),
        qualities
    )
}
