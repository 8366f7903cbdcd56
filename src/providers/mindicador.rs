use crate::core::{IndicatorDetail, IndicatorProvider, IndicatorSummary};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error, instrument};

/// Client for the mindicador.cl indicator API.
pub struct MindicadorProvider {
    base_url: String,
    client: reqwest::Client,
}

impl MindicadorProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pesoconv/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(MindicadorProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        debug!("Requesting {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?
            .error_for_status()
            .with_context(|| format!("Unexpected response status from {url}"))?;

        response
            .text()
            .await
            .with_context(|| format!("Failed to get response text from {url}"))
    }
}

/// Picks the indicator objects out of the catalog payload. Scalar members
/// (`version`, `autor`, `fecha`) and objects without a name are skipped.
fn parse_catalog(response_text: &str) -> Result<HashMap<String, IndicatorSummary>> {
    let members: HashMap<String, Value> = match serde_json::from_str(response_text) {
        Ok(data) => data,
        Err(e) => {
            error!(
                error = ?e,
                response = %response_text,
                "Failed to parse catalog response"
            );
            return Err(e).context("Failed to parse catalog response");
        }
    };

    let catalog = members
        .into_iter()
        .filter(|(_, value)| value.is_object())
        .filter_map(|(code, value)| match serde_json::from_value(value) {
            Ok(summary) => Some((code, summary)),
            Err(e) => {
                debug!(%code, error = %e, "Skipping catalog member");
                None
            }
        })
        .collect();
    Ok(catalog)
}

#[async_trait]
impl IndicatorProvider for MindicadorProvider {
    #[instrument(name = "MindicadorCatalogFetch", skip(self))]
    async fn fetch_catalog(&self) -> Result<HashMap<String, IndicatorSummary>> {
        let response_text = self.get_text(&self.base_url).await?;
        let catalog = parse_catalog(&response_text)?;
        debug!(indicators = catalog.len(), "Parsed catalog");
        Ok(catalog)
    }

    #[instrument(
        name = "MindicadorDetailFetch",
        skip(self),
        fields(code = %code)
    )]
    async fn fetch_detail(&self, code: &str) -> Result<IndicatorDetail> {
        let url = format!("{}/{}", self.base_url, code);
        let response_text = self.get_text(&url).await?;

        let detail: IndicatorDetail = serde_json::from_str(&response_text).with_context(|| {
            format!("Failed to parse indicator response for {code}. Response: '{response_text}'")
        })?;
        debug!(points = detail.series.len(), "Parsed indicator series");
        Ok(detail)
    }
}
