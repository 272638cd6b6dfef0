// src/services/worldbank.rs
use anyhow::{anyhow, bail, Context, Result};
use log::{error, info};
use serde_json::Value;

use crate::models::{RawObservation, WorldBankMeta};

const API_BASE_URL: &str = "https://api.worldbank.org/v2";

/// Total greenhouse gas emissions, Mt CO2e (AR5 GWPs).
const EMISSIONS_INDICATOR: &str = "EN.GHG.ALL.MT.CE.AR5";

/// Fetch the full emissions series for one country code.
///
/// On success the API responds with a `[metadata, records]` pair; on a bad
/// request it responds 200 with a one-element `[{"message": ...}]` array,
/// which must be detected and turned into an error here rather than
/// surfacing as a deserialization failure.
pub async fn fetch_emissions(country: &str) -> Result<(WorldBankMeta, Vec<RawObservation>)> {
    let url = format!(
        "{}/country/{}/indicator/{}?format=json&per_page=500",
        API_BASE_URL, country, EMISSIONS_INDICATOR
    );
    info!("Fetching emissions data from URL: {}", url);

    let body: Value = reqwest::get(&url)
        .await?
        .json()
        .await
        .context("invalid JSON from World Bank API")?;

    let parts = body
        .as_array()
        .ok_or_else(|| anyhow!("unexpected World Bank response shape"))?;

    if let Some(message) = parts.first().and_then(error_message) {
        error!("World Bank API error for {}: {}", country, message);
        bail!("World Bank API error: {}", message);
    }
    if parts.len() < 2 {
        bail!("World Bank response missing the records element");
    }

    let meta: WorldBankMeta =
        serde_json::from_value(parts[0].clone()).context("malformed response metadata")?;
    let records: Vec<RawObservation> =
        serde_json::from_value(parts[1].clone()).context("malformed observation records")?;

    info!("Fetched {} observations for {}", records.len(), country);
    Ok((meta, records))
}

// Error payloads look like [{"message": [{"id": "120", "value": "..."}]}].
fn error_message(part: &Value) -> Option<String> {
    let message = part.get("message")?;
    if let Some(items) = message.as_array() {
        let text = items.first()?.get("value")?.as_str()?;
        return Some(text.to_string());
    }
    message.as_str().map(str::to_string)
}
