//! Lookup dispatch: URL building, fetch, envelope validation and result
//! extraction for one geocoding call.
//!
//! Data flows one way — build → fetch → normalize → extract — with the
//! selected [`Provider`] threaded explicitly through every step. The
//! public entry points ([`search`], [`coordinates`], [`address`])
//! swallow every [`GeocodeError`]: the specific cause is logged as a
//! warning and the caller sees the same empty outcome a zero-match
//! response produces.

use std::time::Duration;

use crate::service_registry::{service_for, Configuration};
use crate::{google, waze, GeocodeError, Provider, Query, ResultRecord};

/// Forward-geocodes a free-form address to a `(lat, lng)` pair.
///
/// Returns the coordinates of the first (best) match, or `None` on zero
/// matches or any failure.
pub async fn coordinates(
    client: &reqwest::Client,
    config: &Configuration,
    address: &str,
) -> Option<(f64, f64)> {
    search(client, config, &Query::Forward(address.to_string()))
        .await
        .first()
        .and_then(|record| record.coordinates)
}

/// Reverse-geocodes a coordinate pair to a formatted address.
///
/// Returns the formatted address of the first (best) match, or `None` on
/// zero matches or any failure.
pub async fn address(
    client: &reqwest::Client,
    config: &Configuration,
    lat: f64,
    lng: f64,
) -> Option<String> {
    search(client, config, &Query::Reverse(lat, lng))
        .await
        .first()
        .and_then(|record| record.formatted_address.clone())
}

/// Runs one lookup against the configured provider.
///
/// Returns the provider's matches in provider order (first = best), or
/// an empty vec on zero matches or any failure. Failures are logged;
/// a well-formed zero-match response is not.
pub async fn search(
    client: &reqwest::Client,
    config: &Configuration,
    query: &Query,
) -> Vec<ResultRecord> {
    match lookup(client, config, query).await {
        Ok(records) => records,
        Err(e) => {
            log::warn!("{e}");
            Vec::new()
        }
    }
}

async fn lookup(
    client: &reqwest::Client,
    config: &Configuration,
    query: &Query,
) -> Result<Vec<ResultRecord>, GeocodeError> {
    let service = service_for(config.provider);
    let base_url = config.base_url.as_deref().unwrap_or_else(|| service.base_url());

    let url = match config.provider {
        Provider::Google => google::build_url(base_url, query)?,
        Provider::Waze => waze::build_url(base_url, config.waze_api_key.as_deref(), query)?,
    };

    let body = fetch(client, &url, config.timeout).await?;
    let doc = normalize(config.provider, &body)?;

    Ok(extract_results(config.provider, &doc))
}

/// Performs the single GET for this call under the configured timeout.
///
/// No provider-status interpretation happens here; HTTP transport and
/// body-status are separate failure axes.
async fn fetch(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<String, GeocodeError> {
    let resp = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(classify_transport)?;

    resp.text().await.map_err(classify_transport)
}

/// Collapses transport errors into the two kinds the caller can act on.
fn classify_transport(e: reqwest::Error) -> GeocodeError {
    if e.is_timeout() {
        GeocodeError::Timeout
    } else {
        GeocodeError::Connection
    }
}

/// Parses the raw body and validates the provider's envelope.
///
/// Only the envelope is inspected here; result fields are the
/// extractor's concern.
fn normalize(provider: Provider, raw_body: &str) -> Result<serde_json::Value, GeocodeError> {
    let doc: serde_json::Value =
        serde_json::from_str(raw_body).map_err(|e| GeocodeError::Parse {
            message: e.to_string(),
        })?;

    match provider {
        Provider::Google => google::classify_status(&doc)?,
        Provider::Waze => {}
    }

    Ok(doc)
}

fn extract_results(provider: Provider, doc: &serde_json::Value) -> Vec<ResultRecord> {
    match provider {
        Provider::Google => google::extract_results(doc),
        Provider::Waze => waze::extract_results(doc),
    }
}
