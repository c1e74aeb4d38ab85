//! Waze "mozi" search endpoint client.
//!
//! Forward geocoding only; the endpoint has no reverse mode. Requests
//! require an API token (`token=`), and the query value is
//! percent-encoded on its own rather than as part of a serialized
//! parameter map. Responses are a bare JSON array of result objects,
//! each with coordinates at `location.{lat,lon}`.

use crate::{urlencoding, GeocodeError, Query, ResultRecord};

/// Builds the request URL for a Waze lookup.
///
/// # Errors
///
/// Returns [`GeocodeError::EmptyQuery`] for a blank query,
/// [`GeocodeError::ReverseUnsupported`] for a reverse query, and
/// [`GeocodeError::MissingApiKey`] when no token is configured. All of
/// these fire before any URL is built.
pub fn build_url(
    base_url: &str,
    api_key: Option<&str>,
    query: &Query,
) -> Result<String, GeocodeError> {
    let Query::Forward(address) = query else {
        return Err(GeocodeError::ReverseUnsupported);
    };

    if query.is_blank() {
        return Err(GeocodeError::EmptyQuery);
    }

    let key = match api_key {
        Some(key) if !key.is_empty() => key,
        _ => return Err(GeocodeError::MissingApiKey),
    };

    Ok(format!(
        "{base_url}?q={}&token={key}",
        urlencoding(address.trim())
    ))
}

/// Maps the top-level result array into [`ResultRecord`]s.
///
/// A result with a missing or non-finite coordinate field yields
/// `coordinates: None`. A non-array document yields an empty vec.
#[must_use]
pub fn extract_results(doc: &serde_json::Value) -> Vec<ResultRecord> {
    let Some(results) = doc.as_array() else {
        return Vec::new();
    };

    results
        .iter()
        .map(|result| {
            let lat = result
                .pointer("/location/lat")
                .and_then(serde_json::Value::as_f64);
            let lon = result
                .pointer("/location/lon")
                .and_then(serde_json::Value::as_f64);

            let coordinates = match (lat, lon) {
                (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
                _ => None,
            };

            ResultRecord {
                coordinates,
                formatted_address: result["name"].as_str().map(String::from),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_url_with_token() {
        let url = build_url(
            "http://www.waze.co.il/WAS/mozi",
            Some("abc123"),
            &Query::Forward("Tel Aviv".to_string()),
        )
        .unwrap();
        assert_eq!(url, "http://www.waze.co.il/WAS/mozi?q=Tel+Aviv&token=abc123");
    }

    #[test]
    fn rejects_reverse_queries() {
        let result = build_url(
            "http://www.waze.co.il/WAS/mozi",
            Some("abc123"),
            &Query::Reverse(32.07, 34.78),
        );
        assert!(matches!(result, Err(GeocodeError::ReverseUnsupported)));
    }

    #[test]
    fn rejects_missing_api_key() {
        for key in [None, Some("")] {
            let result = build_url(
                "http://www.waze.co.il/WAS/mozi",
                key,
                &Query::Forward("Tel Aviv".to_string()),
            );
            assert!(matches!(result, Err(GeocodeError::MissingApiKey)));
        }
    }

    #[test]
    fn rejects_blank_query() {
        let result = build_url(
            "http://www.waze.co.il/WAS/mozi",
            Some("abc123"),
            &Query::Forward(String::new()),
        );
        assert!(matches!(result, Err(GeocodeError::EmptyQuery)));
    }

    #[test]
    fn extracts_location_pair() {
        let doc = serde_json::json!([{
            "name": "Dizengoff Street, Tel Aviv",
            "location": { "lat": 32.0781, "lon": 34.7740 }
        }]);
        let records = extract_results(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].coordinates, Some((32.0781, 34.7740)));
        assert_eq!(
            records[0].formatted_address.as_deref(),
            Some("Dizengoff Street, Tel Aviv")
        );
    }

    #[test]
    fn extracts_empty_array() {
        assert!(extract_results(&serde_json::json!([])).is_empty());
    }

    #[test]
    fn non_array_document_is_empty() {
        assert!(extract_results(&serde_json::json!({ "error": "nope" })).is_empty());
    }

    #[test]
    fn missing_location_is_absent() {
        let doc = serde_json::json!([{ "name": "No coordinates here" }]);
        let records = extract_results(&doc);
        assert_eq!(records[0].coordinates, None);
    }
}
