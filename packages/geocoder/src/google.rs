//! Google Maps Geocoding API client.
//!
//! Supports both forward (`address=`) and reverse (`latlng=`) lookups
//! against the JSON endpoint. Responses carry a top-level `status`
//! string and a `results[]` array; each result exposes its coordinates
//! at `geometry.location.{lat,lng}` and a `formatted_address`.
//!
//! See <https://developers.google.com/maps/documentation/geocoding>

use crate::{urlencoding, GeocodeError, Query, ResultRecord};

/// Builds the request URL for a Google lookup.
///
/// Forward queries become `?address=<enc>&sensor=false`, reverse queries
/// `?latlng=<lat>,<lng>&sensor=false`. Pure string construction; no I/O.
///
/// # Errors
///
/// Returns [`GeocodeError::EmptyQuery`] for a blank forward query, before
/// any URL is built.
pub fn build_url(base_url: &str, query: &Query) -> Result<String, GeocodeError> {
    if query.is_blank() {
        return Err(GeocodeError::EmptyQuery);
    }

    Ok(match query {
        Query::Forward(address) => format!(
            "{base_url}?address={}&sensor=false",
            urlencoding(address.trim())
        ),
        Query::Reverse(lat, lng) => format!("{base_url}?latlng={lat},{lng}&sensor=false"),
    })
}

/// Checks the envelope's top-level `status` for terminal error codes.
///
/// `OVER_QUERY_LIMIT`, `REQUEST_DENIED` and `INVALID_REQUEST` each abort
/// the call; any other status (including `OK` and `ZERO_RESULTS`) passes
/// the document through for extraction.
///
/// # Errors
///
/// Returns [`GeocodeError::ProviderRejected`] with a status-specific
/// reason for the three terminal codes.
pub fn classify_status(doc: &serde_json::Value) -> Result<(), GeocodeError> {
    let reason = match doc["status"].as_str() {
        Some("OVER_QUERY_LIMIT") => "over query limit",
        Some("REQUEST_DENIED") => "request denied",
        Some("INVALID_REQUEST") => "invalid request",
        _ => return Ok(()),
    };

    Err(GeocodeError::ProviderRejected {
        reason: reason.to_string(),
    })
}

/// Maps the `results[]` array into [`ResultRecord`]s, in provider order.
///
/// A result with a missing or non-finite coordinate field yields
/// `coordinates: None` rather than a zero-filled pair. A document without
/// a `results` array yields an empty vec, never an error.
#[must_use]
pub fn extract_results(doc: &serde_json::Value) -> Vec<ResultRecord> {
    let Some(results) = doc["results"].as_array() else {
        return Vec::new();
    };

    results
        .iter()
        .map(|result| {
            let lat = result
                .pointer("/geometry/location/lat")
                .and_then(serde_json::Value::as_f64);
            let lng = result
                .pointer("/geometry/location/lng")
                .and_then(serde_json::Value::as_f64);

            let coordinates = match (lat, lng) {
                (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
                _ => None,
            };

            ResultRecord {
                coordinates,
                formatted_address: result["formatted_address"].as_str().map(String::from),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_forward_url() {
        let url = build_url(
            "http://maps.google.com/maps/api/geocode/json",
            &Query::Forward("1600 Amphitheatre Parkway".to_string()),
        )
        .unwrap();
        assert_eq!(
            url,
            "http://maps.google.com/maps/api/geocode/json\
             ?address=1600+Amphitheatre+Parkway&sensor=false"
        );
    }

    #[test]
    fn builds_reverse_url() {
        let url = build_url(
            "http://maps.google.com/maps/api/geocode/json",
            &Query::Reverse(37.42, -122.08),
        )
        .unwrap();
        assert_eq!(
            url,
            "http://maps.google.com/maps/api/geocode/json?latlng=37.42,-122.08&sensor=false"
        );
    }

    #[test]
    fn rejects_blank_query() {
        let result = build_url("http://example.com", &Query::Forward("  ".to_string()));
        assert!(matches!(result, Err(GeocodeError::EmptyQuery)));
    }

    #[test]
    fn classifies_terminal_statuses() {
        for (status, reason) in [
            ("OVER_QUERY_LIMIT", "over query limit"),
            ("REQUEST_DENIED", "request denied"),
            ("INVALID_REQUEST", "invalid request"),
        ] {
            let doc = serde_json::json!({ "status": status, "results": [] });
            match classify_status(&doc) {
                Err(GeocodeError::ProviderRejected { reason: r }) => assert_eq!(r, reason),
                other => panic!("expected ProviderRejected for {status}, got {other:?}"),
            }
        }
    }

    #[test]
    fn passes_ok_and_zero_results_through() {
        for status in ["OK", "ZERO_RESULTS"] {
            let doc = serde_json::json!({ "status": status, "results": [] });
            assert!(classify_status(&doc).is_ok());
        }
    }

    #[test]
    fn extracts_first_result_location() {
        let doc = serde_json::json!({
            "status": "OK",
            "results": [{
                "formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA",
                "geometry": { "location": { "lat": 37.42, "lng": -122.08 } }
            }]
        });
        let records = extract_results(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].coordinates, Some((37.42, -122.08)));
        assert_eq!(
            records[0].formatted_address.as_deref(),
            Some("1600 Amphitheatre Pkwy, Mountain View, CA")
        );
    }

    #[test]
    fn extracts_empty_results() {
        let doc = serde_json::json!({ "status": "ZERO_RESULTS", "results": [] });
        assert!(extract_results(&doc).is_empty());
    }

    #[test]
    fn missing_coordinate_field_is_absent_not_zero() {
        let doc = serde_json::json!({
            "status": "OK",
            "results": [{
                "formatted_address": "Somewhere",
                "geometry": { "location": { "lat": 37.42 } }
            }]
        });
        let records = extract_results(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].coordinates, None);
    }

    #[test]
    fn document_without_results_array_is_empty() {
        let doc = serde_json::json!({ "status": "OK" });
        assert!(extract_results(&doc).is_empty());
    }
}
