//! Completion output parsing and normalization.

use serde_json::Value;

use crate::config::{DEFAULT_SOURCE_TITLE, DEFAULT_SOURCE_URI};
use crate::error_handling::GatewayError;

use super::completer::{Citation, Completion};
use super::schema::Schema;
use super::types::{Contacts, Geography, IntelPayload, LookupResult, NetworkInfo, Source};

/// Parses completion text into the structured payload.
///
/// Empty text, non-JSON text and JSON that fails `schema` are all errors;
/// nothing is silently defaulted at the section level.
pub(crate) fn parse_payload(text: Option<&str>, schema: &Schema) -> Result<IntelPayload, GatewayError> {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(GatewayError::EmptyResponse),
    };

    let value: Value = serde_json::from_str(text).map_err(GatewayError::MalformedJson)?;
    schema.validate(&value).map_err(GatewayError::SchemaMismatch)?;

    serde_json::from_value(value).map_err(|e| GatewayError::SchemaMismatch(e.to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Maps citations to sources, keeping upstream order and filling in
/// defaults for a missing title or link.
pub(crate) fn normalize_citations(citations: Vec<Citation>) -> Vec<Source> {
    citations
        .into_iter()
        .map(|c| Source {
            title: non_empty(c.title).unwrap_or_else(|| DEFAULT_SOURCE_TITLE.to_string()),
            uri: non_empty(c.uri).unwrap_or_else(|| DEFAULT_SOURCE_URI.to_string()),
        })
        .collect()
}

fn normalize_payload(payload: IntelPayload) -> IntelPayload {
    let IntelPayload {
        summary,
        network_info,
        geography,
        contacts,
    } = payload;

    IntelPayload {
        summary: summary.trim().to_string(),
        network_info: NetworkInfo {
            name: non_empty(network_info.name),
            organization: non_empty(network_info.organization),
            net_range: non_empty(network_info.net_range),
            cidr: non_empty(network_info.cidr),
            status: non_empty(network_info.status),
            registry: non_empty(network_info.registry),
        },
        geography: Geography {
            country: non_empty(geography.country),
            city: non_empty(geography.city),
            coordinates: non_empty(geography.coordinates),
        },
        contacts: Contacts {
            abuse: non_empty(contacts.abuse),
            admin: non_empty(contacts.admin),
        },
    }
}

/// Merges the queried address, the parsed payload and the normalized
/// citations into one result.
pub(crate) fn build_result(
    ip: &str,
    completion: Completion,
    schema: &Schema,
) -> Result<LookupResult, GatewayError> {
    let payload = normalize_payload(parse_payload(completion.text.as_deref(), schema)?);

    Ok(LookupResult {
        ip: ip.to_string(),
        summary: payload.summary,
        network_info: payload.network_info,
        geography: payload.geography,
        contacts: payload.contacts,
        sources: normalize_citations(completion.citations),
    })
}
