//! Intelligence lookup data structures.

use serde::{Deserialize, Serialize};

/// Network block registration details.
///
/// Every field is optional: the upstream service may omit any of them, and
/// absence means "unknown", not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    /// Network name (NetName)
    pub name: Option<String>,
    /// Owning organization
    pub organization: Option<String>,
    /// Address range, e.g. "23.90.64.0 - 23.90.127.255"
    pub net_range: Option<String>,
    /// CIDR block, e.g. "23.90.64.0/18"
    pub cidr: Option<String>,
    /// Allocation status, e.g. "ALLOCATED PA"
    pub status: Option<String>,
    /// Regional Internet Registry holding the record
    pub registry: Option<String>,
}

/// Geolocation of the address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geography {
    /// Country name
    pub country: Option<String>,
    /// City name
    pub city: Option<String>,
    /// Free-form coordinates as reported, e.g. "37.751, -97.822"
    pub coordinates: Option<String>,
}

/// Points of contact for the network block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contacts {
    /// Abuse reporting address
    pub abuse: Option<String>,
    /// Administrative contact
    pub admin: Option<String>,
}

/// A web page the upstream service cited while grounding its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Page title, "Source" when the service gave none
    pub title: String,
    /// Page address, "#" when the service gave none
    pub uri: String,
}

/// Normalized outcome of one intelligence lookup.
///
/// The three section structs are always present; only their leaves may be
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    /// Address as submitted by the caller
    pub ip: String,
    /// Short prose description of ownership and purpose
    pub summary: String,
    /// Registration details
    pub network_info: NetworkInfo,
    /// Location
    pub geography: Geography,
    /// Points of contact
    pub contacts: Contacts,
    /// Citations in upstream order; the first is the primary source
    pub sources: Vec<Source>,
}

/// The structured payload the model is asked to produce.
///
/// Mirrors the declared response schema; `ip` and `sources` are added by
/// the gateway, never read from the model.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IntelPayload {
    pub(crate) summary: String,
    pub(crate) network_info: NetworkInfo,
    pub(crate) geography: Geography,
    pub(crate) contacts: Contacts,
}
