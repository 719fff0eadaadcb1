use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Latitude/longitude as sent by the upstream service.
///
/// Kept as JSON numbers so integer and float values serialize exactly as received.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    pub lat: Number,
    pub lon: Number,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Work location of a listing
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct WorkLocation {
    #[serde(rename = "ort", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(rename = "koordinaten", default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    /// Fields not modelled here (postcode, street, ...), relayed verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One job listing from the upstream service.
///
/// Only `refnr` is required; a missing `titel` decodes as empty and every
/// other absent field stays absent when the listing is serialized again.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Job {
    /// Occupation label
    #[serde(rename = "beruf", default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,

    #[serde(rename = "titel", default)]
    pub title: String,

    /// Reference number, the only field unique across listings
    pub refnr: String,

    #[serde(rename = "arbeitgeber", default, skip_serializing_if = "Option::is_none")]
    pub employer: Option<String>,

    #[serde(rename = "arbeitsort", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<WorkLocation>,

    #[serde(
        rename = "aktuelleVeroeffentlichungsdatum",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<String>,

    /// Direct application link; many listings have none
    #[serde(rename = "externeUrl", default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    pub fn city(&self) -> Option<&str> {
        self.location.as_ref()?.city.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.location.as_ref()?.region.as_deref()
    }
}
