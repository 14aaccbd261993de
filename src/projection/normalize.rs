//! Response shape normalization.
//!
//! The collaborator API wraps collections inconsistently: some endpoints
//! return a bare array, others nest it under the resource name or under
//! `data`. Anything else is reported as an invalid format rather than
//! guessed at.

use serde_json::Value;

/// Collection resource a response belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Leads,
    Agents,
}

impl Resource {
    /// Field that may hold the collection in a wrapped response.
    pub const fn collection_key(self) -> &'static str {
        match self {
            Resource::Leads => "leads",
            Resource::Agents => "agents",
        }
    }
}

/// Result of normalizing a collection response.
#[derive(Debug, PartialEq)]
pub enum NormalizedResponse<'a> {
    Records(&'a [Value]),
    InvalidFormat,
}

impl<'a> NormalizedResponse<'a> {
    /// Records to display; empty when the format was invalid.
    pub fn records(&self) -> &'a [Value] {
        match self {
            NormalizedResponse::Records(records) => records,
            NormalizedResponse::InvalidFormat => &[],
        }
    }

    pub fn is_invalid_format(&self) -> bool {
        matches!(self, NormalizedResponse::InvalidFormat)
    }
}

/// Locates the record sequence inside a collection response.
///
/// Checked in order: the response itself, the resource field, then `data`.
pub fn normalize_response(raw: &Value, resource: Resource) -> NormalizedResponse<'_> {
    let candidates = [
        Some(raw),
        raw.get(resource.collection_key()),
        raw.get("data"),
    ];

    match candidates.into_iter().flatten().find_map(Value::as_array) {
        Some(records) => NormalizedResponse::Records(records),
        None => {
            log::warn!(
                "Unrecognized {} response shape, expected an array",
                resource.collection_key()
            );
            NormalizedResponse::InvalidFormat
        }
    }
}

/// Locates the single record inside a detail response.
///
/// Detail endpoints wrap the record under `data`; a bare object is accepted
/// as well. Arrays and scalars are not records.
pub fn normalize_record(raw: &Value) -> Option<&Value> {
    match raw.get("data") {
        Some(inner) if inner.is_object() => Some(inner),
        _ if raw.is_object() => Some(raw),
        _ => None,
    }
}
