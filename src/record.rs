use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{SummaryError, json_kind};

const KNOWN_FIELDS: &[&str] = &[
    "provider_name",
    "code_type",
    "code",
    "description",
    "rate_type",
    "negotiated_rate",
    "geo",
    "last_updated",
];

/// One observed negotiated price, as read from a machine-readable file.
///
/// Fields are coerced leniently: a bad value degrades to a default instead
/// of rejecting the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RateRecord {
    pub provider_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_type: Option<String>,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_type: Option<String>,
    pub negotiated_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RateRecord {
    pub fn new(provider_name: &str, code: &str, negotiated_rate: f64) -> Self {
        Self {
            provider_name: provider_name.to_string(),
            code: code.to_string(),
            negotiated_rate,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Grouping key. Empty means the record is ignored by the aggregator.
    pub fn trimmed_code(&self) -> &str {
        self.code.trim()
    }

    pub fn from_value(v: &Value) -> Result<Self, SummaryError> {
        Self::from_indexed_value(0, v)
    }

    fn from_indexed_value(index: usize, v: &Value) -> Result<Self, SummaryError> {
        let Some(obj) = v.as_object() else {
            return Err(SummaryError::InvalidRecord {
                index,
                found: json_kind(v),
            });
        };

        let extra = obj
            .iter()
            .filter(|(k, _)| !KNOWN_FIELDS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            provider_name: text_field(obj.get("provider_name")).unwrap_or_default(),
            code_type: text_field(obj.get("code_type")),
            code: text_field(obj.get("code")).unwrap_or_default(),
            description: text_field(obj.get("description")),
            rate_type: text_field(obj.get("rate_type")),
            negotiated_rate: coerce_rate(obj.get("negotiated_rate")),
            geo: text_field(obj.get("geo")),
            last_updated: text_field(obj.get("last_updated")),
            extra,
        })
    }
}

/// Converts a parsed JSON document into records.
///
/// The document must be an array of objects; that is the only shape error
/// that aborts the whole call.
pub fn records_from_json(doc: Value) -> Result<Vec<RateRecord>, SummaryError> {
    let Value::Array(items) = doc else {
        return Err(SummaryError::NotAnArray(json_kind(&doc)));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, v)| RateRecord::from_indexed_value(i, v))
        .collect()
}

pub fn records_from_str(s: &str) -> Result<Vec<RateRecord>, SummaryError> {
    let doc: Value = serde_json::from_str(s)?;
    records_from_json(doc)
}

fn text_field(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Missing, unparseable or non-finite rates become 0.
pub fn coerce_rate(v: Option<&Value>) -> f64 {
    let rate = match v {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };
    if rate.is_finite() { rate } else { 0.0 }
}
