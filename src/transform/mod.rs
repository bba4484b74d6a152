use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::{Result, SynthtapError};

// =========================== Side-field table ================================

/// How to pull a recognized side-field out of an item record.
#[derive(Debug, Clone, Copy)]
enum Extract {
    /// Copy the `name` sub-field of an object value.
    Name,
    /// Copy the value as-is.
    Raw,
}

/// Recognized non-metric keys: (item key, output key, extraction rule).
/// `dimension` carries the measurement timestamp; every other key keeps its name.
const SIDE_FIELDS: [(&str, &str, Extract); 5] = [
    ("dimension", "timestamp", Extract::Name),
    ("breakdown_1", "breakdown_1", Extract::Name),
    ("breakdown_2", "breakdown_2", Extract::Name),
    ("hop_number", "hop_number", Extract::Raw),
    ("step", "step", Extract::Raw),
];

// =========================== Outcome =========================================

/// Result of reshaping one raw response.
///
/// "No data for the window" is an expected outcome, not an error, and stays
/// distinct from an empty `Documents` sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutcome {
    NoData,
    Documents(Vec<Value>),
}

impl TransformOutcome {
    pub fn is_no_data(&self) -> bool {
        matches!(self, TransformOutcome::NoData)
    }
}

// =========================== Engine ==========================================

/// Reshape a raw "last raw" response into flat per-metric documents.
///
/// The provider encodes structured breakdowns inside the metrics array itself:
/// a scalar at position `i` is the value of the `i`-th metric name, while a
/// nested object carries fields that belong on the document root. Side-fields
/// (`dimension`, breakdowns, `hop_number`, `step`) are collected into a holder
/// appended as the final element of each item's value sequence, so one root
/// merge places them all.
pub fn transform(raw: &Value) -> Result<TransformOutcome> {
    let detail = match raw.get("detail") {
        Some(detail) if !detail.is_null() => detail,
        _ => {
            debug!(payload = %raw, "response carried no detail");
            return Ok(TransformOutcome::NoData);
        }
    };

    let names = metric_name_vector(detail)?;

    let items = detail
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| SynthtapError::MalformedSchema("detail.items missing".into()))?;

    let mut documents = Vec::with_capacity(items.len());
    for item in items {
        let extended = extend_with_side_fields(item);
        documents.push(build_document(&names, &extended));
    }
    Ok(TransformOutcome::Documents(documents))
}

/// Ordered metric names from `detail.fields.synthetic_metrics`; index `i` names
/// position `i` of every item's value array.
fn metric_name_vector(detail: &Value) -> Result<Vec<String>> {
    let descriptors = detail
        .pointer("/fields/synthetic_metrics")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            SynthtapError::MalformedSchema("detail.fields.synthetic_metrics missing".into())
        })?;

    descriptors
        .iter()
        .map(|descriptor| {
            descriptor
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| {
                    SynthtapError::MalformedSchema("metric descriptor without a name".into())
                })
        })
        .collect()
}

/// Copy the item's value array and append the side-field holder as its last
/// element. The holder always carries `timestamp`, defaulted to an empty
/// object when the item has no `dimension`.
fn extend_with_side_fields(item: &Value) -> Vec<Value> {
    let mut holder = Map::new();
    holder.insert("timestamp".to_string(), Value::Object(Map::new()));

    if let Some(fields) = item.as_object() {
        for (item_key, out_key, extract) in SIDE_FIELDS {
            let Some(value) = fields.get(item_key) else {
                continue;
            };
            let extracted = match extract {
                Extract::Name => value.get("name").cloned(),
                Extract::Raw => Some(value.clone()),
            };
            if let Some(extracted) = extracted {
                holder.insert(out_key.to_string(), extracted);
            }
        }
    }

    let mut values = item
        .get("synthetic_metrics")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    values.push(Value::Object(holder));
    values
}

/// Scalars at positions 0..N-1 become named metrics; nested objects merge onto
/// the document root, last merge wins. The holder at position N is always an
/// object, so the side-fields land on the root exactly once. Nulls and arrays
/// are neither metrics nor mergeable mappings and are dropped.
fn build_document(names: &[String], values: &[Value]) -> Value {
    let mut doc = Map::new();
    doc.insert("metrics".to_string(), Value::Object(Map::new()));

    for (position, value) in values.iter().enumerate() {
        match value {
            Value::Object(fields) => {
                for (key, field_value) in fields {
                    doc.insert(key.clone(), field_value.clone());
                }
            }
            Value::Null | Value::Array(_) => {}
            scalar => {
                if let Some(name) = names.get(position) {
                    if let Some(Value::Object(metrics)) = doc.get_mut("metrics") {
                        metrics.insert(name.clone(), scalar.clone());
                    }
                }
            }
        }
    }

    Value::Object(doc)
}
