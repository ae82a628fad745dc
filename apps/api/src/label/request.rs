//! The label request record and its structural validation.
//!
//! Validation is shape and type only. Nothing here checks that a zip code or
//! country is real.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnAddress {
    pub company: String,
    pub address: String,
    pub zip_code: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRequest {
    pub return_address: ReturnAddress,
    pub order: String,
    pub name: String,
    /// Accepted and carried, but the label is always drawn in English.
    pub language: String,
}

#[derive(Debug, Error)]
#[error("Invalid payload format")]
pub struct ValidationError;

const ADDRESS_FIELDS: [&str; 5] = ["company", "address", "zip_code", "city", "country"];

/// Returns true if `payload` has the shape of a `LabelRequest`.
///
/// `return_address` must be an object whose five fields are strings, `order`
/// and `name` must be non-empty strings, and `language` must be a string (it
/// may be empty). Unknown fields are ignored.
pub fn is_valid(payload: &Value) -> bool {
    let Some(payload) = payload.as_object() else {
        return false;
    };

    let Some(address) = payload.get("return_address").and_then(Value::as_object) else {
        return false;
    };

    let address_ok = ADDRESS_FIELDS
        .iter()
        .all(|field| address.get(*field).is_some_and(Value::is_string));

    address_ok
        && is_non_empty_string(payload.get("order"))
        && is_non_empty_string(payload.get("name"))
        && payload.get("language").is_some_and(Value::is_string)
}

fn is_non_empty_string(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}

/// Validates an untyped payload and converts it into a `LabelRequest`.
pub fn parse_request(payload: Value) -> Result<LabelRequest, ValidationError> {
    if !is_valid(&payload) {
        return Err(ValidationError);
    }
    serde_json::from_value(payload).map_err(|_| ValidationError)
}

/// Folds url-encoded form pairs with bracketed keys into a JSON object.
///
/// `return_address[city]=Delft` becomes `{"return_address": {"city": "Delft"}}`.
/// A later pair for the same key wins. A scalar that is later addressed as a
/// parent is replaced by an object.
pub fn fold_form_fields(pairs: Vec<(String, String)>) -> Value {
    let mut root = Map::new();
    for (key, value) in pairs {
        insert_form_value(&mut root, &split_form_key(&key), value);
    }
    Value::Object(root)
}

fn insert_form_value(node: &mut Map<String, Value>, path: &[&str], value: String) {
    match path {
        [] => {}
        [leaf] => {
            node.insert(leaf.to_string(), Value::String(value));
        }
        [parent, rest @ ..] => {
            let entry = node
                .entry(parent.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            match entry {
                Value::Object(child) => insert_form_value(child, rest, value),
                scalar => {
                    let mut child = Map::new();
                    insert_form_value(&mut child, rest, value);
                    *scalar = Value::Object(child);
                }
            }
        }
    }
}

/// `a[b][c]` → `["a", "b", "c"]`. Empty segments are dropped.
fn split_form_key(key: &str) -> Vec<&str> {
    key.split(['[', ']'])
        .filter(|segment| !segment.is_empty())
        .collect()
}
