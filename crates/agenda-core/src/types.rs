//! Core record types for agenda-core.
//!
//! [`RawEvent`] is exactly what the catalog API returned: a JSON object with
//! no guarantees. [`CanonicalEvent`] is the fixed-schema record written to the
//! clean dataset. The two are deliberately different types so that the
//! "missing means empty string" rule is applied once, at assembly time, and
//! nowhere else.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw event record as returned by the catalog API.
///
/// A key is either absent, present with `null`, or present with a value.
/// [`RawEvent::get`] treats the first two alike, so callers see an explicit
/// `Option` instead of a null sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEvent(Map<String, Value>);

impl RawEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value stored under `key`, or `None` when the key is absent or null.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// The value under `key` rendered as text.
    ///
    /// Strings come back as-is, numbers and booleans in their JSON spelling,
    /// arrays and objects as compact JSON.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Like [`RawEvent::text`], but an empty string also counts as missing.
    pub fn non_empty_text(&self, key: &str) -> Option<String> {
        self.text(key).filter(|s| !s.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Apply `f` to the value under `key` in place, if the key is present.
    pub fn update(&mut self, key: &str, f: impl FnOnce(Value) -> Value) {
        if let Some(slot) = self.0.get_mut(key) {
            let value = std::mem::take(slot);
            *slot = f(value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawEvent {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Loose truthiness of a JSON value: `null`, `false`, `0`, `""`, `[]` and `{}`
/// are all "empty".
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// A cleaned, deduplicated event ready for persistence and embedding.
///
/// Serialized field order and key names are part of the clean dataset format.
/// No field is ever `null`: anything missing on the raw record is an empty
/// string. Fields whose upstream type varies (numbers, lists) are kept as
/// verbatim JSON values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    pub uid: String,
    #[serde(rename = "canonicalurl")]
    pub canonical_url: String,
    #[serde(rename = "title_fr")]
    pub title: String,
    #[serde(rename = "description_fr")]
    pub short_description: String,
    #[serde(rename = "longdescription_fr")]
    pub long_description: String,
    #[serde(rename = "conditions_fr")]
    pub conditions: String,
    #[serde(rename = "updatedat")]
    pub updated_at: String,
    #[serde(rename = "daterange_fr")]
    pub date_range: String,

    /// Canonical `YYYY-MM-DDTHH:MM:SS+00:00`; never empty.
    #[serde(rename = "firstdate_begin")]
    pub first_begin: String,
    #[serde(rename = "firstdate_end")]
    pub first_end: String,
    #[serde(rename = "lastdate_begin")]
    pub last_begin: String,
    #[serde(rename = "lastdate_end")]
    pub last_end: String,

    pub timings: Value,
    pub accessibility: Value,
    #[serde(rename = "accessibility_fr")]
    pub accessibility_localized: Value,

    pub location_name: String,
    pub location_address: String,
    pub location_district: String,
    #[serde(rename = "location_postalcode")]
    pub location_postal_code: String,
    pub location_city: String,
    pub location_department: String,
    pub location_region: String,
    #[serde(rename = "location_countrycode")]
    pub location_country_code: String,
    pub location_phone: String,
    pub location_website: String,
    #[serde(rename = "location_access_fr")]
    pub location_access: String,

    pub age_min: Value,
    pub age_max: Value,

    /// Single-line narrative handed to the embedding model.
    #[serde(rename = "text_for_embedding")]
    pub embedding_text: String,
}
