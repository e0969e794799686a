//! Untyped resource property bag

use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A JSON object returned by the API, with typed accessors.
///
/// Unknown properties survive a read-modify-write cycle untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource {
    properties: JsonObject,
}

impl Resource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_object(properties: JsonObject) -> Self {
        Self { properties }
    }

    pub fn properties(&self) -> &JsonObject {
        &self.properties
    }

    pub fn into_value(self) -> JsonValue {
        JsonValue::Object(self.properties)
    }

    pub fn get_property(&self, key: &str) -> Option<&JsonValue> {
        self.properties.get(key).filter(|v| !v.is_null())
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get_property(key).and_then(JsonValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_property(key).and_then(JsonValue::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get_property(key).and_then(JsonValue::as_i64)
    }

    /// Parse an RFC 3339 timestamp such as `2024-01-15T10:30:00.000Z`
    pub fn get_datetime(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get_string(key)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.with_timezone(&Utc))
    }

    /// String array property; non-string entries are skipped
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get_property(key)
            .and_then(JsonValue::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Nested object property wrapped as another resource type
    pub fn get_resource<R: From<Resource>>(&self, key: &str) -> Option<R> {
        self.get_property(key)
            .and_then(JsonValue::as_object)
            .map(|obj| R::from(Resource::from_object(obj.clone())))
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Set or clear an optional string property
    pub fn set_optional_string(&mut self, key: &str, value: Option<String>) {
        match value {
            Some(v) => self.set_property(key, v),
            None => {
                self.properties.insert(key.to_string(), JsonValue::Null);
            }
        }
    }

    pub fn remove_property(&mut self, key: &str) -> Option<JsonValue> {
        self.properties.remove(key)
    }

    pub fn id(&self) -> Option<&str> {
        self.get_string("id")
    }

    /// HAL `_links` object
    pub fn links(&self) -> Option<&JsonObject> {
        self.get_property("_links").and_then(JsonValue::as_object)
    }

    /// Href of a named link, e.g. `self` or `users`
    pub fn link_href(&self, rel: &str) -> Option<&str> {
        self.links()?
            .get(rel)?
            .get("href")
            .and_then(JsonValue::as_str)
    }
}

impl From<JsonObject> for Resource {
    fn from(properties: JsonObject) -> Self {
        Self::from_object(properties)
    }
}

/// Typed wrapper around a [`Resource`]
pub trait AsResource: From<Resource> {
    fn resource(&self) -> &Resource;

    fn resource_mut(&mut self) -> &mut Resource;

    /// Serialize back into the wire representation
    fn to_json(&self) -> JsonValue {
        self.resource().clone().into_value()
    }
}
