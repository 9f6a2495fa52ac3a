//! Data models for the `/stats` payload and the rendered usage list.
//!
//! The wire format is:
//!
//! ```json
//! { "usages": { "overall": 12.5, "core 1": 7.333 } }
//! ```
//!
//! Order matters for display, so `usages` is decoded into an ordered
//! [`Usages`] collection instead of a hash map.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Response body of `GET /stats`.
///
/// Any top-level fields other than `usages` are ignored. A missing or
/// `null` `usages` decodes as an empty mapping, which clears the list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(default, deserialize_with = "usages_or_empty")]
    pub usages: Usages,
}

fn usages_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Usages, D::Error> {
    Ok(Option::<Usages>::deserialize(deserializer)?.unwrap_or_default())
}

impl StatsResponse {
    pub fn new(usages: Usages) -> Self {
        Self { usages }
    }

    /// Parse a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// Ordered mapping from metric name to value.
///
/// Keys are unique. Iteration follows insertion order, which for decoded
/// payloads is the order keys appear in the JSON object. Re-inserting an
/// existing key keeps its original position and replaces the value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Usages {
    entries: Vec<(String, f64)>,
}

impl Usages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a metric.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Usages {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut usages = Usages::new();
        for (key, value) in iter {
            usages.insert(key, value);
        }
        usages
    }
}

impl Serialize for Usages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct UsagesVisitor;

impl<'de> Visitor<'de> for UsagesVisitor {
    type Value = Usages;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping metric names to numbers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut usages = Usages::new();
        while let Some((key, value)) = access.next_entry::<String, f64>()? {
            usages.insert(key, value);
        }
        Ok(usages)
    }
}

impl<'de> Deserialize<'de> for Usages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(UsagesVisitor)
    }
}

/// Format a usage value in fixed-point notation with two decimals.
///
/// Rounds the exact binary value of `value`, so `-0.005` (stored slightly
/// below -0.005) becomes `-0.01`.
pub fn format_usage(value: f64) -> String {
    format!("{:.2}", value)
}

/// One display row of the usage list.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRow {
    pub name: String,
    pub value: f64,
}

impl UsageRow {
    /// Text shown for this row, `"<name>: <value>"`.
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, format_usage(self.value))
    }
}

impl fmt::Display for UsageRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// The rendered list: one row per metric, in payload order.
///
/// Always built whole from a single response; there is no merge or diff
/// with a previous list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UsageList {
    rows: Vec<UsageRow>,
}

impl UsageList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[UsageRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row labels in display order.
    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(UsageRow::label).collect()
    }
}

impl From<&Usages> for UsageList {
    fn from(usages: &Usages) -> Self {
        let rows = usages
            .iter()
            .map(|(name, value)| UsageRow {
                name: name.to_string(),
                value,
            })
            .collect();
        Self { rows }
    }
}

impl From<StatsResponse> for UsageList {
    fn from(stats: StatsResponse) -> Self {
        UsageList::from(&stats.usages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usage_pads_integers() {
        assert_eq!(format_usage(3.0), "3.00");
    }

    #[test]
    fn test_format_usage_truncates_long_fractions() {
        assert_eq!(format_usage(3.14159), "3.14");
        assert_eq!(format_usage(7.333), "7.33");
        assert_eq!(format_usage(12.5), "12.50");
    }

    #[test]
    fn test_format_usage_negative_half_cent() {
        assert_eq!(format_usage(-0.005), "-0.01");
    }

    #[test]
    fn test_format_usage_rounds_up() {
        assert_eq!(format_usage(99.996), "100.00");
        assert_eq!(format_usage(0.0), "0.00");
    }

    #[test]
    fn test_decode_preserves_document_order() {
        let body = br#"{"usages": {"zeta": 1, "alpha": 2.5, "mid": 3}}"#;
        let stats = StatsResponse::from_slice(body).unwrap();
        let keys: Vec<&str> = stats.usages.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let body = br#"{"host": "box", "usages": {"cpu": 1.5}, "version": 2}"#;
        let stats = StatsResponse::from_slice(body).unwrap();
        assert_eq!(stats.usages.len(), 1);
        assert_eq!(stats.usages.get("cpu"), Some(1.5));
    }

    #[test]
    fn test_decode_duplicate_key_keeps_first_position_last_value() {
        let body = br#"{"usages": {"a": 1, "b": 2, "a": 3}}"#;
        let stats = StatsResponse::from_slice(body).unwrap();
        let entries: Vec<(&str, f64)> = stats.usages.iter().collect();
        assert_eq!(entries, vec![("a", 3.0), ("b", 2.0)]);
    }

    #[test]
    fn test_decode_missing_usages_is_empty() {
        let stats = StatsResponse::from_slice(br#"{"other": {}}"#).unwrap();
        assert!(stats.usages.is_empty());
        assert!(StatsResponse::from_slice(b"{}").unwrap().usages.is_empty());
    }

    #[test]
    fn test_decode_null_usages_is_empty() {
        let stats = StatsResponse::from_slice(br#"{"usages": null}"#).unwrap();
        assert!(stats.usages.is_empty());
    }

    #[test]
    fn test_decode_rejects_non_object_usages() {
        assert!(StatsResponse::from_slice(br#"{"usages": 5}"#).is_err());
        assert!(StatsResponse::from_slice(br#"{"usages": [1, 2]}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_non_numeric_value() {
        assert!(StatsResponse::from_slice(br#"{"usages": {"cpu": "high"}}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        assert!(StatsResponse::from_slice(b"{\"usages\": {").is_err());
    }

    #[test]
    fn test_serialize_keeps_insertion_order() {
        let usages: Usages = vec![("overall", 10.0), ("core 1", 20.0)].into_iter().collect();
        let json = serde_json::to_string(&StatsResponse::new(usages)).unwrap();
        assert_eq!(json, r#"{"usages":{"overall":10.0,"core 1":20.0}}"#);
    }

    #[test]
    fn test_usage_list_labels() {
        let body = br#"{"usages": {"cpu": 12.5, "mem": 7.333}}"#;
        let list = UsageList::from(StatsResponse::from_slice(body).unwrap());
        assert_eq!(list.labels(), vec!["cpu: 12.50", "mem: 7.33"]);
    }

    #[test]
    fn test_usage_list_empty() {
        let list = UsageList::from(StatsResponse::from_slice(br#"{"usages": {}}"#).unwrap());
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_row_display_matches_label() {
        let row = UsageRow {
            name: "core 3".to_string(),
            value: 7.333,
        };
        assert_eq!(row.to_string(), "core 3: 7.33");
        assert_eq!(row.to_string(), row.label());
    }
}
