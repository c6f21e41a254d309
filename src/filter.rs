//! Distinct/filter helpers over bridge collections.
//!
//! Bridge collections come back as `{"<id>": {...record}}`. The helpers
//! here flatten each pair into an [`Entry`] (`{"id": "<id>", ...record}`)
//! and work on those.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wildcard value: an entry whose field contains it matches every filter value.
pub const ALL: &str = "ALL";

/// A collection record with its id folded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry(Map<String, Value>);

impl Entry {
    /// Build `{id, ...record}`. Fields of `record` are applied after `id`,
    /// so a record carrying its own `id` attribute keeps it.
    pub fn new(id: &str, record: &Value) -> Self {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::from(id));
        if let Some(fields) = record.as_object() {
            map.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Entry(map)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

fn entries_of(collection: &Map<String, Value>) -> impl Iterator<Item = Entry> + '_ {
    collection
        .iter()
        .map(|(id, record)| Entry::new(id, record))
}

/// Keep the first entry for each distinct value of `key`.
///
/// Entries missing `key` share a single "missing" value. Order follows the
/// collection's iteration order.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use hue_scene_rs::filter::distinct_values;
///
/// let lights = json!({
///     "1": {"type": "Extended color light"},
///     "2": {"type": "Dimmable light"},
///     "3": {"type": "Extended color light"},
/// });
/// let types = distinct_values(lights.as_object().unwrap(), "type");
/// let ids: Vec<_> = types.iter().map(|e| e.id().unwrap()).collect();
/// assert_eq!(ids, ["1", "2"]);
/// ```
pub fn distinct_values(entries: &Map<String, Value>, key: &str) -> Vec<Entry> {
    let mut seen: Vec<Option<Value>> = Vec::new();
    entries_of(entries)
        .filter(|entry| {
            let value = entry.get(key).cloned();
            if seen.contains(&value) {
                false
            } else {
                seen.push(value);
                true
            }
        })
        .collect()
}

/// Keep entries matching every `(key, expected)` pair of `filters`.
///
/// Both the entry's field and the expected value may be a scalar or an
/// array. A pair matches when the field shares at least one value with
/// `expected` plus [`ALL`]; entries tagged `"ALL"` therefore match any value,
/// while a filter of `"ALL"` only matches entries that carry it literally.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use hue_scene_rs::filter::filter_entries;
///
/// let scenes = json!({
///     "a": {"region": "east"},
///     "b": {"region": "west"},
///     "c": {"region": ["ALL"]},
/// });
/// let filters = json!({"region": "east"});
/// let kept = filter_entries(scenes.as_object().unwrap(), filters.as_object().unwrap());
/// let ids: Vec<_> = kept.iter().map(|e| e.id().unwrap()).collect();
/// assert_eq!(ids, ["a", "c"]);
/// ```
pub fn filter_entries(entries: &Map<String, Value>, filters: &Map<String, Value>) -> Vec<Entry> {
    entries_of(entries)
        .filter(|entry| {
            filters
                .iter()
                .all(|(key, expected)| field_matches(entry.get(key), expected))
        })
        .collect()
}

fn field_matches(field: Option<&Value>, expected: &Value) -> bool {
    let Some(field) = field else {
        return false;
    };
    let wildcard = Value::from(ALL);
    let wanted: Vec<&Value> = as_values(expected)
        .chain(std::iter::once(&wildcard))
        .collect();

    as_values(field).any(|v| wanted.contains(&v))
}

fn as_values(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter()),
        other => Box::new(std::iter::once(other)),
    }
}
