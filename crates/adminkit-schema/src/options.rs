use derive_more::Deref;
use serde::{Deserialize, Serialize};
use serde_json::Value;

///
/// Options
///
/// Arbitrary key/value option bag carried by field descriptions, filters,
/// and form nodes. Values are opaque JSON; nested sections (for example
/// `field_options`) are plain JSON objects inside the bag.
///
/// Mutation is explicit; `Options` does not expose `DerefMut` so callers
/// go through `set`/`set_in` and nested sections stay well-formed.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Options(serde_json::Map<String, Value>);

impl Options {
    /// Create an empty option bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Store `value` under `section.key`, creating the section object if
    /// it is absent. A non-object value already stored under `section` is
    /// replaced by a fresh object.
    pub fn set_in(&mut self, section: &str, key: impl Into<String>, value: Value) {
        let entry = self
            .0
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));

        if !entry.is_object() {
            *entry = Value::Object(serde_json::Map::new());
        }

        if let Value::Object(map) = entry {
            map.insert(key.into(), value);
        }
    }

    /// Return the value stored under `section.key`, if any.
    #[must_use]
    pub fn get_in(&self, section: &str, key: &str) -> Option<&Value> {
        self.0.get(section)?.as_object()?.get(key)
    }
}

impl From<serde_json::Map<String, Value>> for Options {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self(map)
    }
}

///
/// TESTS
///
