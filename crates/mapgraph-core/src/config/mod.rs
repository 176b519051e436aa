//! JSON-object configuration with dotted-path access.
//!
//! Layout settings arrive from several places (built-in defaults, per-map settings, a CLI config
//! file); they are merged as JSON objects and only resolved into typed options at the edge.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig(Value);

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl LayoutConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parses a config document. JSON5 is accepted (comments, trailing commas, unquoted keys);
    /// the root must be an object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = json5::from_str(text).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        if !value.is_object() {
            return Err(Error::InvalidConfig {
                message: "config root must be an object".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    pub fn get_u64(&self, dotted_path: &str) -> Option<u64> {
        self.get(dotted_path).and_then(as_count)
    }

    /// Like [`LayoutConfig::get_f64`] but a present, non-numeric value is an error instead of
    /// being ignored. The other `require_*` getters follow the same rule: an absent key or
    /// `null` is `Ok(None)`.
    pub fn require_f64(&self, dotted_path: &str) -> Result<Option<f64>> {
        self.require(dotted_path, "a finite number", |v| {
            v.as_f64().filter(|f| f.is_finite())
        })
    }

    pub fn require_u64(&self, dotted_path: &str) -> Result<Option<u64>> {
        self.require(dotted_path, "a non-negative integer", as_count)
    }

    pub fn require_bool(&self, dotted_path: &str) -> Result<Option<bool>> {
        self.require(dotted_path, "a boolean", Value::as_bool)
    }

    pub fn require_str(&self, dotted_path: &str) -> Result<Option<&str>> {
        self.require(dotted_path, "a string", Value::as_str)
    }

    fn require<'a, T>(
        &'a self,
        dotted_path: &str,
        expected: &str,
        read: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>> {
        let Some(value) = self.get(dotted_path).filter(|v| !v.is_null()) else {
            return Ok(None);
        };
        read(value).map(Some).ok_or_else(|| Error::InvalidConfigValue {
            path: dotted_path.to_string(),
            message: format!("expected {expected}, got {value}"),
        })
    }

    /// Writes `value` at `dotted_path`, replacing any non-object value met on the way.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        let mut slot = &mut self.0;
        for segment in dotted_path.split('.') {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            slot = match slot {
                Value::Object(map) => map.entry(segment).or_insert(Value::Null),
                _ => return,
            };
        }
        *slot = value;
    }

    /// Merges `overrides` into this config: objects merge key by key, anything else replaces.
    pub fn deep_merge(&mut self, overrides: &Value) {
        merge_into(&mut self.0, overrides);
    }

    /// `self` with `overrides` merged on top.
    pub fn merged(&self, overrides: &LayoutConfig) -> LayoutConfig {
        let mut out = self.clone();
        out.deep_merge(overrides.as_value());
        out
    }
}

/// Non-negative integers, including JSON5 numbers that arrive as whole floats.
fn as_count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })
}

fn merge_into(target: &mut Value, overrides: &Value) {
    let Some(entries) = overrides.as_object() else {
        *target = overrides.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(map) = target else {
        return;
    };
    for (key, value) in entries {
        merge_into(map.entry(key.as_str()).or_insert(Value::Null), value);
    }
}
