use crate::{Error, Result};
use serde_json::{Map, Value, json};

pub const DEFAULT_REFERENCE_FIGHTER: &str = "Oleksandr Usyk";

/// JSON-backed chart configuration addressed by dotted paths (`align.mode`, `chart.title`, ...).
///
/// User-provided overrides are deep-merged onto [`ChartConfig::defaults`], so every getter used
/// by the pipeline has a value even when the override file only sets a single key.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig(Value);

impl Default for ChartConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl ChartConfig {
    pub fn defaults() -> Self {
        Self(json!({
            "reference": {
                "name": DEFAULT_REFERENCE_FIGHTER,
            },
            "align": {
                "mode": "equalSpacing",
                "order": "ascending",
                "referenceX": 15,
                "xSpacing": 2,
                "slotSpacing": 2,
                "dateBand": [-20, 20],
            },
            "chart": {},
        }))
    }

    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parses a JSON override document. The result is not merged with defaults yet.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|err| Error::InvalidConfig {
            path: "<root>".to_string(),
            message: err.to_string(),
        })?;
        if !value.is_object() {
            return Err(Error::InvalidConfig {
                path: "<root>".to_string(),
                message: "expected a JSON object".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        if cur.is_null() { None } else { Some(cur) }
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    /// Like [`ChartConfig::get_str`], but a present value of the wrong type is an error.
    pub fn require_str(&self, dotted_path: &str) -> Result<Option<&str>> {
        match self.get(dotted_path) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(type_error(dotted_path, "string", other)),
        }
    }

    /// Like [`ChartConfig::get_f64`], but a present non-number (or non-finite) is an error.
    pub fn require_f64(&self, dotted_path: &str) -> Result<Option<f64>> {
        match self.get(dotted_path) {
            None => Ok(None),
            Some(v) => match v.as_f64() {
                Some(n) if n.is_finite() => Ok(Some(n)),
                _ => Err(type_error(dotted_path, "finite number", v)),
            },
        }
    }

    /// A present value that is not a non-negative integer is an error.
    pub fn require_u64(&self, dotted_path: &str) -> Result<Option<u64>> {
        match self.get(dotted_path) {
            None => Ok(None),
            Some(v) => v
                .as_u64()
                .map(Some)
                .ok_or_else(|| type_error(dotted_path, "non-negative integer", v)),
        }
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Configs are objects; coerce anything else so this never panics on user input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    /// Reference fighter name, falling back to [`DEFAULT_REFERENCE_FIGHTER`].
    pub fn reference_name(&self) -> &str {
        self.get_str("reference.name")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_REFERENCE_FIGHTER)
    }

    /// Short label used on the reference bar and in the title ("Usyk" for "Oleksandr Usyk").
    pub fn reference_label(&self) -> String {
        if let Some(label) = self.get_str("reference.label").map(str::trim) {
            if !label.is_empty() {
                return label.to_string();
            }
        }
        let name = self.reference_name();
        name.split_whitespace().last().unwrap_or(name).to_string()
    }
}

fn type_error(path: &str, expected: &str, got: &Value) -> Error {
    Error::InvalidConfig {
        path: path.to_string(),
        message: format!("expected {expected}, got {got}"),
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
