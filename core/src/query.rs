//! Query parameters for GET requests.
//!
//! Keys are unique; a repeated insert replaces the earlier value but keeps its
//! position, so the rendered query string follows first-insertion order.

use serde_json::{Map, Number, Value};

use crate::error::ApiError;

/// A scalar query value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Number(Number),
}

impl QueryValue {
    /// The form placed in the URL. Numbers use their decimal representation;
    /// whole floats drop the fraction, so `2.0` renders as `2`.
    pub fn render(&self) -> String {
        match self {
            QueryValue::Text(s) => s.clone(),
            QueryValue::Number(n) => render_number(n),
        }
    }
}

/// Whole floats below 1e21 render as plain integers. Larger magnitudes keep
/// the exponent form.
const MAX_PLAIN_FLOAT: f64 = 1e21;

fn render_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_PLAIN_FLOAT => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{f:.0}")
            }
        }
        _ => n.to_string(),
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Text(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::Text(s)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for QueryValue {
                fn from(n: $t) -> Self {
                    QueryValue::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl TryFrom<f64> for QueryValue {
    type Error = ApiError;

    fn try_from(n: f64) -> Result<Self, Self::Error> {
        Number::from_f64(n)
            .map(QueryValue::Number)
            .ok_or_else(|| ApiError::InvalidQuery(format!("{n} is not a finite number")))
    }
}

/// Mapping of unique keys to scalar values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style `insert`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build from a JSON object whose values are strings or numbers.
    pub fn from_json_object(object: &Map<String, Value>) -> Result<Self, ApiError> {
        let mut params = Self::new();
        for (key, value) in object {
            let value = match value {
                Value::String(s) => QueryValue::Text(s.clone()),
                Value::Number(n) => QueryValue::Number(n.clone()),
                other => {
                    return Err(ApiError::InvalidQuery(format!(
                        "{key}: expected string or number, got {other}"
                    )))
                }
            };
            params.insert(key.clone(), value);
        }
        Ok(params)
    }

    /// Parse a JSON text that must hold an object of scalars.
    pub fn from_json_str(json: &str) -> Result<Self, ApiError> {
        match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(object)) => Self::from_json_object(&object),
            Ok(other) => Err(ApiError::InvalidQuery(format!("expected object, got {other}"))),
            Err(e) => Err(ApiError::InvalidQuery(e.to_string())),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
