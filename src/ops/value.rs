use serde_json::Value as JsonValue;

/// A single operation parameter value.
///
/// Only integers, finite floats and strings have a canonical textual form. Anything else that
/// arrives through JSON is kept as [`ParamValue::Opaque`] so that key derivation can reject it
/// instead of silently inventing a placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer that does not fit in `i64`.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Free-form string.
    Str(String),
    /// A value without a canonical textual form (null, bool, array, object).
    Opaque(JsonValue),
}

impl ParamValue {
    /// Canonical decimal/string form used in cache keys.
    ///
    /// Integers print without a fractional part, floats use the shortest representation that
    /// round-trips (so `100.0` prints as `100`). The error carries a human readable reason.
    pub fn canonical(&self) -> Result<String, String> {
        match self {
            Self::Int(v) => Ok(v.to_string()),
            Self::UInt(v) => Ok(v.to_string()),
            Self::Float(v) if v.is_finite() => Ok(v.to_string()),
            Self::Float(v) => Err(format!("non-finite float `{v}`")),
            Self::Str(s) => Ok(s.clone()),
            Self::Opaque(v) => Err(match v {
                JsonValue::Null => "null has no textual form".to_string(),
                JsonValue::Bool(_) => "booleans have no canonical textual form".to_string(),
                JsonValue::Array(_) => "arrays have no canonical textual form".to_string(),
                JsonValue::Object(_) => "objects have no canonical textual form".to_string(),
                other => format!("unsupported value `{other}`"),
            }),
        }
    }

    /// Numeric view; numeric strings are accepted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::UInt(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Str(s) => s.trim().parse().ok(),
            Self::Opaque(_) => None,
        }
    }

    /// Non-negative integral view; integral floats and numeric strings are accepted.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(v) => u64::try_from(*v).ok(),
            Self::UInt(v) => Some(*v),
            Self::Float(v) => {
                if v.is_finite() && v.fract() == 0.0 && *v >= 0.0 && *v <= u64::MAX as f64 {
                    Some(*v as u64)
                } else {
                    None
                }
            }
            Self::Str(s) => s.trim().parse().ok(),
            Self::Opaque(_) => None,
        }
    }

    /// String view. Only [`ParamValue::Str`] is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// JSON form of this value.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Int(v) => JsonValue::from(*v),
            Self::UInt(v) => JsonValue::from(*v),
            Self::Float(v) => JsonValue::from(*v),
            Self::Str(s) => JsonValue::String(s.clone()),
            Self::Opaque(v) => v.clone(),
        }
    }
}

impl From<JsonValue> for ParamValue {
    fn from(v: JsonValue) -> Self {
        match v {
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    // serde_json numbers without arbitrary precision are always representable.
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(s) => Self::Str(s),
            other => Self::Opaque(other),
        }
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Self::Int(i),
            Err(_) => Self::UInt(v),
        }
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        // Go through the shortest f32 text so `0.1f32` stays `0.1` instead of its widened bits.
        Self::Float(v.to_string().parse().unwrap_or(f64::from(v)))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/value.rs"]
mod tests;
