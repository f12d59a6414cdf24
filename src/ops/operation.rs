use crate::foundation::error::{ImagineError, ImagineResult};
use crate::ops::value::ParamValue;
use serde_json::{Map as JsonMap, Value as JsonValue};

/// A named image transformation request.
///
/// Parameters keep insertion order, which is also their order in encoded keys.
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    name: String,
    params: Vec<(String, ParamValue)>,
}

impl Operation {
    /// Create an operation without parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Builder form of [`Operation::set`].
    pub fn with(mut self, param: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(param, value);
        self
    }

    /// Set a parameter. An existing parameter keeps its position and gets the new value.
    pub fn set(&mut self, param: impl Into<String>, value: impl Into<ParamValue>) {
        let param = param.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == param) {
            Some((_, slot)) => *slot = value,
            None => self.params.push((param, value)),
        }
    }

    /// Operation name, e.g. `thumbnail`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters in insertion order.
    pub fn params(&self) -> impl ExactSizeIterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a parameter by name.
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Reject operations with an empty name.
    pub fn validate(&self) -> ImagineResult<()> {
        if self.name.is_empty() {
            return Err(ImagineError::invalid_operation(
                "operation name must not be empty",
            ));
        }
        Ok(())
    }

    /// Required non-negative integer parameter that fits in `u32`.
    pub fn u32_param(&self, param: &str) -> ImagineResult<u32> {
        self.opt_u32_param(param)?
            .ok_or_else(|| self.missing(param))
    }

    /// Optional non-negative integer parameter that fits in `u32`.
    pub fn opt_u32_param(&self, param: &str) -> ImagineResult<Option<u32>> {
        let Some(v) = self.param(param) else {
            return Ok(None);
        };
        v.as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                ImagineError::invalid_parameter(format!(
                    "`{}.{param}` must be a non-negative integer below 2^32, got {v:?}",
                    self.name
                ))
            })
    }

    /// Required finite numeric parameter.
    pub fn f64_param(&self, param: &str) -> ImagineResult<f64> {
        let v = self.param(param).ok_or_else(|| self.missing(param))?;
        v.as_f64().filter(|f| f.is_finite()).ok_or_else(|| {
            ImagineError::invalid_parameter(format!(
                "`{}.{param}` must be a finite number, got {v:?}",
                self.name
            ))
        })
    }

    /// Required string parameter.
    pub fn str_param(&self, param: &str) -> ImagineResult<&str> {
        self.opt_str_param(param)?
            .ok_or_else(|| self.missing(param))
    }

    /// Optional string parameter.
    pub fn opt_str_param(&self, param: &str) -> ImagineResult<Option<&str>> {
        let Some(v) = self.param(param) else {
            return Ok(None);
        };
        v.as_str().map(Some).ok_or_else(|| {
            ImagineError::invalid_parameter(format!(
                "`{}.{param}` must be a string, got {v:?}",
                self.name
            ))
        })
    }

    fn missing(&self, param: &str) -> ImagineError {
        ImagineError::invalid_parameter(format!(
            "`{}` requires parameter `{param}`",
            self.name
        ))
    }

    fn params_from_json(name: &str, params: JsonValue) -> ImagineResult<Self> {
        let mut op = Self::new(name);
        match params {
            JsonValue::Object(map) => {
                for (k, v) in map {
                    op.set(k, ParamValue::from(v));
                }
            }
            // An empty list is how parameterless operations usually arrive.
            JsonValue::Null => {}
            JsonValue::Array(items) if items.is_empty() => {}
            other => {
                return Err(ImagineError::serde(format!(
                    "parameters of `{name}` must be a JSON object, got `{other}`"
                )));
            }
        }
        Ok(op)
    }

    fn to_json(&self) -> JsonValue {
        let params: JsonMap<String, JsonValue> = self
            .params
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        let mut outer = JsonMap::new();
        outer.insert(self.name.clone(), JsonValue::Object(params));
        JsonValue::Object(outer)
    }
}

/// Ordered list of operations; order is both application order and encoding order.
///
/// Deserializes from a JSON object (`{"thumbnail": {"width": 100}}`) or from a JSON array of
/// single-key objects. Only the array form can carry the same operation twice. Serializes to the
/// array form.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(try_from = "JsonValue")]
pub struct OperationSequence(Vec<Operation>);

impl OperationSequence {
    /// Empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a sequence from JSON text.
    pub fn from_json(s: &str) -> ImagineResult<Self> {
        let v: JsonValue = serde_json::from_str(s)
            .map_err(|e| ImagineError::serde(format!("parse operations JSON: {e}")))?;
        Self::try_from(v)
    }

    /// Append an operation.
    pub fn push(&mut self, op: Operation) {
        self.0.push(op);
    }

    /// Builder form of [`OperationSequence::push`].
    pub fn then(mut self, op: Operation) -> Self {
        self.push(op);
        self
    }

    /// Operations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.0.iter()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when there are no operations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validate every operation name.
    pub fn validate(&self) -> ImagineResult<()> {
        self.0.iter().try_for_each(Operation::validate)
    }

    /// Array-form JSON representation.
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Array(self.0.iter().map(Operation::to_json).collect())
    }
}

impl TryFrom<JsonValue> for OperationSequence {
    type Error = ImagineError;

    fn try_from(v: JsonValue) -> ImagineResult<Self> {
        match v {
            JsonValue::Object(map) => map
                .into_iter()
                .map(|(name, params)| Operation::params_from_json(&name, params))
                .collect(),
            JsonValue::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    JsonValue::Object(map) if map.len() == 1 => {
                        let mut it = map.into_iter();
                        match it.next() {
                            Some((name, params)) => Operation::params_from_json(&name, params),
                            None => Err(ImagineError::serde("empty operation entry")),
                        }
                    }
                    other => Err(ImagineError::serde(format!(
                        "operation entries must be single-key objects, got `{other}`"
                    ))),
                })
                .collect(),
            other => Err(ImagineError::serde(format!(
                "operations must be a JSON object or array, got `{other}`"
            ))),
        }
    }
}

impl serde::Serialize for OperationSequence {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<Vec<Operation>> for OperationSequence {
    fn from(ops: Vec<Operation>) -> Self {
        Self(ops)
    }
}

impl FromIterator<Operation> for OperationSequence {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OperationSequence {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/operation.rs"]
mod tests;
