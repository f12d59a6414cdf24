use std::collections::BTreeMap;

/// Separator symbols used when encoding an operation sequence.
///
/// Keys: `operation` (before every parameter pair, default `+`), `parameter` (between a
/// parameter name and its value, default `-`) and `operationGroup` (between operations, default
/// `+`). Missing keys take the default, unknown keys are ignored.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeparatorConfig {
    /// Placed between an operation name and each of its parameter pairs.
    pub operation: String,
    /// Joins a parameter name to its value.
    pub parameter: String,
    /// Joins successive operations.
    pub operation_group: String,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            operation: "+".to_string(),
            parameter: "-".to_string(),
            operation_group: "+".to_string(),
        }
    }
}

impl SeparatorConfig {
    /// Build from a loose string map.
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut out = Self::default();
        for (k, v) in map {
            match k.as_str() {
                "operation" => out.operation = v.clone(),
                "parameter" => out.parameter = v.clone(),
                "operationGroup" => out.operation_group = v.clone(),
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/key/separators.rs"]
mod tests;
