use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::control::ControlId;

/// Outbound body of `POST /conduct-assessment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub items: Vec<ControlId>,
}

/// One per-control verdict as returned by the evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssessmentEntry {
    pub control_id: Option<ControlId>,
    pub result: Option<String>,
    pub comment: Option<String>,
}

const CONTROL_ID_KEYS: &[&str] = &["ism-control", "control_id", "ControlID"];
const COMMENT_KEYS: &[&str] = &["comment", "explanation"];

impl AssessmentEntry {
    fn from_value(value: &Value) -> Self {
        let field = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| value.get(*k).and_then(Value::as_str))
                .map(str::to_string)
        };
        Self {
            control_id: field(CONTROL_ID_KEYS),
            result: value.get("result").and_then(Value::as_str).map(str::to_string),
            comment: field(COMMENT_KEYS),
        }
    }
}

/// Inbound body from the evaluator, parsed leniently: a body that lacks a
/// well-formed `assessments` array is kept as a malformed response instead
/// of failing the dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssessmentResponse {
    /// `None` when the field was absent or not an array.
    pub assessments: Option<Vec<AssessmentEntry>>,
    pub output_file: Option<String>,
}

impl AssessmentResponse {
    pub fn new(entries: Vec<AssessmentEntry>, output_file: Option<&str>) -> Self {
        Self {
            assessments: Some(entries),
            output_file: output_file.map(str::to_string),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let assessments = value
            .get("assessments")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(AssessmentEntry::from_value).collect());
        let output_file = value
            .get("output_file")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { assessments, output_file }
    }

    /// Parse a raw response body. Bytes that are not JSON yield a malformed
    /// response.
    pub fn from_slice(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(_) => Self::default(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.assessments.is_none()
    }
}

/// Build an entry carrying only a verdict string.
#[cfg(test)]
pub(crate) fn entry(result: &str) -> AssessmentEntry {
    AssessmentEntry {
        result: Some(result.to_string()),
        ..Default::default()
    }
}
