use serde::{Deserialize, Serialize};

/// Stable identifier of a compliance control, e.g. `ISM-1173`.
pub type ControlId = String;

/// A single compliance requirement from the catalog. Only `ControlID` is
/// interpreted; the remaining fields are carried through for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    #[serde(rename = "ControlID")]
    pub control_id: ControlId,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Section", default)]
    pub section: String,
    #[serde(rename = "Topic", default)]
    pub topic: String,
    #[serde(rename = "AlignedTopics", default)]
    pub aligned_topics: String,
    #[serde(rename = "BlueprintArea", default)]
    pub blueprint_area: String,
}

impl Control {
    pub fn new(control_id: &str, description: &str) -> Self {
        Self {
            control_id: control_id.to_string(),
            description: description.to_string(),
            section: String::new(),
            topic: String::new(),
            aligned_topics: String::new(),
            blueprint_area: String::new(),
        }
    }
}
