use serde::{Deserialize, Serialize};

/// Binary outcome used for the session counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

/// Implementation status vocabulary returned by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImplementationStatus {
    /// Control has not yet been evaluated or reviewed.
    NotAssessed,
    /// Control is fully implemented and meets its objective.
    Effective,
    /// A different control meets or exceeds the original intent.
    AlternateControl,
    /// Control is absent.
    NotImplemented,
    /// Some components are in place, full compliance is not achieved.
    PartiallyImplemented,
    /// Control exists but fails to meet its purpose.
    Ineffective,
    /// Control cannot be implemented due to platform constraints.
    TechnicallyUnfeasible,
    /// Implementation could not be verified.
    NoVisibility,
    /// Control is irrelevant to the system's scope.
    NotApplicable,
    /// Free text outside the known vocabulary, kept verbatim.
    Unrecognized(String),
}

impl ImplementationStatus {
    /// Parse a free-text verdict. Matching is case-insensitive only, so
    /// padded text falls through to `Unrecognized`.
    pub fn parse(result: &str) -> Self {
        match result.to_lowercase().as_str() {
            "not assessed" => Self::NotAssessed,
            "effective" => Self::Effective,
            "alternate control" => Self::AlternateControl,
            "not implemented" => Self::NotImplemented,
            "partially implemented" => Self::PartiallyImplemented,
            "ineffective" => Self::Ineffective,
            "technically unfeasible" => Self::TechnicallyUnfeasible,
            "no visibility" => Self::NoVisibility,
            "not applicable" => Self::NotApplicable,
            _ => Self::Unrecognized(result.to_string()),
        }
    }

    /// Only `Effective`, `NotApplicable` and `AlternateControl` pass.
    pub fn verdict(&self) -> Verdict {
        match self {
            Self::Effective | Self::NotApplicable | Self::AlternateControl => Verdict::Pass,
            _ => Verdict::Fail,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::NotAssessed => "Not Assessed",
            Self::Effective => "Effective",
            Self::AlternateControl => "Alternate Control",
            Self::NotImplemented => "Not Implemented",
            Self::PartiallyImplemented => "Partially Implemented",
            Self::Ineffective => "Ineffective",
            Self::TechnicallyUnfeasible => "Technically Unfeasible",
            Self::NoVisibility => "No Visibility",
            Self::NotApplicable => "Not Applicable",
            Self::Unrecognized(text) => text,
        }
    }
}

impl Serialize for ImplementationStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl std::fmt::Display for ImplementationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}
