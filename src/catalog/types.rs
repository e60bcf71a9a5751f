use std::collections::BTreeMap;

use serde::Serialize;
use crate::models::{Control, ControlId};

/// Category name to controls, as read from the catalog document.
pub type RawCatalog = BTreeMap<String, Vec<Control>>;

/// Normalized catalog: within every category control ids are unique and
/// sorted ascending. Only `normalize` constructs one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    pub(super) categories: BTreeMap<String, Vec<Control>>,
}

impl Catalog {
    /// Category names in ascending order.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(|s| s.as_str()).collect()
    }

    pub fn controls(&self, category: &str) -> Option<&[Control]> {
        self.categories.get(category).map(|c| c.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Control])> {
        self.categories.iter().map(|(name, controls)| (name.as_str(), controls.as_slice()))
    }

    /// First control with this id, searching categories in ascending order.
    pub fn find(&self, control_id: &str) -> Option<&Control> {
        self.categories
            .values()
            .flat_map(|controls| controls.iter())
            .find(|c| c.control_id == control_id)
    }

    pub fn contains(&self, control_id: &str) -> bool {
        self.find(control_id).is_some()
    }

    /// Categories a control is listed under.
    pub fn categories_of(&self, control_id: &str) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|(_, controls)| controls.iter().any(|c| c.control_id == control_id))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Total entries across categories. A control listed under two
    /// categories counts twice.
    pub fn total_controls(&self) -> usize {
        self.categories.values().map(|c| c.len()).sum()
    }

    /// Distinct control ids across all categories.
    pub fn distinct_controls(&self) -> Vec<&ControlId> {
        let mut ids: Vec<&ControlId> = self.categories
            .values()
            .flat_map(|controls| controls.iter().map(|c| &c.control_id))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn to_raw(&self) -> RawCatalog {
        self.categories.clone()
    }
}
