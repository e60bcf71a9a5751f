use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use crate::catalog::Catalog;
use crate::errors::AssessError;
use crate::models::{AssessmentRequest, ControlId};

/// The set of controls the user has chosen. Every effective mutation bumps
/// `version`; consumers read through immutable snapshots.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    ids: BTreeSet<ControlId>,
    version: u64,
}

/// Immutable copy of the selection, sorted by control id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    ids: Arc<[ControlId]>,
    version: u64,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id` if absent, remove it if present. Returns whether the id is
    /// selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        let selected = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };
        self.version += 1;
        selected
    }

    /// Add every control of `category`. Returns how many ids were newly
    /// added; already-selected ids are left alone.
    pub fn select_all_in_category(&mut self, category: &str, catalog: &Catalog) -> Result<usize, AssessError> {
        let controls = catalog
            .controls(category)
            .ok_or_else(|| AssessError::UnknownCategory(category.to_string()))?;

        let added = controls
            .iter()
            .filter(|c| self.ids.insert(c.control_id.clone()))
            .count();
        if added > 0 {
            self.version += 1;
        }
        Ok(added)
    }

    pub fn clear(&mut self) {
        if !self.ids.is_empty() {
            self.ids.clear();
            self.version += 1;
        }
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            ids: self.ids.iter().cloned().collect(),
            version: self.version,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

impl SelectionSnapshot {
    pub fn ids(&self) -> &[ControlId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn to_request(&self) -> AssessmentRequest {
        AssessmentRequest { items: self.ids.to_vec() }
    }
}
