use std::collections::HashSet;

use super::types::{Catalog, RawCatalog};
use crate::models::Control;

/// Deduplicate every category by control id (first occurrence wins) and sort
/// it ascending by id using ordinal comparison. Category names are kept as is.
pub fn normalize(raw: RawCatalog) -> Catalog {
    let categories = raw
        .into_iter()
        .map(|(name, controls)| (name, normalize_category(controls)))
        .collect();
    Catalog { categories }
}

fn normalize_category(controls: Vec<Control>) -> Vec<Control> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Control> = controls
        .into_iter()
        .filter(|c| seen.insert(c.control_id.clone()))
        .collect();
    unique.sort_by(|a, b| a.control_id.cmp(&b.control_id));
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control(id: &str, description: &str) -> Control {
        Control::new(id, description)
    }

    fn raw(entries: Vec<(&str, Vec<Control>)>) -> RawCatalog {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_duplicates_collapse_and_sort() {
        let catalog = normalize(raw(vec![(
            "Identity",
            vec![control("ISM-2", "b"), control("ISM-1", "a"), control("ISM-1", "dup")],
        )]));
        let ids: Vec<&str> = catalog.controls("Identity").unwrap()
            .iter().map(|c| c.control_id.as_str()).collect();
        assert_eq!(ids, vec!["ISM-1", "ISM-2"]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let catalog = normalize(raw(vec![(
            "Identity",
            vec![control("ISM-7", "first"), control("ISM-7", "second")],
        )]));
        assert_eq!(catalog.controls("Identity").unwrap()[0].description, "first");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(raw(vec![
            ("Identity", vec![control("ISM-9", ""), control("ISM-10", ""), control("ISM-9", "")]),
            ("Email", vec![control("ISM-3", ""), control("ISM-1", "")]),
        ]));
        let twice = normalize(once.to_raw());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_ordinal_sort() {
        // Ordinal comparison: "ISM-10" sorts before "ISM-9".
        let catalog = normalize(raw(vec![(
            "Identity",
            vec![control("ISM-9", ""), control("ISM-10", ""), control("ISM-1", "")],
        )]));
        let ids: Vec<&str> = catalog.controls("Identity").unwrap()
            .iter().map(|c| c.control_id.as_str()).collect();
        assert_eq!(ids, vec!["ISM-1", "ISM-10", "ISM-9"]);
    }

    #[test]
    fn test_cross_category_membership_is_kept() {
        let catalog = normalize(raw(vec![
            ("Identity", vec![control("ISM-1", "")]),
            ("Email", vec![control("ISM-1", "")]),
        ]));
        assert_eq!(catalog.total_controls(), 2);
        assert_eq!(catalog.distinct_controls().len(), 1);
        assert_eq!(catalog.categories_of("ISM-1"), vec!["Email", "Identity"]);
    }

    #[test]
    fn test_category_names_untouched() {
        let catalog = normalize(raw(vec![("  Mixed Case ", vec![control("ISM-1", "")])]));
        assert_eq!(catalog.categories(), vec!["  Mixed Case "]);
    }

    #[test]
    fn test_find_searches_all_categories() {
        let catalog = normalize(raw(vec![
            ("Email", vec![control("ISM-5", "email control")]),
            ("Identity", vec![control("ISM-1", "mfa")]),
        ]));
        assert_eq!(catalog.find("ISM-1").unwrap().description, "mfa");
        assert!(catalog.contains("ISM-5"));
        assert!(catalog.find("ISM-404").is_none());
    }

    #[test]
    fn test_empty_category_survives() {
        let catalog = normalize(raw(vec![("Empty", vec![])]));
        assert_eq!(catalog.controls("Empty").unwrap().len(), 0);
        assert!(!catalog.is_empty());
    }
}
