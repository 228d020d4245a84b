// src/manifest/diff.rs

//! Diff computation between two declarations.
//!
//! Declarations are compared as reference sets: entry order and
//! duplicate entries never show up as changes.

use std::collections::BTreeMap;

use super::Manifest;
use crate::depref::DepRef;

/// The result of comparing two declarations
#[derive(Debug, Clone)]
pub struct ManifestDiff {
    /// References present only in the new declaration, ordered by attr
    pub added: Vec<DepRef>,

    /// References present only in the old declaration, ordered by attr
    pub removed: Vec<DepRef>,

    /// Number of references common to both
    pub unchanged: usize,
}

impl ManifestDiff {
    /// True when both declarations describe the same reference set
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// One-line summary, e.g. "+2 -1 (19 unchanged)"
    pub fn summary(&self) -> String {
        format!(
            "+{} -{} ({} unchanged)",
            self.added.len(),
            self.removed.len(),
            self.unchanged
        )
    }
}

/// Compare two declarations as reference sets
pub fn compute_diff(old: &Manifest, new: &Manifest) -> ManifestDiff {
    let old_set: BTreeMap<String, &DepRef> = old.deps.iter().map(|d| (d.attr(), d)).collect();
    let new_set: BTreeMap<String, &DepRef> = new.deps.iter().map(|d| (d.attr(), d)).collect();

    let added = new_set
        .iter()
        .filter(|(attr, _)| !old_set.contains_key(*attr))
        .map(|(_, d)| (*d).clone())
        .collect();

    let removed = old_set
        .iter()
        .filter(|(attr, _)| !new_set.contains_key(*attr))
        .map(|(_, d)| (*d).clone())
        .collect();

    let unchanged = new_set
        .keys()
        .filter(|attr| old_set.contains_key(*attr))
        .count();

    ManifestDiff {
        added,
        removed,
        unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(attrs: &[&str]) -> Manifest {
        Manifest::from_refs(attrs.iter().map(|a| DepRef::parse(a).unwrap()).collect())
    }

    #[test]
    fn test_diff_identical() {
        let a = m(&["cairo", "freetype"]);
        let diff = compute_diff(&a, &a);
        assert!(diff.is_empty());
        assert_eq!(diff.unchanged, 2);
    }

    #[test]
    fn test_diff_added_and_removed() {
        let old = m(&["cairo", "tk", "tcl"]);
        let new = m(&["cairo", "tk", "qhull"]);
        let diff = compute_diff(&old, &new);

        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added[0].attr(), "qhull");
        assert_eq!(diff.removed.len(), 1);
        assert_eq!(diff.removed[0].attr(), "tcl");
        assert_eq!(diff.unchanged, 2);
        assert_eq!(diff.summary(), "+1 -1 (2 unchanged)");
    }

    #[test]
    fn test_diff_ignores_order_and_duplicates() {
        let old = m(&["tk", "cairo", "cairo"]);
        let new = m(&["cairo", "tk"]);
        assert!(compute_diff(&old, &new).is_empty());
    }

    #[test]
    fn test_diff_output_sorted_by_attr() {
        let old = m(&[]);
        let new = m(&["tk", "cairo", "freetype"]);
        let diff = compute_diff(&old, &new);
        let attrs: Vec<String> = diff.added.iter().map(|d| d.attr()).collect();
        assert_eq!(attrs, vec!["cairo", "freetype", "tk"]);
    }
}
