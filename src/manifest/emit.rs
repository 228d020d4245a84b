// src/manifest/emit.rs

//! Canonical rendering of declaration files.
//!
//! Canonical form keeps declared order, drops duplicate entries, and
//! uses two-space indentation. Formatting never changes the reference
//! set: parsing the output yields exactly the set that went in.

use std::collections::BTreeSet;

use super::Manifest;
use crate::depref::DepRef;

pub(super) fn emit_manifest(manifest: &Manifest) -> String {
    let mut seen = BTreeSet::new();
    let entries: Vec<&DepRef> = manifest
        .deps
        .iter()
        .filter(|d| seen.insert(d.attr()))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("{{ {} }}: {{\n", manifest.scope));

    if entries.is_empty() {
        out.push_str("  deps = [ ];\n");
    } else {
        out.push_str("  deps = [\n");
        for dep in entries {
            out.push_str(&format!("    {}\n", dep.scoped(&manifest.scope)));
        }
        out.push_str("  ];\n");
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::super::parse_manifest_str;
    use super::*;

    fn r(s: &str) -> DepRef {
        DepRef::parse(s).unwrap()
    }

    #[test]
    fn test_emit_canonical_form() {
        let manifest = Manifest::from_refs(vec![r("xorg.libX11"), r("freetype")]);
        let expected = "{ pkgs }: {\n  deps = [\n    pkgs.xorg.libX11\n    pkgs.freetype\n  ];\n}\n";
        assert_eq!(manifest.to_nix(), expected);
    }

    #[test]
    fn test_emit_empty() {
        let manifest = Manifest::new();
        assert_eq!(manifest.to_nix(), "{ pkgs }: {\n  deps = [ ];\n}\n");
    }

    #[test]
    fn test_emit_drops_duplicates() {
        let manifest = Manifest::from_refs(vec![r("cairo"), r("tk"), r("cairo")]);
        let rendered = manifest.to_nix();
        assert_eq!(rendered.matches("pkgs.cairo").count(), 1);
    }

    #[test]
    fn test_emit_preserves_scope() {
        let mut manifest = Manifest::from_refs(vec![r("tk")]);
        manifest.scope = "p".to_string();
        assert!(manifest.to_nix().starts_with("{ p }: {\n"));
        assert!(manifest.to_nix().contains("    p.tk\n"));
    }

    #[test]
    fn test_roundtrip_preserves_reference_set() {
        let content = r#"{ pkgs }: {
  deps = [
    # messy input: comments, duplicates, uneven spacing
    pkgs.xorg.libX11
        pkgs.freetype
    pkgs.cairo pkgs.freetype
  ];
}"#;
        let manifest = parse_manifest_str(content).unwrap();
        let reparsed = parse_manifest_str(&manifest.to_nix()).unwrap();
        assert_eq!(reparsed.reference_set(), manifest.reference_set());
        assert!(reparsed.duplicates().is_empty());
    }

    #[test]
    fn test_canonical_form_is_fixed_point() {
        let manifest = Manifest::from_refs(vec![r("tcl"), r("tk"), r("qhull")]);
        let once = manifest.to_nix();
        let twice = parse_manifest_str(&once).unwrap().to_nix();
        assert_eq!(once, twice);
    }
}
