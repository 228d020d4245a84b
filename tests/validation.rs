// tests/validation.rs

//! End-to-end validation: the baseline declaration against a target
//! index must resolve with zero missing references, and the resolved
//! set must cover the windowing, font, and multimedia capabilities.

mod common;

use depyard::capability::CapabilityClass;
use depyard::db;
use depyard::index::{sync_index, IndexSource, PackageIndex};
use depyard::manifest::{baseline_manifest, parse_manifest_str, BASELINE_ATTRS};
use depyard::resolve::{resolve, ResolutionOptions};

use common::{baseline_snapshot, snapshot_with, write_snapshot};

fn require_core() -> ResolutionOptions {
    ResolutionOptions {
        require: vec![
            CapabilityClass::Windowing,
            CapabilityClass::FontRendering,
            CapabilityClass::MultimediaCodec,
        ],
        ..Default::default()
    }
}

#[test]
fn baseline_resolves_with_zero_missing() {
    let (_dir, path) = write_snapshot(&baseline_snapshot());

    // Sync into a fresh cache, then resolve through the cache view,
    // the way 'index sync' followed by 'check' would.
    let mut conn = db::open_in_memory().unwrap();
    let source = IndexSource::File(path);
    let count = sync_index(&mut conn, &source, None).unwrap();
    assert_eq!(count, BASELINE_ATTRS.len() + 3);

    let index = PackageIndex::from_cache(&conn).unwrap();
    let report = resolve(&baseline_manifest(), &index, &require_core());

    assert!(report.is_clean());
    assert!(!report.has_warnings());
    assert_eq!(report.resolved.len(), 21);
    assert!(report.missing.is_empty());
    assert!(report.missing_capabilities.is_empty());
}

#[test]
fn baseline_covers_windowing_font_multimedia() {
    let index = PackageIndex::from_snapshot(&baseline_snapshot());
    let report = resolve(&baseline_manifest(), &index, &require_core());

    let coverage = report.capability_coverage();
    assert!(!coverage[&CapabilityClass::Windowing].is_empty());
    assert!(!coverage[&CapabilityClass::FontRendering].is_empty());
    assert!(!coverage[&CapabilityClass::MultimediaCodec].is_empty());
}

#[test]
fn missing_package_fails_validation() {
    // Index snapshot that lacks ghostscript
    let attrs: Vec<&str> = BASELINE_ATTRS
        .iter()
        .copied()
        .filter(|a| *a != "ghostscript")
        .collect();
    let index = PackageIndex::from_snapshot(&snapshot_with(&attrs));

    let report = resolve(&baseline_manifest(), &index, &require_core());

    assert!(!report.is_clean());
    assert!(!report.passes(false));
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].attr(), "ghostscript");
}

#[test]
fn duplicate_entry_does_not_change_capability_set() {
    let index = PackageIndex::from_snapshot(&baseline_snapshot());

    let clean = baseline_manifest();
    let mut with_dup = clean.clone();
    with_dup.deps.push(clean.deps[0].clone());

    let before = resolve(&clean, &index, &ResolutionOptions::default());
    let after = resolve(&with_dup, &index, &ResolutionOptions::default());

    // Same resolved set, same coverage; the duplicate only warns
    assert_eq!(before.resolved.len(), after.resolved.len());
    assert_eq!(before.capability_coverage(), after.capability_coverage());
    assert!(after.is_clean());
    assert!(after.has_warnings());
    assert_eq!(after.duplicates, vec![clean.deps[0].attr()]);
}

#[test]
fn required_capability_failure_is_reported() {
    // Strip the multimedia codec from the declaration
    let content = r#"{ pkgs }: {
  deps = [
    pkgs.xorg.libX11
    pkgs.freetype
  ];
}"#;
    let manifest = parse_manifest_str(content).unwrap();
    let index = PackageIndex::from_snapshot(&baseline_snapshot());

    let report = resolve(&manifest, &index, &require_core());

    assert!(report.missing.is_empty());
    assert!(!report.is_clean());
    assert_eq!(
        report.missing_capabilities,
        vec![CapabilityClass::MultimediaCodec]
    );
}
