// src/manifest/baseline.rs

//! Baseline declaration for desktop plotting environments.
//!
//! The set a Tk/GTK charting stack needs at runtime: X11 client
//! libraries, the Tcl/Tk toolkit, font rasterization, 2D drawing,
//! GTK with introspection bindings, PostScript and animation export,
//! and locale data. `depyard init` writes this declaration.

use super::Manifest;
use crate::depref::DepRef;

/// Attribute paths in the baseline declaration, in emission order
pub const BASELINE_ATTRS: &[&str] = &[
    // X11 client libraries for Tk and GTK windowing
    "xorg.libX11",
    "xorg.libXext",
    "xorg.libXrender",
    "xorg.libXft",
    "xorg.libXi",
    "xorg.libXtst",
    "xorg.libXcursor",
    "xorg.libXrandr",
    "xorg.libXfixes",
    "xorg.libxcb",
    // Tcl/Tk toolkit
    "tcl",
    "tk",
    // Convex hull / triangulation routines for surface plots
    "qhull",
    // Library discovery for native builds
    "pkg-config",
    // GTK backend with runtime bindings
    "gtk3",
    "gobject-introspection",
    // EPS/PS figure export
    "ghostscript",
    // Text rasterization
    "freetype",
    // Animation export
    "ffmpeg-full",
    // 2D rendering backend
    "cairo",
    // Locale data for non-C locales
    "glibcLocales",
];

/// Build the baseline declaration
pub fn baseline_manifest() -> Manifest {
    let deps = BASELINE_ATTRS
        .iter()
        .map(|attr| DepRef::parse(attr).expect("baseline attrs are valid"))
        .collect();
    Manifest::from_refs(deps)
}

#[cfg(test)]
mod tests {
    use super::super::parse_manifest_str;
    use super::*;
    use crate::capability::{classify, CapabilityClass};

    #[test]
    fn test_baseline_has_21_entries() {
        assert_eq!(BASELINE_ATTRS.len(), 21);
        let manifest = baseline_manifest();
        assert_eq!(manifest.len(), 21);
        assert_eq!(manifest.reference_set().len(), 21);
    }

    #[test]
    fn test_baseline_roundtrips() {
        let manifest = baseline_manifest();
        let reparsed = parse_manifest_str(&manifest.to_nix()).unwrap();
        assert_eq!(reparsed.reference_set(), manifest.reference_set());
    }

    #[test]
    fn test_baseline_is_fully_classified() {
        for dep in &baseline_manifest().deps {
            assert_ne!(
                classify(dep),
                CapabilityClass::Unclassified,
                "{} should classify",
                dep
            );
        }
    }

    #[test]
    fn test_baseline_covers_display_font_multimedia() {
        let classes: Vec<CapabilityClass> =
            baseline_manifest().deps.iter().map(classify).collect();
        assert!(classes.contains(&CapabilityClass::Windowing));
        assert!(classes.contains(&CapabilityClass::FontRendering));
        assert!(classes.contains(&CapabilityClass::MultimediaCodec));
    }
}
