// src/capability.rs

//! Capability classes for declared packages
//!
//! A declaration set provisions an environment; what matters downstream
//! is the capability surface the environment ends up exposing (working
//! windowing, font rendering, multimedia, ...). Each package reference
//! classifies into one capability class, either from a hint carried by
//! the index snapshot or from the builtin attribute-path table here.
//!
//! Classes are reported by `depyard check` and can be required with
//! `--require` so a declaration that silently loses, say, its windowing
//! libraries fails validation.

use std::fmt;

use crate::depref::DepRef;

/// Capability classes an environment package can provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityClass {
    /// Display-server client libraries
    /// Example: xorg.libX11
    Windowing,

    /// Embeddable scripting toolkit (interpreter plus widget set)
    /// Example: tcl, tk
    ScriptingToolkit,

    /// Computational geometry
    /// Example: qhull
    ComputationalGeometry,

    /// Build-time helper tooling
    /// Example: pkg-config
    BuildHelper,

    /// Widget toolkit for graphical applications
    /// Example: gtk3
    GuiToolkit,

    /// Runtime introspection bindings for a toolkit
    /// Example: gobject-introspection
    Introspection,

    /// Document / PostScript / PDF interpreter
    /// Example: ghostscript
    DocumentInterpreter,

    /// Font rasterization and text shaping
    /// Example: freetype
    FontRendering,

    /// Multimedia codec suite
    /// Example: ffmpeg-full
    MultimediaCodec,

    /// 2D rendering library
    /// Example: cairo
    Graphics2d,

    /// Locale and internationalization data
    /// Example: glibcLocales
    LocaleData,

    /// Not covered by the builtin table and no index hint
    Unclassified,
}

impl CapabilityClass {
    /// Stable lowercase name, used in index hints and `--require` lists
    pub fn name(&self) -> &'static str {
        match self {
            Self::Windowing => "windowing",
            Self::ScriptingToolkit => "scripting-toolkit",
            Self::ComputationalGeometry => "geometry",
            Self::BuildHelper => "build-helper",
            Self::GuiToolkit => "gui-toolkit",
            Self::Introspection => "introspection",
            Self::DocumentInterpreter => "document-interpreter",
            Self::FontRendering => "font-rendering",
            Self::MultimediaCodec => "multimedia-codec",
            Self::Graphics2d => "graphics-2d",
            Self::LocaleData => "locale-data",
            Self::Unclassified => "unclassified",
        }
    }

    /// Parse a class from its stable name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "windowing" | "x11" => Some(Self::Windowing),
            "scripting-toolkit" | "scripting" => Some(Self::ScriptingToolkit),
            "geometry" | "computational-geometry" => Some(Self::ComputationalGeometry),
            "build-helper" | "build" => Some(Self::BuildHelper),
            "gui-toolkit" | "gui" => Some(Self::GuiToolkit),
            "introspection" => Some(Self::Introspection),
            "document-interpreter" | "postscript" => Some(Self::DocumentInterpreter),
            "font-rendering" | "font" => Some(Self::FontRendering),
            "multimedia-codec" | "multimedia" => Some(Self::MultimediaCodec),
            "graphics-2d" | "graphics" => Some(Self::Graphics2d),
            "locale-data" | "locale" => Some(Self::LocaleData),
            "unclassified" => Some(Self::Unclassified),
            _ => None,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Windowing => "Windowing / display-server libraries",
            Self::ScriptingToolkit => "Scripting toolkit",
            Self::ComputationalGeometry => "Computational geometry",
            Self::BuildHelper => "Build helper tooling",
            Self::GuiToolkit => "GUI widget toolkit",
            Self::Introspection => "Toolkit introspection bindings",
            Self::DocumentInterpreter => "Document/PostScript interpreter",
            Self::FontRendering => "Font rendering",
            Self::MultimediaCodec => "Multimedia codecs",
            Self::Graphics2d => "2D graphics rendering",
            Self::LocaleData => "Locale data",
            Self::Unclassified => "Unclassified",
        }
    }

    /// All classes, in report order
    pub fn all() -> &'static [CapabilityClass] {
        &[
            Self::Windowing,
            Self::ScriptingToolkit,
            Self::ComputationalGeometry,
            Self::BuildHelper,
            Self::GuiToolkit,
            Self::Introspection,
            Self::DocumentInterpreter,
            Self::FontRendering,
            Self::MultimediaCodec,
            Self::Graphics2d,
            Self::LocaleData,
            Self::Unclassified,
        ]
    }
}

impl fmt::Display for CapabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classify a reference from the builtin attribute-path table
///
/// Checks the full attribute path first, then the outermost family
/// segment. Index snapshots can override this per package via their
/// `capability` field (see [`classify_with_hint`]).
pub fn classify(dep: &DepRef) -> CapabilityClass {
    // Family-level rules cover grouped attribute sets
    match dep.family() {
        "xorg" | "wayland" | "libxkbcommon" => return CapabilityClass::Windowing,
        "gst_all_1" => return CapabilityClass::MultimediaCodec,
        _ => {}
    }

    match dep.attr().as_str() {
        "tcl" | "tk" | "tcllib" => CapabilityClass::ScriptingToolkit,
        "qhull" | "cgal" | "gts" => CapabilityClass::ComputationalGeometry,
        "pkg-config" | "pkgconf" | "cmake" | "meson" | "ninja" | "autoconf" | "automake"
        | "libtool" => CapabilityClass::BuildHelper,
        "gtk2" | "gtk3" | "gtk4" | "wxGTK" => CapabilityClass::GuiToolkit,
        "gobject-introspection" => CapabilityClass::Introspection,
        "ghostscript" | "poppler" => CapabilityClass::DocumentInterpreter,
        "freetype" | "fontconfig" | "harfbuzz" | "pango" => CapabilityClass::FontRendering,
        "ffmpeg" | "ffmpeg-full" | "libav" => CapabilityClass::MultimediaCodec,
        "cairo" | "pixman" => CapabilityClass::Graphics2d,
        "glibcLocales" => CapabilityClass::LocaleData,
        _ => CapabilityClass::Unclassified,
    }
}

/// Classify a reference, letting an index-provided hint win
///
/// An unknown hint falls back to the builtin table rather than erroring:
/// snapshots evolve independently of this binary.
pub fn classify_with_hint(dep: &DepRef, hint: Option<&str>) -> CapabilityClass {
    if let Some(hint) = hint {
        if let Some(class) = CapabilityClass::from_name(hint) {
            return class;
        }
    }
    classify(dep)
}
