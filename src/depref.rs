// src/depref.rs

//! Package references for dependency declarations
//!
//! A declaration names packages as dotted attribute paths rooted at the
//! manifest's scope parameter:
//!
//! - `pkgs.freetype` - a top-level package
//! - `pkgs.xorg.libX11` - a package inside an attribute family
//!
//! The scope prefix (`pkgs.`) is stripped at parse time; a [`DepRef`]
//! holds only the path that identifies the package in the index
//! (`freetype`, `xorg.libX11`). Identifiers are opaque: depyard never
//! interprets a version or a format out of them.
//!
//! # Segment rules
//!
//! Each path segment must start with a letter or underscore and may
//! continue with letters, digits, `_`, `-`, or `'` (the identifier rules
//! of the expression language the provisioning tool evaluates).

use std::fmt;
use std::str::FromStr;

/// A package reference: a dotted attribute path without the scope prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepRef {
    /// Path segments, outermost first (`["xorg", "libX11"]`)
    segments: Vec<String>,
}

impl DepRef {
    /// Parse a reference from its dotted form, e.g. `xorg.libX11`
    pub fn parse(s: &str) -> Result<Self, DepRefParseError> {
        if s.is_empty() {
            return Err(DepRefParseError::Empty);
        }

        let mut segments = Vec::new();
        for segment in s.split('.') {
            validate_segment(segment, s)?;
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    /// Build a reference from pre-validated segments
    ///
    /// Used by the manifest parser, which validates token-by-token.
    pub(crate) fn from_segments(segments: Vec<String>) -> Self {
        debug_assert!(!segments.is_empty());
        Self { segments }
    }

    /// The path segments, outermost first
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The dotted attribute path (`xorg.libX11`)
    pub fn attr(&self) -> String {
        self.segments.join(".")
    }

    /// The outermost segment (`xorg` for `xorg.libX11`, `tcl` for `tcl`)
    ///
    /// Attribute families like `xorg.*` group related packages; the
    /// capability classifier keys off this.
    pub fn family(&self) -> &str {
        &self.segments[0]
    }

    /// The innermost segment (`libX11` for `xorg.libX11`)
    pub fn leaf(&self) -> &str {
        self.segments.last().map(|s| s.as_str()).unwrap_or_default()
    }

    /// Whether the path has more than one segment
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// Format with a scope prefix, as written in a declaration file
    pub fn scoped(&self, scope: &str) -> String {
        format!("{}.{}", scope, self.attr())
    }
}

impl fmt::Display for DepRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for DepRef {
    type Err = DepRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DepRef::parse(s)
    }
}

/// Validate one path segment against the identifier rules
fn validate_segment(segment: &str, whole: &str) -> Result<(), DepRefParseError> {
    let mut chars = segment.chars();

    let Some(first) = chars.next() else {
        return Err(DepRefParseError::EmptySegment(whole.to_string()));
    };

    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(DepRefParseError::InvalidSegmentStart {
            segment: segment.to_string(),
            reference: whole.to_string(),
        });
    }

    for c in chars {
        if !(c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '\'') {
            return Err(DepRefParseError::InvalidCharacter {
                character: c,
                reference: whole.to_string(),
            });
        }
    }

    Ok(())
}

/// Errors that can occur when parsing a package reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepRefParseError {
    /// The reference string is empty
    Empty,
    /// A path segment is empty (leading, trailing, or doubled dot)
    EmptySegment(String),
    /// A segment starts with a character other than a letter or `_`
    InvalidSegmentStart { segment: String, reference: String },
    /// A segment contains a character outside the identifier set
    InvalidCharacter { character: char, reference: String },
}

impl fmt::Display for DepRefParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepRefParseError::Empty => write!(f, "Empty package reference"),
            DepRefParseError::EmptySegment(s) => {
                write!(f, "Empty path segment in reference: {}", s)
            }
            DepRefParseError::InvalidSegmentStart { segment, reference } => write!(
                f,
                "Segment '{}' must start with a letter or '_' in reference: {}",
                segment, reference
            ),
            DepRefParseError::InvalidCharacter {
                character,
                reference,
            } => write!(
                f,
                "Invalid character '{}' in reference: {}",
                character, reference
            ),
        }
    }
}

impl std::error::Error for DepRefParseError {}
