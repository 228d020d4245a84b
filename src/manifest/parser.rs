// src/manifest/parser.rs

//! Parser for declaration files.
//!
//! Declarations use a small fixed fragment of the Nix expression
//! language: a function pattern binding one scope name, returning a
//! record whose only recognized key is `deps`, whose value is a list of
//! dotted references rooted at the scope. `#` starts a comment running
//! to end of line. Anything outside this fragment is rejected with a
//! line-numbered error rather than evaluated.

use std::path::Path;

use super::{Manifest, ManifestError, ManifestResult};
use crate::depref::DepRef;

/// Parse a declaration from a file
pub fn parse_manifest_file(path: &Path) -> ManifestResult<Manifest> {
    let content = std::fs::read_to_string(path)?;
    parse_manifest_str(&content)
}

/// Parse a declaration from a string
pub fn parse_manifest_str(content: &str) -> ManifestResult<Manifest> {
    let tokens = lex(content)?;
    Parser::new(tokens).parse()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Semicolon,
    Equals,
    Comma,
    Dot,
    Ellipsis,
    Ident(String),
    Str(String),
}

impl TokenKind {
    fn describe(&self) -> String {
        match self {
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Equals => "'='".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::Ellipsis => "'...'".to_string(),
            TokenKind::Ident(name) => format!("'{}'", name),
            TokenKind::Str(_) => "string literal".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    line: usize,
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '\''
}

fn lex(content: &str) -> ManifestResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut line = 1usize;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            c if c.is_whitespace() => {}
            '#' => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        line += 1;
                        break;
                    }
                }
            }
            '{' => tokens.push(Token { kind: TokenKind::LBrace, line }),
            '}' => tokens.push(Token { kind: TokenKind::RBrace, line }),
            '[' => tokens.push(Token { kind: TokenKind::LBracket, line }),
            ']' => tokens.push(Token { kind: TokenKind::RBracket, line }),
            ':' => tokens.push(Token { kind: TokenKind::Colon, line }),
            ';' => tokens.push(Token { kind: TokenKind::Semicolon, line }),
            '=' => tokens.push(Token { kind: TokenKind::Equals, line }),
            ',' => tokens.push(Token { kind: TokenKind::Comma, line }),
            '.' => {
                if chars.peek() == Some(&'.') {
                    chars.next();
                    if chars.next() == Some('.') {
                        tokens.push(Token { kind: TokenKind::Ellipsis, line });
                    } else {
                        return Err(ManifestError::Syntax {
                            line,
                            message: "expected '...'".to_string(),
                        });
                    }
                } else {
                    tokens.push(Token { kind: TokenKind::Dot, line });
                }
            }
            '"' => {
                // Strings only appear in malformed input; lex them so the
                // parser can point at the offending key instead.
                let start_line = line;
                let mut value = String::new();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                if escaped == '\n' {
                                    line += 1;
                                }
                                value.push(escaped);
                            }
                        }
                        '\n' => {
                            line += 1;
                            value.push(c);
                        }
                        _ => value.push(c),
                    }
                }
                if !closed {
                    return Err(ManifestError::Syntax {
                        line: start_line,
                        message: "unterminated string literal".to_string(),
                    });
                }
                tokens.push(Token {
                    kind: TokenKind::Str(value),
                    line: start_line,
                });
            }
            c if is_ident_start(c) => {
                let mut name = String::new();
                name.push(c);
                while let Some(&next) = chars.peek() {
                    if is_ident_continue(next) {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(name),
                    line,
                });
            }
            other => {
                return Err(ManifestError::Syntax {
                    line,
                    message: format!("unexpected character '{}'", other),
                });
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn last_line(&self) -> usize {
        self.tokens.last().map(|t| t.line).unwrap_or(1)
    }

    fn expect(&mut self, kind: &TokenKind) -> ManifestResult<Token> {
        match self.advance() {
            Some(token) if token.kind == *kind => Ok(token),
            Some(token) => Err(ManifestError::Syntax {
                line: token.line,
                message: format!(
                    "expected {}, found {}",
                    kind.describe(),
                    token.kind.describe()
                ),
            }),
            None => Err(ManifestError::Syntax {
                line: self.last_line(),
                message: format!("expected {}, found end of input", kind.describe()),
            }),
        }
    }

    fn expect_ident(&mut self) -> ManifestResult<(String, usize)> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::Ident(name),
                line,
            }) => Ok((name, line)),
            Some(token) => Err(ManifestError::Syntax {
                line: token.line,
                message: format!("expected identifier, found {}", token.kind.describe()),
            }),
            None => Err(ManifestError::Syntax {
                line: self.last_line(),
                message: "expected identifier, found end of input".to_string(),
            }),
        }
    }

    fn parse(mut self) -> ManifestResult<Manifest> {
        let scope = self.parse_pattern()?;
        let deps = self.parse_record(&scope)?;
        if let Some(token) = self.peek() {
            return Err(ManifestError::Syntax {
                line: token.line,
                message: format!("unexpected {} after declaration", token.kind.describe()),
            });
        }
        Ok(Manifest { scope, deps })
    }

    /// `{ pkgs }:` or `{ pkgs, ... }:`
    fn parse_pattern(&mut self) -> ManifestResult<String> {
        self.expect(&TokenKind::LBrace)?;
        let (scope, _) = self.expect_ident()?;
        if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Comma)) {
            self.advance();
            self.expect(&TokenKind::Ellipsis)?;
        }
        self.expect(&TokenKind::RBrace)?;
        self.expect(&TokenKind::Colon)?;
        Ok(scope)
    }

    /// `{ deps = [ ... ]; }` with `deps` as the only recognized key
    fn parse_record(&mut self, scope: &str) -> ManifestResult<Vec<DepRef>> {
        self.expect(&TokenKind::LBrace)?;
        let mut deps: Option<Vec<DepRef>> = None;

        loop {
            match self.peek() {
                Some(Token {
                    kind: TokenKind::RBrace,
                    ..
                }) => {
                    self.advance();
                    break;
                }
                Some(Token {
                    kind: TokenKind::Ident(_),
                    ..
                }) => {
                    let (key, line) = self.expect_ident()?;
                    if key != "deps" {
                        return Err(ManifestError::UnrecognizedKey { key, line });
                    }
                    if deps.is_some() {
                        return Err(ManifestError::DuplicateKey { key, line });
                    }
                    self.expect(&TokenKind::Equals)?;
                    let refs = self.parse_list(scope)?;
                    self.expect(&TokenKind::Semicolon)?;
                    deps = Some(refs);
                }
                Some(token) => {
                    return Err(ManifestError::Syntax {
                        line: token.line,
                        message: format!(
                            "expected attribute name or '}}', found {}",
                            token.kind.describe()
                        ),
                    });
                }
                None => {
                    return Err(ManifestError::Syntax {
                        line: self.last_line(),
                        message: "expected '}', found end of input".to_string(),
                    });
                }
            }
        }

        deps.ok_or(ManifestError::MissingDeps)
    }

    fn parse_list(&mut self, scope: &str) -> ManifestResult<Vec<DepRef>> {
        self.expect(&TokenKind::LBracket)?;
        let mut refs = Vec::new();

        loop {
            match self.peek() {
                Some(Token {
                    kind: TokenKind::RBracket,
                    ..
                }) => {
                    self.advance();
                    break;
                }
                Some(Token {
                    kind: TokenKind::Ident(_),
                    ..
                }) => {
                    refs.push(self.parse_ref(scope)?);
                }
                Some(token) => {
                    return Err(ManifestError::Syntax {
                        line: token.line,
                        message: format!(
                            "expected package reference or ']', found {}",
                            token.kind.describe()
                        ),
                    });
                }
                None => {
                    return Err(ManifestError::Syntax {
                        line: self.last_line(),
                        message: "expected ']', found end of input".to_string(),
                    });
                }
            }
        }

        Ok(refs)
    }

    /// `pkgs.xorg.libX11`, a dotted path rooted at the bound scope
    fn parse_ref(&mut self, scope: &str) -> ManifestResult<DepRef> {
        let (root, line) = self.expect_ident()?;
        let mut segments = Vec::new();
        while matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Dot)) {
            self.advance();
            let (segment, _) = self.expect_ident()?;
            segments.push(segment);
        }

        if root != scope {
            let mut reference = root;
            for segment in &segments {
                reference.push('.');
                reference.push_str(segment);
            }
            return Err(ManifestError::UnscopedReference {
                reference,
                scope: scope.to_string(),
                line,
            });
        }
        if segments.is_empty() {
            return Err(ManifestError::Syntax {
                line,
                message: format!("bare scope '{}' is not a package reference", scope),
            });
        }

        DepRef::parse(&segments.join("."))
            .map_err(|source| ManifestError::InvalidReference { line, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let manifest = parse_manifest_str("{ pkgs }: { deps = [ pkgs.cairo ]; }").unwrap();
        assert_eq!(manifest.scope, "pkgs");
        assert_eq!(manifest.len(), 1);
        assert!(manifest.contains_attr("cairo"));
    }

    #[test]
    fn test_parse_multiline_with_comments() {
        let content = r#"{ pkgs }: {
  deps = [
    # Display-server client libraries
    pkgs.xorg.libX11
    pkgs.xorg.libXext
    pkgs.freetype   # text rasterization
    pkgs.cairo
  ];
}
"#;
        let manifest = parse_manifest_str(content).unwrap();
        assert_eq!(manifest.len(), 4);
        assert!(manifest.contains_attr("xorg.libX11"));
        assert!(manifest.contains_attr("freetype"));
    }

    #[test]
    fn test_parse_ellipsis_pattern() {
        let manifest = parse_manifest_str("{ pkgs, ... }: { deps = [ pkgs.tk ]; }").unwrap();
        assert_eq!(manifest.scope, "pkgs");
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_parse_alternate_scope_name() {
        let manifest = parse_manifest_str("{ p }: { deps = [ p.qhull ]; }").unwrap();
        assert_eq!(manifest.scope, "p");
        assert!(manifest.contains_attr("qhull"));
    }

    #[test]
    fn test_parse_empty_deps() {
        let manifest = parse_manifest_str("{ pkgs }: { deps = [ ]; }").unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_duplicate_entries_retained() {
        let content = "{ pkgs }: { deps = [ pkgs.cairo pkgs.tk pkgs.cairo ]; }";
        let manifest = parse_manifest_str(content).unwrap();
        assert_eq!(manifest.len(), 3);
        assert_eq!(manifest.reference_set().len(), 2);
        assert_eq!(manifest.duplicates(), vec!["cairo".to_string()]);
    }

    #[test]
    fn test_unrecognized_key() {
        let content = r#"{ pkgs }: {
  deps = [ pkgs.cairo ];
  channel = "stable";
}"#;
        let err = parse_manifest_str(content).unwrap_err();
        match err {
            ManifestError::UnrecognizedKey { key, line } => {
                assert_eq!(key, "channel");
                assert_eq!(line, 3);
            }
            other => panic!("expected UnrecognizedKey, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_deps_key() {
        let content = "{ pkgs }: { deps = [ pkgs.tk ]; deps = [ pkgs.tcl ]; }";
        let err = parse_manifest_str(content).unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateKey { .. }));
    }

    #[test]
    fn test_missing_deps_key() {
        let err = parse_manifest_str("{ pkgs }: { }").unwrap_err();
        assert!(matches!(err, ManifestError::MissingDeps));
    }

    #[test]
    fn test_unscoped_reference() {
        let err = parse_manifest_str("{ pkgs }: { deps = [ xorg.libX11 ]; }").unwrap_err();
        match err {
            ManifestError::UnscopedReference {
                reference, scope, ..
            } => {
                assert_eq!(reference, "xorg.libX11");
                assert_eq!(scope, "pkgs");
            }
            other => panic!("expected UnscopedReference, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_scope_is_not_a_reference() {
        let err = parse_manifest_str("{ pkgs }: { deps = [ pkgs ]; }").unwrap_err();
        assert!(matches!(err, ManifestError::Syntax { .. }));
    }

    #[test]
    fn test_syntax_error_carries_line() {
        let content = "{ pkgs }: {\n  deps = [\n    pkgs.cairo\n  ]\n}";
        let err = parse_manifest_str(content).unwrap_err();
        match err {
            ManifestError::Syntax { line, message } => {
                assert_eq!(line, 5);
                assert!(message.contains("';'"), "message: {}", message);
            }
            other => panic!("expected Syntax, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_content_rejected() {
        let err = parse_manifest_str("{ pkgs }: { deps = [ ]; } }").unwrap_err();
        assert!(matches!(err, ManifestError::Syntax { .. }));
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse_manifest_str("{ pkgs }: { deps = \"oops").unwrap_err();
        assert!(matches!(err, ManifestError::Syntax { .. }));
    }

    #[test]
    fn test_empty_input() {
        let err = parse_manifest_str("").unwrap_err();
        assert!(matches!(err, ManifestError::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_apostrophe_in_attribute() {
        let manifest =
            parse_manifest_str("{ pkgs }: { deps = [ pkgs.ocamlPackages.lwt_ppx' ]; }").unwrap();
        assert!(manifest.contains_attr("ocamlPackages.lwt_ppx'"));
    }
}
