//! CPL parsing: tokenizer, grammar, and the line-oriented parser.
//!
//! ## Overview
//!
//! Parsing walks the input line by line:
//!
//! - blank and whitespace-only lines are skipped
//! - a line whose first non-whitespace character is `%` is a key-map
//!   declaration; it rebinds the key-map snapshot used for every subsequent
//!   record
//! - every other line is one record: comma-separated `key:value` pairs
//!
//! Splitting on `,`, `:`, and the header's `=` is escape-aware, so delimiters
//! escaped with `\` pass through as literal characters. Trimming around
//! tokens is escape-aware on the trailing side, so an escaped trailing space
//! (`\ `) survives.
//!
//! Parsing is fail-fast: the first grammar violation aborts the whole parse
//! with a [`MalformedLine`](crate::Error::MalformedLine) carrying the 1-based
//! line number and the raw line text.
//!
//! ## Usage
//!
//! Most users should use [`crate::parse`]:
//!
//! ```rust
//! let ledger = cpl::parse("name:Adi,role:scribe\n").unwrap();
//! assert_eq!(ledger.records()[0].get("name"), Some("Adi"));
//! ```

use crate::{Error, KeyMap, Ledger, Record, Result};

/// The CPL parser.
///
/// Turns CPL text into a resolved [`Ledger`]. Created via
/// [`Parser::from_str`].
///
/// # Examples
///
/// ```rust
/// use cpl::Parser;
///
/// let parser = Parser::from_str("%k0=address.city\n@k0:Jerusalem\n");
/// let ledger = parser.parse().unwrap();
/// assert_eq!(ledger.records()[0].get("address.city"), Some("Jerusalem"));
/// ```
pub struct Parser<'de> {
    input: &'de str,
}

impl<'de> Parser<'de> {
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn from_str(input: &'de str) -> Self {
        Parser { input }
    }

    /// Parses the input into a resolved ledger.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedLine`], [`Error::UnresolvedAlias`], or
    /// [`Error::DuplicateAlias`] at the first offending line.
    pub fn parse(&self) -> Result<Ledger> {
        self.parse_with_key_map().map(|(ledger, _)| ledger)
    }

    /// Parses the input into a resolved ledger plus the key-map that was in
    /// scope at end of input.
    pub fn parse_with_key_map(&self) -> Result<(Ledger, KeyMap)> {
        let mut key_map = KeyMap::new();
        let mut ledger = Ledger::new();

        for (idx, raw_line) in self.input.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim_start();
            if line.trim().is_empty() {
                continue;
            }
            if let Some(body) = line.strip_prefix('%') {
                // Rebind: a fresh snapshot, never an in-place mutation.
                key_map = parse_key_map_line(line_no, raw_line, body)?;
            } else {
                ledger.push(parse_record_line(line_no, raw_line, line, &key_map)?);
            }
        }

        Ok((ledger, key_map))
    }
}

/// Parses one `%` header body into a key-map.
fn parse_key_map_line(line_no: usize, raw: &str, body: &str) -> Result<KeyMap> {
    let mut key_map = KeyMap::new();
    for segment in split_unescaped(body, ',') {
        let segment = trim_token(segment);
        if segment.is_empty() {
            continue;
        }
        let (alias, path) = split_once_unescaped(segment, '=').ok_or_else(|| {
            Error::malformed_line(line_no, raw, "key-map pair is missing an `=` separator")
        })?;
        let alias = unescape_token(trim_token(alias))
            .map_err(|msg| Error::malformed_line(line_no, raw, msg))?;
        let path = unescape_token(trim_token(path))
            .map_err(|msg| Error::malformed_line(line_no, raw, msg))?;
        if alias.is_empty() {
            return Err(Error::malformed_line(line_no, raw, "empty alias in key-map"));
        }
        if path.is_empty() {
            return Err(Error::malformed_line(line_no, raw, "empty path in key-map"));
        }
        key_map.declare(alias, path)?;
    }
    Ok(key_map)
}

/// Parses one record line against the key-map snapshot in scope.
fn parse_record_line(line_no: usize, raw: &str, line: &str, key_map: &KeyMap) -> Result<Record> {
    let mut record = Record::new();

    for segment in split_unescaped(line, ',') {
        let segment = trim_token(segment);
        if segment.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = split_once_unescaped(segment, ':').ok_or_else(|| {
            Error::malformed_line(line_no, raw, "pair is missing a `:` separator")
        })?;
        let raw_key = trim_token(raw_key);
        let raw_value = trim_token(raw_value);

        let key = if let Some(alias) = raw_key.strip_prefix('@') {
            let alias = unescape_token(alias)
                .map_err(|msg| Error::malformed_line(line_no, raw, msg))?;
            key_map
                .expand(&alias)
                .ok_or_else(|| Error::unresolved_alias(line_no, alias))?
                .to_string()
        } else {
            let token = unescape_token(raw_key)
                .map_err(|msg| Error::malformed_line(line_no, raw, msg))?;
            if token.is_empty() {
                return Err(Error::malformed_line(line_no, raw, "empty key"));
            }
            key_map.resolve(&token).to_string()
        };

        let value = unescape_token(raw_value)
            .map_err(|msg| Error::malformed_line(line_no, raw, msg))?;
        record.insert(key, value);
    }

    if record.is_empty() {
        return Err(Error::malformed_line(
            line_no,
            raw,
            "line contains no key:value pairs",
        ));
    }
    Ok(record)
}

/// Splits on every unescaped occurrence of `delim`.
fn split_unescaped(s: &str, delim: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == delim {
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Splits at the first unescaped occurrence of `delim`.
fn split_once_unescaped(s: &str, delim: char) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == delim {
            return Some((&s[..i], &s[i + c.len_utf8()..]));
        }
    }
    None
}

/// Trims surrounding whitespace without eating an escaped trailing space.
fn trim_token(s: &str) -> &str {
    let s = s.trim_start();
    let mut end = 0;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            end = i + c.len_utf8();
        } else if c == '\\' {
            escaped = true;
            // Keep a dangling backslash; unescape_token reports it.
            end = i + c.len_utf8();
        } else if !c.is_whitespace() {
            end = i + c.len_utf8();
        }
    }
    &s[..end]
}

/// Decodes `\`-escapes. The exact inverse of the serializer's escaping.
fn unescape_token(s: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some(':') => out.push(':'),
            Some(',') => out.push(','),
            Some('%') => out.push('%'),
            Some('@') => out.push('@'),
            Some('=') => out.push('='),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            // `\` before any whitespace character yields that character, so
            // boundary whitespace of every kind survives trimming.
            Some(c) if c.is_whitespace() => out.push(c),
            Some(other) => return Err(format!("unknown escape sequence `\\{}`", other)),
            None => return Err("unterminated escape at end of token".to_string()),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_unescaped_honors_escapes() {
        assert_eq!(split_unescaped("a,b\\,c,d", ','), vec!["a", "b\\,c", "d"]);
        assert_eq!(split_unescaped("solo", ','), vec!["solo"]);
    }

    #[test]
    fn test_split_once_unescaped() {
        assert_eq!(split_once_unescaped("k:v:w", ':'), Some(("k", "v:w")));
        assert_eq!(split_once_unescaped("k\\:v:w", ':'), Some(("k\\:v", "w")));
        assert_eq!(split_once_unescaped("no-separator", ':'), None);
    }

    #[test]
    fn test_trim_token_keeps_escaped_trailing_space() {
        assert_eq!(trim_token("  abc  "), "abc");
        assert_eq!(trim_token("abc\\  "), "abc\\ ");
        assert_eq!(trim_token("   "), "");
    }

    #[test]
    fn test_unescape_roundtrip_basics() {
        assert_eq!(unescape_token("a\\:b\\,c").unwrap(), "a:b,c");
        assert_eq!(unescape_token("\\n\\t\\r").unwrap(), "\n\t\r");
        assert_eq!(unescape_token("\\ lead").unwrap(), " lead");
        assert_eq!(unescape_token("\\\u{a0}x").unwrap(), "\u{a0}x");
        assert!(unescape_token("bad\\q").is_err());
        assert!(unescape_token("dangling\\").is_err());
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let parser = Parser::from_str("\n   \na:1\n\n");
        let ledger = parser.parse().unwrap();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_parse_rejects_pairless_line() {
        let parser = Parser::from_str(",,,");
        assert!(matches!(
            parser.parse(),
            Err(Error::MalformedLine { line: 1, .. })
        ));
    }

    #[test]
    fn test_key_map_rebinding_is_scoped() {
        let text = "%k0=first.path\n@k0:a\n%k0=second.path\n@k0:b\n";
        let ledger = Parser::from_str(text).parse().unwrap();
        assert_eq!(ledger.records()[0].get("first.path"), Some("a"));
        assert_eq!(ledger.records()[1].get("second.path"), Some("b"));
    }

    #[test]
    fn test_bare_alias_expansion_precedence() {
        // A bare token matching a declared alias expands, and the expansion
        // wins over the literal key of the same name.
        let text = "%city=address.city\ncity:Jerusalem\n";
        let ledger = Parser::from_str(text).parse().unwrap();
        assert_eq!(ledger.records()[0].get("address.city"), Some("Jerusalem"));
        assert_eq!(ledger.records()[0].get("city"), None);
    }

    #[test]
    fn test_unresolved_reference_is_an_error() {
        let err = Parser::from_str("@ghost:1\n").parse().unwrap_err();
        assert_eq!(err, Error::unresolved_alias(1, "ghost"));
    }

    #[test]
    fn test_empty_header_rebinds_to_empty() {
        let text = "%k0=user.name\n@k0:Adi\n%\nuser.name:Lev\n";
        let (ledger, key_map) = Parser::from_str(text).parse_with_key_map().unwrap();
        assert_eq!(ledger.len(), 2);
        assert!(key_map.is_empty());
    }
}
