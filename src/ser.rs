//! CPL rendering.
//!
//! The [`Serializer`] turns a resolved [`Ledger`] back into CPL text:
//! one line per record, `key:value` pairs joined by commas, no trailing
//! delimiter, every line (including the last) terminated by the configured
//! line terminator. A record with no pairs produces no line: like empty
//! containers under [`flatten`](crate::flatten), an empty record is not
//! representable in the line format.
//!
//! When [`RenderOptions::emit_key_map`] is set, a key-map is planned over the
//! whole ledger, emitted as a single `%` header before all records, and
//! every aliased path is rewritten to its `@alias` reference. Escaping here
//! is the exact inverse of the parser's unescaping: for every string `s`,
//! `unescape(escape(s)) == s`.
//!
//! ## Usage
//!
//! Most users should use [`crate::render`] or [`crate::render_with_options`]:
//!
//! ```rust
//! let ledger = cpl::parse("name:Adi,role:scribe\n").unwrap();
//! assert_eq!(cpl::render(&ledger), "name:Adi,role:scribe\n");
//! ```

use crate::{KeyMap, Ledger, Record, RenderOptions};
use indexmap::IndexMap;

/// The CPL serializer.
///
/// # Examples
///
/// ```rust
/// use cpl::{parse, RenderOptions, Serializer};
///
/// let ledger = parse("user.name:Adi\nuser.name:Lev\n").unwrap();
/// let mut serializer = Serializer::new(RenderOptions::compressed());
/// serializer.write_ledger(&ledger);
/// let text = serializer.into_inner();
/// assert!(text.starts_with("%k0=user.name"));
/// ```
pub struct Serializer {
    output: String,
    options: RenderOptions,
}

impl Serializer {
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.output
    }

    /// Renders a whole ledger, planning a key-map first when the options ask
    /// for one.
    pub fn write_ledger(&mut self, ledger: &Ledger) {
        let key_map = if self.options.emit_key_map {
            KeyMap::plan(ledger, self.options.alias_threshold)
        } else {
            KeyMap::new()
        };
        self.write_ledger_with_key_map(ledger, &key_map);
    }

    /// Renders a ledger against an explicit key-map. The header is emitted
    /// only when the key-map is non-empty.
    pub fn write_ledger_with_key_map(&mut self, ledger: &Ledger, key_map: &KeyMap) {
        let alias_of: IndexMap<&str, &str> = key_map
            .iter()
            .map(|(alias, path)| (path.as_str(), alias.as_str()))
            .collect();

        if !key_map.is_empty() {
            self.write_header(key_map);
        }
        for record in ledger {
            // A record with no pairs has no line representation; the parser
            // would skip its bare terminator as a blank line.
            if record.is_empty() {
                continue;
            }
            self.write_record(record, &alias_of);
        }
    }

    fn write_header(&mut self, key_map: &KeyMap) {
        self.output.push('%');
        let mut first = true;
        for (alias, path) in key_map {
            if !first {
                self.output.push(',');
            }
            first = false;
            self.output.push_str(&escape_token(alias, true));
            self.output.push('=');
            self.output.push_str(&escape_token(path, true));
        }
        self.output.push_str(self.options.line_terminator.as_str());
    }

    fn write_record(&mut self, record: &Record, alias_of: &IndexMap<&str, &str>) {
        let mut first = true;
        for (path, value) in record {
            if !first {
                self.output.push(',');
            }
            first = false;
            match alias_of.get(path.as_str()) {
                Some(alias) => {
                    self.output.push('@');
                    self.output.push_str(&escape_token(alias, false));
                }
                None => self.output.push_str(&escape_key(path)),
            }
            self.output.push(':');
            self.output.push_str(&escape_token(value, false));
        }
        self.output.push_str(self.options.line_terminator.as_str());
    }
}

/// Escapes delimiters, control characters, and boundary whitespace.
///
/// The boundary is computed with the same Unicode whitespace predicate the
/// parser trims with, so any leading or trailing whitespace the parser would
/// eat gets a protecting `\`.
///
/// `escape_eq` additionally escapes `=` for key-map header tokens.
pub(crate) fn escape_token(s: &str, escape_eq: bool) -> String {
    let leading = s.len() - s.trim_start().len();
    let trailing_start = s.trim_end().len();
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            '\\' => out.push_str("\\\\"),
            ':' => out.push_str("\\:"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '=' if escape_eq => out.push_str("\\="),
            c if c.is_whitespace() && (i < leading || i >= trailing_start) => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a key token, additionally protecting a leading `%` or `@` so the
/// parser cannot mistake the key for a header line or an alias reference.
pub(crate) fn escape_key(s: &str) -> String {
    let escaped = escape_token(s, false);
    if escaped.starts_with('%') || escaped.starts_with('@') {
        format!("\\{}", escaped)
    } else {
        escaped
    }
}
