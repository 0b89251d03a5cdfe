//! Configuration options for CPL rendering.
//!
//! - [`RenderOptions`]: main configuration struct
//! - [`LineTerminator`]: choice of record terminator (LF or CRLF)
//!
//! ## Examples
//!
//! ```rust
//! use cpl::{parse, render_with_options, LineTerminator, RenderOptions};
//!
//! let ledger = parse("user.name:Adi\nuser.name:Lev\n").unwrap();
//!
//! // Emit a key-map header for paths repeated at least twice
//! let options = RenderOptions::compressed();
//! let text = render_with_options(&ledger, options);
//! assert!(text.starts_with('%'));
//!
//! // CRLF output
//! let options = RenderOptions::new().with_line_terminator(LineTerminator::CrLf);
//! let text = render_with_options(&ledger, options);
//! assert!(text.ends_with("\r\n"));
//! ```

/// Line terminator choice for rendered records.
///
/// # Examples
///
/// ```rust
/// use cpl::LineTerminator;
///
/// assert_eq!(LineTerminator::Lf.as_str(), "\n");
/// assert_eq!(LineTerminator::CrLf.as_str(), "\r\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineTerminator {
    #[default]
    Lf,
    CrLf,
}

impl LineTerminator {
    /// Returns the string representation of this terminator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineTerminator::Lf => "\n",
            LineTerminator::CrLf => "\r\n",
        }
    }
}

/// Configuration options for CPL rendering.
///
/// Header presence is a serializer policy choice, not a semantic difference:
/// parsing the output yields the same resolved ledger either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit a `%` key-map header and rewrite repeated paths to `@` aliases.
    pub emit_key_map: bool,
    /// Minimum number of occurrences a path needs before it is aliased.
    pub alias_threshold: usize,
    /// Terminator appended to every record line, including the last.
    pub line_terminator: LineTerminator,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            emit_key_map: false,
            alias_threshold: 2,
            line_terminator: LineTerminator::default(),
        }
    }
}

impl RenderOptions {
    /// Creates default options (no key-map header, LF terminators).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that emit a key-map header for repeated paths.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpl::RenderOptions;
    ///
    /// let options = RenderOptions::compressed();
    /// assert!(options.emit_key_map);
    /// ```
    #[must_use]
    pub fn compressed() -> Self {
        RenderOptions {
            emit_key_map: true,
            ..Default::default()
        }
    }

    /// Sets whether a key-map header is emitted.
    #[must_use]
    pub fn with_emit_key_map(mut self, emit: bool) -> Self {
        self.emit_key_map = emit;
        self
    }

    /// Sets the minimum repetition count a path needs to earn an alias.
    ///
    /// Values below 1 are treated as 1.
    #[must_use]
    pub fn with_alias_threshold(mut self, threshold: usize) -> Self {
        self.alias_threshold = threshold;
        self
    }

    /// Sets the line terminator.
    #[must_use]
    pub fn with_line_terminator(mut self, terminator: LineTerminator) -> Self {
        self.line_terminator = terminator;
        self
    }
}
