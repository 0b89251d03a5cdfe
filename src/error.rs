//! Error types for CPL parsing, rendering, and tree conversion.
//!
//! All core errors are raised synchronously at the offending line or path.
//! One bad line fails the whole parse: CPL has no best-effort salvage mode,
//! because partial ingestion would break the round-trip guarantee.
//!
//! ## Error Categories
//!
//! - [`Error::MalformedLine`]: grammar violation (missing `:`, bad escape, empty key)
//! - [`Error::UnresolvedAlias`]: an `@alias` reference with no key-map declaration in scope
//! - [`Error::DuplicateAlias`]: one key-map declares the same alias twice
//! - [`Error::StructuralConflict`]: two dotted paths imply incompatible structure
//! - [`Error::Unsupported`]: a value that has no flat representation
//! - [`Error::Io`]: reader/writer failures in the convenience wrappers
//!
//! ## Examples
//!
//! ```rust
//! use cpl::{parse, Error};
//!
//! let result = parse("foo,bar:baz");
//! match result {
//!     Err(Error::MalformedLine { line, .. }) => assert_eq!(line, 1),
//!     other => panic!("expected MalformedLine, got {:?}", other),
//! }
//! ```

use thiserror::Error;

/// Represents all possible errors that can occur while working with CPL data.
///
/// Each variant carries locating context: a line number for grammar and
/// alias errors, a path string for structural conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Grammar violation on one input line
    #[error("malformed line {line}: {msg}\n  {text}")]
    MalformedLine {
        line: usize,
        msg: String,
        text: String,
    },

    /// An `@alias` reference with no matching key-map declaration in scope
    #[error("line {line}: unresolved alias `@{alias}` (no key-map declaration in scope)")]
    UnresolvedAlias { line: usize, alias: String },

    /// A key-map declared the same alias twice
    #[error("duplicate alias declaration `{alias}`")]
    DuplicateAlias { alias: String },

    /// Two dotted paths imply incompatible structure at the same position
    #[error("structural conflict at `{path}`: {msg}")]
    StructuralConflict { path: String, msg: String },

    /// A value with no flat representation
    #[error("unsupported value: {0}")]
    Unsupported(String),
}

impl Error {
    /// Creates a malformed-line error carrying the 1-based line number and
    /// the raw text of the offending line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpl::Error;
    ///
    /// let err = Error::malformed_line(3, "foo,bar:baz", "pair is missing a `:` separator");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn malformed_line(line: usize, text: &str, msg: impl Into<String>) -> Self {
        Error::MalformedLine {
            line,
            msg: msg.into(),
            text: text.to_string(),
        }
    }

    /// Creates an unresolved-alias error for an `@alias` reference that no
    /// key-map declaration in scope can expand.
    pub fn unresolved_alias(line: usize, alias: impl Into<String>) -> Self {
        Error::UnresolvedAlias {
            line,
            alias: alias.into(),
        }
    }

    /// Creates a duplicate-alias error. The alias token is the locating context.
    pub fn duplicate_alias(alias: impl Into<String>) -> Self {
        Error::DuplicateAlias {
            alias: alias.into(),
        }
    }

    /// Creates a structural-conflict error for a dotted path that contradicts
    /// structure already implied by another path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpl::Error;
    ///
    /// let err = Error::structural_conflict("a.b", "path descends through a scalar");
    /// assert!(err.to_string().contains("`a.b`"));
    /// ```
    pub fn structural_conflict(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::StructuralConflict {
            path: path.into(),
            msg: msg.into(),
        }
    }

    /// Creates an unsupported-value error for values with no flat representation.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Error::Unsupported(msg.into())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
