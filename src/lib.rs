//! # cpl
//!
//! A flat, line-oriented serialization format (CPL) for key/value records,
//! with lossless conversion to and from tree-shaped data.
//!
//! ## What is CPL?
//!
//! Each CPL line is one record of comma-separated `key:value` pairs. Nesting
//! is expressed positionally through dotted-path keys (`address.city`), and
//! long, repeated paths can be declared once in a key-map header and
//! referenced by short `@` tokens:
//!
//! ```text
//! %k0=user.name,k1=user.role
//! @k0:Adi,@k1:scribe
//! @k0:Lev,@k1:scout
//! ```
//!
//! ## Key Features
//!
//! - **Line-bounded**: one record per line, trivially greppable and diffable
//! - **Key-map compression**: repeated dotted paths collapse to short aliases,
//!   deterministically, so identical input renders byte-identical output
//! - **Lossless round-trips**: `parse(render(ledger)) == ledger`, and
//!   flatten/unflatten invert each other for conflict-free structures
//! - **Untyped lines, typed trees**: values are strings at the line level;
//!   all native-type coercion happens at the record-model boundary
//! - **No unsafe code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use cpl::{parse, render};
//!
//! let ledger = parse("name:Adi,role:scribe\n").unwrap();
//! assert_eq!(ledger.records()[0].get("name"), Some("Adi"));
//!
//! // Rendering reproduces the line
//! assert_eq!(render(&ledger), "name:Adi,role:scribe\n");
//! ```
//!
//! ### Key-map compression
//!
//! ```rust
//! use cpl::{parse, render_with_options, RenderOptions};
//!
//! let text = "user.name:Adi,user.role:scribe\nuser.name:Lev,user.role:scout\n";
//! let ledger = parse(text).unwrap();
//!
//! let compressed = render_with_options(&ledger, RenderOptions::compressed());
//! assert_eq!(
//!     compressed,
//!     "%k0=user.name,k1=user.role\n@k0:Adi,@k1:scribe\n@k0:Lev,@k1:scout\n"
//! );
//!
//! // Header presence is a policy choice, not a semantic difference
//! assert_eq!(parse(&compressed).unwrap(), ledger);
//! ```
//!
//! ### Bridging to tree-shaped data
//!
//! ```rust
//! use cpl::{cpl, flatten, unflatten};
//!
//! let value = cpl!({ "address": { "city": "Jerusalem" } });
//! let record = flatten(&value).unwrap();
//! assert_eq!(record.get("address.city"), Some("Jerusalem"));
//! assert_eq!(unflatten(&record).unwrap(), value);
//! ```
//!
//! [`Value`] implements `Serialize`/`Deserialize`, so JSON- or YAML-shaped
//! data converts through any serde format crate without this library
//! touching either format itself.
//!
//! ## Scope
//!
//! The core is a pure, synchronous transformation over fully materialized
//! in-memory data: no filesystem paths, no processes, no argument parsing.
//! Readers and writers are accepted only as `std::io` generics. Command-line
//! front ends, HTML extraction, and YAML pretty-printing are collaborator
//! responsibilities.
//!
//! ## Format Specification
//!
//! See the [`spec`] module for the full grammar, escaping table, and key-map
//! scoping rules.

pub mod de;
pub mod error;
pub mod keymap;
pub mod macros;
pub mod map;
pub mod options;
pub mod record;
pub mod ser;
pub mod spec;
pub mod tree;
pub mod value;

pub use de::Parser;
pub use error::{Error, Result};
pub use keymap::KeyMap;
pub use map::Map;
pub use options::{LineTerminator, RenderOptions};
pub use record::{Ledger, Record};
pub use ser::Serializer;
pub use tree::{flatten, unflatten};
pub use value::{Number, Value};

use std::io;

/// Parses CPL text into a resolved [`Ledger`].
///
/// All key-map aliases are expanded; the records in the result carry full
/// dotted paths only.
///
/// # Examples
///
/// ```rust
/// let ledger = cpl::parse("a:1,b:2\nc:3\n").unwrap();
/// assert_eq!(ledger.len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::MalformedLine`], [`Error::UnresolvedAlias`], or
/// [`Error::DuplicateAlias`] at the first offending line. Parsing is
/// fail-fast: one bad line fails the whole parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(text: &str) -> Result<Ledger> {
    Parser::from_str(text).parse()
}

/// Parses CPL text into a resolved [`Ledger`] plus the [`KeyMap`] in scope
/// at end of input.
///
/// # Examples
///
/// ```rust
/// let (ledger, key_map) = cpl::parse_with_key_map("%k0=user.name\n@k0:Adi\n").unwrap();
/// assert_eq!(ledger.len(), 1);
/// assert_eq!(key_map.expand("k0"), Some("user.name"));
/// ```
///
/// # Errors
///
/// Same failure modes as [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_key_map(text: &str) -> Result<(Ledger, KeyMap)> {
    Parser::from_str(text).parse_with_key_map()
}

/// Renders a ledger to CPL text with default options (no key-map header,
/// LF terminators).
#[must_use]
pub fn render(ledger: &Ledger) -> String {
    render_with_options(ledger, RenderOptions::default())
}

/// Renders a ledger to CPL text with custom options.
///
/// Rendering is deterministic: the same ledger and options always produce
/// byte-identical output.
///
/// # Examples
///
/// ```rust
/// use cpl::{parse, render_with_options, LineTerminator, RenderOptions};
///
/// let ledger = parse("a:1\n").unwrap();
/// let options = RenderOptions::new().with_line_terminator(LineTerminator::CrLf);
/// assert_eq!(render_with_options(&ledger, options), "a:1\r\n");
/// ```
#[must_use]
pub fn render_with_options(ledger: &Ledger, options: RenderOptions) -> String {
    let mut serializer = Serializer::new(options);
    serializer.write_ledger(ledger);
    serializer.into_inner()
}

/// Parses a ledger from an I/O stream of CPL text.
///
/// The input is read to completion first; CPL is line-bounded and wholly
/// materialized, never streamed.
///
/// # Errors
///
/// Returns an error if reading fails or the text is not valid CPL.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Ledger>
where
    R: io::Read,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    parse(&text)
}

/// Renders a ledger to a writer with default options.
///
/// # Errors
///
/// Returns an error if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, ledger: &Ledger) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, ledger, RenderOptions::default())
}

/// Renders a ledger to a writer with custom options.
///
/// # Errors
///
/// Returns an error if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, ledger: &Ledger, options: RenderOptions) -> Result<()>
where
    W: io::Write,
{
    let text = render_with_options(ledger, options);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_roundtrip() {
        let text = "name:Adi,role:scribe\nname:Lev,role:scout\n";
        let ledger = parse(text).unwrap();
        assert_eq!(render(&ledger), text);
    }

    #[test]
    fn test_render_parse_roundtrip_with_key_map() {
        let ledger = parse("user.name:Adi\nuser.name:Lev\n").unwrap();
        let compressed = render_with_options(&ledger, RenderOptions::compressed());
        assert_eq!(parse(&compressed).unwrap(), ledger);
    }

    #[test]
    fn test_reader_writer_roundtrip() {
        let text = "a:1,b:2\n";
        let ledger = from_reader(text.as_bytes()).unwrap();

        let mut buffer = Vec::new();
        to_writer(&mut buffer, &ledger).unwrap();
        assert_eq!(buffer, text.as_bytes());
    }

    #[test]
    fn test_flatten_unflatten_through_the_line_format() {
        let value = cpl!({ "user": { "name": "Adi", "tags": ["a", "b"] } });
        let record = flatten(&value).unwrap();

        let ledger: Ledger = vec![record].into();
        let text = render(&ledger);
        let parsed = parse(&text).unwrap();

        assert_eq!(unflatten(&parsed.records()[0]).unwrap(), value);
    }
}
