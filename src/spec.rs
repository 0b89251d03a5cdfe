//! CPL Format Specification
//!
//! This module documents the CPL (Comma Pair Lines) format as implemented by
//! this library.
//!
//! # Overview
//!
//! CPL is a flat, line-oriented serialization format for key/value records.
//! Each line is one record of comma-separated `key:value` pairs; nesting is
//! expressed positionally through dotted-path keys; long, repeated paths can
//! be declared once in a key-map header and referenced by short tokens.
//!
//! ```text
//! %k0=user.name,k1=user.role
//! @k0:Adi,@k1:scribe
//! @k0:Lev,@k1:scout
//! ```
//!
//! # Records
//!
//! A record is one line of comma-separated pairs, each pair `key:value`:
//!
//! ```text
//! name:Adi,role:scribe
//! ```
//!
//! **Rules**:
//! - Leading/trailing whitespace around keys and values is trimmed; escaped
//!   whitespace (`\ `) is preserved.
//! - Keys are non-empty; values may be empty (the empty value is the null
//!   token).
//! - Duplicate keys in one record resolve last-write-wins, with the pair
//!   keeping the position of its first occurrence.
//! - Empty and whitespace-only lines are skipped and are not records.
//! - Empty segments between commas (`a:1,,b:2`) are tolerated and skipped;
//!   a line that yields no pairs at all is malformed.
//! - A pair without a `:` separator is malformed; the error names the
//!   1-based line and carries the raw line text.
//!
//! # Escaping
//!
//! `\` is the single escape character. Escaping is the exact inverse of
//! unescaping: `unescape(escape(s)) == s` for every string.
//!
//! ```text
//! \\  - backslash
//! \:  - colon
//! \,  - comma
//! \%  - percent (protects a key from reading as a header sigil)
//! \@  - at sign (protects a key from reading as an alias reference)
//! \=  - equals (used inside key-map headers)
//! \n  - newline
//! \r  - carriage return
//! \t  - tab
//! \   - escape + any whitespace character yields that character (protects
//!       leading/trailing whitespace, ASCII or not)
//! ```
//!
//! An unknown escape or a dangling `\` at end of token is malformed.
//!
//! # Key-maps
//!
//! A line whose first non-whitespace character is `%` declares a key-map:
//! comma-separated `alias=dotted.path` pairs. The declaration applies to all
//! subsequent records until another `%` line rebinds it (a bare `%` rebinds
//! to the empty key-map). Declaring the same alias twice in one header is an
//! error.
//!
//! In a record body:
//!
//! - `@alias` is an explicit reference; it must resolve, otherwise the parse
//!   fails with an unresolved-alias error.
//! - a bare token that exactly matches a declared alias also expands, and
//!   the expansion takes precedence over reading the token as a literal
//!   path. Any other bare token is a literal dotted path — key-maps are
//!   optional and plain dotted keys are always legal.
//!
//! The serializer only ever emits the explicit `@alias` form, and skips any
//! generated alias token that is already used as a literal path, so the
//! precedence rule cannot corrupt a round-trip.
//!
//! # Dotted paths
//!
//! A key like `a.b.c` encodes nested structure positionally. Flattening
//! joins nested mapping keys with `.` and indexes sequence elements from 0
//! (`tags.0`, `tags.1`). Unflattening splits on `.` and rebuilds the tree,
//! materializing a branch as a sequence exactly when its keys are the
//! consecutive integers `0..len`. Incompatible paths (one treats `a` as a
//! scalar, another as a parent of `a.b`) are a structural conflict, never a
//! silent overwrite.
//!
//! # Scalars
//!
//! The line grammar is untyped: every value is a string at the line level.
//! Native types exist only at the record-model boundary, with a canonical,
//! reversible representation:
//!
//! | Type | Rendering | Coercion back |
//! |------|-----------|---------------|
//! | Null | empty string | empty string only |
//! | Boolean | `true` / `false` | exact match only |
//! | Integer | minimal decimal (`-7`, `42`) | canonical form only (`007` stays a string) |
//! | Float | minimal decimal, whole floats keep `.0` | canonical, finite only (`1.50`, `NaN` stay strings) |
//! | String | verbatim | everything else |
//!
//! # Output
//!
//! UTF-8 text. One line per record, pairs joined by `,`, no trailing
//! delimiter, every line (including the last) terminated by the configured
//! terminator (LF by default, CRLF on request). A record with no pairs
//! produces no line; empty records are not representable. At most one key-map header,
//! before all records. Rendering the same ledger with the same options twice
//! is byte-identical, and header presence is a policy choice: parsing output
//! rendered with and without a key-map yields the same resolved ledger.

// This module contains only documentation; no implementation code
