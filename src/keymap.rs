//! The key-map resolver.
//!
//! A [`KeyMap`] maps short alias tokens to full dotted paths. Declared once
//! in a `%` header line, it applies to every subsequent record until a new
//! header rebinds it. The parser threads an immutable snapshot through
//! record resolution rather than mutating shared state; a new header builds
//! a fresh map.
//!
//! Decode direction: [`KeyMap::resolve`] expands a bare token if it is a
//! declared alias and otherwise passes it through verbatim, so plain dotted
//! keys are always legal. [`KeyMap::expand`] is the strict form behind `@`
//! references. When a declared alias collides with a literal dotted-path key,
//! the expansion wins; that precedence is documented in [`crate::spec`], not
//! guessed.
//!
//! Encode direction: [`KeyMap::plan`] decides which paths are worth aliasing
//! and assigns sequential `k0, k1, …` tokens in first-occurrence order, so
//! rendering the same ledger twice produces byte-identical output.

use crate::{Error, Ledger, Result};
use indexmap::IndexMap;

/// An alias → dotted-path table.
///
/// # Examples
///
/// ```rust
/// use cpl::KeyMap;
///
/// let mut key_map = KeyMap::new();
/// key_map.declare("k0", "address.city").unwrap();
///
/// assert_eq!(key_map.expand("k0"), Some("address.city"));
/// assert_eq!(key_map.resolve("k0"), "address.city");
/// assert_eq!(key_map.resolve("name"), "name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyMap(IndexMap<String, String>);

impl KeyMap {
    /// Creates an empty key-map.
    #[must_use]
    pub fn new() -> Self {
        KeyMap(IndexMap::new())
    }

    /// Declares an alias for a full dotted path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateAlias`] if the alias is already declared in
    /// this key-map.
    pub fn declare(&mut self, alias: impl Into<String>, path: impl Into<String>) -> Result<()> {
        let alias = alias.into();
        if self.0.contains_key(&alias) {
            return Err(Error::duplicate_alias(alias));
        }
        self.0.insert(alias, path.into());
        Ok(())
    }

    /// Returns the path a declared alias expands to, or `None`.
    #[must_use]
    pub fn expand(&self, alias: &str) -> Option<&str> {
        self.0.get(alias).map(String::as_str)
    }

    /// Resolves a bare key token: a declared alias expands to its path
    /// (expansion takes precedence over reading the token as a literal
    /// path); anything else is the path verbatim.
    #[must_use]
    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        self.expand(token).unwrap_or(token)
    }

    /// Returns the alias declared for a path, if any.
    #[must_use]
    pub fn alias_for(&self, path: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, p)| p.as_str() == path)
            .map(|(a, _)| a.as_str())
    }

    /// Returns the number of declared aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no aliases are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over (alias, path) pairs, in declaration order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Plans a key-map for a resolved ledger.
    ///
    /// A path earns an alias when it occurs at least `threshold` times
    /// (minimum 1) and is longer than the `@` reference that would replace
    /// it. Aliases are assigned in first-occurrence order; a candidate token
    /// that is itself used as a literal path anywhere in the ledger is
    /// skipped, so bare-token expansion precedence can never corrupt a
    /// round-trip.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpl::{parse, KeyMap};
    ///
    /// let ledger = parse("user.name:Adi\nuser.name:Lev\n").unwrap();
    /// let key_map = KeyMap::plan(&ledger, 2);
    /// assert_eq!(key_map.expand("k0"), Some("user.name"));
    /// ```
    #[must_use]
    pub fn plan(ledger: &Ledger, threshold: usize) -> KeyMap {
        let threshold = threshold.max(1);

        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for record in ledger {
            for (path, _) in record {
                *counts.entry(path.as_str()).or_insert(0) += 1;
            }
        }

        let mut map = KeyMap::new();
        let mut next = 0usize;
        for (path, count) in &counts {
            if *count < threshold {
                continue;
            }
            let mut probe = next;
            let candidate = loop {
                let token = format!("k{}", probe);
                probe += 1;
                if !counts.contains_key(token.as_str()) {
                    break token;
                }
            };
            // The emitted reference is `@` + token; a path no longer than
            // that gains nothing, and the token number stays available.
            if path.len() <= candidate.len() + 1 {
                continue;
            }
            next = probe;
            map.0.insert(candidate, (*path).to_string());
        }
        map
    }
}

impl<'a> IntoIterator for &'a KeyMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    #[test]
    fn test_declare_rejects_duplicates() {
        let mut key_map = KeyMap::new();
        key_map.declare("k0", "a.b").unwrap();
        let err = key_map.declare("k0", "c.d").unwrap_err();
        assert_eq!(err, Error::duplicate_alias("k0"));
    }

    #[test]
    fn test_resolve_falls_back_to_verbatim() {
        let key_map = KeyMap::new();
        assert_eq!(key_map.resolve("a.b.c"), "a.b.c");
    }

    #[test]
    fn test_plan_orders_aliases_by_first_occurrence() {
        let ledger: Ledger = vec![
            Record::from_iter([("user.name", "Adi"), ("user.role", "scribe")]),
            Record::from_iter([("user.name", "Lev"), ("user.role", "scout")]),
        ]
        .into();

        let key_map = KeyMap::plan(&ledger, 2);
        let aliases: Vec<_> = key_map.iter().map(|(a, p)| (a.as_str(), p.as_str())).collect();
        assert_eq!(aliases, vec![("k0", "user.name"), ("k1", "user.role")]);
    }

    #[test]
    fn test_plan_respects_threshold() {
        let ledger: Ledger = vec![
            Record::from_iter([("user.name", "Adi"), ("user.note", "once")]),
            Record::from_iter([("user.name", "Lev")]),
        ]
        .into();

        let key_map = KeyMap::plan(&ledger, 2);
        assert_eq!(key_map.expand("k0"), Some("user.name"));
        assert_eq!(key_map.alias_for("user.note"), None);
    }

    #[test]
    fn test_plan_skips_short_paths() {
        let ledger: Ledger = vec![
            Record::from_iter([("id", "1")]),
            Record::from_iter([("id", "2")]),
        ]
        .into();

        assert!(KeyMap::plan(&ledger, 2).is_empty());
    }

    #[test]
    fn test_plan_weighs_paths_against_the_actual_token() {
        let mut records = Vec::new();
        for _ in 0..2 {
            let mut record = Record::new();
            for i in 0..10 {
                record.insert(format!("alpha.one{}", i), "v".to_string());
            }
            record.insert("a.bc".to_string(), "v".to_string());
            record.insert("ab.cd".to_string(), "v".to_string());
            records.push(record);
        }

        let key_map = KeyMap::plan(&records.into(), 2);

        // Ten long paths take k0..k9. `@k10` is as long as `a.bc` itself, so
        // that path stays literal and the token number is not consumed;
        // `ab.cd` still gains a byte and gets k10.
        assert_eq!(key_map.len(), 11);
        assert_eq!(key_map.alias_for("a.bc"), None);
        assert_eq!(key_map.expand("k10"), Some("ab.cd"));
    }

    #[test]
    fn test_plan_avoids_literal_path_collisions() {
        // `k0` is used as a literal path, so the first generated token must
        // skip past it.
        let ledger: Ledger = vec![
            Record::from_iter([("user.name", "Adi"), ("k0", "literal")]),
            Record::from_iter([("user.name", "Lev"), ("k0", "literal")]),
        ]
        .into();

        let key_map = KeyMap::plan(&ledger, 2);
        assert_eq!(key_map.expand("k0"), None);
        assert_eq!(key_map.expand("k1"), Some("user.name"));
    }
}
