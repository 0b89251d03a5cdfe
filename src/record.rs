//! The flat data model: records and ledgers.
//!
//! A [`Record`] is one parsed line: an ordered sequence of key/value string
//! pairs with unique keys. A [`Ledger`] is an ordered sequence of records.
//! Both preserve order across round-trips; neither knows anything about
//! key-maps or nesting.

use indexmap::IndexMap;

/// One parsed CPL line: ordered key/value pairs with unique keys.
///
/// Keys are full dotted paths once parsing has resolved any aliases. A
/// repeated key takes the last value written while keeping the position of
/// the first occurrence (last-write-wins).
///
/// # Examples
///
/// ```rust
/// use cpl::Record;
///
/// let mut record = Record::new();
/// record.insert("name".to_string(), "Adi".to_string());
/// record.insert("role".to_string(), "scribe".to_string());
/// record.insert("name".to_string(), "Lev".to_string());
///
/// assert_eq!(record.get("name"), Some("Lev"));
/// assert_eq!(record.keys().map(String::as_str).collect::<Vec<_>>(), vec!["name", "role"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record(IndexMap<String, String>);

impl Record {
    /// Creates an empty `Record`.
    #[must_use]
    pub fn new() -> Self {
        Record(IndexMap::new())
    }

    /// Creates an empty `Record` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Record(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key/value pair, replacing (last-write-wins) any value the
    /// key already had while keeping the key's original position.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.0.insert(key, value)
    }

    /// Returns the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the number of pairs in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the record has no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in pair order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, String> {
        self.0.keys()
    }

    /// Returns an iterator over the key/value pairs, in pair order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Record(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// An ordered sequence of [`Record`]s.
///
/// There is no invariant between records; order is preserved across
/// round-trips. A ledger is always materialized wholly in memory before any
/// output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ledger(Vec<Record>);

impl Ledger {
    /// Creates an empty `Ledger`.
    #[must_use]
    pub fn new() -> Self {
        Ledger(Vec::new())
    }

    /// Appends a record.
    pub fn push(&mut self, record: Record) {
        self.0.push(record);
    }

    /// Returns the records as a slice.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.0
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the ledger has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the records, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.0.iter()
    }
}

impl From<Vec<Record>> for Ledger {
    fn from(records: Vec<Record>) -> Self {
        Ledger(records)
    }
}

impl FromIterator<Record> for Ledger {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Ledger(iter.into_iter().collect())
    }
}

impl IntoIterator for Ledger {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut record = Record::new();
        record.insert("a".to_string(), "1".to_string());
        record.insert("b".to_string(), "2".to_string());
        record.insert("a".to_string(), "3".to_string());

        assert_eq!(record.get("a"), Some("3"));
        assert_eq!(
            record.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_ledger_preserves_record_order() {
        let ledger: Ledger = vec![
            Record::from_iter([("x", "1")]),
            Record::from_iter([("y", "2")]),
        ]
        .into();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.records()[0].get("x"), Some("1"));
        assert_eq!(ledger.records()[1].get("y"), Some("2"));
    }
}
