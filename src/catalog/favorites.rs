//! Favorites collection keyed by record identifier.

use crate::domain::Record;
use serde::{Deserialize, Serialize};

/// User-curated records, at most one per identifier, in insertion order.
///
/// Serializes as a plain JSON array of summary records. Deserializing an array
/// with repeated identifiers keeps the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Record>", into = "Vec<Record>")]
pub struct Favorites {
    records: Vec<Record>,
}

impl Favorites {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Removes the entry with the same identifier if present, otherwise appends `record`.
    ///
    /// Returns `true` when the record is a favorite after the call.
    ///
    /// # Examples
    ///
    /// ```
    /// use dexview::{catalog::Favorites, Record};
    ///
    /// let mut favorites = Favorites::new();
    /// let pikachu = Record::new(25, "pikachu", "pikachu");
    ///
    /// assert!(favorites.toggle(&pikachu));
    /// assert!(!favorites.toggle(&pikachu));
    /// assert!(favorites.is_empty());
    /// ```
    pub fn toggle(&mut self, record: &Record) -> bool {
        if let Some(index) = self.records.iter().position(|r| r.id == record.id) {
            self.records.remove(index);
            false
        } else {
            self.records.push(record.clone());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Records in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }
}

impl From<Vec<Record>> for Favorites {
    fn from(records: Vec<Record>) -> Self {
        let mut favorites = Self::new();
        for record in records {
            if !favorites.contains(record.id) {
                favorites.records.push(record);
            }
        }
        favorites
    }
}

impl From<Favorites> for Vec<Record> {
    fn from(favorites: Favorites) -> Self {
        favorites.records
    }
}

impl<'a> IntoIterator for &'a Favorites {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(favorites: &Favorites) -> Vec<u32> {
        favorites.iter().map(|r| r.id).collect()
    }

    #[test]
    fn toggling_twice_restores_membership() {
        let mut favorites: Favorites = vec![
            Record::new(1, "bulbasaur", "bulbasaur"),
            Record::new(4, "charmander", "charmander"),
        ]
        .into();
        let before = favorites.clone();
        let pikachu = Record::new(25, "pikachu", "pikachu");

        favorites.toggle(&pikachu);
        assert!(favorites.contains(25));
        favorites.toggle(&pikachu);

        assert_eq!(favorites, before);
    }

    #[test]
    fn toggling_existing_entry_removes_it_by_id() {
        let mut favorites: Favorites = vec![Record::new(7, "squirtle", "squirtle")].into();
        // A record with the same id but different content still matches.
        let stale = Record::new(7, "squirtle", "squirtle").with_types(["water"]);

        assert!(!favorites.toggle(&stale));
        assert!(favorites.is_empty());
    }

    #[test]
    fn duplicate_ids_in_input_keep_first_entry() {
        let favorites: Favorites = serde_json::from_str(
            r#"[{"id":1,"name":"bulbasaur"},{"id":1,"name":"impostor"},{"id":4,"name":"charmander"}]"#,
        )
        .unwrap();

        assert_eq!(ids(&favorites), vec![1, 4]);
        assert_eq!(favorites.as_slice()[0].name, "bulbasaur");
    }

    #[test]
    fn serializes_as_plain_array() {
        let favorites: Favorites = vec![Record::new(25, "pikachu", "pikachu")].into();
        let json = serde_json::to_value(&favorites).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], 25);
    }
}
