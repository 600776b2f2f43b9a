//! List projection: search, attribute filters, and sort order over a record slice.
//!
//! Everything here is a pure function of its inputs. The same [`ListQuery`]
//! drives both the paginated list and the favorites view.

use crate::domain::error::DexError;
use crate::domain::Record;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The four fixed sort options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    IdAsc,
    IdDesc,
}

impl SortOrder {
    pub const ALL: [Self; 4] = [Self::NameAsc, Self::NameDesc, Self::IdAsc, Self::IdDesc];

    /// Stable machine value, e.g. `"id-desc"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::IdAsc => "id-asc",
            Self::IdDesc => "id-desc",
        }
    }

    /// Human label shown in the order selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "Name A-Z",
            Self::NameDesc => "Name Z-A",
            Self::IdAsc => "ID ascending",
            Self::IdDesc => "ID descending",
        }
    }

    /// Compares two records under this order.
    ///
    /// Descending orders reverse the comparison rather than the output, so
    /// records with equal keys keep their input order under a stable sort.
    #[must_use]
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            Self::NameAsc => compare_names(&a.name, &b.name),
            Self::NameDesc => compare_names(&a.name, &b.name).reverse(),
            Self::IdAsc => a.id.cmp(&b.id),
            Self::IdDesc => a.id.cmp(&b.id).reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DexError::Config(format!("unknown sort order: {s}")))
    }
}

/// Case-folded code-point comparison with a raw tiebreak, so "Abra" and "abra" order
/// deterministically. Not locale collation; service names are lowercase ASCII.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Attribute a filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Ability,
    Type,
    Species,
}

impl FilterField {
    /// Label of the "no filter" choice.
    #[must_use]
    pub const fn any_label(self) -> &'static str {
        match self {
            Self::Ability => "All abilities",
            Self::Type => "All types",
            Self::Species => "All species",
        }
    }
}

impl FromStr for FilterField {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ability" | "abilities" => Ok(Self::Ability),
            "type" | "types" => Ok(Self::Type),
            "species" => Ok(Self::Species),
            other => Err(DexError::Config(format!("unknown filter field: {other}"))),
        }
    }
}

/// Search term, attribute filters, and sort order.
///
/// Empty strings mean "not applied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub ability: String,
    pub kind: String,
    pub species: String,
    pub order: SortOrder,
}

impl ListQuery {
    /// Sets one filter. An empty value clears it.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Ability => self.ability = value,
            FilterField::Type => self.kind = value,
            FilterField::Species => self.species = value,
        }
    }

    #[must_use]
    pub fn filter(&self, field: FilterField) -> &str {
        match field {
            FilterField::Ability => &self.ability,
            FilterField::Type => &self.kind,
            FilterField::Species => &self.species,
        }
    }

    /// Resets search and filters. The sort order is kept.
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.ability.clear();
        self.kind.clear();
        self.species.clear();
    }

    /// Whether any of search, ability, type, or species is set.
    #[must_use]
    pub fn is_filtering(&self) -> bool {
        !(self.search.is_empty()
            && self.ability.is_empty()
            && self.kind.is_empty()
            && self.species.is_empty())
    }

    /// Conjunction of all active predicates.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        let name_ok = self.search.is_empty()
            || record
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let ability_ok = self.ability.is_empty() || record.abilities.iter().any(|a| *a == self.ability);
        let type_ok = self.kind.is_empty() || record.types.iter().any(|t| *t == self.kind);
        let species_ok = self.species.is_empty() || record.species == self.species;

        name_ok && ability_ok && type_ok && species_ok
    }

    /// Filters then stably sorts `records`, borrowing from the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use dexview::catalog::{ListQuery, SortOrder};
    /// use dexview::Record;
    ///
    /// let records = vec![
    ///     Record::new(25, "pikachu", "pikachu"),
    ///     Record::new(26, "raichu", "raichu"),
    /// ];
    /// let query = ListQuery { search: "pika".into(), ..ListQuery::default() };
    ///
    /// let visible = query.apply(&records);
    /// assert_eq!(visible.len(), 1);
    /// assert_eq!(visible[0].id, 25);
    /// ```
    #[must_use]
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        let _span = tracing::trace_span!("apply_query",
            total = records.len(),
            order = %self.order
        )
        .entered();

        let mut visible: Vec<&Record> = records.iter().filter(|r| self.matches(r)).collect();
        visible.sort_by(|a, b| self.order.compare(a, b));
        visible
    }

    /// Character ranges of every case-insensitive occurrence of the search term in `name`.
    ///
    /// Ranges are `(start, end)` in character indices, end exclusive, and never overlap.
    #[must_use]
    pub fn highlight_ranges(&self, name: &str) -> Vec<(usize, usize)> {
        if self.search.is_empty() {
            return Vec::new();
        }

        let haystack: Vec<char> = name.to_lowercase().chars().collect();
        let needle: Vec<char> = self.search.to_lowercase().chars().collect();
        // Lowercasing can change length for some scripts; only highlight when it doesn't.
        if haystack.len() != name.chars().count() || needle.is_empty() {
            return Vec::new();
        }

        let mut ranges = Vec::new();
        let mut start = 0;
        while start + needle.len() <= haystack.len() {
            if haystack[start..start + needle.len()] == needle[..] {
                ranges.push((start, start + needle.len()));
                start += needle.len();
            } else {
                start += 1;
            }
        }
        ranges
    }
}

/// Choices offered by the filter selectors, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub abilities: Vec<String>,
    pub types: Vec<String>,
    pub species: Vec<String>,
}

impl FilterOptions {
    /// Collects the distinct ability, type, and species names in `records`.
    #[must_use]
    pub fn scan(records: &[Record]) -> Self {
        let mut options = Self::default();
        for record in records {
            for ability in &record.abilities {
                push_unique(&mut options.abilities, ability);
            }
            for kind in &record.types {
                push_unique(&mut options.types, kind);
            }
            if !record.species.is_empty() {
                push_unique(&mut options.species, &record.species);
            }
        }
        options
    }

    #[must_use]
    pub fn for_field(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::Ability => &self.abilities,
            FilterField::Type => &self.types,
            FilterField::Species => &self.species,
        }
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(records: &[&Record]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            Record::new(1, "bulbasaur", "bulbasaur")
                .with_abilities(["overgrow", "chlorophyll"])
                .with_types(["grass", "poison"]),
            Record::new(4, "charmander", "charmander")
                .with_abilities(["blaze", "solar-power"])
                .with_types(["fire"]),
            Record::new(25, "pikachu", "pikachu")
                .with_abilities(["static", "lightning-rod"])
                .with_types(["electric"]),
            Record::new(26, "raichu", "raichu")
                .with_abilities(["static", "lightning-rod"])
                .with_types(["electric"]),
            Record::new(43, "oddish", "oddish")
                .with_abilities(["chlorophyll", "run-away"])
                .with_types(["grass", "poison"]),
        ]
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let records = sample();
        let query = ListQuery {
            search: "PIKA".into(),
            ..ListQuery::default()
        };
        assert_eq!(ids(&query.apply(&records)), vec![25]);
    }

    #[test]
    fn filters_are_conjunctive() {
        let records = sample();
        let mut query = ListQuery::default();
        query.set_filter(FilterField::Type, "poison");
        query.set_filter(FilterField::Ability, "overgrow");

        assert_eq!(ids(&query.apply(&records)), vec![1]);
    }

    #[test]
    fn species_filter_matches_exactly() {
        let records = sample();
        let mut query = ListQuery::default();

        query.set_filter(FilterField::Species, "pika");
        assert!(query.apply(&records).is_empty());

        query.set_filter(FilterField::Species, "pikachu");
        assert_eq!(ids(&query.apply(&records)), vec![25]);

        query.set_filter(FilterField::Type, "fire");
        assert!(query.apply(&records).is_empty());

        query.set_filter(FilterField::Type, "electric");
        assert_eq!(ids(&query.apply(&records)), vec![25]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = sample();
        let mut query = ListQuery::default();
        query.set_filter(FilterField::Ability, "chlorophyll");

        let once: Vec<Record> = query.apply(&records).into_iter().cloned().collect();
        let twice: Vec<Record> = query.apply(&once).into_iter().cloned().collect();

        assert_eq!(once, twice);
    }

    #[test]
    fn id_desc_orders_numerically() {
        let records = vec![
            Record::new(1, "a", "a"),
            Record::new(4, "b", "b"),
            Record::new(2, "c", "c"),
        ];
        let query = ListQuery {
            order: SortOrder::IdDesc,
            ..ListQuery::default()
        };
        assert_eq!(ids(&query.apply(&records)), vec![4, 2, 1]);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        // Same name, distinct ids: ties must keep input order.
        let records = vec![
            Record::new(9, "ditto", "ditto"),
            Record::new(3, "abra", "abra"),
            Record::new(7, "ditto", "ditto"),
            Record::new(5, "ditto", "ditto"),
        ];

        let asc = ListQuery::default();
        assert_eq!(ids(&asc.apply(&records)), vec![3, 9, 7, 5]);

        let desc = ListQuery {
            order: SortOrder::NameDesc,
            ..ListQuery::default()
        };
        assert_eq!(ids(&desc.apply(&records)), vec![9, 7, 5, 3]);
    }

    #[test]
    fn name_order_folds_case() {
        let records = vec![
            Record::new(1, "Zubat", "zubat"),
            Record::new(2, "abra", "abra"),
        ];
        assert_eq!(ids(&ListQuery::default().apply(&records)), vec![2, 1]);
    }

    #[test]
    fn options_keep_first_appearance_order() {
        let options = FilterOptions::scan(&sample());
        assert_eq!(
            options.abilities,
            vec!["overgrow", "chlorophyll", "blaze", "solar-power", "static", "lightning-rod", "run-away"]
        );
        assert_eq!(options.types, vec!["grass", "poison", "fire", "electric"]);
        assert_eq!(options.species.len(), 5);
    }

    #[test]
    fn sort_order_parses_machine_values() {
        assert_eq!("id-desc".parse::<SortOrder>().unwrap(), SortOrder::IdDesc);
        assert_eq!(" Name-Asc ".parse::<SortOrder>().unwrap(), SortOrder::NameAsc);
        assert!("newest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn highlight_marks_each_occurrence() {
        let query = ListQuery {
            search: "a".into(),
            ..ListQuery::default()
        };
        assert_eq!(query.highlight_ranges("banana"), vec![(1, 2), (3, 4), (5, 6)]);
        assert!(ListQuery::default().highlight_ranges("banana").is_empty());
    }

    #[test]
    fn clear_filters_keeps_order() {
        let mut query = ListQuery {
            search: "x".into(),
            species: "y".into(),
            order: SortOrder::IdAsc,
            ..ListQuery::default()
        };
        query.clear_filters();
        assert!(!query.is_filtering());
        assert_eq!(query.order, SortOrder::IdAsc);
    }
}
