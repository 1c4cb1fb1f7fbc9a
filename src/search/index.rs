//! Fuzzy search index over the flattened `(id, name)` projection of a documentation tree.

use super::scoring::{FuzzyOptions, match_score};
use rapidfuzz::distance::jaro_winkler;
use serde::Serialize;

/// One searchable record: `id` is `Name` for top-level elements and
/// `Parent#member` for members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    pub id: String,
    pub name: String,
}

impl SearchEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Lowercased character buffers for each searchable key of an entry.
#[derive(Debug, Clone)]
struct EntryKeys {
    name: Vec<char>,
    id: Vec<char>,
}

/// Approximate-match index, built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    entries: Vec<SearchEntry>,
    keys: Vec<EntryKeys>,
    options: FuzzyOptions,
}

impl FuzzyIndex {
    pub fn new(entries: Vec<SearchEntry>) -> Self {
        Self::with_options(entries, FuzzyOptions::default())
    }

    pub fn with_options(entries: Vec<SearchEntry>, options: FuzzyOptions) -> Self {
        let keys = entries
            .iter()
            .map(|entry| EntryKeys {
                name: entry.name.to_lowercase().chars().collect(),
                id: entry.id.to_lowercase().chars().collect(),
            })
            .collect();
        Self {
            entries,
            keys,
            options,
        }
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidate ids for `query`, best match first.
    ///
    /// An entry's score is the better of its `name` and `id` scores. Equal scores
    /// are ordered by Jaro-Winkler similarity to the name, then by index order.
    /// Every entry is scored and ranked before the first id is yielded; only the
    /// consumption of the ranked ids is lazy.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        let pattern: Vec<char> = query
            .trim()
            .to_lowercase()
            .chars()
            .take(self.options.max_pattern_length)
            .collect();

        let mut hits: Vec<(usize, f64, f64)> = if pattern.is_empty() {
            Vec::new()
        } else {
            self.keys
                .iter()
                .enumerate()
                .filter_map(|(index, keys)| {
                    let name = match_score(&pattern, &keys.name, &self.options);
                    let id = match_score(&pattern, &keys.id, &self.options);
                    let score = name.into_iter().chain(id).min_by(f64::total_cmp)?;
                    let similarity = jaro_winkler::similarity(
                        pattern.iter().copied(),
                        keys.name.iter().copied(),
                    );
                    Some((index, score, similarity))
                })
                .collect()
        };

        hits.sort_by(|a, b| {
            a.1.total_cmp(&b.1)
                .then_with(|| b.2.total_cmp(&a.2))
                .then_with(|| a.0.cmp(&b.0))
        });

        tracing::debug!(
            "Fuzzy search for '{}' matched {} of {} entries",
            query,
            hits.len(),
            self.entries.len()
        );

        hits.into_iter()
            .map(move |(index, ..)| self.entries[index].id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn index() -> FuzzyIndex {
        FuzzyIndex::new(vec![
            SearchEntry::new("Guild", "Guild"),
            SearchEntry::new("User", "User"),
            SearchEntry::new("Guild#owner", "owner"),
            SearchEntry::new("Guild#members", "members"),
            SearchEntry::new("User#username", "username"),
        ])
    }

    #[test]
    fn misspelled_member_ranks_first() {
        let index = index();
        let ids: Vec<_> = index.search("ownr").collect();
        check!(ids.first() == Some(&"Guild#owner"));
    }

    #[test]
    fn exact_name_beats_id_prefix_on_tie() {
        let index = index();
        let ids: Vec<_> = index.search("guild").collect();
        check!(ids.first() == Some(&"Guild"));
        check!(ids.contains(&"Guild#owner"));
    }

    #[test]
    fn search_is_case_insensitive() {
        let index = index();
        let upper: Vec<_> = index.search("USERNAME").collect();
        let lower: Vec<_> = index.search("username").collect();
        check!(upper == lower);
        check!(upper.first() == Some(&"User#username"));
    }

    #[test]
    fn blank_query_matches_nothing() {
        let index = index();
        check!(index.search("   ").next().is_none());
        check!(index.search("qqqqqq").next().is_none());
    }

    #[test]
    fn long_queries_are_truncated() {
        let index = FuzzyIndex::new(vec![SearchEntry::new("A", "a".repeat(40))]);
        check!(index.search(&"a".repeat(40)).count() == 1);
    }
}
