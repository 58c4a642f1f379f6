use std::collections::BTreeSet;

use url::form_urlencoded;

/// Location query parameter carrying the search text.
pub const SEARCH_PARAM: &str = "search";
/// Location query parameter carrying the filter tags, comma-separated.
pub const TAGS_PARAM: &str = "tags";

/// Canonical identity of one logical search: normalized text plus the sorted
/// filter tags. Two states with equal keys share one accumulated result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct QueryKey {
    pub text: String,
    pub tags: Vec<String>,
}

impl QueryKey {
    pub fn new(text: impl Into<String>, tags: impl IntoIterator<Item = String>) -> Self {
        let mut tags: Vec<String> = tags.into_iter().collect();
        tags.sort();
        tags.dedup();
        Self {
            text: text.into(),
            tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: String,
    pub filters: BTreeSet<String>,
    pub page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            filters: BTreeSet::new(),
            page: 1,
        }
    }
}

impl QueryState {
    pub fn key(&self) -> QueryKey {
        QueryKey {
            text: self.search_text.clone(),
            tags: self.filters.iter().cloned().collect(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.search_text.is_empty() && self.filters.is_empty()
    }

    /// Parses a location query string (`?search=rust&tags=remote,senior`) into a state
    /// on page 1. Unknown parameters are ignored; a missing or empty string
    /// yields the default state.
    pub fn from_location_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let mut state = Self::default();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            match name.as_ref() {
                SEARCH_PARAM => state.search_text = normalize_search_text(&value),
                TAGS_PARAM => {
                    let tags = value.split(',').map(str::trim).filter(|tag| !tag.is_empty());
                    state.filters.extend(tags.map(ToOwned::to_owned));
                }
                _ => {}
            }
        }
        state
    }

    /// Serializes the non-default parts of the state into a query string
    /// without the leading `?`. Empty search and empty filters are omitted, so
    /// the default state produces an empty string.
    pub fn to_location_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.search_text.is_empty() {
            serializer.append_pair(SEARCH_PARAM, &self.search_text);
        }
        if !self.filters.is_empty() {
            let tags: Vec<&str> = self.filters.iter().map(String::as_str).collect();
            serializer.append_pair(TAGS_PARAM, &tags.join(","));
        }
        serializer.finish()
    }
}

/// Canonical form of raw search input: trimmed and lower-cased.
pub fn normalize_search_text(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_sorts_and_dedups_tags() {
        let key = QueryKey::new("rust", vec!["b".to_string(), "a".to_string(), "b".to_string()]);
        assert_eq!(key.tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn default_state_mirrors_to_empty_query() {
        assert_eq!(QueryState::default().to_location_query(), "");
    }

    #[test]
    fn location_query_round_trips() {
        let mut state = QueryState {
            search_text: "senior rust".into(),
            ..QueryState::default()
        };
        state.filters.insert("remote".into());
        state.filters.insert("full time".into());

        let query = state.to_location_query();
        assert_eq!(query, "search=senior+rust&tags=full+time%2Cremote");
        assert_eq!(QueryState::from_location_query(&format!("?{query}")), state);
    }

    #[test]
    fn location_restore_normalizes_search_and_skips_unknown_params() {
        let state = QueryState::from_location_query("search=%20Rust%20&utm=x&tags=,%20,");
        assert_eq!(state.search_text, "rust");
        assert!(state.filters.is_empty());
        assert_eq!(state.page, 1);
    }
}
