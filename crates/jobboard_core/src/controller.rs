use std::time::Instant;

use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::query::{normalize_search_text, QueryState};

/// Turns raw input events into a canonical, debounced [`QueryState`].
///
/// Every method that can change the canonical state returns the new state
/// when (and only when) consumers must react to it. A returned state on page 1
/// means "start a fresh search"; a higher page means "load the next page".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryController {
    raw_text: String,
    current: QueryState,
    debouncer: Debouncer<String>,
    // Page was reset by typing but the debounced text has not landed yet.
    refresh_pending: bool,
}

impl Default for QueryController {
    fn default() -> Self {
        Self::new(QueryState::default())
    }
}

impl QueryController {
    pub fn new(initial: QueryState) -> Self {
        Self {
            raw_text: initial.search_text.clone(),
            current: QueryState { page: 1, ..initial },
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
            refresh_pending: false,
        }
    }

    /// Text as typed, for echoing back into the input box.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn state(&self) -> &QueryState {
        &self.current
    }

    pub fn is_debouncing(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn set_search_text(&mut self, raw: impl Into<String>, at: Instant) {
        self.raw_text = raw.into();
        if self.current.page != 1 {
            self.current.page = 1;
            self.refresh_pending = true;
        }
        self.debouncer.schedule(normalize_search_text(&self.raw_text), at);
    }

    /// Advances the debounce clock; returns the new state when the quiet
    /// period elapsed and the propagated text changed the search.
    pub fn tick(&mut self, now: Instant) -> Option<QueryState> {
        let text = self.debouncer.poll(now)?;
        if text == self.current.search_text && !self.refresh_pending {
            return None;
        }
        self.current.search_text = text;
        self.current.page = 1;
        self.refresh_pending = false;
        Some(self.current.clone())
    }

    pub fn toggle_filter(&mut self, tag: impl Into<String>) -> QueryState {
        let tag = tag.into();
        if !self.current.filters.remove(&tag) {
            self.current.filters.insert(tag);
        }
        self.current.page = 1;
        self.refresh_pending = false;
        self.current.clone()
    }

    pub fn clear_all(&mut self) -> Option<QueryState> {
        self.debouncer.cancel();
        self.raw_text.clear();
        let unchanged = self.current == QueryState::default() && !self.refresh_pending;
        self.current = QueryState::default();
        self.refresh_pending = false;
        if unchanged {
            None
        } else {
            Some(self.current.clone())
        }
    }

    /// Moves to the next page when the data source reported more pages.
    /// Refused while typed text is still settling: the page cursor was
    /// already reset for the coming search, not for the list on screen.
    pub fn next_page(&mut self, has_more: bool) -> Option<QueryState> {
        if !has_more || self.is_debouncing() || self.refresh_pending {
            return None;
        }
        self.current.page += 1;
        Some(self.current.clone())
    }
}
