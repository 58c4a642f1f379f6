use board_logging::board_debug;

use crate::{JobSummary, LoadError, QueryKey};

pub type RequestId = u64;

/// One normalized page of results as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPage {
    pub items: Vec<JobSummary>,
    pub total_count: Option<u64>,
    pub total_pages: Option<u32>,
    /// Server-reported page number, or the requested page when absent.
    pub page: u32,
}

impl ResultPage {
    /// More pages exist only when the server said so; no metadata means no.
    pub fn has_more(&self) -> bool {
        self.total_pages.is_some_and(|total| self.page < total)
    }
}

/// Tag attached to every in-flight list request. The response is applied only
/// if its ticket still matches the active query key and latest request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub request_id: RequestId,
    pub key: QueryKey,
    pub page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// Accumulated job list for the active query key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobListState {
    active_key: Option<QueryKey>,
    next_request_id: RequestId,
    in_flight: Option<RequestId>,
    items: Vec<JobSummary>,
    total_count: Option<u64>,
    has_more: bool,
    error: Option<LoadError>,
    last_request: Option<(QueryKey, u32)>,
}

impl JobListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a load for `key` at `page` and returns the ticket the response
    /// must carry. Switching keys discards everything accumulated so far.
    pub fn begin(&mut self, key: QueryKey, page: u32) -> LoadTicket {
        if self.active_key.as_ref() != Some(&key) {
            self.items.clear();
            self.total_count = None;
            self.has_more = false;
            self.active_key = Some(key.clone());
        }
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.in_flight = Some(request_id);
        self.error = None;
        self.last_request = Some((key.clone(), page));
        LoadTicket {
            request_id,
            key,
            page,
        }
    }

    pub fn complete(
        &mut self,
        ticket: &LoadTicket,
        result: Result<ResultPage, LoadError>,
    ) -> Completion {
        if self.active_key.as_ref() != Some(&ticket.key) || self.in_flight != Some(ticket.request_id)
        {
            board_debug!(
                "Discarding stale page {} for query {:?} (request {})",
                ticket.page,
                ticket.key,
                ticket.request_id
            );
            return Completion::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                self.has_more = page.has_more();
                self.total_count = page.total_count;
                if ticket.page <= 1 {
                    self.items = page.items;
                } else {
                    self.items.extend(page.items);
                }
                self.error = None;
            }
            Err(error) => {
                if ticket.page <= 1 {
                    self.items.clear();
                    self.total_count = None;
                    self.has_more = false;
                }
                self.error = Some(error);
            }
        }
        Completion::Applied
    }

    pub fn items(&self) -> &[JobSummary] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// A failed load-more must be retried before the cursor moves further.
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.is_loading() && self.error.is_none()
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    pub fn active_key(&self) -> Option<&QueryKey> {
        self.active_key.as_ref()
    }

    /// Key and page of the most recent request, when it failed.
    pub fn failed_request(&self) -> Option<(&QueryKey, u32)> {
        self.error.as_ref()?;
        self.last_request.as_ref().map(|(key, page)| (key, *page))
    }
}
