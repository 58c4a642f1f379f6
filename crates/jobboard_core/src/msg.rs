use std::time::Instant;

use crate::{JobSummary, LoadError, LoadTicket, ResultPage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The listing view was opened at a location with this query string.
    Mounted { location_query: String },
    /// User edited the search box (raw, undebounced text).
    SearchInput { raw: String, at: Instant },
    /// User toggled a tag filter.
    FilterToggled(String),
    /// User cleared search text and filters.
    ClearAllClicked,
    /// User asked for the next page of results.
    LoadMoreClicked,
    /// User asked to repeat the last failed list request.
    RetryClicked,
    /// Clock tick driving the search debounce and the featured carousel.
    Tick(Instant),
    /// Engine completion for a list request.
    PageLoaded {
        ticket: LoadTicket,
        result: Result<ResultPage, LoadError>,
    },
    /// User opened a job's detail view.
    JobSelected { id: String },
    /// User left the detail view.
    JobClosed,
    /// Engine completion for a detail request.
    DetailLoaded {
        id: String,
        result: Result<JobSummary, LoadError>,
    },
    /// Home page asked for featured jobs, optionally for one country.
    FeaturedRequested { country: Option<String> },
    /// Engine completion for the featured jobs request.
    FeaturedLoaded {
        result: Result<Vec<JobSummary>, LoadError>,
        at: Instant,
    },
    CarouselNext(Instant),
    CarouselPrev(Instant),
    /// The auth handler reported a 401; stored credentials are gone.
    AuthExpired,
    /// A new bearer token was stored.
    SignedIn,
    /// Fallback for placeholder wiring.
    NoOp,
}
