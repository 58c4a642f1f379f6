use crate::LoadTicket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one page of the job list; the result must carry the ticket back.
    FetchPage(LoadTicket),
    FetchDetail { id: String },
    FetchFeatured { country: Option<String>, limit: usize },
    /// Replace the location's query string (empty means no query string).
    MirrorLocation { query: String },
}
