//! Job board core: pure query/list state machine and view-model helpers.
mod controller;
mod debounce;
mod description;
mod detail;
mod effect;
mod error;
mod featured;
mod job;
mod listing;
mod msg;
mod query;
mod state;
mod update;
mod view_model;

pub use controller::QueryController;
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use description::{format_description, DescriptionBlock, EMPTY_DESCRIPTION};
pub use detail::DetailState;
pub use effect::Effect;
pub use error::{LoadError, LoadErrorKind};
pub use featured::{FeaturedState, CAROUSEL_INTERVAL, DEFAULT_FEATURED_LIMIT};
pub use job::{
    JobSummary, CARD_COMPANY_PLACEHOLDER, DETAIL_COMPANY_PLACEHOLDER, REGION_PLACEHOLDER,
};
pub use listing::{Completion, JobListState, LoadTicket, RequestId, ResultPage};
pub use msg::Msg;
pub use query::{normalize_search_text, QueryKey, QueryState, SEARCH_PARAM, TAGS_PARAM};
pub use state::AppState;
pub use update::update;
pub use view_model::{
    AppViewModel, DetailView, ErrorView, FeaturedView, JobCardView, JobDetailView, ListStatus,
    ListView,
};
