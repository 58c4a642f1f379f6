use crate::description::format_description;
use crate::job::{CARD_COMPANY_PLACEHOLDER, DETAIL_COMPANY_PLACEHOLDER};
use crate::{AppState, DescriptionBlock, DetailState, JobSummary, LoadError, QueryState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    /// Search box content exactly as typed.
    pub search_input: String,
    pub query: QueryState,
    pub location_query: String,
    pub debouncing: bool,
    pub list: ListView,
    pub detail: DetailView,
    pub featured: FeaturedView,
    pub auth_required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Failed,
    Ready,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub message: String,
    pub retryable: bool,
}

impl From<&LoadError> for ErrorView {
    fn from(error: &LoadError) -> Self {
        Self {
            message: error.to_string(),
            retryable: error.is_retryable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub status: ListStatus,
    pub jobs: Vec<JobCardView>,
    pub shown: usize,
    /// Server-reported total, passed through as-is.
    pub total_count: Option<u64>,
    pub can_load_more: bool,
    pub loading_more: bool,
    pub error: Option<ErrorView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCardView {
    pub id: String,
    pub title: String,
    pub company: String,
    pub region: String,
    pub tags: Vec<String>,
    pub posted: Option<String>,
    pub is_urgent: bool,
}

impl JobCardView {
    fn from_job(job: &JobSummary) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            company: job.display_company(CARD_COMPANY_PLACEHOLDER),
            region: job.display_region().to_string(),
            tags: job.tags.clone(),
            posted: job.posted_at.map(|at| at.format("%Y-%m-%d").to_string()),
            is_urgent: job.is_urgent.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Closed,
    Loading { id: String },
    /// Rendered as "job not found" with a way back to the list; no retry.
    NotFound { id: String },
    Failed { id: String, error: ErrorView },
    Loaded(Box<JobDetailView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetailView {
    pub id: String,
    pub title: String,
    pub company: String,
    pub company_image: Option<String>,
    pub region: Option<String>,
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub experience: Option<String>,
    pub skills: Vec<String>,
    pub tags: Vec<String>,
    pub is_urgent: bool,
    pub is_responsive: bool,
    pub apply_link: Option<String>,
    pub description: Vec<DescriptionBlock>,
}

impl JobDetailView {
    fn from_job(job: &JobSummary) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            company: job.display_company(DETAIL_COMPANY_PLACEHOLDER),
            company_image: job.company_image.clone(),
            region: job.known_region().map(ToOwned::to_owned),
            job_type: job.job_type.clone(),
            salary: job.salary.clone(),
            experience: job.needed_experience.clone(),
            skills: job.skills.clone(),
            tags: job.tags.clone(),
            is_urgent: job.is_urgent.unwrap_or(false),
            is_responsive: job.is_responsive.unwrap_or(false),
            apply_link: job.apply_link.clone(),
            description: format_description(job.description.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeaturedView {
    pub jobs: Vec<JobCardView>,
    pub index: usize,
    pub loading: bool,
}

impl AppViewModel {
    pub(crate) fn from_state(state: &AppState) -> Self {
        let query = state.controller.state().clone();
        Self {
            search_input: state.controller.raw_text().to_string(),
            location_query: query.to_location_query(),
            query,
            debouncing: state.controller.is_debouncing(),
            list: list_view(state),
            detail: detail_view(&state.detail),
            featured: FeaturedView {
                jobs: state
                    .featured
                    .jobs()
                    .iter()
                    .map(JobCardView::from_job)
                    .collect(),
                index: state.featured.index(),
                loading: state.featured.is_loading(),
            },
            auth_required: state.auth_required,
        }
    }
}

fn list_view(state: &AppState) -> ListView {
    let listing = &state.listing;
    let jobs: Vec<JobCardView> = listing.items().iter().map(JobCardView::from_job).collect();
    let status = match (listing.is_loading(), listing.error(), jobs.is_empty()) {
        (true, _, true) => ListStatus::Loading,
        (false, Some(_), true) => ListStatus::Failed,
        (_, _, false) => ListStatus::Ready,
        (false, None, true) => ListStatus::Empty,
    };
    ListView {
        status,
        shown: jobs.len(),
        loading_more: listing.is_loading() && !jobs.is_empty(),
        jobs,
        total_count: listing.total_count(),
        can_load_more: listing.can_load_more(),
        error: listing.error().map(ErrorView::from),
    }
}

fn detail_view(detail: &DetailState) -> DetailView {
    match detail {
        DetailState::Closed => DetailView::Closed,
        DetailState::Loading { id } => DetailView::Loading { id: id.clone() },
        DetailState::NotFound { id } => DetailView::NotFound { id: id.clone() },
        DetailState::Failed { id, error } => DetailView::Failed {
            id: id.clone(),
            error: ErrorView::from(error),
        },
        DetailState::Loaded(job) => DetailView::Loaded(Box::new(JobDetailView::from_job(job))),
    }
}
