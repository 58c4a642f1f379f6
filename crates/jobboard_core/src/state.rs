use crate::featured::DEFAULT_FEATURED_LIMIT;
use crate::view_model::AppViewModel;
use crate::{DetailState, FeaturedState, JobListState, QueryController};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) controller: QueryController,
    pub(crate) listing: JobListState,
    pub(crate) detail: DetailState,
    pub(crate) featured: FeaturedState,
    pub(crate) featured_limit: usize,
    pub(crate) auth_required: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            controller: QueryController::default(),
            listing: JobListState::new(),
            detail: DetailState::default(),
            featured: FeaturedState::default(),
            featured_limit: DEFAULT_FEATURED_LIMIT,
            auth_required: false,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_featured_limit(limit: usize) -> Self {
        Self {
            featured_limit: limit,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::from_state(self)
    }

    pub fn controller(&self) -> &QueryController {
        &self.controller
    }

    pub fn listing(&self) -> &JobListState {
        &self.listing
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn featured(&self) -> &FeaturedState {
        &self.featured
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
