use std::time::{Duration, Instant};

use crate::JobSummary;

/// Interval between automatic carousel advances.
pub const CAROUSEL_INTERVAL: Duration = Duration::from_secs(6);
/// Default number of featured jobs requested for the home page.
pub const DEFAULT_FEATURED_LIMIT: usize = 6;

/// Featured jobs shown as an auto-advancing carousel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeaturedState {
    jobs: Vec<JobSummary>,
    index: usize,
    last_advance: Option<Instant>,
    loading: bool,
}

impl FeaturedState {
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Replaces the carousel content. A failed fetch is passed as an empty
    /// list: the home page simply has nothing to feature.
    pub fn set_jobs(&mut self, jobs: Vec<JobSummary>, limit: usize, now: Instant) {
        self.jobs = jobs.into_iter().take(limit).collect();
        self.index = 0;
        self.last_advance = Some(now);
        self.loading = false;
    }

    pub fn jobs(&self) -> &[JobSummary] {
        &self.jobs
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current(&self) -> Option<&JobSummary> {
        self.jobs.get(self.index)
    }

    pub fn next(&mut self, now: Instant) -> bool {
        if self.jobs.is_empty() {
            return false;
        }
        self.index = (self.index + 1) % self.jobs.len();
        self.last_advance = Some(now);
        true
    }

    pub fn prev(&mut self, now: Instant) -> bool {
        if self.jobs.is_empty() {
            return false;
        }
        self.index = (self.index + self.jobs.len() - 1) % self.jobs.len();
        self.last_advance = Some(now);
        true
    }

    /// Advances the carousel when the interval elapsed; returns whether it moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.last_advance {
            Some(last) if now.saturating_duration_since(last) >= CAROUSEL_INTERVAL => {
                self.next(now)
            }
            _ => false,
        }
    }
}
