use crate::{JobSummary, LoadError, LoadErrorKind};

/// Lifecycle of the single-job detail view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Closed,
    Loading { id: String },
    Loaded(JobSummary),
    NotFound { id: String },
    Failed { id: String, error: LoadError },
}

impl DetailState {
    /// Id of the job the view is currently about, if any.
    pub fn job_id(&self) -> Option<&str> {
        match self {
            DetailState::Closed => None,
            DetailState::Loading { id }
            | DetailState::NotFound { id }
            | DetailState::Failed { id, .. } => Some(id),
            DetailState::Loaded(job) => Some(&job.id),
        }
    }

    /// Applies a response; returns false when it belongs to a job the view
    /// has moved away from.
    pub fn resolve(&mut self, id: &str, result: Result<JobSummary, LoadError>) -> bool {
        if !matches!(self, DetailState::Loading { id: pending } if pending == id) {
            return false;
        }
        *self = match result {
            Ok(job) => DetailState::Loaded(job),
            Err(error) if error.kind == LoadErrorKind::NotFound => DetailState::NotFound {
                id: id.to_string(),
            },
            Err(error) => DetailState::Failed {
                id: id.to_string(),
                error,
            },
        };
        true
    }
}
