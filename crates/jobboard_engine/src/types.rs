use jobboard_core::{JobSummary, LoadError, LoadTicket, ResultPage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageLoaded {
        ticket: LoadTicket,
        result: Result<ResultPage, LoadError>,
    },
    DetailLoaded {
        id: String,
        result: Result<JobSummary, LoadError>,
    },
    FeaturedLoaded {
        result: Result<Vec<JobSummary>, LoadError>,
    },
}
