use board_logging::{board_debug, board_warn};

use crate::listing::Completion;
use crate::{AppState, DetailState, Effect, LoadErrorKind, Msg, QueryController, QueryState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted { location_query } => {
            let initial = QueryState::from_location_query(&location_query);
            state.controller = QueryController::new(initial.clone());
            state.mark_dirty();
            vec![Effect::FetchPage(state.listing.begin(initial.key(), 1))]
        }
        Msg::SearchInput { raw, at } => {
            state.controller.set_search_text(raw, at);
            state.mark_dirty();
            Vec::new()
        }
        Msg::Tick(now) => {
            if state.featured.tick(now) {
                state.mark_dirty();
            }
            match state.controller.tick(now) {
                Some(query) => fresh_search(&mut state, &query),
                None => Vec::new(),
            }
        }
        Msg::FilterToggled(tag) => {
            let query = state.controller.toggle_filter(tag);
            fresh_search(&mut state, &query)
        }
        Msg::ClearAllClicked => {
            state.mark_dirty();
            match state.controller.clear_all() {
                Some(query) => fresh_search(&mut state, &query),
                None => Vec::new(),
            }
        }
        Msg::LoadMoreClicked => {
            let can_load_more = state.listing.can_load_more();
            match state.controller.next_page(can_load_more) {
                Some(query) => {
                    state.mark_dirty();
                    vec![Effect::FetchPage(
                        state.listing.begin(query.key(), query.page),
                    )]
                }
                None => Vec::new(),
            }
        }
        Msg::RetryClicked => {
            let failed = state
                .listing
                .failed_request()
                .map(|(key, page)| (key.clone(), page));
            match failed {
                Some((key, page)) => {
                    state.mark_dirty();
                    vec![Effect::FetchPage(state.listing.begin(key, page))]
                }
                None => Vec::new(),
            }
        }
        Msg::PageLoaded { ticket, result } => {
            if let Err(error) = &result {
                log_load_error("job list", error.kind, &error.message);
            }
            if state.listing.complete(&ticket, result) == Completion::Applied {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::JobSelected { id } => {
            state.mark_dirty();
            let id = id.trim().to_string();
            if id.is_empty() {
                state.detail = DetailState::NotFound { id };
                Vec::new()
            } else {
                state.detail = DetailState::Loading { id: id.clone() };
                vec![Effect::FetchDetail { id }]
            }
        }
        Msg::JobClosed => {
            state.detail = DetailState::Closed;
            state.mark_dirty();
            Vec::new()
        }
        Msg::DetailLoaded { id, result } => {
            if let Err(error) = &result {
                log_load_error("job detail", error.kind, &error.message);
            }
            if state.detail.resolve(&id, result) {
                state.mark_dirty();
            } else {
                board_debug!("Discarding detail response for job {}", id);
            }
            Vec::new()
        }
        Msg::FeaturedRequested { country } => {
            state.featured.begin();
            state.mark_dirty();
            vec![Effect::FetchFeatured {
                country: country.filter(|c| !c.trim().is_empty()),
                limit: state.featured_limit,
            }]
        }
        Msg::FeaturedLoaded { result, at } => {
            let jobs = result.unwrap_or_else(|error| {
                log_load_error("featured jobs", error.kind, &error.message);
                Vec::new()
            });
            let limit = state.featured_limit;
            state.featured.set_jobs(jobs, limit, at);
            state.mark_dirty();
            Vec::new()
        }
        Msg::CarouselNext(now) => {
            if state.featured.next(now) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CarouselPrev(now) => {
            if state.featured.prev(now) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AuthExpired => {
            state.auth_required = true;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SignedIn => {
            if std::mem::take(&mut state.auth_required) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// A changed query key (or reset page) starts over at page 1.
fn fresh_search(state: &mut AppState, query: &QueryState) -> Vec<Effect> {
    state.mark_dirty();
    let ticket = state.listing.begin(query.key(), 1);
    vec![
        Effect::MirrorLocation {
            query: query.to_location_query(),
        },
        Effect::FetchPage(ticket),
    ]
}

fn log_load_error(what: &str, kind: LoadErrorKind, message: &str) {
    match kind {
        LoadErrorKind::MalformedResponse => {
            board_warn!("Malformed response while loading {}: {}", what, message)
        }
        _ => board_debug!("Failed to load {} ({}): {}", what, kind, message),
    }
}
