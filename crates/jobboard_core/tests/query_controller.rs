use std::time::{Duration, Instant};

use jobboard_core::{QueryController, QueryState, SEARCH_DEBOUNCE};

#[test]
fn keystrokes_within_fifty_ms_propagate_once() {
    let start = Instant::now();
    let mut controller = QueryController::default();

    controller.set_search_text("a", start);
    controller.set_search_text("ab", start + Duration::from_millis(25));
    controller.set_search_text("abc", start + Duration::from_millis(50));

    // Tick well past the quiet period at a UI-like cadence.
    let propagated: Vec<QueryState> = (0..=20)
        .filter_map(|i| controller.tick(start + Duration::from_millis(i * 75)))
        .collect();

    assert_eq!(propagated.len(), 1);
    assert_eq!(propagated[0].search_text, "abc");
    assert_eq!(propagated[0].page, 1);
}

#[test]
fn nothing_propagates_before_quiet_period() {
    let start = Instant::now();
    let mut controller = QueryController::default();
    controller.set_search_text("rust", start);

    assert_eq!(controller.tick(start + SEARCH_DEBOUNCE - Duration::from_millis(1)), None);
    assert!(controller.is_debouncing());
    assert_eq!(controller.state().search_text, "");
    assert_eq!(controller.raw_text(), "rust");
}

#[test]
fn filter_toggle_always_resets_page() {
    for pages in 0..5 {
        let mut controller = QueryController::default();
        for _ in 0..pages {
            controller.next_page(true);
        }
        assert_eq!(controller.state().page, 1 + pages);

        let state = controller.toggle_filter("remote");
        assert_eq!(state.page, 1);
        assert_eq!(controller.state().page, 1);
    }
}

#[test]
fn toggle_is_idempotent_pair() {
    let mut controller = QueryController::default();
    let added = controller.toggle_filter("design");
    assert!(added.filters.contains("design"));

    let removed = controller.toggle_filter("design");
    assert!(removed.filters.is_empty());
}

#[test]
fn restored_state_starts_on_first_page() {
    let initial = QueryState {
        search_text: "rust".into(),
        page: 4,
        ..QueryState::default()
    };
    let controller = QueryController::new(initial);
    assert_eq!(controller.state().page, 1);
    assert_eq!(controller.raw_text(), "rust");
}
