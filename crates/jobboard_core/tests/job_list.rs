use jobboard_core::{
    Completion, JobListState, JobSummary, LoadError, LoadErrorKind, QueryKey, ResultPage,
};
use pretty_assertions::assert_eq;

fn job(id: &str) -> JobSummary {
    JobSummary::new(id, format!("Job {id}"))
}

fn page(ids: &[&str], page: u32, total_pages: Option<u32>) -> ResultPage {
    ResultPage {
        items: ids.iter().map(|id| job(id)).collect(),
        total_count: total_pages.map(|pages| u64::from(pages) * 2),
        total_pages,
        page,
    }
}

fn ids(list: &JobListState) -> Vec<&str> {
    list.items().iter().map(|j| j.id.as_str()).collect()
}

fn key(text: &str) -> QueryKey {
    QueryKey::new(text, Vec::new())
}

#[test]
fn pages_accumulate_then_first_page_replaces() {
    let mut list = JobListState::new();
    let k = key("rust");

    let first = list.begin(k.clone(), 1);
    assert!(list.is_loading());
    list.complete(&first, Ok(page(&["a", "b"], 1, Some(3))));
    assert!(!list.is_loading());

    let second = list.begin(k.clone(), 2);
    list.complete(&second, Ok(page(&["c", "d"], 2, Some(3))));
    assert_eq!(ids(&list), vec!["a", "b", "c", "d"]);

    let again = list.begin(k, 1);
    list.complete(&again, Ok(page(&["e"], 1, Some(3))));
    assert_eq!(ids(&list), vec!["e"]);
}

#[test]
fn duplicate_ids_across_pages_are_kept() {
    let mut list = JobListState::new();
    let k = key("");
    let first = list.begin(k.clone(), 1);
    list.complete(&first, Ok(page(&["a", "b"], 1, Some(2))));
    let second = list.begin(k, 2);
    list.complete(&second, Ok(page(&["b", "c"], 2, Some(2))));
    assert_eq!(ids(&list), vec!["a", "b", "b", "c"]);
}

#[test]
fn stale_response_for_old_key_is_discarded() {
    let mut list = JobListState::new();
    let k1 = key("java");
    let k2 = key("rust");

    let stale = list.begin(k1, 1);
    let current = list.begin(k2.clone(), 1);

    assert_eq!(
        list.complete(&stale, Ok(page(&["old"], 1, Some(1)))),
        Completion::Stale
    );
    assert!(list.items().is_empty());
    assert!(list.is_loading());
    assert_eq!(list.active_key(), Some(&k2));

    assert_eq!(
        list.complete(&current, Ok(page(&["new"], 1, Some(1)))),
        Completion::Applied
    );
    assert_eq!(ids(&list), vec!["new"]);
}

#[test]
fn stale_response_arriving_after_newer_one_is_discarded() {
    let mut list = JobListState::new();
    let stale = list.begin(key("java"), 1);
    let current = list.begin(key("rust"), 1);

    list.complete(&current, Ok(page(&["new"], 1, Some(1))));
    assert_eq!(
        list.complete(&stale, Err(LoadError::new(LoadErrorKind::Timeout, "timeout"))),
        Completion::Stale
    );
    assert_eq!(ids(&list), vec!["new"]);
    assert!(list.error().is_none());
}

#[test]
fn switching_keys_drops_accumulated_items() {
    let mut list = JobListState::new();
    let first = list.begin(key("java"), 1);
    list.complete(&first, Ok(page(&["a"], 1, Some(1))));

    list.begin(key("rust"), 1);
    assert!(list.items().is_empty());
    assert_eq!(list.total_count(), None);
}

#[test]
fn has_more_boundaries() {
    let mut list = JobListState::new();
    let k = key("");

    let t = list.begin(k.clone(), 1);
    list.complete(&t, Ok(page(&["a"], 1, Some(2))));
    assert!(list.has_more());
    assert!(list.can_load_more());

    let t = list.begin(k.clone(), 2);
    assert!(!list.can_load_more());
    list.complete(&t, Ok(page(&["b"], 2, Some(2))));
    assert!(!list.has_more());

    let t = list.begin(k, 1);
    list.complete(&t, Ok(page(&["c"], 1, None)));
    assert!(!list.has_more());
}

#[test]
fn failed_load_more_preserves_list() {
    let mut list = JobListState::new();
    let k = key("rust");
    let t = list.begin(k.clone(), 1);
    list.complete(&t, Ok(page(&["a", "b", "c"], 1, Some(3))));
    let t = list.begin(k.clone(), 2);
    list.complete(&t, Ok(page(&["d"], 2, Some(3))));

    let failing = list.begin(k.clone(), 3);
    list.complete(
        &failing,
        Err(LoadError::new(LoadErrorKind::Network, "connection reset")),
    );

    assert_eq!(ids(&list), vec!["a", "b", "c", "d"]);
    assert_eq!(list.error().map(|e| e.message.as_str()), Some("connection reset"));
    assert!(!list.can_load_more());
    assert_eq!(list.failed_request(), Some((&k, 3)));
}

#[test]
fn failed_first_page_clears_list() {
    let mut list = JobListState::new();
    let k = key("rust");
    let t = list.begin(k.clone(), 1);
    list.complete(&t, Ok(page(&["a"], 1, Some(2))));

    let t = list.begin(k, 1);
    list.complete(
        &t,
        Err(LoadError::new(LoadErrorKind::HttpStatus(500), "Failed to fetch jobs")),
    );
    assert!(list.items().is_empty());
    assert!(!list.has_more());
    assert!(list.error().is_some());
}

#[test]
fn total_count_is_passed_through() {
    let mut list = JobListState::new();
    let t = list.begin(key(""), 1);
    list.complete(
        &t,
        Ok(ResultPage {
            items: vec![job("a")],
            total_count: Some(57),
            total_pages: Some(6),
            page: 1,
        }),
    );
    assert_eq!(list.total_count(), Some(57));
    assert_eq!(list.items().len(), 1);
}
