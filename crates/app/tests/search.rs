// Path: crates/app/tests/search.rs

mod common;

use common::*;
use learnchain_api::mock::MockBackend;
use learnchain_api::BackendApi;
use learnchain_app::screens::search::SearchScreen;
use learnchain_app::{SearchController, SearchOutcome};
use learnchain_types::config::ClientConfig;
use learnchain_types::{OrganizationCourseCount, OrganizationRef, SearchResults};
use std::sync::Arc;
use std::time::Duration;

const DEBOUNCE: Duration = Duration::from_millis(500);

fn results(ids: &[&str]) -> SearchResults {
    SearchResults {
        courses: ids.iter().map(|id| course(id, 0.0, &[])).collect(),
        bundles: Vec::new(),
    }
}

fn course_ids(results: &SearchResults) -> Vec<String> {
    results.courses.iter().map(|c| c.id.clone()).collect()
}

fn controller(backend: &Arc<MockBackend>) -> Arc<SearchController> {
    let api: Arc<dyn BackendApi> = backend.clone();
    Arc::new(SearchController::new(api, DEBOUNCE, 5))
}

#[tokio::test(start_paused = true)]
async fn empty_input_clears_without_a_request() {
    let backend = Arc::new(MockBackend::new().with_search_results("rust", results(&["c1"])));
    let search = controller(&backend);

    assert_eq!(search.input("rust").await, SearchOutcome::Applied);
    assert_eq!(search.input("   ").await, SearchOutcome::Cleared);
    assert_eq!(search.input("").await, SearchOutcome::Cleared);

    assert!(search.results().is_empty());
    assert_eq!(backend.calls_to("search").len(), 1);
}

#[tokio::test(start_paused = true)]
async fn one_request_after_the_debounce_window() {
    let backend = Arc::new(MockBackend::new().with_search_results("rust", results(&["c1", "c2"])));
    let search = controller(&backend);

    let started = tokio::time::Instant::now();
    assert_eq!(search.input(" rust ").await, SearchOutcome::Applied);

    assert!(started.elapsed() >= DEBOUNCE);
    let calls = backend.calls_to("search");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].detail, "rust");
    assert_eq!(course_ids(&search.results()), vec!["c1", "c2"]);
}

#[tokio::test(start_paused = true)]
async fn keystrokes_inside_the_window_collapse_into_one_request() {
    let backend = Arc::new(MockBackend::new().with_search_results("rust", results(&["c1"])));
    let search = controller(&backend);

    let first = tokio::spawn({
        let search = search.clone();
        async move { search.input("ru").await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    let second = search.input("rust").await;

    assert_eq!(first.await.unwrap(), SearchOutcome::Superseded);
    assert_eq!(second, SearchOutcome::Applied);
    let calls = backend.calls_to("search");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].detail, "rust");
}

#[tokio::test(start_paused = true)]
async fn slow_stale_response_does_not_overwrite_newer_results() {
    let backend = Arc::new(
        MockBackend::new()
            .with_search_results("slow", results(&["old"]))
            .with_search_delay("slow", Duration::from_secs(2))
            .with_search_results("fast", results(&["new"])),
    );
    let search = controller(&backend);

    let slow = tokio::spawn({
        let search = search.clone();
        async move { search.input("slow").await }
    });
    // Let the first request leave the debounce window and go in flight.
    tokio::time::sleep(DEBOUNCE + Duration::from_millis(100)).await;

    assert_eq!(search.input("fast").await, SearchOutcome::Applied);
    assert_eq!(slow.await.unwrap(), SearchOutcome::Stale);
    assert_eq!(course_ids(&search.results()), vec!["new"]);
    assert_eq!(backend.calls_to("search").len(), 2);
}

#[tokio::test(start_paused = true)]
async fn results_are_cut_to_top_n() {
    let ids: Vec<String> = (0..8).map(|i| format!("c{}", i)).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let backend = Arc::new(MockBackend::new().with_search_results("all", results(&refs)));
    let api: Arc<dyn BackendApi> = backend.clone();
    let search = SearchController::from_config(api, &ClientConfig::default());

    search.input("all").await;

    assert_eq!(course_ids(&search.results()), vec!["c0", "c1", "c2", "c3", "c4"]);
}

#[tokio::test(start_paused = true)]
async fn search_page_filters_by_organization() {
    let mut found = results(&["c1", "c2"]);
    found.courses[1].organization = OrganizationRef::Id("o2".into());
    let backend = MockBackend::new()
        .with_search_results("rust", found)
        .with_organization_counts(vec![OrganizationCourseCount {
            id: "o1".into(),
            name: "Org o1".into(),
            course_count: 1,
        }]);
    let h = anonymous(backend);
    let mut page = SearchScreen::new(&h.ctx, "rust");

    assert_eq!(page.load(&h.ctx).await, SearchOutcome::Applied);
    assert_eq!(page.organizations.loaded().map(Vec::len), Some(1));
    assert_eq!(course_ids(&page.visible()), vec!["c1", "c2"]);

    page.set_organization(Some("o2"));
    assert_eq!(course_ids(&page.visible()), vec!["c2"]);
    page.set_organization(Some("all"));
    assert_eq!(page.organization(), None);
    assert_eq!(course_ids(&page.visible()), vec!["c1", "c2"]);
}

#[tokio::test(start_paused = true)]
async fn search_page_keeps_matches_past_the_dropdown_cut() {
    let ids: Vec<String> = (0..8).map(|i| format!("c{}", i)).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let mut found = results(&refs);
    found.courses[7].organization = OrganizationRef::Id("o2".into());
    let h = anonymous(MockBackend::new().with_search_results("rust", found));
    let mut page = SearchScreen::new(&h.ctx, "rust");

    assert_eq!(page.load(&h.ctx).await, SearchOutcome::Applied);
    assert_eq!(page.visible().courses.len(), 8);

    page.set_organization(Some("o2"));
    assert_eq!(course_ids(&page.visible()), vec!["c7"]);
}
