use std::collections::VecDeque;
use std::sync::Mutex;

use super::*;

#[derive(Debug, thiserror::Error)]
#[error("provider exploded: {0}")]
struct FakeError(String);

/// Replays canned outcomes and records each call.
#[derive(Default)]
struct ScriptedProvider {
    outcomes: Mutex<VecDeque<Result<SearchResult, FakeError>>>,
    calls: Mutex<Vec<(String, Option<Coordinates>)>>,
}

impl ScriptedProvider {
    fn with(outcomes: Vec<Result<SearchResult, FakeError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::default(),
        }
    }

    fn calls(&self) -> Vec<(String, Option<Coordinates>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PlaceSearch for ScriptedProvider {
    type Error = FakeError;

    async fn search(
        &self,
        request_text: &str,
        location: Option<Coordinates>,
    ) -> Result<SearchResult, FakeError> {
        self.calls
            .lock()
            .unwrap()
            .push((request_text.to_owned(), location));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FakeError("no scripted outcome".to_owned())))
    }
}

fn named(title: &str) -> PlaceRecord {
    PlaceRecord {
        title: Some(title.to_owned()),
        uri: Some(format!("https://maps.google.com/?q={title}")),
        ..PlaceRecord::default()
    }
}

fn result_with(count: usize, prefix: &str) -> SearchResult {
    SearchResult {
        summary_text: format!("{count} {prefix} places"),
        records: (0..count)
            .map(|i| named(&format!("{prefix} {i}")))
            .collect(),
    }
}

fn session() -> Session {
    Session::new(QueryBuilder::default(), 100)
}

const BANGKOK: Coordinates = Coordinates {
    latitude: 13.7563,
    longitude: 100.5018,
};

// -----------------------------------------------------------------------
// Location
// -----------------------------------------------------------------------

#[test]
fn location_is_kept_at_most_once() {
    let mut s = session();
    s.begin_location();
    assert_eq!(s.location_state(), LocationState::Acquiring);

    s.settle_location(Some(BANGKOK));
    s.settle_location(Some(Coordinates::new(0.0, 0.0)));
    s.settle_location(None);
    assert_eq!(s.location(), Some(BANGKOK));
}

#[test]
fn denied_location_sets_advisory_and_searches_without_bias() {
    let mut s = session();
    s.begin_location();
    s.settle_location(None);
    assert_eq!(s.location_state(), LocationState::Unavailable);
    assert_eq!(s.view().advisory, Some(LOCATION_ADVISORY));

    let ticket = s.new_search("noodles").unwrap();
    assert_eq!(ticket.location, None);
}

// -----------------------------------------------------------------------
// Issuing searches
// -----------------------------------------------------------------------

#[test]
fn blank_topic_does_not_issue_a_search() {
    let mut s = session();
    assert!(s.new_search("   ").is_none());
    assert_eq!(s.status(), SearchStatus::Idle);
}

#[test]
fn all_regions_search_uses_location() {
    let mut s = session();
    s.settle_location(Some(BANGKOK));
    let ticket = s.new_search("cafe").unwrap();
    assert_eq!(ticket.location, Some(BANGKOK));
    assert_eq!(ticket.query.region, Region::All);
    assert!(ticket.request_text.contains("\"cafe\""));
    assert_eq!(s.status(), SearchStatus::Searching);
}

#[test]
fn region_search_drops_location_and_qualifies_topic() {
    let mut s = session();
    s.settle_location(Some(BANGKOK));
    s.new_search("cafe").unwrap();

    let ticket = s.change_region(Region::Named("Chiang Mai".to_owned()));
    assert_eq!(ticket.location, None);
    assert!(ticket.request_text.contains("\"cafe in Chiang Mai\""));

    let back = s.change_region(Region::All);
    assert_eq!(back.location, Some(BANGKOK));
    assert!(back.request_text.contains("\"cafe\""));
}

#[test]
fn region_change_without_topic_uses_default_topic() {
    let mut s = session();
    let ticket = s.change_region(Region::Named("Krabi".to_owned()));
    assert_eq!(ticket.query.topic, DEFAULT_TOPIC);
    assert!(ticket.request_text.contains("interesting places in Krabi"));
}

#[test]
fn new_topic_resets_region() {
    let mut s = session();
    s.change_region(Region::Named("Krabi".to_owned()));
    let ticket = s.new_search("seafood").unwrap();
    assert_eq!(ticket.query.region, Region::All);
    assert_eq!(s.region(), &Region::All);
}

#[test]
fn scoped_new_search_issues_a_single_ticket() {
    let mut s = session();
    s.settle_location(Some(BANGKOK));
    let region = Region::Named("Chiang Mai".to_owned());

    let ticket = s.new_search_in("khao soi", region.clone()).unwrap();
    assert_eq!(ticket.seq, 1);
    assert_eq!(ticket.query.region, region);
    assert_eq!(ticket.location, None);
    assert!(ticket.request_text.contains("\"khao soi in Chiang Mai\""));
    assert_eq!(s.region(), &region);
    assert!(s.new_search_in("  ", region).is_none());
}

#[test]
fn submit_filter_searches_keyword_in_current_region() {
    let mut s = session();
    s.new_search("food").unwrap();
    s.change_region(Region::Named("Phuket".to_owned()));

    let ticket = s.submit_filter("  dim sum ").unwrap();
    assert_eq!(ticket.query.topic, "dim sum");
    assert_eq!(ticket.query.region, Region::Named("Phuket".to_owned()));
    assert_eq!(s.base_topic(), "dim sum");
    assert!(s.submit_filter("  ").is_none());
}

#[test]
fn sequence_numbers_increase() {
    let mut s = session();
    let a = s.new_search("a").unwrap();
    let b = s.change_region(Region::Named("Trang".to_owned()));
    let c = s.submit_filter("c").unwrap();
    assert!(a.seq < b.seq && b.seq < c.seq);
}

// -----------------------------------------------------------------------
// Completing searches
// -----------------------------------------------------------------------

#[test]
fn latest_search_wins_over_late_response() {
    let mut s = session();
    let first = s.new_search("thai food").unwrap();
    let second = s.new_search("pharmacy").unwrap();

    let pharmacy = result_with(2, "pharmacy");
    let thai = result_with(9, "thai");
    assert!(s.complete::<FakeError>(&second, Ok(pharmacy)));
    assert!(!s.complete::<FakeError>(&first, Ok(thai)));

    let result = s.result().unwrap();
    assert_eq!(result.records.len(), 2);
    assert_eq!(s.status(), SearchStatus::Success);
}

#[test]
fn stale_failure_does_not_clobber_current_result() {
    let mut s = session();
    let first = s.new_search("a").unwrap();
    let second = s.new_search("b").unwrap();
    s.complete::<FakeError>(&second, Ok(result_with(1, "b")));
    assert!(!s.complete(&first, Err(FakeError("late".to_owned()))));
    assert_eq!(s.status(), SearchStatus::Success);
}

#[test]
fn new_search_clears_previous_result_and_filter() {
    let mut s = session();
    let ticket = s.new_search("cafe").unwrap();
    s.complete::<FakeError>(&ticket, Ok(result_with(3, "cafe")));
    s.set_filter("cafe 1");

    s.new_search("bakery").unwrap();
    assert!(s.result().is_none());
    assert_eq!(s.filter_text(), "");
    assert_eq!(s.view().affordance(), Affordance::Loading);
}

#[test]
fn failure_exposes_generic_message_only() {
    let mut s = session();
    let ticket = s.new_search("cafe").unwrap();
    let err = FakeError("HTTP 403 secret details".to_owned());
    s.complete(&ticket, Err(err));

    let view = s.view();
    assert_eq!(view.status, SearchStatus::Error);
    assert_eq!(view.affordance(), Affordance::Error(SEARCH_FAILED_MESSAGE));
    assert!(view.summary.is_none());
}

#[test]
fn empty_success_is_no_results_not_error() {
    let mut s = session();
    let ticket = s.new_search("unicorn stables").unwrap();
    s.complete::<FakeError>(&ticket, Ok(result_with(0, "none")));
    let view = s.view();
    assert_eq!(view.affordance(), Affordance::NoResults);
    assert_eq!(view.summary, Some("0 none places"));
}

// -----------------------------------------------------------------------
// Pagination reset
// -----------------------------------------------------------------------

fn session_on_page_three() -> Session {
    let mut s = session();
    let ticket = s.new_search("street food").unwrap();
    s.complete::<FakeError>(&ticket, Ok(result_with(250, "stall")));
    assert_eq!(s.set_page(3), 3);
    s
}

#[test]
fn set_page_clamps_into_range() {
    let mut s = session_on_page_three();
    assert_eq!(s.set_page(5), 3);
    assert_eq!(s.set_page(0), 1);
    let view = s.view();
    assert_eq!(view.total_pages(), 3);
    assert_eq!(view.page().items.len(), 100);
}

#[test]
fn last_page_holds_the_remainder() {
    let s = session_on_page_three();
    let view = s.view();
    let page = view.page();
    assert_eq!(page.items.len(), 50);
    assert_eq!(page.offset, 200);
    assert_eq!(page.items[0].display_title(), "stall 200");
}

#[test]
fn region_change_resets_page() {
    let mut s = session_on_page_three();
    s.change_region(Region::Named("Chiang Mai".to_owned()));
    assert_eq!(s.current_page(), 1);
}

#[test]
fn new_topic_resets_page() {
    let mut s = session_on_page_three();
    s.new_search("night market").unwrap();
    assert_eq!(s.current_page(), 1);
}

#[test]
fn filter_change_resets_page() {
    let mut s = session_on_page_three();
    s.set_filter("stall 2");
    assert_eq!(s.current_page(), 1);
    let view = s.view();
    // "stall 2", "stall 20".."stall 29", "stall 200".."stall 249"
    assert_eq!(view.filtered_count(), 61);
    assert_eq!(view.count_label(), "61 places");
}

#[test]
fn window_follows_current_page() {
    let mut s = session();
    let ticket = s.new_search("temples").unwrap();
    s.complete::<FakeError>(&ticket, Ok(result_with(1000, "wat")));
    s.set_page(5);
    let labels: Vec<String> = s.view().window().iter().map(ToString::to_string).collect();
    assert_eq!(labels, ["1", "...", "4", "5", "6", "...", "10"]);
}

// -----------------------------------------------------------------------
// Driving a provider
// -----------------------------------------------------------------------

#[tokio::test]
async fn run_passes_request_and_location_to_provider() {
    let provider = ScriptedProvider::with(vec![Ok(result_with(4, "cafe"))]);
    let mut s = session();
    s.settle_location(Some(BANGKOK));

    let ticket = s.new_search("cafe").unwrap();
    assert!(s.run(&provider, &ticket).await);

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, ticket.request_text);
    assert_eq!(calls[0].1, Some(BANGKOK));
    assert_eq!(s.view().affordance(), Affordance::Places);
    assert_eq!(s.view().filtered_count(), 4);
}

#[tokio::test]
async fn run_records_provider_failure() {
    let provider = ScriptedProvider::with(vec![Err(FakeError("quota".to_owned()))]);
    let mut s = session();
    let ticket = s.new_search("cafe").unwrap();
    assert!(s.run(&provider, &ticket).await);
    assert_eq!(s.status(), SearchStatus::Error);
}

#[tokio::test]
async fn run_for_superseded_ticket_is_discarded() {
    let provider = ScriptedProvider::with(vec![Ok(result_with(1, "old"))]);
    let mut s = session();
    let old = s.new_search("old").unwrap();
    let _current = s.new_search("new").unwrap();

    assert!(!s.run(&provider, &old).await);
    assert_eq!(s.status(), SearchStatus::Searching);
    assert!(s.result().is_none());
}
