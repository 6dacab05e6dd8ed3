//! Session-level search state.
//!
//! A [`Session`] owns everything the presentation layer displays: the current
//! result, the filter text, the selected region, the page number and the
//! user's coordinates. Every mutation goes through `&mut self`, so each field
//! has exactly one writer.
//!
//! Searches are split into two halves so several may be in flight at once:
//! an issuing call ([`Session::new_search`], [`Session::change_region`],
//! [`Session::submit_filter`]) returns a [`SearchTicket`], and
//! [`Session::complete`] adopts the outcome only if that ticket is still the
//! latest one issued. Older responses are dropped.

use std::future::Future;

use crate::app_config::AppConfig;
use crate::query::{QueryBuilder, DEFAULT_TOPIC};
use crate::refine::{
    clamp_page, filter_records, page_window, paginate, total_pages, Page, PageLink,
    DEFAULT_PAGE_SIZE,
};
use crate::types::{Coordinates, PlaceRecord, Region, SearchQuery, SearchResult};

/// Shown when the user's location could not be obtained.
pub const LOCATION_ADVISORY: &str = "Turn on location access so we can find places close to you.";

/// Shown instead of the underlying provider error, which is only logged.
pub const SEARCH_FAILED_MESSAGE: &str =
    "Oops! The assistant could not finish that search. Please try again.";

/// A grounded place-search backend.
pub trait PlaceSearch {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Runs one search. `location` is `None` when no bias should be sent.
    fn search(
        &self,
        request_text: &str,
        location: Option<Coordinates>,
    ) -> impl Future<Output = Result<SearchResult, Self::Error>> + Send;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum LocationState {
    #[default]
    NotRequested,
    Acquiring,
    Acquired(Coordinates),
    Unavailable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Searching,
    Success,
    Error,
}

/// Everything needed to run one issued search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: SearchQuery,
    pub request_text: String,
    pub location: Option<Coordinates>,
}

#[derive(Debug)]
pub struct Session {
    query_builder: QueryBuilder,
    page_size: usize,
    location: LocationState,
    advisory: Option<String>,
    status: SearchStatus,
    result: Option<SearchResult>,
    error_message: Option<String>,
    base_topic: String,
    region: Region,
    filter_text: String,
    current_page: usize,
    latest_seq: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(QueryBuilder::default(), DEFAULT_PAGE_SIZE)
    }
}

impl Session {
    #[must_use]
    pub fn new(query_builder: QueryBuilder, page_size: usize) -> Self {
        Self {
            query_builder,
            page_size: page_size.max(1),
            location: LocationState::default(),
            advisory: None,
            status: SearchStatus::default(),
            result: None,
            error_message: None,
            base_topic: String::new(),
            region: Region::All,
            filter_text: String::new(),
            current_page: 1,
            latest_seq: 0,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            QueryBuilder::new(config.response_language.clone()),
            config.page_size,
        )
    }

    // ------------------------------------------------------------------
    // Location
    // ------------------------------------------------------------------

    /// Marks the location request as in flight. No-op once coordinates exist.
    pub fn begin_location(&mut self) {
        if !matches!(self.location, LocationState::Acquired(_)) {
            self.location = LocationState::Acquiring;
        }
    }

    /// Records the geolocation outcome. Coordinates are kept at most once per
    /// session; later outcomes are ignored.
    pub fn settle_location(&mut self, outcome: Option<Coordinates>) {
        if matches!(self.location, LocationState::Acquired(_)) {
            tracing::debug!("location already acquired, ignoring later outcome");
            return;
        }
        if let Some(coords) = outcome {
            tracing::info!(
                latitude = coords.latitude,
                longitude = coords.longitude,
                "location acquired"
            );
            self.location = LocationState::Acquired(coords);
            self.advisory = None;
        } else {
            tracing::warn!("location unavailable, searching without location bias");
            self.location = LocationState::Unavailable;
            self.advisory = Some(LOCATION_ADVISORY.to_owned());
        }
    }

    #[must_use]
    pub fn location_state(&self) -> LocationState {
        self.location
    }

    #[must_use]
    pub fn location(&self) -> Option<Coordinates> {
        match self.location {
            LocationState::Acquired(coords) => Some(coords),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Search actions
    // ------------------------------------------------------------------

    /// Starts a search for a new topic. The region resets to all regions.
    /// Returns `None` for a blank topic.
    pub fn new_search(&mut self, topic: &str) -> Option<SearchTicket> {
        self.new_search_in(topic, Region::All)
    }

    /// Starts a search for a new topic already scoped to `region`, issuing a
    /// single ticket. Returns `None` for a blank topic.
    pub fn new_search_in(&mut self, topic: &str, region: Region) -> Option<SearchTicket> {
        let topic = topic.trim();
        if topic.is_empty() {
            return None;
        }
        topic.clone_into(&mut self.base_topic);
        self.region = region;
        Some(self.issue())
    }

    /// Re-runs the current topic scoped to `region`, or to all regions.
    pub fn change_region(&mut self, region: Region) -> SearchTicket {
        self.region = region;
        if self.base_topic.is_empty() {
            DEFAULT_TOPIC.clone_into(&mut self.base_topic);
        }
        self.issue()
    }

    /// Submitting the filter box searches the provider for the keyword within
    /// the current region. Returns `None` for a blank keyword.
    pub fn submit_filter(&mut self, keyword: &str) -> Option<SearchTicket> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return None;
        }
        keyword.clone_into(&mut self.base_topic);
        Some(self.issue())
    }

    /// Updates the client-side filter text without querying the provider.
    pub fn set_filter(&mut self, keyword: &str) {
        keyword.clone_into(&mut self.filter_text);
        self.current_page = 1;
    }

    /// Moves to `page`, clamped into the valid range. Returns the page used.
    pub fn set_page(&mut self, page: usize) -> usize {
        let total = total_pages(self.filtered().len(), self.page_size);
        self.current_page = clamp_page(page, total);
        self.current_page
    }

    fn issue(&mut self) -> SearchTicket {
        self.latest_seq += 1;
        self.status = SearchStatus::Searching;
        self.result = None;
        self.error_message = None;
        self.filter_text.clear();
        self.current_page = 1;

        let query = SearchQuery::new(self.base_topic.clone(), self.region.clone());
        // A named region replaces the location bias.
        let location = if query.region.is_all() {
            self.location()
        } else {
            None
        };
        let request_text = self.query_builder.build(&query);

        tracing::info!(
            seq = self.latest_seq,
            topic = %query.topic,
            region = %query.region,
            has_location = location.is_some(),
            "search issued"
        );

        SearchTicket {
            seq: self.latest_seq,
            query,
            request_text,
            location,
        }
    }

    /// Adopts the outcome of `ticket` if it is the latest search issued.
    ///
    /// Returns `false` when the outcome was stale and discarded. Provider
    /// errors are logged; the session only keeps a generic message.
    pub fn complete<E>(&mut self, ticket: &SearchTicket, outcome: Result<SearchResult, E>) -> bool
    where
        E: std::fmt::Display,
    {
        if ticket.seq != self.latest_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale search response"
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                tracing::info!(
                    seq = ticket.seq,
                    records = result.records.len(),
                    "search completed"
                );
                self.result = Some(result);
                self.status = SearchStatus::Success;
            }
            Err(err) => {
                tracing::error!(seq = ticket.seq, error = %err, "search failed");
                self.result = None;
                self.error_message = Some(SEARCH_FAILED_MESSAGE.to_owned());
                self.status = SearchStatus::Error;
            }
        }
        self.current_page = 1;
        true
    }

    /// Runs `ticket` against `provider` and adopts the outcome if still current.
    pub async fn run<S: PlaceSearch>(&mut self, provider: &S, ticket: &SearchTicket) -> bool {
        let outcome = provider.search(&ticket.request_text, ticket.location).await;
        self.complete(ticket, outcome)
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[must_use]
    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    #[must_use]
    pub fn base_topic(&self) -> &str {
        &self.base_topic
    }

    #[must_use]
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn filtered(&self) -> Vec<&PlaceRecord> {
        self.result
            .as_ref()
            .map(|r| filter_records(&r.records, &self.filter_text))
            .unwrap_or_default()
    }

    /// Snapshot of everything the presentation layer renders.
    #[must_use]
    pub fn view(&self) -> ResultsView<'_> {
        let filtered = self.filtered();
        let total = total_pages(filtered.len(), self.page_size);
        ResultsView {
            status: self.status,
            summary: self.result.as_ref().map(|r| r.summary_text.as_str()),
            error_message: self.error_message.as_deref(),
            advisory: self.advisory.as_deref(),
            region: &self.region,
            filter_text: &self.filter_text,
            current_page: clamp_page(self.current_page, total),
            page_size: self.page_size,
            filtered,
        }
    }
}

/// What the presentation layer should show in the results area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance<'a> {
    Idle,
    Loading,
    Error(&'a str),
    NoResults,
    Places,
}

#[derive(Debug)]
pub struct ResultsView<'a> {
    pub status: SearchStatus,
    pub summary: Option<&'a str>,
    pub error_message: Option<&'a str>,
    pub advisory: Option<&'a str>,
    pub region: &'a Region,
    pub filter_text: &'a str,
    pub current_page: usize,
    pub page_size: usize,
    pub filtered: Vec<&'a PlaceRecord>,
}

impl<'a> ResultsView<'a> {
    #[must_use]
    pub fn affordance(&self) -> Affordance<'a> {
        match self.status {
            SearchStatus::Idle => Affordance::Idle,
            SearchStatus::Searching => Affordance::Loading,
            SearchStatus::Error => {
                Affordance::Error(self.error_message.unwrap_or(SEARCH_FAILED_MESSAGE))
            }
            SearchStatus::Success if self.filtered.is_empty() => Affordance::NoResults,
            SearchStatus::Success => Affordance::Places,
        }
    }

    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.page_size)
    }

    #[must_use]
    pub fn page(&self) -> Page<'_, &'a PlaceRecord> {
        paginate(&self.filtered, self.page_size, self.current_page)
    }

    #[must_use]
    pub fn window(&self) -> Vec<PageLink> {
        page_window(self.current_page, self.total_pages())
    }

    #[must_use]
    pub fn count_label(&self) -> String {
        match self.filtered.len() {
            1 => "1 place".to_owned(),
            n => format!("{n} places"),
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
