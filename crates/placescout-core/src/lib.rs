//! Search orchestration and result refinement for grounded place search.
//!
//! Turns a free-text topic (plus an optional region) into provider request
//! text, holds the session state for the current search, and filters and
//! paginates the returned places for display. The provider itself is reached
//! through the [`PlaceSearch`] trait; `placescout-gemini` supplies the
//! production implementation.

pub mod app_config;
pub mod config;
pub mod presets;
pub mod query;
pub mod refine;
pub mod session;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use config::{load_app_config, load_app_config_from_env};
pub use presets::{find_preset, QuickSearch, QUICK_SEARCHES};
pub use query::{build_query, QueryBuilder, DEFAULT_TOPIC};
pub use refine::{filter_records, page_window, paginate, Page, PageLink, DEFAULT_PAGE_SIZE};
pub use session::{
    Affordance, LocationState, PlaceSearch, ResultsView, SearchStatus, SearchTicket, Session,
    LOCATION_ADVISORY, SEARCH_FAILED_MESSAGE,
};
pub use types::{
    Coordinates, PlaceRecord, Region, ReviewSnippet, SearchQuery, SearchResult, ALL_REGIONS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
