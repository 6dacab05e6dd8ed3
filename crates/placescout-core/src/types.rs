//! Domain types shared by the query builder, the provider client and the
//! refinement engine.

use serde::{Deserialize, Serialize};

/// Sentinel used on the wire and in user input for "no region restriction".
pub const ALL_REGIONS: &str = "all-regions";

/// Short spelling of [`ALL_REGIONS`] accepted from user input.
const ALL_REGIONS_SHORT: &str = "all";

/// A latitude/longitude pair used to bias results toward the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Administrative area a search is scoped to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[default]
    All,
    Named(String),
}

impl Region {
    /// Interprets user input: blank, `all`, or the [`ALL_REGIONS`] sentinel
    /// mean no restriction. Matching ignores case.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let is_all = trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case(ALL_REGIONS)
            || trimmed.eq_ignore_ascii_case(ALL_REGIONS_SHORT);
        if is_all {
            Region::All
        } else {
            Region::Named(trimmed.to_owned())
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Region::All => None,
            Region::Named(name) => Some(name),
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Region::All)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::All => write!(f, "{ALL_REGIONS}"),
            Region::Named(name) => write!(f, "{name}"),
        }
    }
}

/// What the user asked for: a topic, optionally scoped to a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub topic: String,
    #[serde(default)]
    pub region: Region,
}

impl SearchQuery {
    #[must_use]
    pub fn new(topic: impl Into<String>, region: Region) -> Self {
        Self {
            topic: topic.into(),
            region,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSnippet {
    pub review_text: Option<String>,
    pub author: Option<String>,
}

/// A single map-backed place. Every provider-supplied field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub source_id: Option<String>,
    pub title: Option<String>,
    pub uri: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website_uri: Option<String>,
    #[serde(default)]
    pub review_snippets: Vec<ReviewSnippet>,
}

impl PlaceRecord {
    /// Title shown when the provider supplied none.
    pub const UNKNOWN_TITLE: &'static str = "Unknown place";

    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(Self::UNKNOWN_TITLE)
    }

    /// Maps link that opens directions to the place instead of its listing.
    #[must_use]
    pub fn directions_uri(&self) -> Option<String> {
        let uri = self.uri.as_deref()?;
        Some(uri.replace("maps/search/", "maps/dir/"))
    }

    /// All review texts joined by a single space, in provider order.
    #[must_use]
    pub fn joined_reviews(&self) -> String {
        self.review_snippets
            .iter()
            .map(|r| r.review_text.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Case-insensitive match of an already-lowercased needle against title,
    /// address and review text.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        let found = |value: &str| value.to_lowercase().contains(needle);
        self.title.as_deref().is_some_and(found)
            || self.address.as_deref().is_some_and(found)
            || found(&self.joined_reviews())
    }
}

/// Normalised outcome of one provider search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub summary_text: String,
    pub records: Vec<PlaceRecord>,
}

impl SearchResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
