//! Provider request text composition.
//!
//! The model defaults to a short top-N answer, so every request is wrapped in
//! an instruction asking for an exhaustive list. Region scoping is expressed
//! in the request text itself ("<topic> in <region>") rather than by filtering
//! addresses afterwards.

use crate::types::{Region, SearchQuery};

/// Used when only a region is known, e.g. the region changes before any topic
/// was searched.
pub const DEFAULT_TOPIC: &str = "interesting places";

const USER_LANGUAGE: &str = "the user's language";

/// Builds provider request text. Holds only the answer language; all inputs
/// are borrowed and never modified.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    response_language: Option<String>,
}

impl QueryBuilder {
    #[must_use]
    pub fn new(response_language: Option<String>) -> Self {
        Self { response_language }
    }

    /// Returns the subject phrase: the topic, plus `in <region>` when scoped.
    #[must_use]
    pub fn subject(topic: &str, region: &Region) -> String {
        let topic = topic.trim();
        match region.name() {
            Some(name) => format!("{topic} in {name}"),
            None => topic.to_owned(),
        }
    }

    #[must_use]
    pub fn build(&self, query: &SearchQuery) -> String {
        let subject = Self::subject(&query.topic, &query.region);
        let language = self.response_language.as_deref().unwrap_or(USER_LANGUAGE);
        format!(
            "Perform an exhaustive search for places related to: \"{subject}\".\n\
             Do not limit the results to a small default count such as the top 20. \
             Return as many distinct matching places as exist (aim for 50-100 places if available).\n\
             List every relevant place found with its details. Respond in {language}."
        )
    }
}

/// Builds request text with the default answer language.
#[must_use]
pub fn build_query(topic: &str, region: &Region) -> String {
    let query = SearchQuery::new(topic, region.clone());
    QueryBuilder::default().build(&query)
}
