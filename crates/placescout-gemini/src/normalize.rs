//! Normalization of Gemini responses into placescout domain types.

use placescout_core::{PlaceRecord, ReviewSnippet, SearchResult};

use crate::types::{Candidate, GenerateContentResponse, MapsChunk};

/// Summary used when the model returned no text.
pub const NO_DETAILS_FOUND: &str = "no details found.";

/// Converts a raw `generateContent` response into a [`SearchResult`].
///
/// Only the first candidate is read. Its text parts are concatenated into the
/// summary, and each grounding chunk that carries map data becomes a
/// [`PlaceRecord`]. Chunks without map data (web pages and the like) are
/// not places and are dropped here.
#[must_use]
pub fn adapt_response(response: GenerateContentResponse) -> SearchResult {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return SearchResult {
            summary_text: NO_DETAILS_FOUND.to_owned(),
            records: Vec::new(),
        };
    };

    let summary_text = candidate_text(&candidate)
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| NO_DETAILS_FOUND.to_owned());

    let records = candidate
        .grounding_metadata
        .map(|meta| meta.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.maps)
        .map(place_record)
        .collect();

    SearchResult {
        summary_text,
        records,
    }
}

/// Concatenated text parts of a candidate, or `None` if it has none.
fn candidate_text(candidate: &Candidate) -> Option<String> {
    let content = candidate.content.as_ref()?;
    let texts: Vec<&str> = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

fn place_record(maps: MapsChunk) -> PlaceRecord {
    let review_snippets = maps
        .place_answer_sources
        .map(|sources| sources.review_snippets)
        .unwrap_or_default()
        .into_iter()
        .map(|raw| ReviewSnippet {
            review_text: raw.review_text,
            author: raw.author,
        })
        .collect();

    PlaceRecord {
        source_id: maps.source_id,
        title: maps.title,
        uri: maps.uri,
        address: maps.address,
        phone_number: maps.phone_number,
        website_uri: maps.website_uri,
        review_snippets,
    }
}
