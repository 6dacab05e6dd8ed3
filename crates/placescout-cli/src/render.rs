//! Terminal rendering of a session view.

use std::fmt::Write as _;

use placescout_core::{
    Affordance, PageLink, PlaceRecord, QuickSearch, ResultsView, QUICK_SEARCHES,
};
use serde::Serialize;

const MAX_REVIEWS_SHOWN: usize = 2;

pub(crate) fn render_presets() -> String {
    let mut out = String::new();
    for QuickSearch { key, label, topic } in QUICK_SEARCHES {
        let _ = writeln!(out, "{key:<10}{label:<16}{topic}");
    }
    out
}

/// Renders the whole results area as plain text.
pub(crate) fn render_view(view: &ResultsView<'_>) -> String {
    let mut out = String::new();

    if let Some(advisory) = view.advisory {
        let _ = writeln!(out, "note: {advisory}\n");
    }

    match view.affordance() {
        Affordance::Idle => {
            out.push_str("Type what you are looking for to start a search.\n");
        }
        Affordance::Loading => out.push_str("Searching...\n"),
        Affordance::Error(message) => {
            let _ = writeln!(out, "{message}");
        }
        Affordance::NoResults => {
            render_summary(&mut out, view);
            out.push_str("No places found. Try a different keyword or region.\n");
        }
        Affordance::Places => {
            render_summary(&mut out, view);
            render_places(&mut out, view);
        }
    }
    out
}

fn render_summary(out: &mut String, view: &ResultsView<'_>) {
    if let Some(summary) = view.summary {
        let _ = writeln!(out, "{}\n", summary.trim_end());
    }
}

fn render_places(out: &mut String, view: &ResultsView<'_>) {
    let page = view.page();
    let _ = write!(out, "{} | region: {}", view.count_label(), view.region);
    if !view.filter_text.trim().is_empty() {
        let _ = write!(out, " | filter: \"{}\"", view.filter_text.trim());
    }
    let (current, total) = (page.current_page, page.total_pages);
    let _ = writeln!(out, " | page {current} of {total}\n");

    for (i, record) in page.items.iter().enumerate() {
        render_card(out, page.offset + i + 1, record);
    }

    if total > 1 {
        let strip = render_window(&view.window(), current);
        let _ = writeln!(out, "pages: {strip}");
    }
}

fn render_card(out: &mut String, number: usize, record: &PlaceRecord) {
    let _ = writeln!(out, "{number:>3}. {}", record.display_title());
    let fields = [
        record.address.as_deref(),
        record.phone_number.as_deref(),
        record.website_uri.as_deref(),
        record.uri.as_deref(),
    ];
    for value in fields.into_iter().flatten() {
        let _ = writeln!(out, "     {value}");
    }
    if let Some(directions) = record.directions_uri() {
        let _ = writeln!(out, "     directions: {directions}");
    }

    let reviews = record
        .review_snippets
        .iter()
        .filter_map(|r| Some((r.review_text.as_deref()?, r.author.as_deref())));
    for review in reviews.take(MAX_REVIEWS_SHOWN) {
        match review {
            (text, Some(author)) => {
                let _ = writeln!(out, "     \"{}\" - {author}", text.trim());
            }
            (text, None) => {
                let _ = writeln!(out, "     \"{}\"", text.trim());
            }
        }
    }
    out.push('\n');
}

/// Page strip with the current page in brackets, e.g. `1 ... 4 [5] 6 ... 10`.
pub(crate) fn render_window(links: &[PageLink], current_page: usize) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page(n) if *n == current_page => format!("[{n}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Serialize)]
struct JsonPage<'a> {
    status: &'static str,
    summary: Option<&'a str>,
    error: Option<&'a str>,
    region: String,
    filter: &'a str,
    total_places: usize,
    current_page: usize,
    total_pages: usize,
    places: &'a [&'a PlaceRecord],
}

/// Renders the current page as pretty JSON.
pub(crate) fn render_json(view: &ResultsView<'_>) -> anyhow::Result<String> {
    let page = view.page();
    let (status, error) = match view.affordance() {
        Affordance::Idle => ("idle", None),
        Affordance::Loading => ("searching", None),
        Affordance::Error(message) => ("error", Some(message)),
        Affordance::NoResults => ("no_results", None),
        Affordance::Places => ("ok", None),
    };
    let body = JsonPage {
        status,
        summary: view.summary,
        error,
        region: view.region.to_string(),
        filter: view.filter_text,
        total_places: view.filtered_count(),
        current_page: page.current_page,
        total_pages: page.total_pages,
        places: page.items,
    };
    Ok(serde_json::to_string_pretty(&body)?)
}
