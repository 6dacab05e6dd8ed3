use super::*;
use crate::types::ReviewSnippet;

fn place(title: &str, address: &str, reviews: &[&str]) -> PlaceRecord {
    PlaceRecord {
        source_id: Some(format!("places/{title}")),
        title: Some(title.to_owned()),
        uri: Some(format!("https://maps.google.com/?cid={title}")),
        address: Some(address.to_owned()),
        review_snippets: reviews
            .iter()
            .map(|text| ReviewSnippet {
                review_text: Some((*text).to_owned()),
                author: None,
            })
            .collect(),
        ..PlaceRecord::default()
    }
}

fn sample() -> Vec<PlaceRecord> {
    vec![
        place("Ristr8to Cafe", "Nimmanhaemin Rd", &["best flat white"]),
        place("Tong Tem Toh", "Soi 13, Nimman", &["northern Thai food"]),
        place(
            "Graph Coffee",
            "Ratchadamnoen Rd",
            &["tiny CAFE with great beans"],
        ),
        place("Maya Mall", "Huay Kaew Rd", &[]),
        PlaceRecord::default(),
    ]
}

fn numbered(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

// -----------------------------------------------------------------------
// filter_records
// -----------------------------------------------------------------------

#[test]
fn blank_keyword_returns_everything_in_order() {
    let records = sample();
    let filtered = filter_records(&records, "   ");
    assert_eq!(filtered.len(), records.len());
    assert!(filtered.iter().zip(&records).all(|(a, b)| *a == b));
}

#[test]
fn keyword_matches_title_address_or_reviews() {
    let records = sample();

    let by_title: Vec<_> = filter_records(&records, "graph")
        .iter()
        .map(|r| r.display_title())
        .collect();
    assert_eq!(by_title, vec!["Graph Coffee"]);

    let by_address: Vec<_> = filter_records(&records, "nimman")
        .iter()
        .map(|r| r.display_title())
        .collect();
    assert_eq!(by_address, vec!["Ristr8to Cafe", "Tong Tem Toh"]);

    let by_review: Vec<_> = filter_records(&records, "northern thai")
        .iter()
        .map(|r| r.display_title())
        .collect();
    assert_eq!(by_review, vec!["Tong Tem Toh"]);
}

#[test]
fn keyword_is_trimmed_before_matching() {
    let records = sample();
    assert_eq!(filter_records(&records, "  mall ").len(), 1);
}

#[test]
fn filter_is_case_insensitive() {
    let records = sample();
    let upper = filter_records(&records, "CAFE");
    let lower = filter_records(&records, "cafe");
    assert_eq!(upper, lower);
    assert_eq!(upper.len(), 2);
}

#[test]
fn filter_is_idempotent() {
    let records = sample();
    for keyword in ["cafe", "rd", "", "nothing-matches"] {
        let once: Vec<PlaceRecord> = filter_records(&records, keyword)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<PlaceRecord> = filter_records(&once, keyword)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice, "keyword {keyword:?}");
    }
}

#[test]
fn record_without_fields_never_matches_a_keyword() {
    let records = vec![PlaceRecord::default()];
    assert!(filter_records(&records, "a").is_empty());
}

#[test]
fn filter_on_empty_list_is_empty() {
    assert!(filter_records(&[], "cafe").is_empty());
}

// -----------------------------------------------------------------------
// paginate
// -----------------------------------------------------------------------

#[test]
fn two_hundred_fifty_records_make_three_pages() {
    let items = numbered(250);
    let page = paginate(&items, 100, 1);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 100);
    assert_eq!(page.items[0], 1);
}

#[test]
fn page_past_the_end_clamps_to_last_page() {
    let items = numbered(250);
    let page = paginate(&items, 100, 5);
    assert_eq!(page.current_page, 3);
    assert_eq!(page.items.len(), 50);
    assert_eq!(page.items.first(), Some(&201));
    assert_eq!(page.items.last(), Some(&250));
    assert_eq!(page.offset, 200);
}

#[test]
fn page_zero_clamps_to_first_page() {
    let items = numbered(250);
    let page = paginate(&items, 100, 0);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.items, &items[..100]);
    assert_eq!(page.offset, 0);
}

#[test]
fn empty_list_has_one_empty_page() {
    let items: Vec<usize> = Vec::new();
    let page = paginate(&items, 100, 3);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.current_page, 1);
    assert!(page.items.is_empty());
}

#[test]
fn zero_page_size_degrades_to_single_item_pages() {
    let items = numbered(3);
    let page = paginate(&items, 0, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items, &[2]);
}

#[test]
fn exact_multiple_has_no_trailing_empty_page() {
    assert_eq!(total_pages(200, 100), 2);
    assert_eq!(total_pages(201, 100), 3);
    assert_eq!(total_pages(0, 100), 1);
}

// -----------------------------------------------------------------------
// page_window
// -----------------------------------------------------------------------

fn window(current: usize, total: usize) -> Vec<String> {
    page_window(current, total)
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn small_totals_list_every_page() {
    assert_eq!(window(1, 1), ["1"]);
    assert_eq!(window(4, 7), ["1", "2", "3", "4", "5", "6", "7"]);
}

#[test]
fn window_near_start() {
    assert_eq!(window(1, 10), ["1", "2", "3", "4", "5", "...", "10"]);
    assert_eq!(window(4, 10), ["1", "2", "3", "4", "5", "...", "10"]);
}

#[test]
fn window_near_end() {
    assert_eq!(window(10, 10), ["1", "...", "6", "7", "8", "9", "10"]);
    assert_eq!(window(7, 10), ["1", "...", "6", "7", "8", "9", "10"]);
}

#[test]
fn window_in_the_middle() {
    assert_eq!(window(5, 10), ["1", "...", "4", "5", "6", "...", "10"]);
    assert_eq!(window(6, 10), ["1", "...", "5", "6", "7", "...", "10"]);
}

#[test]
fn window_clamps_out_of_range_current_page() {
    assert_eq!(window(0, 10), window(1, 10));
    assert_eq!(window(99, 10), window(10, 10));
    assert_eq!(window(3, 0), ["1"]);
}

#[test]
fn window_is_deterministic() {
    for total in 1..=30 {
        for current in 0..=total + 1 {
            assert_eq!(page_window(current, total), page_window(current, total));
            let pages = page_window(current, total);
            assert_eq!(pages.first(), Some(&PageLink::Page(1)));
            assert_eq!(pages.last(), Some(&PageLink::Page(total)));
        }
    }
}
