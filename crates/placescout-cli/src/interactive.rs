//! Line-driven session for the `interactive` command.
//!
//! Each input line becomes an [`Action`] against the [`Session`]. Searches run
//! on a `JoinSet` so the prompt stays responsive, and a newer search may be
//! issued while an older one is still in flight. The session discards
//! whichever response is no longer the latest.

use std::sync::Arc;

use placescout_core::{find_preset, AppConfig, Region, SearchResult, SearchTicket, Session};
use placescout_gemini::{GeminiClient, ProviderError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use crate::render;
use crate::LocationArgs;

const HELP: &str = "\
Commands:
  <text>            search for a new topic (resets region)
  /preset <key>     search a quick-search preset (see `placescout presets`)
  /region <name>    re-run the current topic in a region (`/region all` clears it)
  /filter [text]    filter the shown places without a new search (blank clears)
  /find <text>      search for <text> within the current region
  /page <n>         jump to a page
  /next, /prev      move one page
  /show             print the current view again
  /help             this text
  /quit             leave
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Search(String),
    Preset(String),
    Region(Region),
    Filter(String),
    Find(String),
    Page(usize),
    Next,
    Prev,
    Show,
    Help,
    Quit,
    Invalid(String),
}

/// Parses one input line. Blank lines yield `None`.
pub(crate) fn parse_action(line: &str) -> Option<Action> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(command) = line.strip_prefix('/') else {
        return Some(Action::Search(line.to_owned()));
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(n, r)| (n, r.trim()));

    let action = match name.to_ascii_lowercase().as_str() {
        "preset" if !rest.is_empty() => Action::Preset(rest.to_owned()),
        "region" if !rest.is_empty() => Action::Region(Region::parse(rest)),
        "filter" => Action::Filter(rest.to_owned()),
        "find" if !rest.is_empty() => Action::Find(rest.to_owned()),
        "page" => match rest.parse::<usize>() {
            Ok(page) => Action::Page(page),
            Err(_) => Action::Invalid(format!("not a page number: '{rest}'")),
        },
        "next" => Action::Next,
        "prev" => Action::Prev,
        "show" => Action::Show,
        "help" | "?" => Action::Help,
        "quit" | "exit" | "q" => Action::Quit,
        _ => Action::Invalid(format!("unknown or incomplete command: '/{command}'")),
    };
    Some(action)
}

type Outcome = (SearchTicket, Result<SearchResult, ProviderError>);

/// Runs the interactive session until `/quit` or end of input.
///
/// # Errors
///
/// Returns an error if the client cannot be built, stdin cannot be read, or a
/// search task panics.
pub(crate) async fn run_interactive(
    config: &AppConfig,
    location: &LocationArgs,
) -> anyhow::Result<()> {
    let client = Arc::new(GeminiClient::from_app_config(config)?);
    let mut session = Session::from_config(config);
    session.begin_location();
    session.settle_location(location.coordinates());

    print!("{HELP}");
    if let Some(advisory) = session.view().advisory {
        println!("note: {advisory}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: JoinSet<Outcome> = JoinSet::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let Some(action) = parse_action(&line) else { continue };
                if action == Action::Quit {
                    return Ok(());
                }
                if let Some(ticket) = apply(&mut session, action) {
                    println!("searching: {}", ticket.query.topic);
                    spawn_search(&mut in_flight, &client, ticket);
                }
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                let (ticket, outcome) = joined?;
                if session.complete(&ticket, outcome) {
                    print!("{}", render::render_view(&session.view()));
                }
            }
        }
    }

    // Input closed: let outstanding searches land so the last one is shown.
    while let Some(joined) = in_flight.join_next().await {
        let (ticket, outcome) = joined?;
        if session.complete(&ticket, outcome) {
            print!("{}", render::render_view(&session.view()));
        }
    }
    Ok(())
}

fn spawn_search(
    in_flight: &mut JoinSet<Outcome>,
    client: &Arc<GeminiClient>,
    ticket: SearchTicket,
) {
    let client = Arc::clone(client);
    in_flight.spawn(async move {
        let outcome = client
            .search_places(&ticket.request_text, ticket.location)
            .await;
        (ticket, outcome)
    });
}

/// Applies a non-quit action. Returns a ticket when a search must be started.
fn apply(session: &mut Session, action: Action) -> Option<SearchTicket> {
    match action {
        Action::Search(topic) => session.new_search(&topic),
        Action::Preset(key) => {
            if let Some(preset) = find_preset(&key) {
                session.new_search(preset.topic)
            } else {
                println!("unknown preset '{key}'");
                None
            }
        }
        Action::Region(region) => Some(session.change_region(region)),
        Action::Find(keyword) => session.submit_filter(&keyword),
        Action::Filter(keyword) => {
            session.set_filter(&keyword);
            print!("{}", render::render_view(&session.view()));
            None
        }
        Action::Page(page) => {
            session.set_page(page);
            print!("{}", render::render_view(&session.view()));
            None
        }
        Action::Next => {
            session.set_page(session.current_page().saturating_add(1));
            print!("{}", render::render_view(&session.view()));
            None
        }
        Action::Prev => {
            session.set_page(session.current_page().saturating_sub(1));
            print!("{}", render::render_view(&session.view()));
            None
        }
        Action::Show => {
            print!("{}", render::render_view(&session.view()));
            None
        }
        Action::Help => {
            print!("{HELP}");
            None
        }
        Action::Invalid(message) => {
            println!("{message} (try /help)");
            None
        }
        Action::Quit => None,
    }
}
