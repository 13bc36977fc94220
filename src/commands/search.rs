use super::FilterArgs;
use crate::chart::{aggregate_languages, LanguageCount};
use crate::config::GitFindConfig;
use crate::error::FetchError;
use crate::github::{GitHubClient, SearchBackend};
use crate::query::SearchRequest;
use crate::render::{Screen, ERROR_NOTICE};
use crate::state::{SearchState, Ticket};
use crate::types::RepoSummary;
use anyhow::Result;
use log::{debug, error};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Rendered(usize),
    Failed,
    Stale,
}

/// Run one request and draw whatever comes back.
///
/// The loading indicator is up for exactly the duration of the call.
pub fn fetch_and_render<B, W>(
    state: &mut SearchState,
    backend: &B,
    screen: &mut Screen<W>,
    request: &SearchRequest,
) -> io::Result<Outcome>
where
    B: SearchBackend + ?Sized,
    W: Write,
{
    let ticket = state.issue(request);
    let shown = screen.show_loading();
    let result = backend.search(request);
    screen.hide_loading()?;
    shown?;
    debug_assert!(!screen.is_loading());

    present(state, screen, ticket, result)
}

/// Draw a finished response, unless a newer request was issued since.
pub fn present<W: Write>(
    state: &SearchState,
    screen: &mut Screen<W>,
    ticket: Ticket,
    result: Result<Vec<RepoSummary>, FetchError>,
) -> io::Result<Outcome> {
    if !state.is_current(ticket) {
        debug!("dropping stale response for {:?}", ticket);
        return Ok(Outcome::Stale);
    }

    match result {
        Ok(items) => {
            screen.show_repos(&items)?;
            screen.update_chart(&items)?;
            Ok(Outcome::Rendered(items.len()))
        }
        Err(e) => {
            error!("Error fetching repositories: {}", e);
            screen.show_error()?;
            Ok(Outcome::Failed)
        }
    }
}

#[derive(Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    page: u32,
    per_page: u8,
    items: &'a [RepoSummary],
    languages: Vec<LanguageCount>,
}

pub struct SearchOptions {
    pub query: Option<String>,
    pub page: u32,
    pub per_page: Option<u8>,
    pub json: bool,
    pub filters: FilterArgs,
}

/// One-shot search. Returns the process exit code.
pub fn search_command(opts: SearchOptions, config: &GitFindConfig, token: Option<String>) -> Result<i32> {
    let criteria = opts.filters.criteria(config, opts.query.as_deref().unwrap_or(""));
    let per_page = opts.per_page.unwrap_or(config.per_page);
    let client = GitHubClient::new(&config.api_base, &config.user_agent, token)?;

    let mut state = SearchState::new(criteria, per_page);
    let request = SearchRequest {
        page: opts.page.max(1),
        ..state.load()
    };

    if opts.json {
        return search_json(&mut state, &client, &request);
    }

    let stdout = io::stdout();
    let live = stdout.is_terminal();
    let mut screen = Screen::new(stdout.lock(), opts.filters.use_color(config), live);
    writeln!(
        screen.out(),
        "Searching {:?} (sort: {}, page {})",
        request.query,
        request.sort,
        request.page
    )?;

    match fetch_and_render(&mut state, &client, &mut screen, &request)? {
        Outcome::Failed => Ok(1),
        _ => Ok(0),
    }
}

fn search_json<B: SearchBackend>(state: &mut SearchState, backend: &B, request: &SearchRequest) -> Result<i32> {
    state.issue(request);
    match backend.search(request) {
        Ok(items) => {
            let report = SearchReport {
                query: &request.query,
                page: request.page,
                per_page: request.per_page,
                items: &items,
                languages: aggregate_languages(&items),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(0)
        }
        Err(e) => {
            error!("Error fetching repositories: {}", e);
            eprintln!("{}", ERROR_NOTICE);
            Ok(1)
        }
    }
}
