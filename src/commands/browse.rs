use super::search::fetch_and_render;
use super::FilterArgs;
use crate::config::GitFindConfig;
use crate::github::{GitHubClient, SearchBackend};
use crate::render::Screen;
use crate::state::SearchState;
use crate::types::{Preset, SortKey};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Search(String),
    Next,
    Prev,
    Filter(Preset),
    Sort(SortKey),
    Lang(String),
    Status,
    Clear,
    Help,
    Exit,
    Usage(&'static str),
}

fn parse_action(line: &str) -> Option<Action> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(command) = line.strip_prefix('/').or_else(|| line.strip_prefix(':')) else {
        return Some(Action::Search(line.to_string()));
    };
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let action = match name {
        "next" | "n" => Action::Next,
        "prev" | "p" => Action::Prev,
        "filter" | "f" => match Preset::parse(arg) {
            Some(preset) => Action::Filter(preset),
            None => Action::Usage("usage: /filter <popular|trending|recent>"),
        },
        "sort" => match SortKey::parse(arg) {
            Some(sort) => Action::Sort(sort),
            None => Action::Usage("usage: /sort <best-match|stars|forks|updated>"),
        },
        "lang" => Action::Lang(arg.to_string()),
        "page" => Action::Status,
        "clear" => Action::Clear,
        "help" => Action::Help,
        "exit" | "quit" | "q" => Action::Exit,
        _ => Action::Usage("unknown command; type /help"),
    };
    Some(action)
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Type text and press Enter to search names and descriptions.")?;
    writeln!(out, "  /next, /prev              move between pages")?;
    writeln!(out, "  /filter <preset>          popular, trending or recent")?;
    writeln!(out, "  /sort <key>               best-match, stars, forks or updated")?;
    writeln!(out, "  /lang [name]              filter by language (no name clears it)")?;
    writeln!(out, "  /page                     show the current search")?;
    writeln!(out, "  /clear                    clear the screen")?;
    writeln!(out, "  /exit                     leave")
}

/// The preset bar, active preset highlighted.
fn nav_line(active: Preset, color: bool) -> String {
    Preset::ALL
        .iter()
        .map(|p| {
            if *p != active {
                p.as_str().to_string()
            } else if color {
                p.as_str().bold().underline().to_string()
            } else {
                format!("[{}]", p)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Drive a browse session from `input` until it runs dry or the user exits.
pub fn run_session<B, R, W>(
    backend: &B,
    mut state: SearchState,
    input: R,
    screen: &mut Screen<W>,
    color: bool,
) -> Result<SearchState>
where
    B: SearchBackend + ?Sized,
    R: BufRead,
    W: Write,
{
    writeln!(screen.out(), "gitfind browse. Type /help for commands, /exit to quit.")?;
    writeln!(screen.out(), "{}", nav_line(state.criteria().preset, color))?;
    let request = state.load();
    fetch_and_render(&mut state, backend, screen, &request)?;

    let mut lines = input.lines();
    loop {
        write!(
            screen.out(),
            "gitfind [{} · {} · page {}]> ",
            state.criteria().preset,
            state.criteria().sort,
            state.page()
        )?;
        screen.out().flush()?;

        let Some(line) = lines.next() else { break };
        let Some(action) = parse_action(&line?) else { continue };

        let request = match action {
            Action::Search(text) => Some(state.submit(&text)),
            Action::Next => {
                screen.scroll_to_top()?;
                Some(state.next_page())
            }
            Action::Prev => match state.prev_page() {
                Some(request) => {
                    screen.scroll_to_top()?;
                    Some(request)
                }
                None => None,
            },
            Action::Filter(preset) => {
                let request = state.set_preset(preset);
                writeln!(screen.out(), "{}", nav_line(preset, color))?;
                Some(request)
            }
            Action::Sort(sort) => Some(state.set_sort(sort)),
            Action::Lang(lang) => Some(state.set_language(&lang)),
            Action::Status => {
                writeln!(
                    screen.out(),
                    "query {:?}, page {}",
                    state.last_query(),
                    state.page()
                )?;
                None
            }
            Action::Clear => {
                screen.scroll_to_top()?;
                None
            }
            Action::Help => {
                print_help(screen.out())?;
                None
            }
            Action::Exit => break,
            Action::Usage(msg) => {
                writeln!(screen.out(), "{}", msg)?;
                None
            }
        };

        if let Some(request) = request {
            fetch_and_render(&mut state, backend, screen, &request)?;
        }
    }

    writeln!(screen.out())?;
    Ok(state)
}

pub fn browse_command(filters: FilterArgs, config: &GitFindConfig, token: Option<String>) -> Result<()> {
    let client = GitHubClient::new(&config.api_base, &config.user_agent, token)?;
    let state = SearchState::new(filters.criteria(config, ""), config.per_page);
    let color = filters.use_color(config);

    let stdout = io::stdout();
    let live = stdout.is_terminal();
    let mut screen = Screen::new(stdout.lock(), color, live);
    run_session(&client, state, io::stdin().lock(), &mut screen, color)?;
    Ok(())
}
