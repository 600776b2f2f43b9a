//! Terminal shim and entry point.
//!
//! Reads one command per line from stdin, translates it into a library
//! [`Event`], and redraws the frame whenever the state changed. Fetch results
//! arrive concurrently and are dispatched as they complete.
//!
//! # Commands
//!
//! - `n` / `p`: next / previous page
//! - `r`: reload the current page
//! - `l` / `f`: list view / favorites view
//! - `j` / `k`: move the cursor down / up
//! - `o` or empty line: open the card under the cursor
//! - `*`: toggle favorite on the card under the cursor (or the detail subject)
//! - `b`: back from the detail view
//! - `/term`: search by name (`/` alone clears the search)
//! - `ability <v>`, `type <v>`, `species <v>`: set a filter (no value clears it)
//! - `order <name-asc|name-desc|id-asc|id-desc>`: set the sort order
//! - `clear`: clear search and filters
//! - `q`: quit

#![allow(clippy::multiple_crate_versions)]

use dexview::catalog::{FilterField, SortOrder};
use dexview::{Config, Event, Host};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_COLS: usize = 80;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config_path = dexview::infrastructure::config_dir().join("config.toml");
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("dexview: ignoring {}: {e}", config_path.display());
            Config::default()
        }
    };

    let provider = dexview::observability::init_tracing(&config);

    match dexview::initialize(&config) {
        Ok(host) => run(host).await,
        Err(e) => eprintln!("dexview: {e}"),
    }

    if let Some(provider) = provider {
        let _ = provider.shutdown();
    }
}

async fn run(mut host: Host) {
    let cols = std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse().ok())
        .unwrap_or(DEFAULT_COLS);

    if let Err(e) = host.dispatch(&Event::Start) {
        tracing::error!(error = %e, "start failed");
    }
    draw(&host, cols);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while host.is_running() {
        let changed = tokio::select! {
            line = lines.next_line() => {
                let Ok(Some(line)) = line else { break };
                let Some(event) = parse_command(&line) else {
                    tracing::debug!(input = %line, "unrecognized command");
                    continue;
                };
                host.dispatch(&event)
            }
            changed = host.pump() => changed,
        };

        match changed {
            Ok(true) if host.is_running() => draw(&host, cols),
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "event handling failed"),
        }
    }
}

fn draw(host: &Host, cols: usize) {
    let frame = host.render(cols);
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "\u{1b}[2J\u{1b}[H{frame}> ");
    let _ = stdout.flush();
}

/// Maps one input line to an event.
fn parse_command(line: &str) -> Option<Event> {
    let line = line.trim();

    if let Some(term) = line.strip_prefix('/') {
        return Some(Event::SetSearch(term.trim().to_string()));
    }

    let (command, argument) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(c, a)| (c, a.trim()));

    let event = match command {
        "n" => Event::NextPage,
        "p" => Event::PrevPage,
        "r" => Event::ReloadPage,
        "l" => Event::ShowList,
        "f" => Event::ShowFavorites,
        "j" => Event::CursorDown,
        "k" => Event::CursorUp,
        "o" | "" => Event::OpenSelected,
        "*" => Event::ToggleSelectedFavorite,
        "b" => Event::Back,
        "clear" => Event::ClearFilters,
        "q" => Event::Quit,
        "order" => Event::SetOrder(argument.parse::<SortOrder>().ok()?),
        other => Event::SetFilter {
            field: other.parse::<FilterField>().ok()?,
            value: argument.to_string(),
        },
    };
    Some(event)
}
