//! Terminal front end for rental search.
//!
//! Reads one command per line from stdin and re-renders the result view on
//! every session state change:
//!
//! ```text
//! set <location|minPrice|maxPrice|minCapacity> [value]
//! search | next | prev | page <n> | show | quit
//! ```
//!
//! `--demo` searches a small in-memory catalogue instead of Postgres.

use std::sync::Arc;

use bigdecimal::BigDecimal;
use booking_marketplace::{
    features::{
        rentals::models::Rental,
        search::{
            executor::SearchExecutor,
            filter::FilterField,
            memory::InMemoryListingStore,
            repository::PgListingStore,
            session::SearchSession,
            store::ListingStore,
            view::{PageChangeIntent, ResultView, render},
        },
    },
    services::database::Database,
    utilities::config::Config,
};
use chrono::{Duration, Utc};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use uuid::Uuid;

enum Command {
    Set(FilterField, String),
    Search,
    Next,
    Prev,
    Page(i64),
    Show,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("empty command".to_string());
    };

    match verb.to_lowercase().as_str() {
        "set" => {
            let field = words
                .next()
                .ok_or("usage: set <field> [value]")?
                .parse::<FilterField>()
                .map_err(|e| e.to_string())?;
            let value = words.collect::<Vec<_>>().join(" ");
            Ok(Command::Set(field, value))
        }
        "search" => Ok(Command::Search),
        "next" => Ok(Command::Next),
        "prev" => Ok(Command::Prev),
        "page" => words
            .next()
            .and_then(|n| n.parse().ok())
            .map(Command::Page)
            .ok_or_else(|| "usage: page <n>".to_string()),
        "show" => Ok(Command::Show),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command {other:?}")),
    }
}

fn demo_rentals() -> Vec<Rental> {
    let places = [
        ("Lakeside Cabin", "Lake Tahoe", 180, 4),
        ("Fjord Lodge", "Bergen", 240, 6),
        ("River Hut", "Riverbend", 90, 2),
        ("Glacier View", "Ushuaia", 210, 5),
        ("Pier House", "Seaside", 130, 3),
        ("Northern Lake Loft", "Lake Geneva", 160, 2),
        ("Salmon Camp", "Kenai River", 300, 8),
        ("Bay Cottage", "Seaside", 110, 4),
        ("Pine Retreat", "Lake Placid", 150, 5),
        ("Harbour Rooms", "Bergen", 95, 2),
        ("Delta Shack", "Riverbend", 70, 3),
        ("Trout Lodge", "Lake Tahoe", 260, 10),
    ];

    places
        .into_iter()
        .enumerate()
        .map(|(i, (title, location, price, capacity))| Rental {
            id: Uuid::new_v4(),
            title: title.to_string(),
            location: location.to_string(),
            price_per_night: BigDecimal::from(price),
            capacity,
            amenities: ["wifi", "kitchen", "parking", "boat dock", "sauna"]
                .iter()
                .take(i % 5 + 1)
                .map(|a| a.to_string())
                .collect(),
            created_at: Utc::now() - Duration::hours(i as i64),
            ..Default::default()
        })
        .collect()
}

fn print_view(view: &ResultView) {
    if *view != ResultView::Hidden {
        println!("{view}");
    }
}

fn spawn_page_change(session: &Arc<SearchSession>, intent: Option<PageChangeIntent>) {
    let Some(intent) = intent else {
        println!("no page in that direction");
        return;
    };
    let session = session.clone();
    tokio::spawn(async move {
        if let Err(e) = session.on_page_change_requested(intent.target_page).await {
            println!("{e}");
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::init().await?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.tracing_level.as_str()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let store: Arc<dyn ListingStore> = if std::env::args().any(|arg| arg == "--demo") {
        info!("searching the demo catalogue");
        Arc::new(InMemoryListingStore::new(demo_rentals()))
    } else {
        let database = Database::init(&config).await?;
        Arc::new(PgListingStore::new(database.pool))
    };

    let session = Arc::new(SearchSession::new(SearchExecutor::new(
        store,
        config.search_timeout(),
    )));

    let mut updates = session.subscribe();
    let renderer = tokio::spawn(async move {
        let mut last = ResultView::Hidden;
        while updates.changed().await.is_ok() {
            let view = render(&updates.borrow_and_update());
            if view != last {
                print_view(&view);
                last = view;
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };

        match command {
            Command::Set(field, value) => session.on_filter_field_change(field, &value),
            Command::Search => {
                let session = session.clone();
                tokio::spawn(async move {
                    if let Err(e) = session.on_search_triggered().await {
                        println!("{e}");
                    }
                });
            }
            Command::Next | Command::Prev => {
                let intent = match render(&session.snapshot()) {
                    ResultView::Results { pagination, .. } => match command {
                        Command::Next => pagination.next(),
                        _ => pagination.previous(),
                    },
                    _ => None,
                };
                spawn_page_change(&session, intent);
            }
            Command::Page(target_page) => {
                spawn_page_change(&session, Some(PageChangeIntent { target_page }));
            }
            Command::Show => {
                let state = session.snapshot();
                println!("{}", serde_json::to_string_pretty(&state.criteria)?);
                print_view(&render(&state));
            }
            Command::Quit => break,
        }
    }

    renderer.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_joins_the_remaining_words() {
        let Ok(Command::Set(field, value)) = parse_command("set location Lake Tahoe") else {
            panic!("expected a set command");
        };
        assert_eq!(field, FilterField::Location);
        assert_eq!(value, "Lake Tahoe");
    }

    #[test]
    fn rejects_unknown_commands_and_fields() {
        assert!(parse_command("book now").is_err());
        assert!(parse_command("set rooms 3").is_err());
        assert!(parse_command("page two").is_err());
        assert!(matches!(parse_command("page 2"), Ok(Command::Page(2))));
    }
}
