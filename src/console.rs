//! Line-oriented presenter: turns typed lines into intents and prints what
//! the backend sends back.

use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use marquee_bridge::{
    CatalogSnapshot, ItemDetails, MessageFromBackend, MessageToBackend,
    catalog::{CatalogItem, CategoryFilter},
};
use tokio::sync::mpsc::{Receiver, Sender};

const HELP: &str = "\
Type to search titles, synopses and genres. Commands:
  :category <all|now_playing|popular|top_rated|upcoming>
  :show <id>     details of one movie
  :refresh       pull-to-refresh
  :reload        fetch again with the first-load indicator
  :config        print the active configuration
  :clear         clear the search text
  :quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Send(ConsoleIntent),
    Help,
    Quit,
}

/// Intents that can be typed, mirroring [`MessageToBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleIntent {
    Fetch { refresh: bool },
    Category(CategoryFilter),
    Search(String),
    Show(u64),
    Config,
}

impl From<ConsoleIntent> for MessageToBackend {
    fn from(intent: ConsoleIntent) -> Self {
        match intent {
            ConsoleIntent::Fetch { refresh } => MessageToBackend::FetchCatalog { refresh },
            ConsoleIntent::Category(filter) => MessageToBackend::SetCategory(filter),
            ConsoleIntent::Search(text) => MessageToBackend::SetSearch(text),
            ConsoleIntent::Show(id) => MessageToBackend::ItemDetailsRequest(id),
            ConsoleIntent::Config => MessageToBackend::ConfigurationRequest,
        }
    }
}

/// Parses one input line. Lines not starting with `:` are search text.
pub fn parse_line(line: &str) -> anyhow::Result<ConsoleCommand> {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Ok(ConsoleCommand::Send(ConsoleIntent::Search(line.to_string())));
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };

    let intent = match name {
        "quit" | "q" => return Ok(ConsoleCommand::Quit),
        "help" | "h" => return Ok(ConsoleCommand::Help),
        "refresh" => ConsoleIntent::Fetch { refresh: true },
        "reload" => ConsoleIntent::Fetch { refresh: false },
        "config" => ConsoleIntent::Config,
        "clear" => ConsoleIntent::Search(String::new()),
        "category" | "c" => ConsoleIntent::Category(argument.parse()?),
        "show" => ConsoleIntent::Show(
            argument
                .parse()
                .with_context(|| format!("invalid movie id {argument:?}"))?,
        ),
        other => bail!("unknown command :{other}, type :help"),
    };
    Ok(ConsoleCommand::Send(intent))
}

fn format_item(item: &CatalogItem) -> String {
    let year = item.release_year();
    let genre = item.genres.first().map(String::as_str).unwrap_or("");
    match (year.is_empty(), genre.is_empty()) {
        (false, false) => format!("{:>8}  {} ({year}) · {genre}", item.id, item.title),
        (false, true) => format!("{:>8}  {} ({year})", item.id, item.title),
        (true, false) => format!("{:>8}  {} · {genre}", item.id, item.title),
        (true, true) => format!("{:>8}  {}", item.id, item.title),
    }
}

/// Renders a snapshot for the terminal.
pub fn format_snapshot(snapshot: &CatalogSnapshot) -> String {
    if snapshot.loading {
        return "Loading movies...".to_string();
    }
    if snapshot.refreshing {
        return "Refreshing...".to_string();
    }

    let mut out = String::new();
    if let Some(error) = &snapshot.error {
        out.push_str(&format!("! {error} (type :reload to try again)\n"));
    }

    let counts = snapshot
        .category_counts
        .iter()
        .map(|(category, count)| format!("{} {count}", category.label()))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(&format!(
        "[{}] search {:?} · {counts}\n",
        snapshot.active_category, snapshot.search_text
    ));

    if snapshot.visible_items.is_empty() {
        out.push_str("No movies found.");
        return out;
    }

    let noun = if snapshot.visible_items.len() == 1 { "movie" } else { "movies" };
    out.push_str(&format!("{} {noun}\n", snapshot.visible_items.len()));
    let lines = snapshot
        .visible_items
        .iter()
        .map(format_item)
        .collect::<Vec<_>>();
    out.push_str(&lines.join("\n"));
    out
}

fn format_details(details: &ItemDetails) -> String {
    let item = &details.item;
    let mut lines = vec![
        format!("{} ({})", item.title, item.release_year()),
        format!("Category: {}", item.category.label()),
    ];
    if let Some(rating) = &item.content_rating {
        lines.push(format!("Rated: {rating}"));
    }
    if !item.genres.is_empty() {
        lines.push(format!("Genres: {}", item.genres.join(", ")));
    }
    lines.push(item.overview.clone());
    lines.push(format!("Image: {}", details.hero_image));
    lines.push(format!("Trailer: {}", details.trailer_search_url));
    if let Some(store_url) = &item.store_url {
        lines.push(format!("Watch: {store_url}"));
    }
    lines.join("\n")
}

/// Prints backend messages until the backend side closes.
pub fn print_backend_messages(mut rx: Receiver<MessageFromBackend>) {
    while let Some(message) = rx.blocking_recv() {
        let text = match message {
            MessageFromBackend::SnapshotUpdate(snapshot) => format_snapshot(&snapshot),
            MessageFromBackend::ItemDetailsResponse(_, Some(details)) => format_details(&details),
            MessageFromBackend::ItemDetailsResponse(id, None) => format!("Movie {id} not found"),
            MessageFromBackend::ConfigurationResponse(config) => format!("{config:#?}"),
            MessageFromBackend::NotificationMessage(notification) => {
                format!("({:?}) {}", notification.notification_type, notification.message)
            }
        };
        println!("{text}");
    }
}

/// Reads commands from `input` and forwards them to the backend until
/// `:quit` or end of input.
pub fn read_commands(input: impl BufRead, tx: Sender<MessageToBackend>) -> anyhow::Result<()> {
    println!("{HELP}");
    for line in input.lines() {
        let line = line.context("failed to read from stdin")?;
        match parse_line(&line) {
            Ok(ConsoleCommand::Quit) => break,
            Ok(ConsoleCommand::Help) => println!("{HELP}"),
            Ok(ConsoleCommand::Send(intent)) => {
                tx.blocking_send(intent.into())
                    .context("backend stopped receiving intents")?;
            }
            Err(e) => println!("{e}"),
        }
        std::io::stdout().flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use marquee_bridge::catalog::Category;

    use super::*;

    #[test]
    fn plain_lines_are_search_text() {
        assert_eq!(
            parse_line("  star wars ").unwrap(),
            ConsoleCommand::Send(ConsoleIntent::Search("star wars".to_string()))
        );
    }

    #[test]
    fn commands_are_parsed() {
        assert_eq!(
            parse_line(":category top_rated").unwrap(),
            ConsoleCommand::Send(ConsoleIntent::Category(CategoryFilter::Only(
                Category::TopRated
            )))
        );
        assert_eq!(
            parse_line(":show 238").unwrap(),
            ConsoleCommand::Send(ConsoleIntent::Show(238))
        );
        assert_eq!(
            parse_line(":refresh").unwrap(),
            ConsoleCommand::Send(ConsoleIntent::Fetch { refresh: true })
        );
        assert_eq!(parse_line(":q").unwrap(), ConsoleCommand::Quit);
    }

    #[test]
    fn bad_arguments_are_errors() {
        assert!(parse_line(":category everything").is_err());
        assert!(parse_line(":show abc").is_err());
        assert!(parse_line(":dance").is_err());
    }

    #[test]
    fn empty_snapshot_says_so() {
        let snapshot = CatalogSnapshot {
            error: Some("Failed".to_string()),
            ..CatalogSnapshot::default()
        };
        let text = format_snapshot(&snapshot);
        assert!(text.starts_with("! Failed"));
        assert!(text.ends_with("No movies found."));
    }
}
