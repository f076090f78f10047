//! Response formatting: pure text construction plus the inline-vs-file
//! delivery decision.

use brewbot_store::bson::Document;
use brewbot_store::{display_value, TeamStats, TransactionEntry};

/// Longest text sent inline. Telegram rejects messages above 4096 characters,
/// so anything over this ceiling goes out as a file attachment instead.
pub const MAX_INLINE_CHARS: usize = 4000;

pub const WELCOME: &str = "Welcome to the Brewathon Bot! \u{1F9A5}\nUse the menu below to interact.";
pub const GREETING: &str = "Hello! Please use the menu buttons to interact.";
pub const FALLBACK: &str = "I did not understand that. Please use the menu buttons.";
pub const FIND_USAGE: &str = "Usage: /find team_name";
pub const FIND_PROMPT: &str = "To search for a team, type:\n/find team_name";
pub const FIND_FAILED: &str = "Unable to search for teams right now.";
pub const STATS_UNAVAILABLE: &str = "Unable to fetch statistics.";
pub const STORE_UNREACHABLE: &str =
    "The registration database is unreachable right now. Please try again later.";
pub const CSV_PROGRESS: &str = "Generating CSV...";
pub const CSV_CAPTION: &str = "Registrations file ready.";
pub const CSV_FAILED: &str = "Error creating CSV.";
pub const NO_TRANSACTIONS: &str = "No transactions found.";
pub const TRANSACTIONS_FAILED: &str = "Unable to fetch transactions.";
pub const OVERFLOW_CAPTION: &str = "List is too long, sending as file.";

/// Fixed two-line stats body under a header.
pub fn stats_message(stats: &TeamStats) -> String {
    format!(
        "Registration Stats\n\nTotal Teams: {}\nTotal Members: {}",
        stats.total_teams, stats.total_members
    )
}

/// Enumerates every field of the record except the internal identifier, one
/// per line, under a "Team Found" header.
pub fn team_details(team: &Document) -> String {
    let name = team.get_str("teamName").unwrap_or("Unknown");
    let mut msg = format!("Team Found: {name}\n\n");
    for (key, value) in team {
        if key != "_id" {
            msg.push_str(&format!("{key}: {}\n", display_value(value)));
        }
    }
    msg
}

pub fn not_found(name: &str) -> String {
    format!("No team found with name: {name}")
}

/// One "name: id" line per entry, newline-terminated.
pub fn transactions_list(entries: &[TransactionEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{}: {}\n", e.team_name, e.transaction_id))
        .collect()
}

/// How a rendered text goes out to the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Single text message.
    Inline,
    /// Written to a temp file and sent as a document attachment.
    AsFile,
}

impl Delivery {
    pub fn decide(text: &str) -> Self {
        if text.chars().count() > MAX_INLINE_CHARS {
            Delivery::AsFile
        } else {
            Delivery::Inline
        }
    }
}
