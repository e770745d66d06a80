//! Roster parsing: free-form text lines and CSV sheets into players.

use crate::models::{Level, Player, TournamentError};
use std::io::Read;

/// Parse one entrant per line, `name [- tier]` or `name, tier`.
///
/// Blank lines and lines without a name are dropped. Players get ids `p-<n>` by position
/// among the kept lines.
pub fn parse_roster(text: &str) -> Vec<Player> {
    text.lines()
        .filter_map(parse_entry)
        .enumerate()
        .map(|(i, (name, level))| Player::new(i, name, level))
        .collect()
}

/// Split a line at its last separator when the suffix is a tier token (or empty);
/// otherwise the whole line is the name, so `Jean-Luc` stays intact.
fn parse_entry(line: &str) -> Option<(String, Level)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (name, level) = match line.rsplit_once(|c| c == '-' || c == ',') {
        Some((name, tier)) if tier.trim().is_empty() || Level::is_token(tier) => {
            (name.trim(), Level::parse(tier))
        }
        _ => (line, Level::None),
    };
    if name.is_empty() {
        None
    } else {
        Some((name.to_string(), level))
    }
}

/// Read a player sheet with a header row and columns `name, address, level`.
///
/// Rows without a name are skipped. Imported players get collision-resistant ids so they can be
/// merged into an existing player list.
pub fn parse_roster_csv<R: Read>(reader: R) -> Result<Vec<Player>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut players = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let name = record.get(0).unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        let address = record
            .get(1)
            .filter(|a| !a.is_empty())
            .map(str::to_string);
        let level = record.get(2).map(Level::parse).unwrap_or_default();
        players.push(Player::imported(name, address, level));
    }
    log::debug!("Parsed {} player(s) from CSV roster", players.len());
    Ok(players)
}

/// Format players back into roster lines (`name - tier`), e.g. to seed the roster text box.
pub fn roster_lines(players: &[Player]) -> String {
    players
        .iter()
        .map(|p| format!("{} - {}", p.name, p.level))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_with_tier() {
        assert_eq!(parse_entry("Minh - a"), Some(("Minh".to_string(), Level::A)));
        assert_eq!(parse_entry("Lan, B"), Some(("Lan".to_string(), Level::B)));
        assert_eq!(parse_entry("Hoa -"), Some(("Hoa".to_string(), Level::None)));
    }

    #[test]
    fn hyphenated_name_is_kept() {
        assert_eq!(
            parse_entry("Jean-Luc"),
            Some(("Jean-Luc".to_string(), Level::None))
        );
        assert_eq!(
            parse_entry("Jean-Luc - B"),
            Some(("Jean-Luc".to_string(), Level::B))
        );
    }

    #[test]
    fn blank_and_nameless_lines_dropped() {
        assert_eq!(parse_entry("   "), None);
        assert_eq!(parse_entry(" - A"), None);
    }
}
