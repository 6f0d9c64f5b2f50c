use chrono::{DateTime, NaiveDateTime};

use crate::api::types::HighScoreEntry;

pub const HEADING: &str = "High Scores";

/// Display model of the high-score panel: a heading plus one line per entry,
/// in the order the server returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreBoard {
    pub heading: &'static str,
    pub lines: Vec<String>,
}

impl HighScoreBoard {
    pub fn from_entries(entries: &[HighScoreEntry]) -> Self {
        Self {
            heading: HEADING,
            lines: entries.iter().map(format_entry).collect(),
        }
    }
}

/// `"{username} - {score} ({date})"`
pub fn format_entry(entry: &HighScoreEntry) -> String {
    format!(
        "{} - {} ({})",
        entry.username,
        entry.score_text(),
        format_date(&entry.date)
    )
}

/// Render a server timestamp the way en-US `toLocaleString` does,
/// e.g. `3/7/2025, 4:05:09 PM`.
///
/// Accepts naive ISO-8601 (what the server writes) and RFC 3339. A naive
/// timestamp is shown as written, which is also how a browser treats one.
/// An RFC 3339 timestamp is shown in its own offset, not converted to the
/// viewer's zone. Anything else is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let parsed = raw
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()));
    match parsed {
        Some(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(username: &str, score: u32, date: &str) -> HighScoreEntry {
        HighScoreEntry {
            username: username.to_string(),
            score: score.into(),
            date: date.to_string(),
        }
    }

    #[test]
    fn formats_python_isoformat_with_micros() {
        assert_eq!(format_date("2025-03-07T16:05:09.123456"), "3/7/2025, 4:05:09 PM");
        assert_eq!(format_date("2024-12-25T00:30:00"), "12/25/2024, 12:30:00 AM");
    }

    #[test]
    fn formats_rfc3339() {
        assert_eq!(format_date("2025-01-02T09:08:07Z"), "1/2/2025, 9:08:07 AM");
    }

    #[test]
    fn rfc3339_keeps_its_own_offset() {
        assert_eq!(format_date("2025-01-02T21:08:07+05:30"), "1/2/2025, 9:08:07 PM");
        assert_eq!(format_date("2025-01-02T21:08:07-08:00"), "1/2/2025, 9:08:07 PM");
    }

    #[test]
    fn fractional_score_prints_like_a_browser() {
        let row = HighScoreEntry {
            username: "ann".into(),
            score: serde_json::json!(3.0),
            date: "2025-03-07T16:05:09".into(),
        };
        assert_eq!(format_entry(&row), "ann - 3 (3/7/2025, 4:05:09 PM)");
    }

    #[test]
    fn unparseable_date_is_kept() {
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn board_keeps_server_order() {
        let board = HighScoreBoard::from_entries(&[
            entry("low", 1, "2025-03-07T16:05:09"),
            entry("high", 5, "2025-03-07T16:05:09"),
        ]);
        assert_eq!(board.heading, "High Scores");
        assert_eq!(
            board.lines,
            vec![
                "low - 1 (3/7/2025, 4:05:09 PM)".to_string(),
                "high - 5 (3/7/2025, 4:05:09 PM)".to_string(),
            ]
        );
    }

    #[test]
    fn empty_board_has_heading_only() {
        let board = HighScoreBoard::from_entries(&[]);
        assert!(board.lines.is_empty());
        assert_eq!(board.heading, HEADING);
    }
}
