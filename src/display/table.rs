use chrono::{Local, TimeZone};
use colored::*;
use serde::Serialize;

use crate::analyzer::AnalysisReport;

/// One line of the match overview; also one CSV record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRow {
    #[serde(rename = "GameID")]
    pub game_id: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Result")]
    pub result: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Teammates")]
    pub teammates: String,
    #[serde(rename = "Playtime")]
    pub playtime: String,
}

pub const COLUMNS: [&str; 6] = ["GameID", "Date", "Result", "Type", "Teammates", "Playtime"];
const WIDTHS: [usize; 6] = [30, 10, 8, 25, 40, 10];

/// Rows for every ranked game in the report, newest first.
pub fn match_rows(report: &AnalysisReport) -> Vec<MatchRow> {
    report
        .games
        .iter()
        .map(|game| MatchRow {
            game_id: game.match_id.clone(),
            date: format_date(game.created_at),
            result: if game.won { "Win" } else { "Lose" }.to_string(),
            kind: report
                .kind_of(&game.match_id)
                .map(|k| k.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            teammates: game.teammates.join(", "),
            playtime: format_playtime(game.duration_secs),
        })
        .collect()
}

pub fn format_playtime(seconds: i64) -> String {
    if seconds <= 0 {
        return "N/A".to_string();
    }
    format!("{}m {}s", seconds / 60, seconds % 60)
}

fn format_date(epoch_millis: i64) -> String {
    Local
        .timestamp_millis_opt(epoch_millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Pads `s` to exactly `width` characters, cutting with `…` when too long.
pub fn pad_or_trim(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len > width {
        let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

fn rule(left: char, right: char) -> String {
    let inner: Vec<String> = WIDTHS.iter().map(|w| "─".repeat(*w)).collect();
    format!("{}{}{}", left, inner.join("┼"), right)
}

/// Box-drawn overview of `rows`. Results are green/red when `colored` is set.
pub fn render_match_table(rows: &[MatchRow], colored: bool) -> String {
    if rows.is_empty() {
        return "\nNo ranked matches found.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("\nMatch Overview:\n");
    out.push_str(&rule('┌', '┐'));
    out.push('\n');

    let header: Vec<String> = COLUMNS
        .iter()
        .zip(WIDTHS)
        .map(|(col, w)| pad_or_trim(col, w))
        .collect();
    out.push_str(&format!("│{}│\n", header.join("│")));
    out.push_str(&rule('├', '┤'));
    out.push('\n');

    for row in rows {
        let result = pad_or_trim(&row.result, WIDTHS[2]);
        let result = match (colored, row.result.as_str()) {
            (false, _) => result,
            (true, "Win") => result.green().to_string(),
            (true, _) => result.red().to_string(),
        };
        let cells = [
            pad_or_trim(&row.game_id, WIDTHS[0]),
            pad_or_trim(&row.date, WIDTHS[1]),
            result,
            pad_or_trim(&row.kind, WIDTHS[3]),
            pad_or_trim(&row.teammates, WIDTHS[4]),
            pad_or_trim(&row.playtime, WIDTHS[5]),
        ];
        out.push_str(&format!("│{}│\n", cells.join("│")));
    }

    out.push_str(&rule('└', '┘'));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, result: &str, kind: &str, mates: &str) -> MatchRow {
        MatchRow {
            game_id: id.to_string(),
            date: "2024-11-14".to_string(),
            result: result.to_string(),
            kind: kind.to_string(),
            teammates: mates.to_string(),
            playtime: "25m 0s".to_string(),
        }
    }

    #[test]
    fn playtime_formats_minutes_and_seconds() {
        assert_eq!(format_playtime(1865), "31m 5s");
        assert_eq!(format_playtime(59), "0m 59s");
        assert_eq!(format_playtime(0), "N/A");
    }

    #[test]
    fn long_values_are_cut_with_ellipsis() {
        assert_eq!(pad_or_trim("abc", 5), "abc  ");
        assert_eq!(pad_or_trim("abcdef", 5), "abcd…");
        assert_eq!(pad_or_trim("abcde", 5), "abcde");
        assert_eq!(pad_or_trim("ÄÖÜäöü", 4).chars().count(), 4);
    }

    #[test]
    fn table_lines_have_fixed_width() {
        let rows = vec![
            row("EUW1_1", "Win", "DuoQ: Alice", "Alice, Bob"),
            row("EUW1_2", "Lose", "SoloQ", &"x".repeat(80)),
        ];
        let table = render_match_table(&rows, false);
        let widths: Vec<usize> = table
            .lines()
            .filter(|l| l.starts_with(['┌', '│', '├', '└']))
            .map(|l| l.chars().count())
            .collect();
        assert_eq!(widths.len(), 6);
        let expected = WIDTHS.iter().sum::<usize>() + 7;
        assert!(widths.iter().all(|w| *w == expected));
        assert!(table.contains("DuoQ: Alice"));
        assert!(table.contains('…'));
    }

    #[test]
    fn empty_table_says_so() {
        assert!(render_match_table(&[], false).contains("No ranked matches found."));
    }
}
