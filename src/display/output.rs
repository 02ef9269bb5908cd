use crate::analysis::queue::queue_name;
use crate::analyzer::AnalysisReport;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

const BANNER: &str = r"
 ____              ____       _            _
|  _ \ _   _  ___ |  _ \  ___| |_ ___  ___| |_
| | | | | | |/ _ \| | | |/ _ \ __/ _ \/ __| __|
| |_| | |_| | (_) | |_| |  __/ ||  __/ (__| |_
|____/ \__,_|\___/|____/ \___|\__\___|\___|\__|
";

#[derive(Tabled)]
struct PartnerRow {
    partner: String,
    games: String,
    wins: String,
    win_rate: String,
}

#[derive(Tabled)]
struct ChampionRow {
    champion: String,
    games: String,
    win_rate: String,
    kda: String,
}

#[derive(Tabled)]
struct LaneRow {
    lane: String,
    games: String,
    win_rate: String,
}

pub fn display_banner() {
    println!("{}", BANNER.magenta());
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

/// Plain-text summary block for one analysis; may contain color codes.
pub fn render_summary(report: &AnalysisReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "===== ANALYSIS RESULTS =====".cyan()));
    out.push_str(&format!("Player: {}\n", report.display_name));
    out.push_str(&format!("Matches requested: {}\n", report.requested));
    out.push_str(&format!("Matches retrieved: {}\n", report.fetched));
    out.push_str(&format!("Ranked Solo/Duo Matches (Queue 420): {}\n\n", summary.total_ranked));

    out.push_str(&format!("{}\n", "Solo Queue:".cyan()));
    out.push_str(&format!("  Games: {}\n", summary.solo_games));
    out.push_str(&format!(
        "  Wins: {}/{} ({:.1}% winrate)\n",
        summary.solo_wins,
        summary.solo_games,
        summary.solo_win_rate()
    ));

    out.push_str(&format!("\n{}\n", "Duo Queue:".cyan()));
    out.push_str(&format!("  Games (where a duo partner was identified): {}\n", summary.duo_games));
    match summary.duo_win_rate() {
        Some(rate) => {
            out.push_str(&format!(
                "  Wins: {}/{} ({:.1}% winrate)\n",
                summary.duo_wins, summary.duo_games, rate
            ));
        }
        None => {
            out.push_str("  Not enough Duo Queue games for winrate calculation (minimum 3 required)\n");
        }
    }

    if !summary.partners.is_empty() {
        let mut partners: Vec<_> = summary.partners.iter().collect();
        partners.sort_by(|a, b| b.1.games.cmp(&a.1.games).then_with(|| a.0.cmp(b.0)));
        let rows: Vec<PartnerRow> = partners
            .into_iter()
            .map(|(name, record)| PartnerRow {
                partner: name.clone(),
                games: record.games.to_string(),
                wins: record.wins.to_string(),
                win_rate: format!("{:.1}%", record.win_ratio()),
            })
            .collect();
        out.push_str(&format!("\n{}\n", "Duo Partners:".cyan()));
        out.push_str(&format!("{}\n", rounded(Table::new(rows))));
    }

    out.push_str(&format!("\n{}\n", "Game Mode Distribution:".cyan()));
    for (queue_id, count) in &report.modes {
        out.push_str(&format!("  {}: {} games\n", queue_name(*queue_id), count));
    }

    out.push_str(&format!("\n{}\n", "Champion Stats:".cyan()));
    if report.champions.is_empty() {
        out.push_str(&format!("  {}\n", "No ranked champion data".yellow()));
    } else {
        let rows: Vec<ChampionRow> = report
            .champions
            .iter()
            .map(|c| ChampionRow {
                champion: c.name.clone(),
                games: c.games.to_string(),
                win_rate: format!("{:.1}%", c.win_rate()),
                kda: format!("{:.2}", c.kda()),
            })
            .collect();
        out.push_str(&format!("{}\n", rounded(Table::new(rows))));
    }

    out.push_str(&format!("\n{}\n", "Lane Performance:".cyan()));
    let rows: Vec<LaneRow> = report
        .lanes
        .iter()
        .map(|l| LaneRow {
            lane: l.lane.label().to_string(),
            games: l.games.to_string(),
            win_rate: format!("{:.1}%", l.win_rate()),
        })
        .collect();
    out.push_str(&format!("{}\n", rounded(Table::new(rows))));

    out
}

fn rounded(mut table: Table) -> String {
    table.with(Style::rounded());
    table.to_string()
}
