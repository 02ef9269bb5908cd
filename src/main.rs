mod analysis;
mod analyzer;
mod api;
mod cache;
mod config;
mod display;
mod error;
mod logging;
mod prompt;
mod rate_limit;

use analyzer::Analyzer;
use anyhow::Result;
use chrono::Local;
use clap::Parser;
use config::Config;
use display::export::{run_timestamp, write_csv, write_text_report, ReportPaths};
use display::output::{
    display_banner, display_error, display_info, display_success, display_warning, render_summary,
};
use display::table::{match_rows, render_match_table};
use indicatif::ProgressBar;
use prompt::PlayerQuery;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "Duo Detect")]
#[command(about = "Split ranked Solo/Duo games into solo and duo queue by recurring teammates", long_about = None)]
struct Args {
    /// Riot Game Name (prompted for when omitted)
    name: Option<String>,

    /// Riot Tag (tag line)
    tag: Option<String>,

    /// Number of games to analyze (default: 500)
    games: Option<String>,

    /// Read settings from this file instead of .env
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Directory that receives the full/ and table/ reports
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Disable colored console output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let args = Args::parse();
    logging::init_logging();

    let config = match Config::from_env(args.env_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let colored = config.colored_console && !args.no_color;
    colored::control::set_override(colored);
    display_banner();

    if let (Some(name), Some(tag)) = (&args.name, &args.tag) {
        let query = PlayerQuery {
            name: name.clone(),
            tag: tag.clone(),
            games: args
                .games
                .as_deref()
                .map(prompt::parse_game_count)
                .unwrap_or(prompt::DEFAULT_GAME_COUNT),
        };
        if let Err(e) = run(&config, &query, &args.out_dir, colored) {
            display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
        return;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    loop {
        match prompt::ask_player(&mut input, &mut output) {
            Ok(query) => {
                let outcome =
                    panic::catch_unwind(AssertUnwindSafe(|| run(&config, &query, &args.out_dir, colored)));
                match outcome {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        tracing::error!(error = %format!("{:#}", e), "analysis could not be completed");
                        display_error(&format!("{:#}", e));
                        println!("Analysis could not be completed.");
                    }
                    Err(_) => {
                        tracing::error!("analysis panicked");
                        display_error("Unexpected failure during analysis");
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => {
                tracing::error!(error = %e, "error in user input");
                display_error(&format!("Error in user input: {}", e));
            }
        }

        if !prompt::ask_repeat(&mut input, &mut output) {
            break;
        }
    }
}

fn run(config: &Config, query: &PlayerQuery, out_dir: &Path, colored: bool) -> Result<()> {
    display_info(&format!(
        "Analyzing up to {} games for {}#{}...",
        query.games, query.name, query.tag
    ));
    tracing::info!(name = %query.name, tag = %query.tag, games = query.games, "starting analysis");

    let analyzer = Analyzer::new(config);

    // Steps 1-3: account, match ids, match details
    display_info("Processing match details (this may take a few minutes)...");
    let pb = ProgressBar::new(0);
    pb.set_message("Processing matches");
    let report = analyzer.analyze_player(&query.name, &query.tag, query.games, &pb)?;
    pb.finish_with_message("✓ Match data fetched");
    display_success(&format!("Account found: {} (PUUID: {})", report.display_name, report.puuid));
    display_success(&format!("Successfully retrieved {} match details", report.fetched));

    // Step 4: render
    let rows = match_rows(&report);

    let mut text = render_summary(&report);
    text.push_str("\nNote: If rate limits are reached, the retry mechanism will continue fetching data.\n");
    text.push_str(&render_match_table(&rows, colored));
    print!("{}", text);

    // Step 5: persist
    let paths = ReportPaths::new(out_dir, &query.name, &run_timestamp(Local::now()));
    match write_text_report(&paths.text, &text) {
        Ok(()) => {
            tracing::info!(path = %paths.text.display(), "analysis output saved");
            display_success(&format!("Analysis output saved to text file: {}", paths.text.display()));
        }
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "error saving text file");
            display_error(&format!("{:#}", e));
        }
    }

    if rows.is_empty() {
        tracing::warn!("no match table to save");
        display_warning("No match table found to save.");
    } else {
        write_csv(&paths.csv, &rows)?;
        tracing::info!(path = %paths.csv.display(), rows = rows.len(), "match table saved");
        display_success(&format!("Match table saved as CSV: {}", paths.csv.display()));
    }

    Ok(())
}
