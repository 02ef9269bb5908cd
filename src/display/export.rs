use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::table::MatchRow;
use crate::error::AppError;

const TEXT_DIR: &str = "full";
const TABLE_DIR: &str = "table";

fn ansi_pattern() -> &'static Regex {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    ANSI.get_or_init(|| Regex::new(r"\x1B[@-_][0-?]*[ -/]*[@-~]").expect("valid ANSI regex"))
}

fn non_word_pattern() -> &'static Regex {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    NON_WORD.get_or_init(|| Regex::new(r"\W+").expect("valid non-word regex"))
}

pub fn strip_ansi(text: &str) -> String {
    ansi_pattern().replace_all(text, "").into_owned()
}

/// File-name stem for a summoner name: runs of non-word characters become `_`.
pub fn safe_file_stem(name: &str) -> String {
    non_word_pattern().replace_all(name, "_").into_owned()
}

pub fn run_timestamp(now: DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// `<out>/full/<stem>_<ts>.txt` and `<out>/table/<stem>_<ts>.csv`.
pub struct ReportPaths {
    pub text: PathBuf,
    pub csv: PathBuf,
}

impl ReportPaths {
    pub fn new(out_dir: &Path, player_name: &str, timestamp: &str) -> Self {
        let stem = format!("{}_{}", safe_file_stem(player_name), timestamp);
        ReportPaths {
            text: out_dir.join(TEXT_DIR).join(format!("{}.txt", stem)),
            csv: out_dir.join(TABLE_DIR).join(format!("{}.csv", stem)),
        }
    }
}

/// Writes the console report as plain text.
pub fn write_text_report(path: &Path, report: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, strip_ansi(report))
        .map_err(AppError::Io)
        .with_context(|| format!("Failed to write text report {}", path.display()))
}

pub fn write_csv(path: &Path, rows: &[MatchRow]) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(AppError::Io)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}
