//! Output formatting utilities

use std::sync::Mutex;
use std::time::Duration;

use chrono::NaiveDate;
use colored::{ColoredString, Colorize};
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};

use factline_core::{News, ProgressSink};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format a report date for display, e.g. "Tue August 15, 2023"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a %B %-d, %Y").to_string()
}

/// Format a history timestamp (unix milliseconds) as local wall time
pub fn format_timestamp(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Plain classification label for table cells
pub fn standing(news: &News) -> &'static str {
    if news.is_fake() {
        "fake"
    } else if news.is_trusted() {
        "trusted"
    } else {
        "contested"
    }
}

/// Colored classification badge for prose lines
pub fn standing_badge(news: &News) -> ColoredString {
    if news.is_fake() {
        "fake".red()
    } else if news.is_trusted() {
        "trusted".green()
    } else {
        "contested".yellow()
    }
}

/// Vote tally line such as "3 Real / 1 Fake"
pub fn tally(news: &News) -> String {
    let tally = news.vote_tally();
    format!("{} Real / {} Fake", tally.real, tally.fake)
}

/// Spinner shown on stderr while a navigation stages its data
pub struct NavSpinner {
    bar: Mutex<Option<ProgressBar>>,
}

impl NavSpinner {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }
}

impl Default for NavSpinner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for NavSpinner {
    fn start(&self) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message("loading");
        bar.enable_steady_tick(Duration::from_millis(80));
        *self.bar.lock().unwrap_or_else(|e| e.into_inner()) = Some(bar);
    }

    fn done(&self) {
        if let Some(bar) = self.bar.lock().unwrap_or_else(|e| e.into_inner()).take() {
            bar.finish_and_clear();
        }
    }
}
