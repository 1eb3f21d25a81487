//! History command - inspect the local event log

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use factline_core::navigation::{NavOutcome, Route};

use super::{get_context, require_login};
use crate::output;

pub async fn run(limit: usize, errors: bool, json: bool, clear: bool, force: bool) -> Result<()> {
    let ctx = get_context()?;

    if let NavOutcome::Redirected(Route::Login) = ctx.navigator.navigate(Route::History).await {
        require_login();
    }

    if clear {
        if !force {
            let confirmed = Confirm::new()
                .with_prompt("Clear the entire history?")
                .default(false)
                .interact()?;
            if !confirmed {
                println!("{}", "Cancelled".dimmed());
                return Ok(());
            }
        }
        ctx.history.clear()?;
        output::success("History cleared");
        return Ok(());
    }

    let entries = if errors {
        ctx.history.get_errors(limit)?
    } else {
        ctx.history.get_recent(limit)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        output::info("No history entries");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Time", "Event", "Detail", "Error"]);
    for entry in &entries {
        let detail = entry
            .route
            .clone()
            .or_else(|| entry.command.clone())
            .unwrap_or_default();
        table.add_row(vec![
            output::format_timestamp(entry.timestamp),
            entry.event.clone(),
            detail,
            entry.error_message.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);

    println!(
        "{} of {} entries",
        entries.len(),
        ctx.history.count().unwrap_or(entries.len() as u64)
    );

    Ok(())
}
