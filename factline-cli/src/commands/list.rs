//! List command - browse news filtered by crowd standing

use anyhow::{bail, Result};
use colored::Colorize;

use factline_core::navigation::{NavOutcome, Route};
use factline_core::ListingFilter;

use super::{get_context, log_command, require_login};
use crate::output;

pub async fn run(filter: &str, limit: Option<u32>, page: Option<u32>, json: bool) -> Result<()> {
    let Some(listing) = ListingFilter::parse(filter) else {
        bail!("Unknown filter '{filter}'. Use one of: all, trusted, fake, unvoted.");
    };

    let ctx = get_context()?;

    match ctx.navigator.navigate(Route::Listing { filter: listing }).await {
        NavOutcome::Redirected(Route::Login) => require_login(),
        NavOutcome::Redirected(Route::NetworkError) => {
            output::error("Could not reach the news service");
            std::process::exit(1);
        }
        _ => {}
    }

    // Explicit pagination bypasses the prefetched page.
    if limit.is_some() || page.is_some() {
        let items = ctx.gateway.get_news(limit, page).await?;
        ctx.news_filter.set_news(items);
    }

    let items = ctx.news_filter.filtered_news();
    let counts = ctx.news_filter.counts();

    log_command(&ctx, "list");

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        output::info("No news to show");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Topic", "Reporter", "Reported", "Votes", "Standing"]);
    for news in &items {
        table.add_row(vec![
            news.id.to_string(),
            news.topic.clone(),
            news.reporter.clone(),
            output::format_date(news.report_date),
            output::tally(news),
            output::standing(news).to_string(),
        ]);
    }
    println!("{}", table);

    println!(
        "{} total · {} trusted · {} fake",
        counts.all.to_string().bold(),
        counts.trusted.to_string().green(),
        counts.fake.to_string().red(),
    );

    Ok(())
}
