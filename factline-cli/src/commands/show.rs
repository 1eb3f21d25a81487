//! Show command - full detail view of one news item

use anyhow::Result;
use colored::Colorize;

use factline_core::navigation::{NavOutcome, Route};

use super::{get_context, log_command};
use crate::output;

pub async fn run(id: i64, json: bool) -> Result<()> {
    let ctx = get_context()?;

    match ctx.navigator.navigate(Route::NewsDetail { id }).await {
        NavOutcome::Redirected(Route::NotFoundResource { .. }) => {
            output::error(&format!("News {id} not found"));
            std::process::exit(1);
        }
        NavOutcome::Redirected(Route::NetworkError) => {
            output::error("Could not reach the news service");
            std::process::exit(1);
        }
        _ => {}
    }

    let Some(news) = ctx.current_news.news() else {
        output::error(&format!("News {id} not found"));
        std::process::exit(1);
    };

    log_command(&ctx, "show");

    if json {
        println!("{}", serde_json::to_string_pretty(&news)?);
        return Ok(());
    }

    println!("{}  {}", news.topic.bold(), output::standing_badge(&news));
    println!(
        "{} · reported by {} on {}",
        format!("#{}", news.id).dimmed(),
        news.reporter,
        output::format_date(news.report_date),
    );
    println!();
    println!("{}", news.short_detail);
    if !news.full_detail.is_empty() {
        println!();
        println!("{}", news.full_detail);
    }

    if !news.image_url.is_empty() {
        println!();
        println!("{}", "Images".bold());
        for url in &news.image_url {
            println!("  {}", url);
        }
    }

    println!();
    if news.comments.is_empty() {
        output::info("No votes yet");
    } else {
        println!("{} ({})", "Votes".bold(), output::tally(&news));
        let mut table = output::create_table();
        table.set_header(vec!["#", "Author", "Vote", "Comment"]);
        for (i, comment) in news.comments.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                comment.user.display_name(),
                comment.vote.as_str().to_string(),
                comment.comment.clone(),
            ]);
        }
        println!("{}", table);
    }

    Ok(())
}
