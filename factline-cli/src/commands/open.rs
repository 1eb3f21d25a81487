//! Open command - resolve an app path through the route guards

use anyhow::Result;

use factline_core::navigation::{NavOutcome, Route};
use factline_core::FactlineContext;

use super::{get_context, log_command};
use crate::output;

pub async fn run(path: &str) -> Result<()> {
    let ctx = get_context()?;
    let route = Route::parse(path);

    match ctx.navigator.navigate(route).await {
        NavOutcome::Entered(route) => {
            output::success(&format!("Entered {}", route.path()));
            summarize(&ctx, &route);
        }
        NavOutcome::Redirected(route) => {
            output::warning(&format!("Redirected to {}", route.path()));
            summarize(&ctx, &route);
        }
        NavOutcome::Superseded => {
            output::info("Navigation superseded");
        }
    }

    log_command(&ctx, "open");
    Ok(())
}

fn summarize(ctx: &FactlineContext, route: &Route) {
    match route {
        Route::Listing { .. } => {
            let counts = ctx.news_filter.counts();
            println!(
                "{} items staged · {} trusted · {} fake",
                counts.all, counts.trusted, counts.fake
            );
        }
        Route::NewsComment { .. } | Route::NewsVote { .. } => {
            if let Some(news) = ctx.current_news.news() {
                println!("Staged: {} ({})", news.topic, output::tally(&news));
            }
        }
        Route::Login => {
            println!("Log in with 'fl login'.");
        }
        _ => {}
    }
}
