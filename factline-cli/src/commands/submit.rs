//! Submit command - report a news item

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use dialoguer::Input;

use factline_core::navigation::{NavOutcome, Route};
use factline_core::{Error, NewsDraft};

use super::{get_context, log_command, require_login};
use crate::output;

pub async fn run(
    topic: Option<String>,
    short: Option<String>,
    full: Option<String>,
    reporter: Option<String>,
    date: Option<String>,
    image: Vec<String>,
) -> Result<()> {
    let ctx = get_context()?;

    if let NavOutcome::Redirected(Route::Login) = ctx.navigator.navigate(Route::SubmitNews).await {
        require_login();
    }

    let topic = match topic {
        Some(topic) => topic,
        None => Input::new().with_prompt("Topic").interact_text()?,
    };
    let short = match short {
        Some(short) => short,
        None => Input::new().with_prompt("Short detail").interact_text()?,
    };
    let full = match full {
        Some(full) => full,
        None => Input::new().with_prompt("Full detail").interact_text()?,
    };

    let reporter = match reporter.or_else(|| ctx.session.current_user().map(|u| u.full_name())) {
        Some(reporter) => reporter,
        None => Input::new().with_prompt("Reporter").interact_text()?,
    };

    let report_date = match date {
        Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .context("date must be YYYY-MM-DD")?,
        None => Utc::now().date_naive(),
    };

    let draft = NewsDraft {
        topic,
        short_detail: short,
        full_detail: full,
        reporter,
        report_date,
        image_url: image,
    };

    let saved = match ctx.gateway.save_news(&draft).await {
        Ok(saved) => saved,
        Err(Error::Validation(msg)) => {
            output::error(&msg);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    log_command(&ctx, "submit");

    output::success(&format!("Submitted news {}: {}", saved.id, saved.topic));
    Ok(())
}
