//! Vote command - cast a Real or Fake verdict with a comment

use anyhow::{bail, Result};
use dialoguer::Input;

use factline_core::navigation::{NavOutcome, Route};
use factline_core::{CommentAuthor, CommentDraft, Error, Vote};

use super::{get_context, log_command};
use crate::output;

pub async fn run(
    id: i64,
    real: bool,
    fake: bool,
    comment: Option<String>,
    image: Vec<String>,
    name: Option<String>,
) -> Result<()> {
    let vote = match (real, fake) {
        (true, false) => Vote::Real,
        (false, true) => Vote::Fake,
        _ => bail!("Specify --real or --fake."),
    };

    let ctx = get_context()?;

    match ctx.navigator.navigate(Route::NewsVote { id }).await {
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

    let text = match comment {
        Some(text) => text,
        None => Input::new().with_prompt("Comment").interact_text()?,
    };

    let author = match name {
        Some(name) => CommentAuthor::Name(name),
        None => match ctx.session.current_user() {
            Some(user) => CommentAuthor::User {
                id: user.id,
                firstname: user.firstname,
                lastname: user.lastname,
            },
            None => {
                let name: String = Input::new().with_prompt("Your name").interact_text()?;
                CommentAuthor::Name(name)
            }
        },
    };

    let draft = CommentDraft {
        user: author,
        vote,
        comment: text,
        image_url: image,
    };

    let saved = match ctx.gateway.save_comment(id, &draft).await {
        Ok(saved) => saved,
        Err(Error::Validation(msg)) => {
            output::error(&msg);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    ctx.current_news.add_comment(saved);
    log_command(&ctx, "vote");

    output::success(&format!("Voted {} on news {id}", vote.as_str()));
    if let Some(news) = ctx.current_news.news() {
        println!(
            "Now {} ({})",
            output::standing_badge(&news),
            output::tally(&news)
        );
    }

    Ok(())
}
