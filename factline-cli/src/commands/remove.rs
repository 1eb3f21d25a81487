//! Remove command - delete a news item or comment

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;

use factline_core::Error;

use super::{get_context, log_command};
use crate::output;

#[derive(Subcommand)]
pub enum RemoveCommands {
    /// Delete a news item
    News {
        /// News id
        id: i64,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
    /// Delete a comment
    Comment {
        /// Comment id
        id: i64,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

pub async fn run(command: RemoveCommands) -> Result<()> {
    match command {
        RemoveCommands::News { id, force } => remove_news(id, force).await,
        RemoveCommands::Comment { id, force } => remove_comment(id, force).await,
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

async fn remove_news(id: i64, force: bool) -> Result<()> {
    if !force && !confirm(&format!("Delete news {id}?"))? {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    let ctx = get_context()?;
    match ctx.gateway.delete_news(id).await {
        Ok(()) => {
            log_command(&ctx, "remove news");
            output::success(&format!("Deleted news {id}"));
            Ok(())
        }
        Err(Error::NotFound(_)) => {
            output::error(&format!("News {id} not found"));
            std::process::exit(1);
        }
        Err(Error::Unauthorized(_)) => {
            output::error("Not authorized. Deleting news requires an admin login.");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

async fn remove_comment(id: i64, force: bool) -> Result<()> {
    if !force && !confirm(&format!("Delete comment {id}?"))? {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    let ctx = get_context()?;
    match ctx.gateway.delete_comment(id).await {
        Ok(()) => {
            log_command(&ctx, "remove comment");
            output::success(&format!("Deleted comment {id}"));
            Ok(())
        }
        Err(Error::NotFound(_)) => {
            output::error(&format!("Comment {id} not found"));
            std::process::exit(1);
        }
        Err(Error::Unauthorized(_)) => {
            output::error("Not authorized to delete this comment.");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
