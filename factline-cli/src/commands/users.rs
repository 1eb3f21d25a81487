//! Users command - admin user management

use anyhow::Result;
use clap::Subcommand;

use factline_core::navigation::{NavOutcome, Route};
use factline_core::Error;

use super::whoami::role_label;
use super::{get_context, log_command, require_login};
use crate::output;

#[derive(Subcommand)]
pub enum UserCommands {
    /// List all users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Grant the member role
    Promote {
        /// User id
        id: i64,
    },
    /// Revoke the member role
    Demote {
        /// User id
        id: i64,
    },
}

pub async fn run(command: UserCommands) -> Result<()> {
    match command {
        UserCommands::List { json } => list_users(json).await,
        UserCommands::Promote { id } => change_role(id, true).await,
        UserCommands::Demote { id } => change_role(id, false).await,
    }
}

async fn list_users(json: bool) -> Result<()> {
    let ctx = get_context()?;

    if let NavOutcome::Redirected(Route::Login) =
        ctx.navigator.navigate(Route::UserManagement).await
    {
        require_login();
    }

    let users = match ctx.gateway.get_all_users().await {
        Ok(users) => users,
        Err(Error::Unauthorized(_)) => {
            output::error("Not authorized. User management requires an admin login.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    log_command(&ctx, "users list");

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Name", "Email", "Roles"]);
    for user in &users {
        let roles: Vec<&str> = user.roles.iter().map(role_label).collect();
        table.add_row(vec![
            user.id.to_string(),
            user.full_name(),
            user.email.clone(),
            roles.join(", "),
        ]);
    }
    println!("{}", table);

    Ok(())
}

async fn change_role(id: i64, promote: bool) -> Result<()> {
    let ctx = get_context()?;

    if let NavOutcome::Redirected(Route::Login) =
        ctx.navigator.navigate(Route::UserManagement).await
    {
        require_login();
    }

    let result = if promote {
        ctx.gateway.promote_to_member(id).await
    } else {
        ctx.gateway.demote_to_reader(id).await
    };

    let user = match result {
        Ok(user) => user,
        Err(Error::NotFound(_)) => {
            output::error(&format!("User {id} not found"));
            std::process::exit(1);
        }
        Err(Error::Unauthorized(_)) => {
            output::error("Not authorized. User management requires an admin login.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    log_command(&ctx, if promote { "users promote" } else { "users demote" });

    let roles: Vec<&str> = user.roles.iter().map(role_label).collect();
    output::success(&format!("{} is now: {}", user.full_name(), roles.join(", ")));
    Ok(())
}
