//! Whoami command - show the logged-in profile

use anyhow::Result;
use colored::Colorize;

use factline_core::Role;

use super::get_context;
use crate::output;

pub fn role_label(role: &Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::Member => "member",
        Role::Reader => "reader",
    }
}

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;

    let user = match ctx.session.current_user() {
        Some(user) => user,
        None => {
            output::warning("Not logged in");
            println!("Run 'fl login' to authenticate.");
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    let roles: Vec<&str> = user.roles.iter().map(role_label).collect();

    println!("{}", user.full_name().bold());

    let mut table = output::create_table();
    table.add_row(vec!["Email", &user.email]);
    table.add_row(vec!["Roles", &roles.join(", ")]);
    if !user.image.is_empty() {
        table.add_row(vec!["Avatar", &user.image]);
    }
    println!("{}", table);

    Ok(())
}
