//! Login and logout commands

use anyhow::Result;
use dialoguer::{Input, Password};

use factline_core::Error;

use super::{get_context, log_command};
use crate::output;

pub async fn run(email: Option<String>, password: Option<String>) -> Result<()> {
    let ctx = get_context()?;

    let email: String = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    match ctx.session.login(&email, &password).await {
        Ok(user) => {
            log_command(&ctx, "login");
            output::success(&format!("Logged in as {} <{}>", user.full_name(), user.email));
            Ok(())
        }
        Err(Error::Unauthorized(_)) => {
            output::error("Invalid email or password");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run_logout() -> Result<()> {
    let ctx = get_context()?;

    if !ctx.session.is_authenticated() {
        output::warning("Not logged in");
        return Ok(());
    }

    ctx.session.logout()?;
    log_command(&ctx, "logout");
    output::success("Logged out");
    Ok(())
}
