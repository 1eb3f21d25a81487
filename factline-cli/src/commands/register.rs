//! Register command - create a new account

use anyhow::Result;
use dialoguer::{Input, Password};

use factline_core::Registration;

use super::{get_context, log_command};
use crate::output;

pub async fn run(
    firstname: Option<String>,
    lastname: Option<String>,
    email: Option<String>,
    image: Option<String>,
) -> Result<()> {
    let ctx = get_context()?;

    let firstname: String = match firstname {
        Some(name) => name,
        None => Input::new().with_prompt("First name").interact_text()?,
    };
    let lastname: String = match lastname {
        Some(name) => name,
        None => Input::new().with_prompt("Last name").interact_text()?,
    };
    let email: String = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let registration = Registration {
        firstname,
        lastname,
        email,
        password,
        image: image.unwrap_or_default(),
    };

    ctx.session.register(&registration).await?;
    log_command(&ctx, "register");

    output::success(&format!("Account created for {}", registration.email));
    println!("Log in with 'fl login'.");
    Ok(())
}
