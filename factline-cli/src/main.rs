//! Factline CLI - crowd-moderated news in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{
    demo, history, list, login, open, register, remove, show, submit, users, vote, whoami,
};

/// Factline - crowd-moderated news in your terminal
#[derive(Parser)]
#[command(name = "fl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
        /// Account password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log out and clear the stored session
    Logout,

    /// Create a new account
    Register {
        #[arg(long)]
        firstname: Option<String>,
        #[arg(long)]
        lastname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Avatar image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Show the logged-in profile
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List news items
    List {
        /// Classification bucket: all, trusted, fake or unvoted
        #[arg(long, default_value = "all")]
        filter: String,
        /// Maximum number of items to fetch
        #[arg(long)]
        limit: Option<u32>,
        /// Page to fetch (starts at 1)
        #[arg(long)]
        page: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one news item with its comments
    Show {
        /// News id
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Vote Real or Fake on a news item
    Vote {
        /// News id
        id: i64,
        /// Vote that the item is real
        #[arg(long, conflicts_with = "fake")]
        real: bool,
        /// Vote that the item is fake
        #[arg(long)]
        fake: bool,
        /// Comment text (prompted when omitted)
        #[arg(long)]
        comment: Option<String>,
        /// Evidence image URLs
        #[arg(long)]
        image: Vec<String>,
        /// Display name to vote under instead of the logged-in profile
        #[arg(long)]
        name: Option<String>,
    },

    /// Submit a news item
    Submit {
        #[arg(long)]
        topic: Option<String>,
        /// One-line summary
        #[arg(long)]
        short: Option<String>,
        /// Full report text
        #[arg(long)]
        full: Option<String>,
        /// Reporter byline (defaults to the logged-in name)
        #[arg(long)]
        reporter: Option<String>,
        /// Report date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Image URLs
        #[arg(long)]
        image: Vec<String>,
    },

    /// Remove a news item or comment
    Remove {
        #[command(subcommand)]
        command: remove::RemoveCommands,
    },

    /// Manage users
    Users {
        #[command(subcommand)]
        command: users::UserCommands,
    },

    /// Show the local event history
    History {
        /// Number of entries to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Only error entries
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Clear the history
        #[arg(long)]
        clear: bool,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// Resolve an app path through the route guards
    Open {
        /// App path such as /news/trusted or /news/7
        path: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { email, password } => login::run(email, password).await,
        Commands::Logout => login::run_logout(),
        Commands::Register {
            firstname,
            lastname,
            email,
            image,
        } => register::run(firstname, lastname, email, image).await,
        Commands::Whoami { json } => whoami::run(json),
        Commands::List {
            filter,
            limit,
            page,
            json,
        } => list::run(&filter, limit, page, json).await,
        Commands::Show { id, json } => show::run(id, json).await,
        Commands::Vote {
            id,
            real,
            fake,
            comment,
            image,
            name,
        } => vote::run(id, real, fake, comment, image, name).await,
        Commands::Submit {
            topic,
            short,
            full,
            reporter,
            date,
            image,
        } => submit::run(topic, short, full, reporter, date, image).await,
        Commands::Remove { command } => remove::run(command).await,
        Commands::Users { command } => users::run(command).await,
        Commands::History {
            limit,
            errors,
            json,
            clear,
            force,
        } => history::run(limit, errors, json, clear, force).await,
        Commands::Demo { command } => demo::run(command),
        Commands::Open { path } => open::run(&path).await,
    }
}
