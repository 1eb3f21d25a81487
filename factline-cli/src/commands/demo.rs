//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use factline_core::config::Config;

use super::get_factline_dir;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off,
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let factline_dir = get_factline_dir();
    std::fs::create_dir_all(&factline_dir)?;
    let mut config = Config::load(&factline_dir)?;

    match command {
        Some(DemoCommands::On) => {
            config.enable_demo_mode();
            config.save(&factline_dir)?;
            println!("{}", "Demo mode enabled".green());
            println!("Commands now run against a built-in sample newsroom.");
            println!(
                "Demo accounts (password 'factline'): admin@factline.dev, \
                 reporter@factline.dev, reader@factline.dev"
            );
            Ok(())
        }
        Some(DemoCommands::Off) => {
            config.disable_demo_mode();
            config.save(&factline_dir)?;
            println!("{}", "Demo mode disabled".yellow());
            Ok(())
        }
        Some(DemoCommands::Status) | None => {
            if config.demo_mode {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
            Ok(())
        }
    }
}
