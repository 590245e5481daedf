use clap::{Parser, Subcommand};

use gelateria_app::{config::LoggingSettings, observability};

mod demo;
mod menu;

#[derive(Debug, Parser)]
#[command(name = "gelateria", about = "Gelateria Pastel storefront demo", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingSettings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the menu
    Menu(menu::MenuArgs),

    /// Run a scripted storefront session end to end
    Demo(demo::DemoArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_subscriber(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Menu(args) => menu::run(&args),
            Commands::Demo(args) => demo::run(args).await,
        }
    }
}
