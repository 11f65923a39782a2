use anyhow::Result;
use clap::{Parser, Subcommand};

mod client;
mod commands;
mod render;
mod session;
mod watch;

#[derive(Parser)]
#[command(name = "weekmeet")]
#[command(about = "Mark your weekly availability and see everyone's in one shared grid")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a profile or update your name and color
    Profile,
    /// Show who you are signed in as
    Whoami,
    /// Sign out on this machine, keeping your marks on the server
    Signout,
    /// Delete your profile and remove your marks from every week
    Delete,
    /// List everyone who has joined
    Roster,
    /// Print the availability grid for a week
    Show {
        /// Week to show, as a week key like 2026-08-16 (defaults to the current week)
        #[arg(short, long)]
        week: Option<String>,
    },
    /// Mark or clear a rectangle of slots, like `drag tue-3 wed-7`
    Drag {
        /// Starting cell, as DAY-TIME like tue-3
        from: String,
        /// Opposite corner (defaults to the starting cell)
        to: Option<String>,
        /// Week to mark, as a week key like 2026-08-16 (defaults to the current week)
        #[arg(short, long)]
        week: Option<String>,
    },
    /// List every week that has marks
    Weeks,
    /// Watch a week live, polling the server for everyone's changes
    Watch {
        /// Week to watch, as a week key like 2026-08-16 (defaults to the current week)
        #[arg(short, long)]
        week: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Profile => commands::profile::run().await,
        Commands::Whoami => commands::whoami::run(),
        Commands::Signout => commands::signout::run(),
        Commands::Delete => commands::delete::run().await,
        Commands::Roster => commands::roster::run().await,
        Commands::Show { week } => commands::show::run(week.as_deref()).await,
        Commands::Drag { from, to, week } => {
            commands::drag::run(&from, to.as_deref(), week.as_deref()).await
        }
        Commands::Weeks => commands::weeks::run().await,
        Commands::Watch { week } => watch::run(week.as_deref()).await,
    }
}
