use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "job-board", version, about = "Job listing API and browser UI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve {
        /// Keep jobs in process memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },
    /// Apply pending database migrations and exit
    Migrate,
}

impl Cli {
    pub fn command(&self) -> Command {
        match &self.command {
            Some(Command::Serve { in_memory }) => Command::Serve {
                in_memory: *in_memory,
            },
            Some(Command::Migrate) => Command::Migrate,
            None => Command::Serve { in_memory: false },
        }
    }
}
