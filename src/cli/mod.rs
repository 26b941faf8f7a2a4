//! Command-line interface: the server entry point plus fixture administration.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Betpool - football score prediction pool
#[derive(Parser)]
#[command(name = "betpool")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path (overrides the default search locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Manage teams
    Team {
        #[command(subcommand)]
        command: TeamCommands,
    },

    /// Manage match types (group stage, final, ...)
    MatchType {
        #[command(subcommand)]
        command: MatchTypeCommands,
    },

    /// Schedule matches and record results
    Match {
        #[command(subcommand)]
        command: MatchCommands,
    },

    /// Print the current standings
    #[command(alias = "lb")]
    Leaderboard,
}

#[derive(Subcommand)]
pub enum TeamCommands {
    /// Add a team
    Add {
        /// Display name, e.g. "Germany"
        name: String,
        /// Short code, e.g. "GER"
        code: String,
    },
    /// List all teams
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand)]
pub enum MatchTypeCommands {
    /// Add a match type
    Add {
        /// Short code, e.g. "GS"
        code: String,
        /// Display name, e.g. "Group stage"
        name: String,
    },
    /// List all match types
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand)]
pub enum MatchCommands {
    /// Schedule a match
    Add {
        /// Kickoff, RFC 3339 or "YYYY-MM-DD HH:MM" in UTC
        kickoff: String,
        /// Home team ID
        home: i32,
        /// Away team ID
        away: i32,
        /// Match type ID
        #[arg(long = "type")]
        match_type: i32,
    },
    /// Record the final score of a match
    Result {
        /// Match ID
        id: i32,
        goals_home: i32,
        goals_away: i32,
    },
    /// List matches by kickoff
    #[command(alias = "ls")]
    List {
        /// Only matches that have not kicked off
        #[arg(long, conflicts_with = "played")]
        upcoming: bool,
        /// Only matches with a recorded result
        #[arg(long)]
        played: bool,
    },
}

pub use commands::*;
