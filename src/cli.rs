use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "squash match timing and player insights")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Point, game and match timings across a player's matches
    Timing {
        /// Player id
        #[arg(short, long)]
        player: i64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Timing detail of a single match
    MatchDetail {
        /// Match id
        #[arg(short, long = "match")]
        match_id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Win/loss record and average opponent rating
    Record {
        #[arg(short, long)]
        player: i64,
        /// Number of recent matches used for the opponent rating (defaults to 15)
        #[arg(short, long)]
        window: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Player details, rating tier, rankings, monthly rating changes, top opponents and last match
    Profile {
        #[arg(short, long)]
        player: i64,
        #[arg(long)]
        json: bool,
    },
    /// Finished matches, most recent first
    Matches {
        #[arg(short, long)]
        player: i64,
        /// Show at most this many matches
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Search players by name
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
