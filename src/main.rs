use anyhow::Result;

use squash_insights::cli::Command;
use squash_insights::{
    handle_completions, handle_match_detail, handle_matches, handle_profile, handle_record, handle_search,
    handle_timing, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Timing { player, json } => handle_timing(*player, *json),
        Command::MatchDetail { match_id, json } => handle_match_detail(*match_id, *json),
        Command::Record {
            player,
            window,
            json,
        } => handle_record(*player, *window, *json),
        Command::Profile { player, json } => handle_profile(*player, *json),
        Command::Matches {
            player,
            limit,
            json,
        } => handle_matches(*player, *limit, *json),
        Command::Search { query, json } => handle_search(query, *json),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
