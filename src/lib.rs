pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod pagination;
pub mod providers;
pub mod rate_limiter;
pub mod record;
pub mod report;
pub mod services;
pub mod timing;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::Cli;
use serde::Serialize;
use tokio::sync::watch;

use crate::api::FederationClient;
use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::pagination::PaginationConfig;
use crate::services::{ProfileService, TimingInsightsService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_timing(player_id: i64, json: bool) -> Result<()> {
    let config = AppConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let client = FederationClient::new(&config.client)?;
        let service = TimingInsightsService::new(
            client,
            config.timing.aggregate.clone(),
            pagination(&config),
            config.timing.max_concurrent_fetches,
        );

        let (cancel_tx, cancel_rx) = watch::channel(false);
        tokio::spawn(cancel_on_ctrl_c(cancel_tx));

        let insights = service.run(player_id, cancel_rx).await?;
        output(&insights, json, report::print_timing_insights)
    })
}

pub fn handle_match_detail(match_id: i64, json: bool) -> Result<()> {
    let config = AppConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let client = FederationClient::new(&config.client)?;
        let detail = services::analyze_match(&client, match_id, &config.timing.detail).await?;
        output(&detail, json, report::print_match_detail)
    })
}

pub fn handle_record(player_id: i64, window: Option<usize>, json: bool) -> Result<()> {
    let config = AppConfig::from_env()?;
    let window = window.unwrap_or(config.record.opponent_window);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = profile_service(&config)?;
        let record = service.record(player_id, window).await;
        output(&record, json, report::print_record)
    })
}

pub fn handle_profile(player_id: i64, json: bool) -> Result<()> {
    let config = AppConfig::from_env()?;
    let today = chrono::Local::now().date_naive();
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = profile_service(&config)?;
        let profile = service.profile(player_id, today).await;
        output(&profile, json, report::print_profile)
    })
}

pub fn handle_matches(player_id: i64, limit: Option<usize>, json: bool) -> Result<()> {
    let config = AppConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = profile_service(&config)?;
        let listing = service.matches(player_id, limit).await;
        output(&listing, json, report::print_matches)
    })
}

pub fn handle_search(query: &str, json: bool) -> Result<()> {
    let config = AppConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = profile_service(&config)?;
        let results = service.search(query).await?;
        output(&results, json, |r| report::print_search_results(r))
    })
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn pagination(config: &AppConfig) -> PaginationConfig {
    let pages = PaginationConfig::new(config.client.match_page_size);
    match config.client.max_match_pages {
        Some(max) => pages.with_max_pages(max),
        None => pages,
    }
}

fn profile_service(config: &AppConfig) -> Result<ProfileService<FederationClient>> {
    let client = FederationClient::new(&config.client)?;
    Ok(ProfileService::new(
        client,
        config.record.clone(),
        pagination(config),
        config.timing.max_concurrent_fetches,
    ))
}

fn output<T, F>(value: &T, json: bool, print: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T),
{
    if json {
        let text = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
        println!("{}", text);
    } else {
        print(value);
    }
    Ok(())
}

async fn cancel_on_ctrl_c(cancel: watch::Sender<bool>) {
    if tokio::signal::ctrl_c().await.is_ok() {
        let _ = cancel.send(true);
    }
}
