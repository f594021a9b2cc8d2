use colored::Colorize;

use crate::domain::{PlayerDetails, SearchResult};
use crate::record::{OpponentRating, RankMovement, RatingChanges, RecordSummary, TierProgress, WeeklyRankings};
use crate::services::{PlayerMatches, PlayerProfile, PlayerRecord, TimingInsights};
use crate::timing::{MatchDetail, TimingSummary};

/// `MM:SS` below an hour, `H:MM:SS` from there; `N/A` for negative or non-finite input
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "N/A".to_string();
    }

    let total = seconds.round() as u64;
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Movement of a ranking position; going up means a smaller number
pub fn format_movement(movement: RankMovement) -> String {
    match movement {
        RankMovement::Up(places) => format!("▲{}", places).green().to_string(),
        RankMovement::Down(places) => format!("▼{}", places).red().to_string(),
        RankMovement::Unchanged => "-".dimmed().to_string(),
        RankMovement::New => "New".dimmed().to_string(),
    }
}

pub fn format_change(change: f64) -> String {
    let text = format!("{:+.2}", change);
    if change > 0.0 {
        text.green().to_string()
    } else if change < 0.0 {
        text.red().to_string()
    } else {
        text.dimmed().to_string()
    }
}

// --- Timing ---

pub fn print_timing_insights(insights: &TimingInsights) {
    println!(
        "{} player {} ({} of {} matches analyzed)",
        "Timing insights".bold(),
        insights.player_id,
        insights.matches_analyzed,
        insights.matches_considered
    );
    print_summary_line("Point", &insights.report.points);
    print_summary_line("Game", &insights.report.games);
    print_summary_line("Match", &insights.report.matches);

    let excluded = &insights.exclusions;
    println!(
        "{}",
        format!(
            "Excluded: {} without live scoring, {} with too few points, {} failed lookups, {} failed pages; {} below match floor (point and game timings kept)",
            excluded.no_live_scoring,
            excluded.insufficient_data,
            excluded.lookup_failures,
            excluded.failed_pages,
            excluded.below_match_floor
        )
        .dimmed()
    );
}

fn print_summary_line(label: &str, summary: &TimingSummary) {
    match summary {
        TimingSummary::Unavailable => println!("  {:<6} {}", label, "unavailable".dimmed()),
        TimingSummary::Measured {
            average_seconds,
            minimum,
            maximum,
            sample_count,
        } => println!(
            "  {:<6} avg {}  shortest {} (match {})  longest {} (match {})  [{} samples]",
            label,
            format_duration(*average_seconds).bold(),
            format_duration(minimum.seconds),
            minimum.match_id,
            format_duration(maximum.seconds),
            maximum.match_id,
            sample_count
        ),
    }
}

pub fn print_match_detail(detail: &MatchDetail) {
    println!(
        "{} {}  length {}  games {}-{}",
        "Match".bold(),
        detail.match_id,
        format_duration(detail.match_length_seconds),
        detail.games_won_left,
        detail.games_won_right
    );
    println!(
        "  avg point {}  longest point {}  avg game {}",
        optional_duration(detail.points.average_seconds()),
        optional_duration(detail.points.maximum().map(|e| e.seconds)),
        optional_duration(detail.games.average_seconds())
    );

    for game in &detail.per_game {
        println!(
            "  Game {}: {}-{}  length {}  avg point {}  longest point {}",
            game.game_number,
            game.final_left,
            game.final_right,
            format_duration(game.length_seconds),
            optional_duration(game.points.average_seconds()),
            optional_duration(game.points.maximum().map(|e| e.seconds))
        );
    }
}

fn optional_duration(seconds: Option<f64>) -> String {
    seconds.map(format_duration).unwrap_or_else(|| "N/A".to_string())
}

// --- Record & profile ---

pub fn print_record(result: &PlayerRecord) {
    print_record_summary(&result.record);
    print_opponent_rating(&result.opponents);
}

fn print_record_summary(record: &RecordSummary) {
    println!(
        "{} {}W / {}L ({}%)",
        "Record".bold(),
        record.total_wins.to_string().green(),
        record.total_losses.to_string().red(),
        record.win_percentage
    );
    for (category, wl) in &record.per_category {
        println!("  {:<8} {}/{}", category, wl.wins, wl.losses);
    }
}

fn print_opponent_rating(opponents: &OpponentRating) {
    match opponents.average {
        Some(avg) => println!(
            "Average opponent rating {:.2} ({} of {} recent matches)",
            avg, opponents.resolved, opponents.considered
        ),
        None => println!("Average opponent rating {}", "N/A".dimmed()),
    }
}

pub fn print_profile(profile: &PlayerProfile) {
    println!("{} player {}", "Profile".bold(), profile.player_id);

    if let Some(details) = &profile.details {
        print_details(details);
    }

    match &profile.rating {
        Some(rating) => print_tier(rating),
        None => println!("  Rating: {}", "inactive".dimmed()),
    }

    if let Some(peak) = &profile.highest_rating {
        println!("  Highest rating {:.2} ({})", peak.rating, peak.date.format("%b %-d, %Y"));
    }

    if let Some(weekly) = &profile.weekly_rankings {
        print_weekly_rankings(weekly);
    }

    if let Some(changes) = &profile.rating_changes {
        print_rating_changes(changes);
    }

    if !profile.top_opponents.is_empty() {
        println!("  Top opponents:");
        for opponent in &profile.top_opponents {
            let result = match opponent.won_last_match {
                Some(true) => "W".green(),
                Some(false) => "L".red(),
                None => "-".dimmed(),
            };
            println!("    {:<28} {:.2}  last: {}", opponent.name, opponent.rating, result);
        }
    }

    if let Some(last) = &profile.last_match {
        let result = match last.won {
            Some(true) => "Won".green(),
            Some(false) => "Lost".red(),
            None => "?".dimmed(),
        };
        println!(
            "  Last match: {} vs {}  {}  {}",
            result,
            last.opponent,
            last.score,
            last.date.format("%Y-%m-%d")
        );
    }
}

fn print_details(details: &PlayerDetails) {
    let or_na = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".into());

    println!("  Name: {}", or_na(&details.name));
    let membership = match details.member {
        Some(true) => "Member".to_string(),
        Some(false) => "Non-member".to_string(),
        None => "Status unavailable".to_string(),
    };
    match details.paid_through {
        Some(date) => println!("  {} (paid through {})", membership, date.format("%Y-%m-%d")),
        None => println!("  {}", membership),
    }
    println!("  Gender: {}", or_na(&details.gender));
    println!("  Location: {}", or_na(&details.location));
    println!("  Affiliation: {}", or_na(&details.affiliation));
}

fn print_weekly_rankings(weekly: &WeeklyRankings) {
    println!("  Rankings as of {}:", weekly.as_of.format("%A, %B %-d, %Y"));
    if weekly.divisions.is_empty() {
        println!("    {}", "No rankings this week".dimmed());
    }
    for ranking in &weekly.divisions {
        println!(
            "    {:<16} {:<20} {:>5}  {}",
            ranking.division,
            ranking.rating_group,
            ranking.ranking,
            format_movement(ranking.movement)
        );
    }
}

fn print_tier(rating: &TierProgress) {
    println!(
        "  Rating {:.2}  {} ({:.0}%)",
        rating.rating,
        rating.tier.label().bold(),
        rating.progress_percent
    );
    if let (Some(next), Some(needed)) = (rating.next_tier, rating.rating_needed) {
        println!("  {:.2} more to reach {}", needed, next.label());
    }
}

fn print_rating_changes(changes: &RatingChanges) {
    let ytd = changes
        .year_to_date
        .map(format_change)
        .unwrap_or_else(|| "No Data".dimmed().to_string());
    println!("  YTD change: {}", ytd);

    for month in &changes.months {
        let change = month
            .change
            .map(format_change)
            .unwrap_or_else(|| "No Data".dimmed().to_string());
        println!("    {}  {}", month.label(), change);
    }
}

// --- Match history ---

pub fn print_matches(listing: &PlayerMatches) {
    println!(
        "{} player {}{}",
        "Matches".bold(),
        listing.player_id,
        listing
            .player_name
            .as_deref()
            .map(|name| format!(" ({})", name))
            .unwrap_or_default()
    );

    if listing.matches.is_empty() {
        println!("  {}", "No finished matches".dimmed());
    }
    for row in &listing.matches {
        let result = match row.won {
            Some(true) => "W".green(),
            Some(false) => "L".red(),
            None => "-".dimmed(),
        };
        println!(
            "  {}  {}  {:<24} vs {}",
            row.date.format("%Y-%m-%d"),
            result,
            row.score,
            row.opponent
        );
        if let Some(description) = &row.description {
            println!("              {}", description.dimmed());
        }
    }

    if listing.failed_pages > 0 {
        println!("{}", "  Some match pages could not be loaded".yellow());
    }
}

pub fn print_search_results(results: &[SearchResult]) {
    if results.is_empty() {
        println!("{}", "No results".dimmed());
        return;
    }

    for result in results {
        let id = result.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
        let marker = if result.is_player() { "player".green() } else { result.kind.normal() };
        println!(
            "  {:>8}  {:<30} {:<10} {}",
            id,
            result.name,
            marker,
            result.location.as_deref().unwrap_or("")
        );
    }
}
