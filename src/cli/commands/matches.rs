//! Match command handlers

use anyhow::Context;
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::db::{MatchFilter, NewMatch};
use crate::display::{calendar_short, offset_from_minutes};
use crate::state::SharedState;

/// Accepts RFC 3339 (`2024-06-14T19:00:00Z`) or a naive `YYYY-MM-DD HH:MM`
/// taken as UTC.
pub fn parse_kickoff(input: &str) -> anyhow::Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M")
        .map(|naive| naive.and_utc())
        .with_context(|| format!("Invalid kickoff '{input}', expected RFC 3339 or YYYY-MM-DD HH:MM"))
}

pub async fn cmd_match_add(
    state: &SharedState,
    kickoff: &str,
    home_team_id: i32,
    away_team_id: i32,
    match_type_id: i32,
) -> anyhow::Result<()> {
    let kickoff = parse_kickoff(kickoff)?;

    let fixture = state
        .fixture_service
        .create_match(NewMatch {
            kickoff,
            home_team_id,
            away_team_id,
            match_type_id,
        })
        .await?;

    println!(
        "✓ Scheduled match {}: {} vs {} ({}) at {}",
        fixture.id,
        fixture.home_team.name,
        fixture.away_team.name,
        fixture.match_type.name,
        fixture.kickoff.to_rfc3339()
    );

    Ok(())
}

pub async fn cmd_match_result(
    state: &SharedState,
    match_id: i32,
    goals_home: i32,
    goals_away: i32,
) -> anyhow::Result<()> {
    let fixture = state
        .fixture_service
        .record_result(match_id, goals_home, goals_away)
        .await?;

    println!(
        "✓ Result recorded: {} {}:{} {}",
        fixture.home_team.name, goals_home, goals_away, fixture.away_team.name
    );

    Ok(())
}

pub async fn cmd_match_list(state: &SharedState, upcoming: bool, played: bool) -> anyhow::Result<()> {
    let filter = if upcoming {
        MatchFilter::Upcoming(Utc::now())
    } else if played {
        MatchFilter::Played
    } else {
        MatchFilter::All
    };

    let offset = offset_from_minutes(state.config().await.general.display_utc_offset_minutes);
    let fixtures = state.fixture_service.list_fixtures(filter).await?;

    if fixtures.is_empty() {
        println!("No matches found.");
        return Ok(());
    }

    println!("Matches ({} total)", fixtures.len());
    println!("{:-<70}", "");

    for fixture in fixtures {
        let score = fixture
            .result
            .map_or_else(|| "-:-".to_string(), |s| s.to_string());
        println!(
            "{:>4}  {:<14} {:<5} {:>5} {:<5}  [{}]",
            fixture.id,
            calendar_short(fixture.kickoff, offset),
            fixture.home_team.code,
            score,
            fixture.away_team.code,
            fixture.match_type.code
        );
    }

    Ok(())
}
