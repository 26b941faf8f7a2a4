//! Team command handlers

use crate::state::SharedState;

pub async fn cmd_team_add(state: &SharedState, name: &str, code: &str) -> anyhow::Result<()> {
    let team = state.fixture_service.create_team(name, code).await?;
    println!("✓ Added team {} ({}) with ID {}", team.name, team.code, team.id);
    Ok(())
}

pub async fn cmd_team_list(state: &SharedState) -> anyhow::Result<()> {
    let teams = state.fixture_service.list_teams().await?;

    if teams.is_empty() {
        println!("No teams yet.");
        println!();
        println!("Add one with: betpool team add \"Germany\" GER");
        return Ok(());
    }

    println!("Teams ({} total)", teams.len());
    println!("{:-<50}", "");
    for team in teams {
        println!("{:>4}  {:<6} {}", team.id, team.code, team.name);
    }

    Ok(())
}
