//! Leaderboard command handler

use crate::state::SharedState;

pub async fn cmd_leaderboard(state: &SharedState) -> anyhow::Result<()> {
    let standings = state.leaderboard_service.standings().await?;

    if standings.is_empty() {
        println!("No players registered yet.");
        return Ok(());
    }

    println!(
        "{:>4}  {:<24} {:>6} {:>5} {:>5} {:>5} {:>5} {:>6}",
        "#", "Name", "Points", "3", "2", "1", "0", "Avg"
    );
    println!("{:-<70}", "");

    for s in standings {
        println!(
            "{:>4}  {:<24} {:>6} {:>5} {:>5} {:>5} {:>5} {:>6.1}",
            s.rank,
            s.name,
            s.points,
            s.exact,
            s.correct_difference,
            s.correct_outcome,
            s.misses,
            s.average
        );
    }

    Ok(())
}
