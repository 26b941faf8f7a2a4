//! Match type command handlers

use crate::state::SharedState;

pub async fn cmd_match_type_add(state: &SharedState, code: &str, name: &str) -> anyhow::Result<()> {
    let match_type = state.fixture_service.create_match_type(code, name).await?;
    println!(
        "✓ Added match type {} ({}) with ID {}",
        match_type.name, match_type.code, match_type.id
    );
    Ok(())
}

pub async fn cmd_match_type_list(state: &SharedState) -> anyhow::Result<()> {
    let types = state.fixture_service.list_match_types().await?;

    if types.is_empty() {
        println!("No match types yet.");
        println!();
        println!("Add one with: betpool match-type add GS \"Group stage\"");
        return Ok(());
    }

    println!("Match types ({} total)", types.len());
    println!("{:-<50}", "");
    for match_type in types {
        println!("{:>4}  {:<6} {}", match_type.id, match_type.code, match_type.name);
    }

    Ok(())
}
