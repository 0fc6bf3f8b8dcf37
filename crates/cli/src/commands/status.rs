//! `rotadb status`: applied/pending listing from the migration ledger.

use anyhow::Result;
use rotadb_schema::Applier;

pub(crate) async fn run(applier: &Applier, json: bool) -> Result<()> {
    let states = applier.status().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&states)?);
        return Ok(());
    }
    for state in &states {
        match state.applied_at {
            Some(at) => {
                println!("applied  {}  ({})", state.id, at.format("%Y-%m-%d %H:%M:%S UTC"));
            },
            None => println!("pending  {}", state.id),
        }
    }
    Ok(())
}
