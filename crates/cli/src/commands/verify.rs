//! `rotadb verify`: the read-only verification query on its own.

use anyhow::Result;
use rotadb_schema::Applier;

pub(crate) async fn run(applier: &Applier, json: bool) -> Result<()> {
    let report = applier.verify().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Verification: {report}");
    }
    anyhow::ensure!(report.all_present(), "verification reported missing objects: {report}");
    Ok(())
}
