//! `rotadb apply`: run pending schema steps, then verify.

use anyhow::Result;
use rotadb_schema::{Applier, StepOutcome};

pub(crate) async fn run(applier: &Applier) -> Result<()> {
    let reports = applier.apply().await?;
    for report in &reports {
        match report.outcome {
            StepOutcome::Applied { rows_affected } if rows_affected > 0 => {
                println!("✓ {} ({rows_affected} rows)", report.step.summary);
            },
            StepOutcome::Applied { .. } => println!("✓ {}", report.step.summary),
            StepOutcome::Skipped => println!("- {} (already applied)", report.step.summary),
        }
    }
    println!("\n✅ All deployments completed successfully!");

    let verification = applier.verify().await?;
    println!("\nVerification: {verification}");
    anyhow::ensure!(
        verification.all_present(),
        "verification reported missing objects: {verification}"
    );
    Ok(())
}
