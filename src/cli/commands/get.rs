use anyhow::{Context, Result};

use crate::cli::GetArgs;

pub async fn execute_get(args: GetArgs) -> Result<()> {
    let client = super::connect(&args.connect)?;

    let snapshot = client
        .get_service(&args.service_id)
        .await
        .with_context(|| format!("Failed to fetch service '{}'", args.service_id))?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
