use anyhow::{Context, Result};

use crate::cli::UpdateArgs;
use crate::handler::decode_params;

pub async fn execute_update(args: UpdateArgs) -> Result<()> {
    let params = decode_params(args.params.as_bytes()).context("Invalid parameters")?;
    let client = super::connect(&args.connect)?;

    client
        .update_service(&args.service_id, &params)
        .await
        .with_context(|| format!("Failed to update service '{}'", args.service_id))?;

    println!("updated {} ({} params)", args.service_id, params.len());
    Ok(())
}
