//! Health command implementation.

use crate::error::Result;
use crate::output::Formatter;
use liveproof_sdk::LiveProofClient;

/// Execute the health command.
pub async fn execute_health(client: &LiveProofClient, formatter: &Formatter) -> Result<()> {
    let health = client.health().await?;
    println!("{}", formatter.format_health(&health)?);
    Ok(())
}
