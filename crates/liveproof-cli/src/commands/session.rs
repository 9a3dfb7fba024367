//! Session command implementation.

use crate::cli::SessionArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use liveproof_sdk::LiveProofClient;

/// Execute the session command.
pub async fn execute_session(
    args: SessionArgs,
    client: &LiveProofClient,
    formatter: &Formatter,
) -> Result<()> {
    let id = args.id.trim();
    if id.is_empty() {
        return Err(CliError::InvalidInput("Session id must not be empty".to_string()));
    }

    let record = client.get_session(id).await?;
    println!("{}", formatter.format_record(&record)?);

    Ok(())
}
