//! Compare command implementation.

use crate::cli::CompareArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use liveproof_sdk::LiveProofClient;

/// Execute the compare command.
pub async fn execute_compare(
    args: CompareArgs,
    client: &LiveProofClient,
    formatter: &Formatter,
) -> Result<()> {
    if args.topic.trim().is_empty() {
        return Err(CliError::InvalidInput("Topic must not be empty".to_string()));
    }

    let comparison = client.topic_compare(&args.topic).await?;
    println!("{}", formatter.format_comparison(&comparison)?);

    Ok(())
}
