//! Sources command implementation.

use crate::cli::SourcesArgs;
use crate::error::Result;
use crate::output::Formatter;
use liveproof_sdk::LiveProofClient;

/// Execute the sources command.
pub async fn execute_sources(
    args: SourcesArgs,
    client: &LiveProofClient,
    formatter: &Formatter,
) -> Result<()> {
    let sources = match args.limit {
        Some(limit) => client.top_sources_limited(limit).await?,
        None => client.top_sources().await?,
    };
    println!("{}", formatter.format_sources(&sources)?);

    Ok(())
}
