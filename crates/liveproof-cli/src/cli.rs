//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use liveproof_domain::{ActionType, VerifyMode};
use liveproof_sdk::API_URL_ENV;
use std::path::PathBuf;

/// LiveProof CLI - Verify answers against cited evidence before acting on them.
#[derive(Debug, Parser)]
#[command(name = "liveproof")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Verification service URL (overrides the profile)
    #[arg(long, env = API_URL_ENV, global = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Panels and tables (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (ids and artifacts only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify a question and optionally generate artifacts
    Verify(VerifyArgs),

    /// Fetch a stored session record
    Session(SessionArgs),

    /// Compare past sessions for a topic
    Compare(CompareArgs),

    /// List the most cited sources
    Sources(SourcesArgs),

    /// Check service health
    Health,

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Question to verify
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Verification mode (defaults to execute when actions are requested)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Topic to group the session under
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Artifact to generate once verified (repeatable)
    #[arg(short, long = "action", value_enum)]
    pub actions: Vec<ActionArg>,

    /// Write the last generated artifact to this path
    #[arg(short, long)]
    pub save: Option<PathBuf>,
}

impl VerifyArgs {
    /// Question text as typed.
    pub fn question_text(&self) -> String {
        self.question.join(" ")
    }

    /// Mode to request.
    pub fn resolved_mode(&self) -> VerifyMode {
        match self.mode {
            Some(mode) => mode.into(),
            None if self.actions.is_empty() => VerifyMode::Answer,
            None => VerifyMode::Execute,
        }
    }
}

/// Arguments for the session command.
#[derive(Debug, Parser)]
pub struct SessionArgs {
    /// Session id
    pub id: String,
}

/// Arguments for the compare command.
#[derive(Debug, Parser)]
pub struct CompareArgs {
    /// Topic name
    pub topic: String,
}

/// Arguments for the sources command.
#[derive(Debug, Parser)]
pub struct SourcesArgs {
    /// Maximum number of sources
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Service URL
        #[arg(short, long)]
        url: String,
        /// Default topic
        #[arg(short, long)]
        topic: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Mode argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Answer only
    Answer,
    /// Answer and allow artifact generation
    Execute,
}

/// Action argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ActionArg {
    /// Code snippet
    CodeSnippet,
    /// PDF report
    PdfReport,
    /// Configuration file
    Config,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ModeArg> for VerifyMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Answer => VerifyMode::Answer,
            ModeArg::Execute => VerifyMode::Execute,
        }
    }
}

impl From<VerifyMode> for ModeArg {
    fn from(mode: VerifyMode) -> Self {
        match mode {
            VerifyMode::Answer => ModeArg::Answer,
            VerifyMode::Execute => ModeArg::Execute,
        }
    }
}

impl From<ActionArg> for ActionType {
    fn from(action: ActionArg) -> Self {
        match action {
            ActionArg::CodeSnippet => ActionType::CodeSnippet,
            ActionArg::PdfReport => ActionType::PdfReport,
            ActionArg::Config => ActionType::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_enters_repl() {
        let cli = Cli::parse_from(["liveproof"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_verify_command() {
        let cli = Cli::parse_from([
            "liveproof",
            "verify",
            "What",
            "is",
            "tokio?",
            "--topic",
            "rust",
            "--action",
            "code-snippet",
            "-a",
            "pdf-report",
        ]);
        match cli.command {
            Some(Command::Verify(args)) => {
                assert_eq!(args.question_text(), "What is tokio?");
                assert_eq!(args.topic.as_deref(), Some("rust"));
                assert_eq!(args.actions, vec![ActionArg::CodeSnippet, ActionArg::PdfReport]);
                assert_eq!(args.resolved_mode(), VerifyMode::Execute);
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_verify_defaults_to_answer_mode() {
        let cli = Cli::parse_from(["liveproof", "verify", "Why?"]);
        let Some(Command::Verify(args)) = cli.command else {
            panic!("Expected Verify command");
        };
        assert_eq!(args.resolved_mode(), VerifyMode::Answer);
    }

    #[test]
    fn test_explicit_mode_wins() {
        let cli = Cli::parse_from(["liveproof", "verify", "Why?", "-m", "answer", "-a", "config"]);
        let Some(Command::Verify(args)) = cli.command else {
            panic!("Expected Verify command");
        };
        assert_eq!(args.resolved_mode(), VerifyMode::Answer);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "liveproof",
            "sources",
            "--limit",
            "5",
            "--api-url",
            "http://127.0.0.1:9000",
            "--format",
            "json",
            "-v",
        ]);
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert!(cli.verbose);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(
            cli.command,
            Some(Command::Sources(SourcesArgs { limit: Some(5) }))
        ));
    }

    #[test]
    fn test_action_conversion() {
        let action: ActionType = ActionArg::PdfReport.into();
        assert_eq!(action, ActionType::PdfReport);
    }
}
