//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The REPL keeps one verification flow for its lifetime. Each `verify`
//! replaces the displayed session; `execute` always targets it.

use crate::cli::{CompareArgs, ProfileAction, ProfileArgs, SessionArgs, SourcesArgs, VerifyArgs};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use liveproof_domain::{ActionType, VerifyMode};
use liveproof_gatekeeper::{ActionStatus, FlowState, GateConfig, VerificationFlow};
use liveproof_sdk::{ClientConfig, LiveProofClient};
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings the REPL needs beyond the config file.
pub struct ReplContext<'a> {
    /// Path the config file is persisted to
    pub config_path: &'a Path,
    /// URL from `--api-url` or the environment, if any
    pub api_override: Option<&'a str>,
    /// Gate configuration for the flow
    pub gate: GateConfig,
}

/// Run the interactive REPL.
pub async fn run_repl(
    config: &mut Config,
    ctx: ReplContext<'_>,
    mut client: LiveProofClient,
    formatter: &Formatter,
) -> Result<()> {
    println!("{}", formatter.info("LiveProof REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut state = ReplState {
        flow: VerificationFlow::new(ctx.gate),
        mode: VerifyMode::Answer,
        topic: config.default_topic(),
    };

    loop {
        let prompt = state.prompt();

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        let reconnect = matches!(cmd, ReplCommand::Profile(_));
                        if let Err(e) = execute_repl_command(
                            cmd, &mut state, &client, config, &ctx, formatter,
                        )
                        .await
                        {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                        if reconnect && ctx.api_override.is_none() {
                            match connect(config) {
                                Ok(new_client) => client = new_client,
                                Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                            }
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

struct ReplState {
    flow: VerificationFlow,
    mode: VerifyMode,
    topic: Option<String>,
}

impl ReplState {
    fn prompt(&self) -> String {
        let marker = match self.flow.state() {
            FlowState::NoSession | FlowState::Verifying => "",
            FlowState::Answered => " answered",
            FlowState::Executable => " executable",
        };
        match &self.topic {
            Some(topic) => format!("liveproof [{}|{}]{}> ", self.mode, topic, marker),
            None => format!("liveproof [{}]{}> ", self.mode, marker),
        }
    }
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Verify(String),
    Mode(Option<VerifyMode>),
    Topic(Option<Option<String>>),
    Execute(ActionType),
    Status,
    Save(PathBuf),
    Compare(Option<String>),
    Sources(Option<usize>),
    Session(Option<String>),
    Health,
    Profile(ProfileAction),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match head {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "verify" | "v" => match arg {
            Some(question) => Ok(ReplCommand::Verify(question)),
            None => Err(CliError::InvalidInput("Usage: verify <question>".to_string())),
        },
        "mode" => match arg {
            Some(mode) => Ok(ReplCommand::Mode(Some(
                mode.parse().map_err(CliError::InvalidInput)?,
            ))),
            None => Ok(ReplCommand::Mode(None)),
        },
        "topic" => match arg.as_deref() {
            None => Ok(ReplCommand::Topic(None)),
            Some("clear") | Some("none") => Ok(ReplCommand::Topic(Some(None))),
            Some(topic) => Ok(ReplCommand::Topic(Some(Some(topic.to_string())))),
        },
        "execute" | "x" => match arg {
            Some(action) => Ok(ReplCommand::Execute(
                action.parse().map_err(CliError::InvalidInput)?,
            )),
            None => Err(CliError::InvalidInput(
                "Usage: execute <code_snippet|pdf_report|config>".to_string(),
            )),
        },
        "status" => Ok(ReplCommand::Status),
        "save" => match arg {
            Some(path) => Ok(ReplCommand::Save(PathBuf::from(path))),
            None => Err(CliError::InvalidInput("Usage: save <path>".to_string())),
        },
        "compare" => Ok(ReplCommand::Compare(arg)),
        "sources" => match arg {
            Some(limit) => Ok(ReplCommand::Sources(Some(limit.parse().map_err(|_| {
                CliError::InvalidInput(format!("Invalid limit: {}", limit))
            })?))),
            None => Ok(ReplCommand::Sources(None)),
        },
        "session" => Ok(ReplCommand::Session(arg)),
        "health" => Ok(ReplCommand::Health),
        "profile" => parse_profile_command(rest),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            head
        ))),
    }
}

fn parse_profile_command(rest: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = rest.split_whitespace().collect();

    let action = match parts.first().copied() {
        None | Some("show") => ProfileAction::Show,
        Some("list") => ProfileAction::List,
        Some("switch") => match parts.get(1) {
            Some(name) => ProfileAction::Switch {
                name: name.to_string(),
            },
            None => return Err(CliError::InvalidInput("Usage: profile switch <name>".to_string())),
        },
        Some(other) => {
            return Err(CliError::InvalidInput(format!(
                "Unknown profile action: {}",
                other
            )))
        }
    };

    Ok(ReplCommand::Profile(action))
}

/// Execute a REPL command.
async fn execute_repl_command(
    cmd: ReplCommand,
    state: &mut ReplState,
    client: &LiveProofClient,
    config: &mut Config,
    ctx: &ReplContext<'_>,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Verify(question) => {
            let args = VerifyArgs {
                question: vec![question],
                mode: Some(state.mode.into()),
                topic: state.topic.clone(),
                actions: vec![],
                save: None,
            };
            commands::execute_verify(args, client, &mut state.flow, None, formatter).await?;
        }
        ReplCommand::Mode(None) => {
            println!("Mode: {}", state.mode);
        }
        ReplCommand::Mode(Some(mode)) => {
            state.mode = mode;
            println!("{}", formatter.success(&format!("Mode set to {}", mode)));
        }
        ReplCommand::Topic(None) => match &state.topic {
            Some(topic) => println!("Topic: {}", topic),
            None => println!("No topic set"),
        },
        ReplCommand::Topic(Some(topic)) => {
            match &topic {
                Some(t) => println!("{}", formatter.success(&format!("Topic set to {}", t))),
                None => println!("{}", formatter.success("Topic cleared")),
            }
            state.topic = topic;
        }
        ReplCommand::Execute(action) => {
            let handle = state.flow.handle().ok_or(CliError::NoSession)?;
            commands::run_action(client, &mut state.flow, &handle, action, formatter).await?;
        }
        ReplCommand::Status => print_status(&state.flow, formatter),
        ReplCommand::Save(path) => {
            commands::save_artifact(&state.flow, &path, formatter)?;
        }
        ReplCommand::Compare(topic) => {
            let topic = topic
                .or_else(|| state.topic.clone())
                .ok_or_else(|| CliError::InvalidInput("Usage: compare <topic>".to_string()))?;
            commands::execute_compare(CompareArgs { topic }, client, formatter).await?;
        }
        ReplCommand::Sources(limit) => {
            commands::execute_sources(SourcesArgs { limit }, client, formatter).await?;
        }
        ReplCommand::Session(id) => {
            let id = id
                .or_else(|| state.flow.session().map(|s| s.session_id.clone()))
                .ok_or(CliError::NoSession)?;
            commands::execute_session(SessionArgs { id }, client, formatter).await?;
        }
        ReplCommand::Health => {
            commands::execute_health(client, formatter).await?;
        }
        ReplCommand::Profile(action) => {
            let args = ProfileArgs { action };
            commands::execute_profile(args, config, ctx.config_path, formatter).await?;
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

fn print_status(flow: &VerificationFlow, formatter: &Formatter) {
    let Some(session) = flow.session() else {
        println!("{}", formatter.info("No verified session"));
        return;
    };

    println!("Session: {}", session.session_id);
    println!("Reliability: {}%", session.score_percent());
    println!("{}", formatter.eligibility(session));
    for action in ActionType::ALL {
        let status = match flow.action_status(action) {
            ActionStatus::Idle => "idle".to_string(),
            ActionStatus::Executing => "executing".to_string(),
            ActionStatus::Executed => "executed".to_string(),
            ActionStatus::Failed(message) => format!("failed: {}", message),
        };
        println!("  {:<14} {}", action.as_str(), status);
    }
    if let Some((action, _)) = flow.artifact() {
        println!("Current artifact: {}", action.label());
    }
}

fn connect(config: &Config) -> Result<LiveProofClient> {
    let url = config.resolve_api_url(None);
    debug!(api_url = %url, "Reconnecting after profile change");
    Ok(LiveProofClient::new(ClientConfig::new(&url)?)?)
}

fn editor_error(err: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("Failed to initialize editor: {}", err),
    ))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  verify <question>              - Verify a question (replaces the session)");
    println!("  mode [answer|execute]          - Show or set the verification mode");
    println!("  topic [name|clear]             - Show, set or clear the topic");
    println!("  execute <action>               - Generate an artifact for the session");
    println!("    action: code_snippet | pdf_report | config");
    println!("  status                         - Show session and action status");
    println!("  save <path>                    - Write the current artifact to a file");
    println!("  compare [topic]                - Compare sessions for a topic");
    println!("  sources [limit]                - Most cited sources");
    println!("  session [id]                   - Fetch a stored session record");
    println!("  health                         - Check service health");
    println!("  profile [list|show|switch]     - Manage profiles");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verify_keeps_whole_question() {
        assert_eq!(
            parse_repl_command("verify  What is   tokio?").unwrap(),
            ReplCommand::Verify("What is   tokio?".to_string())
        );
        assert!(parse_repl_command("verify").is_err());
    }

    #[test]
    fn test_parse_execute() {
        assert_eq!(
            parse_repl_command("execute pdf-report").unwrap(),
            ReplCommand::Execute(ActionType::PdfReport)
        );
        assert_eq!(
            parse_repl_command("x code").unwrap(),
            ReplCommand::Execute(ActionType::CodeSnippet)
        );
        assert!(parse_repl_command("execute html").is_err());
    }

    #[test]
    fn test_parse_mode_and_topic() {
        assert_eq!(
            parse_repl_command("mode execute").unwrap(),
            ReplCommand::Mode(Some(VerifyMode::Execute))
        );
        assert_eq!(parse_repl_command("topic").unwrap(), ReplCommand::Topic(None));
        assert_eq!(parse_repl_command("topic clear").unwrap(), ReplCommand::Topic(Some(None)));
        assert_eq!(
            parse_repl_command("topic web security").unwrap(),
            ReplCommand::Topic(Some(Some("web security".to_string())))
        );
    }

    #[test]
    fn test_parse_sources_limit() {
        assert_eq!(parse_repl_command("sources 5").unwrap(), ReplCommand::Sources(Some(5)));
        assert!(parse_repl_command("sources many").is_err());
    }

    #[test]
    fn test_parse_profile() {
        assert!(matches!(
            parse_repl_command("profile").unwrap(),
            ReplCommand::Profile(ProfileAction::Show)
        ));
        assert!(matches!(
            parse_repl_command("profile switch prod").unwrap(),
            ReplCommand::Profile(ProfileAction::Switch { .. })
        ));
        assert!(parse_repl_command("profile switch").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            parse_repl_command("assert a b c"),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_prompt_reflects_mode_and_topic() {
        let state = ReplState {
            flow: VerificationFlow::new(GateConfig::default()),
            mode: VerifyMode::Execute,
            topic: Some("rust".to_string()),
        };
        assert_eq!(state.prompt(), "liveproof [execute|rust]> ");
    }
}
