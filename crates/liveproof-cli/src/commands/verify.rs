//! Verify command implementation.

use crate::cli::VerifyArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use liveproof_domain::{ActionType, VerifyRequest};
use liveproof_gatekeeper::{
    render, FlowState, RenderedArtifact, SessionHandle, VerificationBackend, VerificationFlow,
};
use std::fs;
use std::path::Path;

/// Execute the verify command.
pub async fn execute_verify<B: VerificationBackend>(
    args: VerifyArgs,
    backend: &B,
    flow: &mut VerificationFlow,
    default_topic: Option<String>,
    formatter: &Formatter,
) -> Result<()> {
    let request = VerifyRequest::new(
        args.question_text(),
        args.resolved_mode(),
        args.topic.clone().or(default_topic),
    )?;

    let handle = flow.verify(backend, request).await?;
    let session = flow.session().ok_or(CliError::NoSession)?;
    println!("{}", formatter.format_session(session)?);

    let mut actions: Vec<ActionType> = Vec::new();
    for action in args.actions.iter().copied().map(ActionType::from) {
        if !actions.contains(&action) {
            actions.push(action);
        }
    }

    if !actions.is_empty() && flow.state() != FlowState::Executable {
        return Err(CliError::NotPermitted(format!(
            "execution is not allowed for session {} ({}% reliability)",
            session.session_id,
            session.score_percent()
        )));
    }

    for action in actions {
        println!();
        run_action(backend, flow, &handle, action, formatter).await?;
    }

    if let Some(path) = &args.save {
        save_artifact(flow, path, formatter)?;
    }

    Ok(())
}

/// Execute one action against the displayed session and print the artifact.
pub async fn run_action<B: VerificationBackend>(
    backend: &B,
    flow: &mut VerificationFlow,
    handle: &SessionHandle,
    action: ActionType,
    formatter: &Formatter,
) -> Result<()> {
    let result = flow.execute(backend, handle, action).await?;
    println!("{}", formatter.format_artifact(action, &result)?);
    Ok(())
}

/// Write the current artifact to `path`, decoding PDF payloads.
pub fn save_artifact(flow: &VerificationFlow, path: &Path, formatter: &Formatter) -> Result<()> {
    let (action, result) = flow
        .artifact()
        .ok_or_else(|| CliError::InvalidInput("No artifact to save".to_string()))?;

    match render(result)? {
        RenderedArtifact::Preformatted { text, .. } => fs::write(path, text)?,
        RenderedArtifact::Download(download) => fs::write(path, download.decode()?)?,
    }

    println!(
        "{}",
        formatter.success(&format!("Saved {} to {}", action.label(), path.display()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ActionArg;
    use crate::config::OutputFormat;
    use liveproof_domain::{ArtifactType, ExecutionResult, VerificationSession};
    use liveproof_gatekeeper::GateConfig;
    use liveproof_sdk::SdkError;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Backend answering every call with a fixed session and artifact
    struct StubBackend {
        can_execute: bool,
        artifact_type: ArtifactType,
        artifact: String,
        execute_calls: Mutex<usize>,
    }

    impl StubBackend {
        fn new(can_execute: bool, artifact_type: ArtifactType, artifact: &str) -> Self {
            Self {
                can_execute,
                artifact_type,
                artifact: artifact.to_string(),
                execute_calls: Mutex::new(0),
            }
        }
    }

    impl VerificationBackend for StubBackend {
        async fn verify(
            &self,
            request: &VerifyRequest,
        ) -> std::result::Result<VerificationSession, SdkError> {
            Ok(VerificationSession {
                session_id: "sess-1".to_string(),
                question: request.question.clone(),
                mode: request.mode,
                topic: request.topic.clone(),
                answer: "Answer".to_string(),
                reliability_score: if self.can_execute { 0.9 } else { 0.3 },
                claims: vec![],
                citations: vec![],
                can_execute: self.can_execute,
                next_question: None,
            })
        }

        async fn execute(
            &self,
            _session_id: &str,
            _action_type: ActionType,
        ) -> std::result::Result<ExecutionResult, SdkError> {
            *self.execute_calls.lock().unwrap() += 1;
            Ok(ExecutionResult {
                artifact: self.artifact.clone(),
                artifact_type: self.artifact_type.clone(),
                logs: vec![],
                safety_notes: vec![],
            })
        }
    }

    fn args(actions: Vec<ActionArg>, save: Option<&Path>) -> VerifyArgs {
        VerifyArgs {
            question: vec!["How".to_string(), "so?".to_string()],
            mode: None,
            topic: None,
            actions,
            save: save.map(Path::to_path_buf),
        }
    }

    fn formatter() -> Formatter {
        Formatter::new(OutputFormat::Quiet, false)
    }

    #[tokio::test]
    async fn test_profile_topic_is_used_when_none_given() {
        let backend = StubBackend::new(true, ArtifactType::Code, "x");
        let mut flow = VerificationFlow::new(GateConfig::default());

        execute_verify(args(vec![], None), &backend, &mut flow, Some("rust".into()), &formatter())
            .await
            .unwrap();
        let session = flow.session().unwrap();
        assert_eq!(session.topic.as_deref(), Some("rust"));
        assert_eq!(session.question, "How so?");
    }

    #[tokio::test]
    async fn test_actions_refused_when_not_permitted() {
        let backend = StubBackend::new(false, ArtifactType::Code, "x");
        let mut flow = VerificationFlow::new(GateConfig::default());

        let err = execute_verify(
            args(vec![ActionArg::CodeSnippet], None),
            &backend,
            &mut flow,
            None,
            &formatter(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::NotPermitted(_)));
        assert_eq!(*backend.execute_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_actions_run_once() {
        let backend = StubBackend::new(true, ArtifactType::Config, "a = 1");
        let mut flow = VerificationFlow::new(GateConfig::default());

        execute_verify(
            args(vec![ActionArg::Config, ActionArg::Config], None),
            &backend,
            &mut flow,
            None,
            &formatter(),
        )
        .await
        .unwrap();
        assert_eq!(*backend.execute_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_writes_text_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snippet.py");
        let backend = StubBackend::new(true, ArtifactType::Code, "print(1)");
        let mut flow = VerificationFlow::new(GateConfig::default());

        execute_verify(
            args(vec![ActionArg::CodeSnippet], Some(&path)),
            &backend,
            &mut flow,
            None,
            &formatter(),
        )
        .await
        .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "print(1)");
    }

    #[tokio::test]
    async fn test_save_decodes_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.pdf");
        // base64 of "%PDF-"
        let backend = StubBackend::new(true, ArtifactType::PdfBase64, "JVBERi0=");
        let mut flow = VerificationFlow::new(GateConfig::default());

        execute_verify(
            args(vec![ActionArg::PdfReport], Some(&path)),
            &backend,
            &mut flow,
            None,
            &formatter(),
        )
        .await
        .unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-".to_vec());
    }

    #[test]
    fn test_save_without_artifact() {
        let flow = VerificationFlow::new(GateConfig::default());
        let dir = TempDir::new().unwrap();
        let result = save_artifact(&flow, &dir.path().join("out"), &formatter());
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
