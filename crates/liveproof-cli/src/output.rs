//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use liveproof_domain::{
    resolve_claims, ActionType, ExecutionResult, TopSources, TopicComparison, VerificationSession,
};
use liveproof_gatekeeper::{render, PdfDownload, RenderedArtifact, TextKind};
use liveproof_sdk::{HealthStatus, SessionRecord};
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a verified session: answer, score, eligibility, evidence and claims.
    pub fn format_session(&self, session: &VerificationSession) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_session_json(session),
            OutputFormat::Table => Ok(self.format_session_panels(session)),
            OutputFormat::Quiet => Ok(session.session_id.clone()),
        }
    }

    fn format_session_json(&self, session: &VerificationSession) -> Result<String> {
        let value = json!({
            "session_id": session.session_id,
            "question": session.question,
            "mode": session.mode,
            "topic": session.topic,
            "answer": session.answer,
            "reliability_score": session.reliability_score,
            "can_execute": session.can_execute,
            "next_question": session.next_question,
            "claims": session.claims,
            "citations": session.citations,
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_session_panels(&self, session: &VerificationSession) -> String {
        let mut out = String::new();

        out.push_str(&self.heading("Answer"));
        out.push('\n');
        out.push_str(&session.answer);
        out.push_str("\n\n");

        out.push_str(&format!("Reliability: {}%\n", session.score_percent()));
        out.push_str(&self.eligibility(session));
        out.push('\n');
        if let Some(topic) = &session.topic {
            out.push_str(&format!("Topic: {}\n", topic));
        }
        out.push_str(&format!("Session: {}\n", session.session_id));

        out.push('\n');
        out.push_str(&self.heading("Evidence"));
        out.push('\n');
        if session.citations.is_empty() {
            out.push_str("  No citations.\n");
        }
        for (n, citation) in session.citations.iter().enumerate() {
            out.push_str(&format!("  [{}] {}\n", n + 1, citation.display_title()));
            out.push_str(&format!("      {}\n", self.colorize(&citation.url, "cyan")));
            if !citation.snippet.is_empty() {
                out.push_str(&format!("      {}\n", citation.snippet));
            }
            match (&citation.source_name, &citation.published_at) {
                (Some(source), Some(date)) => {
                    out.push_str(&format!("      {} ({})\n", source, date))
                }
                (Some(source), None) => out.push_str(&format!("      {}\n", source)),
                (None, Some(date)) => out.push_str(&format!("      {}\n", date)),
                (None, None) => {}
            }
        }

        out.push('\n');
        out.push_str(&self.heading("Claims"));
        out.push('\n');
        if session.claims.is_empty() {
            out.push_str("  No claims.\n");
        }
        for resolved in resolve_claims(&session.claims, &session.citations) {
            let stance = match resolved.claim.notable_stance() {
                Some(stance) => {
                    let label = self.colorize(stance.as_str(), stance_color(stance.as_str()));
                    format!(" [{}]", label)
                }
                None => String::new(),
            };
            out.push_str(&format!("  • {}{}\n", resolved.claim.text, stance));
            for citation in resolved.citations {
                out.push_str(&format!("      ↳ {}\n", citation.display_title()));
            }
        }

        out.trim_end().to_string()
    }

    /// Execution eligibility line for a session.
    pub fn eligibility(&self, session: &VerificationSession) -> String {
        if session.can_execute {
            self.colorize("Execution allowed (above threshold)", "green")
        } else {
            let mut line = self.colorize("Execution not allowed (below threshold).", "yellow");
            if let Some(next) = &session.next_question {
                line.push(' ');
                line.push_str(next);
            }
            line
        }
    }

    /// Format a generated artifact.
    pub fn format_artifact(&self, action: ActionType, result: &ExecutionResult) -> Result<String> {
        let rendered = render(result)?;

        match self.format {
            OutputFormat::Json => {
                // PDF payloads are offered for download, never embedded
                let (artifact, download) = match &rendered {
                    RenderedArtifact::Preformatted { text, .. } => (json!(text), json!(null)),
                    RenderedArtifact::Download(download) => (
                        json!(null),
                        json!({
                            "file_name": download.file_name,
                            "content_type": download.content_type,
                            "payload_length": download.payload.len(),
                        }),
                    ),
                };
                let value = json!({
                    "action_type": action,
                    "artifact_type": result.artifact_type,
                    "artifact": artifact,
                    "download": download,
                    "logs": result.logs,
                    "safety_notes": result.safety_notes,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => match &rendered {
                RenderedArtifact::Preformatted { text, .. } => Ok(text.clone()),
                RenderedArtifact::Download(download) => Ok(download_summary(download)),
            },
            OutputFormat::Table => {
                let mut out = String::new();
                out.push_str(&self.heading(&format!("Artifact: {}", action.label())));
                out.push('\n');
                match rendered {
                    RenderedArtifact::Preformatted { kind, text } => {
                        let fence = match kind {
                            TextKind::Code => "code",
                            TextKind::Config => "config",
                        };
                        out.push_str(&format!("--- {} ---\n{}\n---\n", fence, text));
                    }
                    RenderedArtifact::Download(download) => {
                        out.push_str(&format!(
                            "PDF report ready: {}. Save it with --save or 'save <path>'.\n",
                            download_summary(&download)
                        ));
                    }
                }
                if !result.logs.is_empty() {
                    out.push_str("Logs:\n");
                    for log in &result.logs {
                        out.push_str(&format!("  {}\n", log));
                    }
                }
                if !result.safety_notes.is_empty() {
                    out.push_str(&self.colorize("Safety notes:", "yellow"));
                    out.push('\n');
                    for note in &result.safety_notes {
                        out.push_str(&format!("  {}\n", note));
                    }
                }
                Ok(out.trim_end().to_string())
            }
        }
    }

    /// Format a topic comparison.
    pub fn format_comparison(&self, comparison: &TopicComparison) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(comparison)?),
            OutputFormat::Quiet => Ok(comparison
                .sessions
                .iter()
                .map(|s| s.session_id.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if comparison.sessions.is_empty() {
                    let mut out = self.colorize("No sessions for this topic yet", "yellow");
                    if let Some(message) = &comparison.message {
                        out.push('\n');
                        out.push_str(&self.info(message));
                    }
                    return Ok(out);
                }

                let mut builder = Builder::default();
                builder.push_record(["Session", "Score", "Claims", "Question", "Created"]);
                for entry in &comparison.sessions {
                    builder.push_record([
                        entry.short_id(),
                        format!("{}%", entry.score_percent()),
                        entry.claims_count.to_string(),
                        entry.question.clone(),
                        entry.created_at.clone().unwrap_or_default(),
                    ]);
                }

                Ok(self.build_table(builder))
            }
        }
    }

    /// Format the most cited sources.
    pub fn format_sources(&self, sources: &TopSources) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(sources)?),
            OutputFormat::Quiet => Ok(sources
                .sources
                .iter()
                .map(|s| s.url.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if sources.sources.is_empty() {
                    let mut out = self.colorize("No sources cited yet", "yellow");
                    if let Some(message) = &sources.message {
                        out.push('\n');
                        out.push_str(&self.info(message));
                    }
                    return Ok(out);
                }

                let mut builder = Builder::default();
                builder.push_record(["Citations", "Source", "URL"]);
                for source in &sources.sources {
                    builder.push_record([
                        source.citation_count.to_string(),
                        source.display_title().to_string(),
                        source.url.clone(),
                    ]);
                }

                Ok(self.build_table(builder))
            }
        }
    }

    /// Format a health check.
    pub fn format_health(&self, health: &HealthStatus) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(health)?),
            OutputFormat::Quiet => Ok(health.status.clone()),
            OutputFormat::Table => {
                let service = health.service.as_deref().unwrap_or("service");
                Ok(self.success(&format!("{}: {}", service, health.status)))
            }
        }
    }

    /// Format an opaque session record.
    pub fn format_record(&self, record: &SessionRecord) -> Result<String> {
        match self.format {
            OutputFormat::Quiet => Ok(serde_json::to_string(record)?),
            _ => Ok(serde_json::to_string_pretty(record)?),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn build_table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn download_summary(download: &PdfDownload) -> String {
    format!("{} ({} base64 chars)", download.file_name, download.payload.len())
}

fn stance_color(stance: &str) -> &'static str {
    match stance {
        "support" => "green",
        "oppose" => "red",
        _ => "yellow",
    }
}
