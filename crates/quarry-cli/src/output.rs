//! Shared output layer for human/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and renders through
//! [`render`]: labeled text for humans, stable JSON for scripts. Errors go
//! through [`render_error`] on stderr so `--json` consumers get a
//! machine-readable error object there too.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. the global `--json` flag
//! 2. `QUARRY_FORMAT` env var → `"human"` | `"json"`
//! 3. Default: [`OutputMode::Human`]

use std::io::{self, Write};

use quarry_client::ClientError;
use serde::Serialize;

/// Width of the rule under section headings in human output.
pub const RULE_WIDTH: usize = 72;

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Labeled text for humans.
    Human,
    /// Machine-readable JSON: one object or array per command.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Core resolution logic, separated from the environment for testability.
fn resolve_output_mode_inner(json_flag: bool, format_env: Option<&str>) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }
    match format_env.map(str::to_lowercase).as_deref() {
        Some("json") => OutputMode::Json,
        _ => OutputMode::Human,
    }
}

/// Resolve the output mode from the `--json` flag and `QUARRY_FORMAT`.
#[must_use]
pub fn resolve_output_mode(json_flag: bool) -> OutputMode {
    let env_val = std::env::var("QUARRY_FORMAT").ok();
    resolve_output_mode_inner(json_flag, env_val.as_deref())
}

// ---------------------------------------------------------------------------
// Human rendering helpers
// ---------------------------------------------------------------------------

/// Write a horizontal rule used under section headings.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = RULE_WIDTH)
}

/// Write a section heading followed by a rule.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    rule(w)
}

/// Write a left-aligned key/value line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode the value is serialized with `serde_json`; in human mode the
/// `human_fn` closure produces the text.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Human => human_fn(value, &mut out)?,
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A structured command error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. `missing_url`, `transport_failure`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create a simple error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    /// Create an error with a suggestion and error code.
    pub fn with_details(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            suggestion: Some(suggestion.into()),
            error_code: Some(error_code.into()),
        }
    }
}

impl From<&ClientError> for CliError {
    fn from(err: &ClientError) -> Self {
        let (suggestion, code) = match err {
            ClientError::ServerFault { code, .. } => (
                "Check the ids and your tracker permissions",
                code.clone().unwrap_or_else(|| "server_fault".to_string()),
            ),
            ClientError::Transport { .. } => (
                "Check the service URL and your network connection",
                "transport_failure".to_string(),
            ),
        };
        Self {
            message: err.to_string(),
            suggestion: Some(suggestion.to_string()),
            error_code: Some(code),
        }
    }
}

/// Render an error to stderr in the requested format.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Human => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}
