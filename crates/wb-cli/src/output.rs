//! What `wb` prints back.
//!
//! A command produces one [`Report`]: a short human line (or the raw board
//! for `cat`) on stdout, or a single JSON document with `--json` or
//! `FORMAT=json`. Failures go to stderr as a [`Problem`]. An activity-log
//! write that failed after the operation itself succeeded is a warning on
//! stderr for people and a `log_warning` field inside the JSON document.

use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use wb_core::BoardError;

/// Human text or JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Human,
    Json,
}

impl Format {
    /// `--json` wins; otherwise `FORMAT=json` (any case) selects JSON.
    pub fn detect(json_flag: bool) -> Self {
        Self::pick(json_flag, std::env::var("FORMAT").ok().as_deref())
    }

    fn pick(json_flag: bool, env: Option<&str>) -> Self {
        if json_flag || env.is_some_and(|v| v.trim().eq_ignore_ascii_case("json")) {
            Self::Json
        } else {
            Self::Human
        }
    }

    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// The result of one command.
pub trait Report: Serialize {
    /// Write the human rendering.
    ///
    /// # Errors
    ///
    /// Any error from `w`.
    fn human(&self, w: &mut dyn Write) -> io::Result<()>;
}

/// A failure as shown to the user, built from a [`BoardError`] or ad hoc.
#[derive(Debug, Serialize)]
pub struct Problem {
    pub code: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Problem {
    /// A failure outside the core library, without a stable code.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            hint: None,
        }
    }

    pub fn coded(code: &str, message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            code: Some(code.to_string()),
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

impl From<&BoardError> for Problem {
    fn from(err: &BoardError) -> Self {
        Self {
            code: Some(err.code().code().to_string()),
            message: err.to_string(),
            hint: err.hint().map(str::to_string),
        }
    }
}

/// Print `report` to stdout, with any activity-log failure reported alongside.
///
/// # Errors
///
/// Serialization or write failures.
pub fn emit<R: Report>(
    format: Format,
    report: &R,
    log_failure: Option<&BoardError>,
) -> anyhow::Result<()> {
    write_report(
        format,
        report,
        log_failure,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

fn write_report<R: Report>(
    format: Format,
    report: &R,
    log_failure: Option<&BoardError>,
    out: &mut dyn Write,
    diag: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        Format::Json => {
            let mut doc = serde_json::to_value(report)?;
            if let (Some(failure), Value::Object(fields)) = (log_failure, &mut doc) {
                fields.insert(
                    "log_warning".to_string(),
                    serde_json::to_value(Problem::from(failure))?,
                );
            }
            serde_json::to_writer(&mut *out, &doc)?;
            writeln!(out)?;
        }
        Format::Human => {
            if let Some(failure) = log_failure {
                writeln!(diag, "warning: activity log not updated: {failure}")?;
            }
            report.human(out)?;
        }
    }
    Ok(())
}

/// Print `problem` to stderr.
///
/// # Errors
///
/// Serialization or write failures.
pub fn report_problem(format: Format, problem: &Problem) -> anyhow::Result<()> {
    write_problem(format, problem, &mut io::stderr().lock())
}

fn write_problem(format: Format, problem: &Problem, w: &mut dyn Write) -> anyhow::Result<()> {
    if format.is_json() {
        serde_json::to_writer(&mut *w, &serde_json::json!({ "error": problem }))?;
        writeln!(w)?;
        return Ok(());
    }
    match &problem.code {
        Some(code) => writeln!(w, "error[{code}]: {}", problem.message)?,
        None => writeln!(w, "error: {}", problem.message)?,
    }
    if let Some(hint) = &problem.hint {
        writeln!(w, "  hint: {hint}")?;
    }
    Ok(())
}
