//! Stylesheet diagnostics
//!
//! This module checks a macro stylesheet before it is handed to KaTeX. It
//! reports:
//!
//! - Definitions that will be dropped (unsupported forms, multi-line bodies)
//! - Macros that are defined more than once
//! - Unbalanced braces on a line
//! - Cyclic or runaway optional-argument expansion
//!
//! ## Example
//!
//! ```rust
//! use sty2katex::diagnostics::check_stylesheet;
//!
//! let result = check_stylesheet(r"\newcommand{\foo}{\frac{1}{2}");
//! assert!(result.has_errors());
//! ```

use std::fmt;

use crate::core::normalize::normalized_lines;
use crate::core::MacroParser;
use crate::utils::error::{ConversionError, ConversionWarning};

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - a line will be skipped or overridden
    Warning,
    /// Error - the stylesheet cannot be converted as written
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed)
    pub column: Option<usize>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add a line number
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add location information
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<&ConversionWarning> for Diagnostic {
    fn from(warning: &ConversionWarning) -> Self {
        Diagnostic {
            level: DiagnosticLevel::Warning,
            message: warning.message.clone(),
            line: warning.line,
            column: None,
            source_text: None,
            suggestion: warning.suggestion.clone(),
        }
    }
}

impl From<&ConversionError> for Diagnostic {
    fn from(err: &ConversionError) -> Self {
        let diag = Diagnostic::new(DiagnosticLevel::Error, err.to_string());
        let diag = match err.line() {
            Some(line) => diag.with_line(line),
            None => diag,
        };
        match err {
            ConversionError::CyclicMacroExpansion { .. } => {
                diag.with_suggestion("check for optional-argument macros that invoke each other")
            }
            ConversionError::ExpansionTooLarge { .. } => {
                diag.with_suggestion("raise the template size limit or simplify the macros")
            }
            _ => diag,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> line:column
        //         |
        //         | source text
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        match (self.line, self.column) {
            (Some(line), Some(col)) => write!(f, "\n  --> line {}:{}", line, col)?,
            (Some(line), None) => write!(f, "\n  --> line {}", line)?,
            _ => {}
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check a stylesheet for issues
pub fn check_stylesheet(input: &str) -> CheckResult {
    let mut result = CheckResult::new();

    match MacroParser::new().parse_with_diagnostics(input) {
        Ok(output) => {
            for warning in &output.warnings {
                result.add(Diagnostic::from(warning));
            }
            result.add(Diagnostic::new(
                DiagnosticLevel::Info,
                format!(
                    "{} macro{} converted",
                    output.macros.len(),
                    if output.macros.len() == 1 { "" } else { "s" }
                ),
            ));
        }
        Err(err) => result.add(Diagnostic::from(&err)),
    }

    check_brace_balance(input, &mut result);

    result
}

/// Check every line for unbalanced braces
///
/// Definitions are read one line at a time, so a brace left open on one line
/// is never closed by a later one. Escaped `\{` and `\}` are skipped.
fn check_brace_balance(input: &str, result: &mut CheckResult) {
    for (line_no, line) in normalized_lines(input) {
        let mut depth = 0i32;
        let mut escaped = false;

        for (offset, c) in line.char_indices() {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth < 0 {
                        result.add(
                            Diagnostic::new(DiagnosticLevel::Error, "unmatched closing brace '}'")
                                .with_location(line_no, offset + 1)
                                .with_source(line)
                                .with_suggestion("Check for missing opening brace"),
                        );
                        depth = 0;
                    }
                }
                _ => {}
            }
        }

        if depth > 0 {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Error,
                    format!(
                        "{} unclosed brace{}",
                        depth,
                        if depth == 1 { "" } else { "s" }
                    ),
                )
                .with_line(line_no)
                .with_source(line)
                .with_suggestion("Check for missing closing brace '}'"),
            );
        }
    }
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}
