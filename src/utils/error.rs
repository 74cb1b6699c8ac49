//! Error handling for sty2katex
//!
//! This module provides a unified error type and result type for
//! stylesheet parsing, plus the non-fatal warning type collected while
//! rewriting definitions.

use std::fmt;

/// Conversion error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Parse error - a definition line could not be interpreted
    ParseError {
        message: String,
        line: Option<usize>,
    },
    /// Optional-argument macros keep invoking each other
    CyclicMacroExpansion {
        /// Macro whose definition never reached a fixed point
        name: String,
        /// Source line (1-indexed) of that definition
        line: usize,
        /// Number of rewrite passes performed before giving up
        passes: usize,
    },
    /// Expansion grew past the configured template size limit
    ExpansionTooLarge {
        name: String,
        line: usize,
        limit: usize,
    },
    /// Invalid input
    InvalidInput { message: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::ParseError { message, line } => {
                if let Some(l) = line {
                    write!(f, "Parse error at line {}: {}", l, message)
                } else {
                    write!(f, "Parse error: {}", message)
                }
            }
            ConversionError::CyclicMacroExpansion { name, line, passes } => {
                write!(
                    f,
                    "Cyclic macro expansion in definition of '{}' at line {}: no fixed point after {} passes",
                    name, line, passes
                )
            }
            ConversionError::ExpansionTooLarge { name, line, limit } => {
                write!(
                    f,
                    "Expansion of '{}' at line {} exceeds {} bytes",
                    name, line, limit
                )
            }
            ConversionError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            ConversionError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    pub message: String,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl ConversionWarning {
    pub fn at(line: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(l) = self.line {
            write!(f, "Warning at line {}: {}", l, self.message)?;
        } else {
            write!(f, "Warning: {}", self.message)?;
        }
        if let Some(ref sug) = self.suggestion {
            write!(f, " ({})", sug)?;
        }
        Ok(())
    }
}

// Convenience constructors for errors
impl ConversionError {
    pub fn parse(message: impl Into<String>) -> Self {
        ConversionError::ParseError {
            message: message.into(),
            line: None,
        }
    }

    pub fn parse_at(message: impl Into<String>, line: usize) -> Self {
        ConversionError::ParseError {
            message: message.into(),
            line: Some(line),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ConversionError::InvalidInput {
            message: message.into(),
        }
    }

    /// Source line the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            ConversionError::ParseError { line, .. } => *line,
            ConversionError::CyclicMacroExpansion { line, .. }
            | ConversionError::ExpansionTooLarge { line, .. } => Some(*line),
            ConversionError::InvalidInput { .. } | ConversionError::IoError { .. } => None,
        }
    }
}
