//! Core parsing modules
//!
//! The conversion runs in three stages over the lines of a stylesheet:
//! - `normalize`: comment stripping and trimming
//! - `index`: collection of macros with an optional first argument
//! - `rewrite`: per-line rewriting into KaTeX-compatible templates
//!
//! `parser` ties the stages together; `definition` holds the line patterns
//! and `context` the configurable limits.

pub mod context;
pub mod definition;
pub mod index;
pub mod normalize;
pub mod parser;
pub mod rewrite;

// Re-export main types and functions
pub use context::ParseOptions;
pub use definition::{match_definition, LineMatch, MacroDefinition, MathOperatorDeclaration};
pub use index::{MacroCall, OptionalArgIndex, OptionalArgMacro};
pub use normalize::{normalize_line, strip_comment};
pub use parser::{MacroMap, MacroOutput, MacroParser};
pub use rewrite::{collapse_optional_parameter, DefinitionRewriter, LineOutcome};
