//! Definition rewriting
//!
//! Turns one normalized definition line into a `(name, template)` pair the
//! renderer understands:
//!
//! - bracketed calls of optional-argument macros inside the template are
//!   expanded, repeatedly, until a full pass changes nothing
//! - a definition that itself declares an optional argument is collapsed:
//!   `#1` becomes the default and `#k` becomes `#(k-1)`
//! - `\DeclareMathOperator` becomes `\operatorname` (starred for limits)

use std::borrow::Cow;

use super::context::ParseOptions;
use super::definition::{match_definition, LineMatch, MacroDefinition};
use super::index::{substitute_placeholders, OptionalArgIndex};
use crate::utils::error::{ConversionError, ConversionResult};

/// Result of rewriting a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Not a recognized definition
    NoMatch,
    /// Ready for the output mapping
    Rewritten { name: String, template: String },
    /// Recognized but unusable, dropped from the output
    Malformed { name: String, message: String },
}

/// Substitute the declared default for `#1` and shift the rest down.
pub fn collapse_optional_parameter(template: &str, default: &str) -> String {
    substitute_placeholders(template, |k| match k {
        0 => None,
        1 => Some(Cow::Borrowed(default)),
        k => Some(Cow::Owned(format!("#{}", k - 1))),
    })
}

/// Rewrites definition lines against one optional-argument index
pub struct DefinitionRewriter<'a> {
    index: &'a OptionalArgIndex,
    options: &'a ParseOptions,
}

impl<'a> DefinitionRewriter<'a> {
    pub fn new(index: &'a OptionalArgIndex, options: &'a ParseOptions) -> Self {
        Self { index, options }
    }

    /// Rewrite a normalized line. `line_no` is only used for error reporting.
    pub fn rewrite_line(&self, line_no: usize, line: &str) -> ConversionResult<LineOutcome> {
        match match_definition(line) {
            LineMatch::NoMatch => Ok(LineOutcome::NoMatch),
            LineMatch::GenericMacro(def) => {
                let template = self.rewrite_macro(&def, line_no)?;
                Ok(LineOutcome::Rewritten {
                    name: def.name,
                    template,
                })
            }
            LineMatch::MathOperator(op) => Ok(LineOutcome::Rewritten {
                template: op.to_operatorname(),
                name: op.name,
            }),
            LineMatch::Malformed { name, message } => Ok(LineOutcome::Malformed { name, message }),
        }
    }

    /// Final template for a `\newcommand` definition
    pub fn rewrite_macro(&self, def: &MacroDefinition, line_no: usize) -> ConversionResult<String> {
        let template = self.resolve_optional_calls(&def.name, line_no, &def.template)?;

        Ok(match def.optional_default {
            Some(ref default) => collapse_optional_parameter(&template, default),
            None => template,
        })
    }

    /// Expand optional-argument calls in `template` until nothing changes.
    pub fn resolve_optional_calls(
        &self,
        name: &str,
        line_no: usize,
        template: &str,
    ) -> ConversionResult<String> {
        let mut current = template.to_string();
        let max_passes = self.options.max_expansion_passes.max(1);

        for _ in 0..max_passes {
            let mut changed = false;

            for entry in self.index.iter() {
                if let Some(expanded) = entry.expand_calls(&current) {
                    if expanded.len() > self.options.max_template_len {
                        return Err(ConversionError::ExpansionTooLarge {
                            name: name.to_string(),
                            line: line_no,
                            limit: self.options.max_template_len,
                        });
                    }
                    current = expanded;
                    changed = true;
                }
            }

            if !changed {
                return Ok(current);
            }
        }

        Err(ConversionError::CyclicMacroExpansion {
            name: name.to_string(),
            line: line_no,
            passes: max_passes,
        })
    }
}
