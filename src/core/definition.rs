//! Definition line recognition
//!
//! Two definition forms are understood, tried in this order:
//!
//! - `\newcommand{\name}[n][default]{template}` (and `\renewcommand`), where
//!   both bracket groups are optional but the default requires the count
//! - `\DeclareMathOperator{\name}{template}` and its starred variant
//!
//! Neither pattern is anchored at the end of the line: the template group
//! runs greedily up to the last `}` on the line.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `\newcommand` / `\renewcommand` with optional `[n]` and `[default]`
    static ref NEW_COMMAND_RE: Regex = Regex::new(
        r"^\s*\\(?:re)?newcommand\{(?P<name>[^}]*)\}(?:\[(?P<nargs>[0-9]+)\](?:\[(?P<optional>[^\]]*)\])?)?\{(?P<template>.*)\}"
    )
    .unwrap();

    /// `\DeclareMathOperator` with optional `*` for limits
    static ref DECLARE_MATH_OPERATOR_RE: Regex = Regex::new(
        r"\\DeclareMathOperator(?P<limits>\*?)\{(?P<name>[^}]*)\}\{(?P<template>.*)\}"
    )
    .unwrap();
}

/// A `\newcommand` definition as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDefinition {
    /// Control sequence including the backslash, e.g. `\foo`
    pub name: String,
    /// Declared parameter count (`0` when the `[n]` group is absent)
    pub arg_count: usize,
    /// Default for the first parameter, when one is declared
    pub optional_default: Option<String>,
    /// Body with `#1..#n` placeholders
    pub template: String,
}

impl MacroDefinition {
    /// Whether the first parameter is optional
    pub fn has_optional_arg(&self) -> bool {
        self.optional_default.is_some()
    }
}

/// A `\DeclareMathOperator` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathOperatorDeclaration {
    pub name: String,
    /// Starred form: limits go above/below in display style
    pub limits: bool,
    pub template: String,
}

impl MathOperatorDeclaration {
    /// Render as an `\operatorname` expansion
    pub fn to_operatorname(&self) -> String {
        let star = if self.limits { "*" } else { "" };
        format!("\\operatorname{}{{{}}}", star, self.template)
    }
}

/// Outcome of matching a single normalized line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    /// Not a recognized definition
    NoMatch,
    GenericMacro(MacroDefinition),
    MathOperator(MathOperatorDeclaration),
    /// Looks like a `\newcommand` but cannot be used as one
    Malformed { name: String, message: String },
}

/// Try the `\newcommand` pattern on a normalized line.
pub fn match_new_command(line: &str) -> LineMatch {
    let Some(caps) = NEW_COMMAND_RE.captures(line) else {
        return LineMatch::NoMatch;
    };

    let name = caps["name"].to_string();
    let arg_count = match caps.name("nargs") {
        Some(n) => match n.as_str().parse::<usize>() {
            Ok(count) => count,
            Err(_) => {
                return LineMatch::Malformed {
                    name,
                    message: format!("argument count '{}' is out of range", n.as_str()),
                }
            }
        },
        None => 0,
    };

    LineMatch::GenericMacro(MacroDefinition {
        name,
        arg_count,
        optional_default: caps.name("optional").map(|m| m.as_str().to_string()),
        template: caps["template"].to_string(),
    })
}

/// Try the `\DeclareMathOperator` pattern on a normalized line.
pub fn match_math_operator(line: &str) -> LineMatch {
    match DECLARE_MATH_OPERATOR_RE.captures(line) {
        Some(caps) => LineMatch::MathOperator(MathOperatorDeclaration {
            name: caps["name"].to_string(),
            limits: !caps["limits"].is_empty(),
            template: caps["template"].to_string(),
        }),
        None => LineMatch::NoMatch,
    }
}

/// Classify a normalized line, generic macro first.
pub fn match_definition(line: &str) -> LineMatch {
    match match_new_command(line) {
        LineMatch::NoMatch => match_math_operator(line),
        other => other,
    }
}
