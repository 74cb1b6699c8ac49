//! Stylesheet parser
//!
//! Drives the two scans over the source: the optional-argument index is
//! built first, then every line is rewritten against it and collected into
//! an ordered [`MacroMap`]. Later definitions of the same name overwrite
//! earlier ones but keep the position of the first.

use fxhash::FxHashMap;
use indexmap::IndexMap;

use super::context::ParseOptions;
use super::index::OptionalArgIndex;
use super::normalize::normalized_lines;
use super::rewrite::{DefinitionRewriter, LineOutcome};
use crate::utils::error::{ConversionResult, ConversionWarning};

/// Macro name (with backslash) to KaTeX expansion template
pub type MacroMap = IndexMap<String, String>;

/// Definition commands KaTeX stylesheets commonly contain but this parser
/// does not rewrite, with a hint for each
static UNSUPPORTED_DEFINITIONS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "\\def" => "rewrite as \\newcommand{\\name}[n]{...}",
    "\\gdef" => "rewrite as \\newcommand{\\name}[n]{...}",
    "\\edef" => "rewrite as \\newcommand{\\name}[n]{...}",
    "\\let" => "rewrite as \\newcommand{\\name}{\\target}",
    "\\providecommand" => "use \\newcommand instead",
    "\\DeclareRobustCommand" => "use \\newcommand instead",
    "\\NewDocumentCommand" => "use \\newcommand with an optional argument instead",
    "\\newcommand*" => "drop the star",
    "\\renewcommand*" => "drop the star",
};

/// Commands whose presence marks a line as an attempted definition
const DEFINITION_COMMANDS: [&str; 3] = ["\\newcommand", "\\renewcommand", "\\DeclareMathOperator"];

/// Parsed macros together with everything that was skipped or overridden
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroOutput {
    /// The converted macro table
    pub macros: MacroMap,
    /// Non-fatal issues found while parsing
    pub warnings: Vec<ConversionWarning>,
}

impl MacroOutput {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Converts stylesheet text into a KaTeX macro table
#[derive(Debug, Clone, Default)]
pub struct MacroParser {
    options: ParseOptions,
}

impl MacroParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `source` into a macro table
    pub fn parse(&self, source: &str) -> ConversionResult<MacroMap> {
        self.parse_with_diagnostics(source).map(|output| output.macros)
    }

    /// Parse `source`, also reporting skipped lines and redefinitions
    pub fn parse_with_diagnostics(&self, source: &str) -> ConversionResult<MacroOutput> {
        let index = OptionalArgIndex::build(source);
        let rewriter = DefinitionRewriter::new(&index, &self.options);

        let mut output = MacroOutput::default();
        let mut defined_at: FxHashMap<String, usize> = FxHashMap::default();

        for (line_no, line) in normalized_lines(source) {
            match rewriter.rewrite_line(line_no, line)? {
                LineOutcome::Rewritten { name, template } => {
                    if let Some(previous) = defined_at.insert(name.clone(), line_no) {
                        output.warnings.push(
                            ConversionWarning::at(
                                line_no,
                                format!("'{}' redefines the macro from line {}", name, previous),
                            )
                            .with_suggestion("the later definition wins"),
                        );
                    }
                    output.macros.insert(name, template);
                }
                LineOutcome::Malformed { name, message } => {
                    output.warnings.push(ConversionWarning::at(
                        line_no,
                        format!("skipped definition of '{}': {}", name, message),
                    ));
                }
                LineOutcome::NoMatch => {
                    if let Some(warning) = diagnose_unrecognized(line_no, line) {
                        output.warnings.push(warning);
                    }
                }
            }
        }

        Ok(output)
    }
}

/// Explain why a line that looks like a definition produced nothing.
fn diagnose_unrecognized(line_no: usize, line: &str) -> Option<ConversionWarning> {
    for (command, suggestion) in UNSUPPORTED_DEFINITIONS.entries() {
        if starts_with_command(line, command) {
            return Some(
                ConversionWarning::at(line_no, format!("'{}' definitions are not supported", command))
                    .with_suggestion(*suggestion),
            );
        }
    }

    if DEFINITION_COMMANDS.iter().any(|cmd| line.contains(cmd)) {
        let warning = ConversionWarning::at(line_no, "definition could not be parsed");
        let opens = line.matches('{').count();
        let closes = line.matches('}').count();
        return Some(if opens > closes {
            warning.with_suggestion("definitions must fit on a single line")
        } else {
            warning
        });
    }

    None
}

/// `line` starts with `command` and the command name ends right there
fn starts_with_command(line: &str, command: &str) -> bool {
    match line.strip_prefix(command) {
        Some(rest) => {
            command.ends_with('*') || !rest.starts_with(|c: char| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let macros = MacroParser::new()
            .parse(r"\newcommand{\foo}{bar}")
            .unwrap();
        assert_eq!(macros.get(r"\foo").map(String::as_str), Some("bar"));
        assert_eq!(macros.len(), 1);
    }

    #[test]
    fn test_last_definition_wins_in_first_position() {
        let source = r"
\newcommand{\x}{1}
\newcommand{\y}{2}
\renewcommand{\x}{3}
";
        let output = MacroParser::new().parse_with_diagnostics(source).unwrap();
        let entries: Vec<_> = output
            .macros
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(entries, vec![(r"\x", "3"), (r"\y", "2")]);

        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].line, Some(4));
        assert!(output.warnings[0].message.contains("line 2"));
    }

    #[test]
    fn test_unsupported_definition_warning() {
        let output = MacroParser::new()
            .parse_with_diagnostics(r"\def\foo{bar}")
            .unwrap();
        assert!(output.macros.is_empty());
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].message.contains(r"\def"));
        assert!(output.warnings[0].suggestion.is_some());
    }

    #[test]
    fn test_starred_newcommand_warning() {
        let output = MacroParser::new()
            .parse_with_diagnostics(r"\newcommand*{\foo}{bar}")
            .unwrap();
        assert!(output.macros.is_empty());
        assert_eq!(
            output.warnings[0].suggestion.as_deref(),
            Some("drop the star")
        );
    }

    #[test]
    fn test_multiline_definition_warning() {
        let source = "\\newcommand{\\foo}{\n  bar\n}";
        let output = MacroParser::new().parse_with_diagnostics(source).unwrap();
        assert!(output.macros.is_empty());
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(
            output.warnings[0].suggestion.as_deref(),
            Some("definitions must fit on a single line")
        );
    }

    #[test]
    fn test_plain_lines_are_silent() {
        let source = r"
\usepackage{amsmath}
% just a comment
\left( x \right)
";
        let output = MacroParser::new().parse_with_diagnostics(source).unwrap();
        assert!(output.macros.is_empty());
        assert!(!output.has_warnings());
    }

    #[test]
    fn test_starts_with_command() {
        assert!(starts_with_command(r"\def\foo{x}", r"\def"));
        assert!(!starts_with_command(r"\defeq", r"\def"));
        assert!(!starts_with_command(r"\left(", r"\let"));
        assert!(starts_with_command(r"\newcommand*{\x}{y}", r"\newcommand*"));
    }
}
