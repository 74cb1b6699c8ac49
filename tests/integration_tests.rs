//! Integration tests for sty2katex stylesheet conversion

use pretty_assertions::assert_eq;
use sty2katex::{
    diagnostics::check_stylesheet, parse_macros, parse_macros_with_diagnostics,
    parse_macros_with_options, ConversionError, MacroMap, ParseOptions,
};

const FIXTURE: &str = include_str!("fixtures/macros.sty");

fn entries(macros: &MacroMap) -> Vec<(&str, &str)> {
    macros
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

// ============================================================================
// Definition forms
// ============================================================================

mod definitions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_newcommand() {
        let macros = parse_macros(r"\newcommand{\foo}{bar}").unwrap();
        assert_eq!(entries(&macros), vec![(r"\foo", "bar")]);
    }

    #[test]
    fn test_newcommand_with_arguments_is_unchanged() {
        let macros = parse_macros(r"\newcommand{\pair}[2]{\langle #1, #2 \rangle}").unwrap();
        assert_eq!(macros[r"\pair"], r"\langle #1, #2 \rangle");
    }

    #[test]
    fn test_optional_argument_is_collapsed() {
        let macros = parse_macros(r"\newcommand{\foo}[2][x]{#1-#2}").unwrap();
        assert_eq!(macros[r"\foo"], "x-#1");
    }

    #[test]
    fn test_renewcommand_is_accepted() {
        let macros = parse_macros(r"\renewcommand{\vec}[1]{\mathbf{#1}}").unwrap();
        assert_eq!(macros[r"\vec"], r"\mathbf{#1}");
    }

    #[test]
    fn test_math_operator() {
        let macros = parse_macros(r"\DeclareMathOperator{\argmax}{arg\,max}").unwrap();
        assert_eq!(macros[r"\argmax"], r"\operatorname{arg\,max}");
    }

    #[test]
    fn test_starred_math_operator() {
        let macros = parse_macros(r"\DeclareMathOperator*{\sup}{sup}").unwrap();
        assert_eq!(macros[r"\sup"], r"\operatorname*{sup}");
    }

    #[test]
    fn test_unrecognized_lines_contribute_nothing() {
        let source = r"
\documentclass{article}
\usepackage{amsmath}
\def\foo{bar}
\newcommand{\broken}[x]{y}
plain text
";
        assert!(parse_macros(source).unwrap().is_empty());
    }

    #[test]
    fn test_leading_whitespace_is_ignored() {
        let macros = parse_macros("    \\newcommand{\\foo}{bar}   ").unwrap();
        assert_eq!(macros[r"\foo"], "bar");
    }
}

// ============================================================================
// Optional-argument calls inside other definitions
// ============================================================================

mod optional_calls {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_call_is_expanded() {
        let source = r"
\newcommand{\foo}[2][x]{#1-#2}
\newcommand{\bar}{\foo[y]{z}}
";
        let macros = parse_macros(source).unwrap();
        assert_eq!(macros[r"\bar"], "y-z");
    }

    #[test]
    fn test_call_before_definition_is_expanded() {
        let source = r"
\newcommand{\bar}{\foo[y]{z}}
\newcommand{\foo}[2][x]{#1-#2}
";
        let macros = parse_macros(source).unwrap();
        assert_eq!(macros[r"\bar"], "y-z");
    }

    #[test]
    fn test_call_without_brackets_is_kept() {
        let source = r"
\newcommand{\foo}[2][x]{#1-#2}
\newcommand{\bar}{\foo{z}}
";
        let macros = parse_macros(source).unwrap();
        assert_eq!(macros[r"\bar"], r"\foo{z}");
    }

    #[test]
    fn test_call_forwarding_parameters() {
        let source = r"
\newcommand{\norm}[2][2]{\|#2\|_{#1}}
\newcommand{\supnorm}[1]{\norm[\infty]{#1}}
";
        let macros = parse_macros(source).unwrap();
        assert_eq!(macros[r"\supnorm"], r"\|#1\|_{\infty}");
    }

    #[test]
    fn test_call_inside_optional_macro() {
        let source = r"
\newcommand{\inner}[2][i]{(#1;#2)}
\newcommand{\outer}[2][o]{\inner[#1]{#2}!}
";
        let macros = parse_macros(source).unwrap();
        assert_eq!(macros[r"\inner"], "(i;#1)");
        assert_eq!(macros[r"\outer"], "(o;#1)!");
    }

    #[test]
    fn test_chain_of_three() {
        let source = r"
\newcommand{\c}[1][c]{<#1>}
\newcommand{\b}[1][b]{\c[#1#1]}
\newcommand{\a}[1][a]{\b[#1]}
\newcommand{\use}{\a[z]}
";
        let macros = parse_macros(source).unwrap();
        assert_eq!(macros[r"\use"], "<zz>");
        assert_eq!(macros[r"\a"], "<aa>");
    }

    #[test]
    fn test_several_calls_in_one_template() {
        let source = r"
\newcommand{\ip}[3][]{\langle #2, #3 \rangle_{#1}}
\newcommand{\both}{\ip[A]{u}{v} + \ip[B]{\frac{1}{2}}{w}}
";
        let macros = parse_macros(source).unwrap();
        assert_eq!(
            macros[r"\both"],
            r"\langle u, v \rangle_{A} + \langle \frac{1}{2}, w \rangle_{B}"
        );
    }

    #[test]
    fn test_rewritten_output_is_stable() {
        let source = r"
\newcommand{\foo}[2][x]{#1-#2}
\newcommand{\bar}{\foo[y]{z}}
\DeclareMathOperator{\tr}{tr}
";
        let first = parse_macros(source).unwrap();

        let regenerated: String = first
            .iter()
            .map(|(name, template)| format!("\\newcommand{{{}}}{{{}}}\n", name, template))
            .collect();
        let second = parse_macros(&regenerated).unwrap();

        assert_eq!(first, second);
    }
}

// ============================================================================
// Comments, ordering and duplicates
// ============================================================================

mod normalization {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_comment_is_stripped() {
        let with_comment = parse_macros(r"\newcommand{\x}{1} % comment").unwrap();
        let without = parse_macros(r"\newcommand{\x}{1}").unwrap();
        assert_eq!(with_comment, without);
    }

    #[test]
    fn test_escaped_percent_is_kept() {
        let macros = parse_macros(r"\newcommand{\x}{50\%}").unwrap();
        assert_eq!(macros[r"\x"], r"50\%");
    }

    #[test]
    fn test_commented_out_definition() {
        let macros = parse_macros(r"% \newcommand{\x}{1}").unwrap();
        assert!(macros.is_empty());
    }

    #[test]
    fn test_last_definition_wins() {
        let source = r"
\newcommand{\x}{first}
\newcommand{\y}{other}
\newcommand{\x}{second}
";
        let macros = parse_macros(source).unwrap();
        assert_eq!(entries(&macros), vec![(r"\x", "second"), (r"\y", "other")]);
    }

    #[test]
    fn test_crlf_input() {
        let macros = parse_macros("\\newcommand{\\a}{1}\r\n\\newcommand{\\b}{2}\r\n").unwrap();
        assert_eq!(entries(&macros), vec![(r"\a", "1"), (r"\b", "2")]);
    }
}

// ============================================================================
// Error handling
// ============================================================================

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cyclic_expansion_fails() {
        let source = r"
\newcommand{\ping}[1][x]{\pong[#1]}
\newcommand{\pong}[1][y]{\ping[#1]}
";
        let err = parse_macros(source).unwrap_err();
        match err {
            ConversionError::CyclicMacroExpansion { name, line, passes } => {
                assert_eq!(name, r"\ping");
                assert_eq!(line, 2);
                assert_eq!(passes, 100);
            }
            other => panic!("expected cyclic expansion, got {:?}", other),
        }
    }

    #[test]
    fn test_pass_limit_is_configurable() {
        let source = r"
\newcommand{\ping}[1][x]{\pong[#1]}
\newcommand{\pong}[1][y]{\ping[#1]}
";
        let options = ParseOptions::strict();
        let err = parse_macros_with_options(source, &options).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::CyclicMacroExpansion { passes: 16, .. }
        ));
    }

    #[test]
    fn test_runaway_growth_fails() {
        let source = r"
\newcommand{\twice}[1][a]{\twice[#1]\twice[#1]}
";
        let options = ParseOptions::default().with_max_template_len(1024);
        let err = parse_macros_with_options(source, &options).unwrap_err();
        assert!(matches!(err, ConversionError::ExpansionTooLarge { .. }));
    }
}

// ============================================================================
// Full stylesheet
// ============================================================================

mod stylesheet {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixture_conversion() {
        let macros = parse_macros(FIXTURE).unwrap();
        assert_eq!(
            entries(&macros),
            vec![
                (r"\N", r"\mathbb{N}"),
                (r"\R", r"\mathbb{R}"),
                (r"\C", r"\mathbb{C}^{\times}"),
                (r"\norm", r"\left\|#1\right\|_{2}"),
                (r"\dd", r"\,\mathrm{d}x"),
                (r"\pdv", r"\frac{\partial^{} #1}{\partial #2^{}}"),
                (r"\supnorm", r"\left\|#1\right\|_{\infty}"),
                (r"\hessian", r"\frac{\partial^{2} #1}{\partial x^{2}}"),
                (r"\integral", r"\int #1 \,\mathrm{d}#2"),
                (r"\tr", r"\operatorname{tr}"),
                (r"\argmax", r"\operatorname*{arg\,max}"),
                (r"\argmin", r"\operatorname*{arg\,min}"),
                (r"\pct", r"#1\,\%"),
            ]
        );
    }

    #[test]
    fn test_fixture_warnings() {
        let output = parse_macros_with_diagnostics(FIXTURE).unwrap();
        let lines: Vec<_> = output.warnings.iter().map(|w| w.line).collect();
        assert_eq!(lines, vec![Some(26), Some(27)]);
        assert!(output.warnings[0].message.contains(r"'\C'"));
        assert!(output.warnings[1].message.contains(r"\def"));
    }

    #[test]
    fn test_fixture_check() {
        let result = check_stylesheet(FIXTURE);
        assert!(!result.has_errors());
        assert_eq!(result.warnings, 2);
        assert_eq!(result.infos, 1);
    }
}

// ============================================================================
// Export
// ============================================================================

#[cfg(feature = "json")]
mod export {
    use super::*;
    use pretty_assertions::assert_eq;
    use sty2katex::export::{export_macros, OutputFormat};

    #[test]
    fn test_export_preserves_order() {
        let macros = parse_macros(FIXTURE).unwrap();
        let json = export_macros(&macros, OutputFormat::Json, false).unwrap();
        let n = json.find(r#""\\N""#).unwrap();
        let pct = json.find(r#""\\pct""#).unwrap();
        assert!(n < pct);
    }

    #[test]
    fn test_export_js_module() {
        let macros = parse_macros(r"\newcommand{\R}{\mathbb{R}}").unwrap();
        let js = export_macros(&macros, OutputFormat::JsModule, false).unwrap();
        assert_eq!(js, "export default {\"\\\\R\":\"\\\\mathbb{R}\"};\n");
    }
}
