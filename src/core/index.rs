//! Optional-argument macro index
//!
//! KaTeX's `\newcommand` has no optional arguments, so every macro declared
//! as `\newcommand{\name}[n][default]{...}` is collected here first. Other
//! definitions use these macros with the bracketed call syntax
//! `\name[opt]{a}{b}`, and such calls are expanded in place before the
//! definitions are emitted.
//!
//! See:
//! - <https://github.com/KaTeX/KaTeX/issues/2228>
//! - <https://github.com/KaTeX/KaTeX/pull/4058>

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::definition::{match_new_command, LineMatch, MacroDefinition};
use super::normalize::normalized_lines;

lazy_static! {
    /// Positional placeholder `#1`, `#2`, ...
    pub(crate) static ref PLACEHOLDER_RE: Regex = Regex::new(r"#([0-9]+)").unwrap();
}

/// Replace every `#k` placeholder in `template` using `lookup`.
///
/// Placeholders for which `lookup` returns `None` are kept verbatim.
pub(crate) fn substitute_placeholders<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(usize) -> Option<Cow<'a, str>>,
{
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(&lookup)
                .map(Cow::into_owned)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// A macro whose first parameter is optional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalArgMacro {
    /// Control sequence including the backslash
    pub name: String,
    /// Declared parameter count, the optional one included
    pub arg_count: usize,
    /// Declared default for the optional parameter
    pub default: String,
    pub template: String,
    /// Source line (1-indexed)
    pub line: usize,
}

/// One bracketed call `\name[opt]{a1}..{ak}` found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroCall<'a> {
    /// Byte offset of the backslash
    pub start: usize,
    /// Byte offset just past the last brace group
    pub end: usize,
    pub optional: &'a str,
    pub args: Vec<&'a str>,
}

impl OptionalArgMacro {
    /// Build an entry from a parsed definition; `None` if it has no default.
    pub fn from_definition(def: &MacroDefinition, line: usize) -> Option<Self> {
        let default = def.optional_default.as_ref()?;
        if def.name.is_empty() {
            return None;
        }
        Some(Self {
            name: def.name.clone(),
            arg_count: def.arg_count,
            default: default.clone(),
            template: def.template.clone(),
            line,
        })
    }

    /// Number of brace groups that follow the bracket at a call site
    pub fn positional_count(&self) -> usize {
        self.arg_count.saturating_sub(1)
    }

    /// Expand the template for an explicit optional argument.
    ///
    /// `#1` receives `optional`; `#k` for `k > 1` receives `args[k - 2]`.
    pub fn expand(&self, optional: &str, args: &[&str]) -> String {
        substitute_placeholders(&self.template, |k| match k {
            0 => None,
            1 => Some(Cow::Borrowed(optional)),
            k => args.get(k - 2).map(|a| Cow::Borrowed(*a)),
        })
    }

    /// Find the first bracketed call at or after byte offset `from`.
    pub fn find_call<'a>(&self, text: &'a str, from: usize) -> Option<MacroCall<'a>> {
        let needle = format!("{}[", self.name);
        let mut search = from;

        while let Some(pos) = text.get(search..)?.find(&needle) {
            let start = search + pos;
            let bracket = start + self.name.len();
            if let Some(call) = self.parse_call_at(text, start, bracket) {
                return Some(call);
            }
            search = bracket;
        }

        None
    }

    fn parse_call_at<'a>(&self, text: &'a str, start: usize, bracket: usize) -> Option<MacroCall<'a>> {
        let (optional, consumed) = extract_bracketed(&text[bracket..])?;
        let mut pos = bracket + consumed;

        let mut args = Vec::with_capacity(self.positional_count());
        for _ in 0..self.positional_count() {
            let (arg, consumed) = extract_braced_arg(&text[pos..])?;
            args.push(arg);
            pos += consumed;
        }

        Some(MacroCall {
            start,
            end: pos,
            optional,
            args,
        })
    }

    /// Replace every call in `text` with its expansion, left to right.
    ///
    /// Returns `None` when `text` contains no call. Expanded text is not
    /// rescanned within the same call.
    pub fn expand_calls(&self, text: &str) -> Option<String> {
        let mut result = String::with_capacity(text.len());
        let mut last = 0;
        let mut found = false;

        while let Some(call) = self.find_call(text, last) {
            result.push_str(&text[last..call.start]);
            result.push_str(&self.expand(call.optional, &call.args));
            last = call.end;
            found = true;
        }

        if !found {
            return None;
        }
        result.push_str(&text[last..]);
        Some(result)
    }
}

/// Extract `[content]`, stopping at the first `]` outside braces.
///
/// Returns the content and the number of bytes consumed.
fn extract_bracketed(input: &str) -> Option<(&str, usize)> {
    if !input.starts_with('[') {
        return None;
    }

    let mut depth = 0i32;
    for (i, c) in input.char_indices().skip(1) {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            ']' if depth <= 0 => return Some((&input[1..i], i + 1)),
            _ => {}
        }
    }

    None
}

/// Extract a balanced `{content}` group.
///
/// Returns the content and the number of bytes consumed.
fn extract_braced_arg(input: &str) -> Option<(&str, usize)> {
    if !input.starts_with('{') {
        return None;
    }

    let mut depth = 0;
    for (i, c) in input.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&input[1..i], i + 1));
                }
            }
            _ => {}
        }
    }

    None
}

/// Ordered collection of optional-argument macros from one source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionalArgIndex {
    entries: Vec<OptionalArgMacro>,
}

impl OptionalArgIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan raw source text and collect every optional-argument macro in
    /// line order. Lines that are anything else are ignored.
    pub fn build(source: &str) -> Self {
        let mut index = Self::new();
        for (line_no, line) in normalized_lines(source) {
            if let LineMatch::GenericMacro(def) = match_new_command(line) {
                if let Some(entry) = OptionalArgMacro::from_definition(&def, line_no) {
                    index.entries.push(entry);
                }
            }
        }
        index
    }

    pub fn push(&mut self, entry: OptionalArgMacro) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionalArgMacro> {
        self.entries.iter()
    }

    /// First entry registered under `name`
    pub fn get(&self, name: &str) -> Option<&OptionalArgMacro> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
