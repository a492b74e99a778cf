//! Reduce free-form model output to a single runnable command line.
//!
//! Providers are told to answer with a bare command but often wrap it in
//! markdown or lead with a sentence of prose. Extraction walks a fixed list
//! of strategies, most structurally explicit first, and keeps the first one
//! that yields a non-empty line.

use std::sync::LazyLock;

use regex::Regex;

/// Prompt shown by the interactive shell. Models sometimes echo it back.
pub const REPL_PROMPT: &str = "neri> ";

/// Leading markers stripped from a plain-text candidate line.
const PROMPT_MARKERS: &[&str] = &["$", "neri>", "Emiliano>"];

/// Openings that mark a line as prose rather than a command. Matched against
/// the lower-cased line.
const EXPLANATION_PREFIXES: &[&str] = &[
    "para",
    "usa",
    "este",
    "el comando",
    "la respuesta",
    "you can",
    "this will",
    "use",
    "the command",
];

type Strategy = fn(&str) -> Option<String>;

/// Tried in order; the first `Some` wins.
const STRATEGIES: &[Strategy] = &[fenced_block, inline_code, plain_line, first_non_blank_line];

static FENCED_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:(?:shell|bash|zsh|sh)\b)?[ \t]*\r?\n?(.*?)```").unwrap()
});

static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

/// Extract the best-guess command from `text`.
///
/// Never fails. Returns an empty string only when `text` has no non-blank
/// line, and never returns a string containing a newline.
pub fn sanitize_command(text: &str) -> String {
    let text = text.trim();
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(text))
        .unwrap_or_default()
}

/// First non-blank line inside a fenced block. A fence with a blank interior
/// resolves to the first non-blank line of the whole text instead of falling
/// through to the inline and plain-line strategies.
fn fenced_block(text: &str) -> Option<String> {
    let interior = FENCED_BLOCK_RE.captures(text)?.get(1)?.as_str();
    first_non_blank_line(interior).or_else(|| first_non_blank_line(text))
}

fn inline_code(text: &str) -> Option<String> {
    let interior = INLINE_CODE_RE.captures(text)?.get(1)?.as_str().trim();
    (!interior.is_empty()).then(|| interior.to_string())
}

fn plain_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !looks_like_explanation(line))
        .map(strip_prompt_marker)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

fn first_non_blank_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

fn looks_like_explanation(line: &str) -> bool {
    let lower = line.to_lowercase();
    EXPLANATION_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

fn strip_prompt_marker(line: &str) -> &str {
    PROMPT_MARKERS
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .unwrap_or(line)
        .trim()
}
