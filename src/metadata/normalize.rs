use once_cell::sync::Lazy;
use regex::Regex;

static PATH_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[/\\]+").unwrap());
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}0-9\-',.!?&> _()]+").unwrap());
static NUMERIC_PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([\d\s]*\)\s*").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static EXTENSION_ECHO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s-*\s(?i:flac|m4a|mp3|mp4|shn|wav)$").unwrap());
static SOURCE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*-*\s*\b(?i:128|192|256|320|sbd)$").unwrap());
static LEADING_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-',.!?&>_]+").unwrap());
static TRAILING_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-',.&>_(]+$").unwrap());

/// Collapse runs of whitespace to one space and trim.
pub fn fix_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

fn normalize_once(s: &str) -> String {
    let s = PATH_SEPARATORS.replace_all(s, "_");
    let s = DISALLOWED.replace_all(&s, "");
    let s = NUMERIC_PARENS.replace_all(&s, " ");
    let s = fix_whitespace(&s);
    let s = EXTENSION_ECHO.replace(&s, "");
    let s = SOURCE_MARKER.replace(&s, "");
    let s = LEADING_PUNCT.replace(&s, "");
    let s = TRAILING_PUNCT.replace(&s, "");
    fix_whitespace(&s)
}

/// Clean free text into an album or title candidate.
///
/// Each pass only removes text, so repeating until nothing changes
/// terminates, and the result is stable under another call.
pub fn normalize(s: &str) -> String {
    let mut current = normalize_once(s);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
