use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

// One or more trailing " (xx)" groups, e.g. playoff seeds like "(WC)".
static TRAILING_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\s+\([^)]*\))+$").expect("valid annotation regex"));

/// Text of a node with each text fragment trimmed and the fragments joined.
pub fn extract_text(node: ElementRef) -> String {
    node.text().map(str::trim).collect::<String>()
}

/// Strips trailing parenthetical annotations from a team name.
pub fn strip_trailing_annotation(team: &str) -> String {
    TRAILING_ANNOTATION.replace(team.trim(), "").trim().to_string()
}

/// `label` with whitespace and ASCII punctuation removed.
pub fn squash_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_ascii_punctuation())
        .collect()
}
