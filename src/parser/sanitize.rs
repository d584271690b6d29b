use std::sync::LazyLock;

use regex::Regex;

static PIPED_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[[^|\]]+\|([^\]]+)\]\]").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());
static TEMPLATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{[^}]+\}\}").unwrap());

/// Strip wikitext markup from one line: bullet, links, templates.
///
/// Matching is single pass and stops at the first closing bracket, so nested
/// links or templates come out partially cleaned.
pub fn clean(line: &str) -> String {
    let line = line.trim();
    let line = line.strip_prefix('*').unwrap_or(line).trim();

    let line = PIPED_LINK_RE.replace_all(line, "$1");
    let line = LINK_RE.replace_all(&line, "$1");
    let line = TEMPLATE_RE.replace_all(&line, "");

    line.trim().to_string()
}

// ── Tests ──
