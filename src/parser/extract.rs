use serde::Serialize;

use super::sanitize;
use super::sections::{SectionClassifier, SectionTag};
use super::year::YearMatcher;
use crate::locale::{Language, Locale};

/// One entry from a day page, already tagged and cleaned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    year: i32,
    text: String,
}

impl Event {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Stand-in event for a language whose page could not be fetched.
    pub fn diagnostic(year: i32, language: Language, error: &dyn std::fmt::Display) -> Self {
        Self {
            year,
            text: format!("[{} Error] {}", language.code().to_uppercase(), error),
        }
    }
}

/// Whether a document is the request's own language or the foreign one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Primary,
    Secondary,
}

pub struct EventExtractor<'a> {
    locale: &'a Locale,
    matcher: YearMatcher,
    target_year: i32,
    role: Role,
}

impl<'a> EventExtractor<'a> {
    pub fn new(locale: &'a Locale, target_year: i32, role: Role) -> Self {
        Self {
            locale,
            matcher: YearMatcher::new(locale, target_year),
            target_year,
            role,
        }
    }

    pub fn extract(&self, wikitext: &str) -> Vec<Event> {
        let mut classifier = SectionClassifier::new(self.locale);
        let mut events = Vec::new();

        for line in wikitext.lines() {
            let trimmed = line.trim();
            let observed = classifier.observe(trimmed);
            if observed.heading {
                continue;
            }
            let Some(section) = observed.section else {
                continue;
            };
            if !self.matcher.matches(trimmed) {
                continue;
            }

            let cleaned = sanitize::clean(trimmed);
            let text = self.strip_leading_year(&cleaned);
            if text.is_empty() {
                continue;
            }
            events.push(Event {
                year: self.target_year,
                text: format!("{} {}", self.prefix(section), text),
            });
        }

        events
    }

    fn prefix(&self, section: SectionTag) -> String {
        let tag = format!("[{}]", section.label(self.locale));
        match self.role {
            Role::Primary => tag,
            Role::Secondary => format!("{}{}", self.locale.foreign_marker, tag),
        }
    }

    /// Entries open with their year (`1980 – ...`); the event already carries
    /// it, so the label and its separator are dropped.
    fn strip_leading_year<'t>(&self, text: &'t str) -> &'t str {
        let Some(rest) = text.strip_prefix(self.matcher.label()) else {
            return text;
        };
        let separator = |c: char| c.is_whitespace() || matches!(c, '–' | '—' | '-' | ':' | ',');
        if !rest.is_empty() && !rest.starts_with(separator) {
            return text;
        }
        rest.trim_start_matches(separator)
    }
}

// ── Tests ──
