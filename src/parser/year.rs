use regex::Regex;

use crate::locale::Locale;

/// Recognizes a reference to one year anywhere in a line, with or without
/// `[[...]]` link decoration.
///
/// Unanchored and without word boundaries: `1980` also hits `19801`.
#[derive(Debug, Clone)]
pub struct YearMatcher {
    re: Regex,
    label: String,
}

impl YearMatcher {
    pub fn new(locale: &Locale, year: i32) -> Self {
        let label = format!("{}{}", year, locale.year_suffix);
        let pattern = format!(r"(?:\[\[)?{}(?:\]\])?", regex::escape(&label));
        let re = Regex::new(&pattern).expect("year pattern is built from escaped literals");
        Self { re, label }
    }

    pub fn matches(&self, line: &str) -> bool {
        self.re.is_match(line)
    }

    /// The year as it reads in cleaned text, e.g. `1980년`.
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{EN, KO};

    #[test]
    fn bracketed_and_bare() {
        let m = YearMatcher::new(&EN, 1980);
        assert!(m.matches("* [[1980]] – Something"));
        assert!(m.matches("* 1980 – Something"));
        assert!(m.matches("born in the year 1980, probably"));
        assert!(!m.matches("* [[1981]] – Something else"));
    }

    #[test]
    fn substring_false_positive_is_accepted() {
        let m = YearMatcher::new(&EN, 198);
        assert!(m.matches("* [[1980]] – Something"));
        assert!(YearMatcher::new(&EN, 1980).matches("population 19801"));
    }

    #[test]
    fn korean_needs_suffix() {
        let m = YearMatcher::new(&KO, 1980);
        assert!(m.matches("* [[1980년]] - 사건"));
        assert!(!m.matches("* [[1980]] - 사건"));
        assert_eq!(m.label(), "1980년");
    }
}
