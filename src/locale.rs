use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::calendar::CalendarDay;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ko,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Ko, Language::En];

    pub fn code(self) -> &'static str {
        self.locale().code
    }

    pub fn locale(self) -> &'static Locale {
        match self {
            Language::Ko => &KO,
            Language::En => &EN,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" => Ok(Language::Ko),
            "en" => Ok(Language::En),
            other => Err(format!("unsupported language '{}' (expected ko or en)", other)),
        }
    }
}

/// How a language names its per-day page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleFormat {
    /// `5월_18일`
    NumericMonthDay,
    /// `May_18`
    MonthNameDay,
}

/// Per-language constants for parsing a day page.
///
/// Section labels double as heading text (`== Events ==`) and as the
/// bracketed display tag on extracted events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub code: &'static str,
    pub events: &'static str,
    pub births: &'static str,
    pub deaths: &'static str,
    pub heading_marker: &'static str,
    /// Appended to the year digits, e.g. `1980년`.
    pub year_suffix: &'static str,
    pub foreign_marker: &'static str,
    pub title_format: TitleFormat,
}

pub const KO: Locale = Locale {
    code: "ko",
    events: "사건",
    births: "탄생",
    deaths: "사망",
    heading_marker: "==",
    year_suffix: "년",
    foreign_marker: "[해외]",
    title_format: TitleFormat::NumericMonthDay,
};

pub const EN: Locale = Locale {
    code: "en",
    events: "Events",
    births: "Births",
    deaths: "Deaths",
    heading_marker: "==",
    year_suffix: "",
    foreign_marker: "[Foreign]",
    title_format: TitleFormat::MonthNameDay,
};

impl Locale {
    pub fn page_title(&self, day: CalendarDay) -> String {
        match self.title_format {
            TitleFormat::NumericMonthDay => format!("{}월_{}일", day.month(), day.day()),
            TitleFormat::MonthNameDay => {
                format!("{}_{}", MONTH_NAMES[day.month() as usize - 1], day.day())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_titles() {
        let day = CalendarDay::new(5, 18).unwrap();
        assert_eq!(KO.page_title(day), "5월_18일");
        assert_eq!(EN.page_title(day), "May_18");

        let dec = CalendarDay::new(12, 1).unwrap();
        assert_eq!(EN.page_title(dec), "December_1");
        assert_eq!(KO.page_title(dec), "12월_1일");
    }

    #[test]
    fn language_codes() {
        assert_eq!("KO".parse::<Language>().unwrap(), Language::Ko);
        assert_eq!(" en ".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::En.to_string(), "en");
    }
}
