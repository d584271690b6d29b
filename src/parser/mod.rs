pub mod extract;
pub mod sanitize;
pub mod sections;
pub mod year;

use crate::calendar::CalendarDay;
use crate::locale::Language;
pub use extract::{Event, EventExtractor, Role};

/// Unparsed wikitext of one day page in one language, fresh or cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub language: Language,
    pub day: CalendarDay,
    pub wikitext: String,
}

/// Line pass over a day page: sections → year filter → cleanup → tagged events.
pub fn extract(document: &RawDocument, target_year: i32, role: Role) -> Vec<Event> {
    EventExtractor::new(document.language.locale(), target_year, role).extract(&document.wikitext)
}
