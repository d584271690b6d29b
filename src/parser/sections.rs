use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionTag {
    Events,
    Births,
    Deaths,
}

impl SectionTag {
    pub fn label(self, locale: &Locale) -> &'static str {
        match self {
            SectionTag::Events => locale.events,
            SectionTag::Births => locale.births,
            SectionTag::Deaths => locale.deaths,
        }
    }
}

/// What the classifier made of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observed {
    pub section: Option<SectionTag>,
    pub heading: bool,
}

/// Tracks the current Events/Births/Deaths section while scanning a page.
///
/// Headings that are not one of the three labels leave the current section in
/// place, so entries under e.g. `== See also ==` stay attributed to whatever
/// came before.
pub struct SectionClassifier {
    needles: [(String, SectionTag); 3],
    current: Option<SectionTag>,
}

impl SectionClassifier {
    pub fn new(locale: &Locale) -> Self {
        let needle = |tag: SectionTag| {
            let text = format!(
                "{m} {label} {m}",
                m = locale.heading_marker,
                label = tag.label(locale)
            );
            (text.to_lowercase(), tag)
        };
        Self {
            needles: [
                needle(SectionTag::Events),
                needle(SectionTag::Births),
                needle(SectionTag::Deaths),
            ],
            current: None,
        }
    }

    pub fn observe(&mut self, line: &str) -> Observed {
        let lowered = line.trim().to_lowercase();
        let found = self
            .needles
            .iter()
            .find(|(needle, _)| lowered.contains(needle.as_str()))
            .map(|(_, tag)| *tag);

        if let Some(tag) = found {
            self.current = Some(tag);
        }
        Observed {
            section: self.current,
            heading: found.is_some(),
        }
    }
}

// ── Tests ──
