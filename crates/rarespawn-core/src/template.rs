//! Output template parsing.
//!
//! A template is plain text with `{name}` slots. `{{` and `}}` produce literal
//! braces. Parsing never fails: a slot whose name is not a known
//! [`Placeholder`] becomes [`Segment::Unknown`] and renders as nothing.

use std::sync::LazyLock;

use regex::Regex;

static SLOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{|\}\}|\{(\w*)\}").expect("valid slot regex"));

/// The fixed set of values a template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Flag,
    ShinySymbol,
    NameCn,
    NameEn,
    Gender,
    Iv,
    SizeInfo,
    Level,
    Cp,
    Dsp,
    CustomLabel,
    TranslatedCity,
    Coords,
}

impl Placeholder {
    pub const ALL: [Placeholder; 13] = [
        Placeholder::Flag,
        Placeholder::ShinySymbol,
        Placeholder::NameCn,
        Placeholder::NameEn,
        Placeholder::Gender,
        Placeholder::Iv,
        Placeholder::SizeInfo,
        Placeholder::Level,
        Placeholder::Cp,
        Placeholder::Dsp,
        Placeholder::CustomLabel,
        Placeholder::TranslatedCity,
        Placeholder::Coords,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Placeholder::Flag => "flag",
            Placeholder::ShinySymbol => "shiny_symbol",
            Placeholder::NameCn => "name_cn",
            Placeholder::NameEn => "name_en",
            Placeholder::Gender => "gender",
            Placeholder::Iv => "iv",
            Placeholder::SizeInfo => "size_info",
            Placeholder::Level => "level",
            Placeholder::Cp => "cp",
            Placeholder::Dsp => "dsp",
            Placeholder::CustomLabel => "custom_label",
            Placeholder::TranslatedCity => "translated_city",
            Placeholder::Coords => "coords",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl std::fmt::Display for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Slot(Placeholder),
    Unknown(String),
}

/// A parsed output template, shared read-only by every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl OutputTemplate {
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in SLOT_RE.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            literal.push_str(&source[last..whole.start()]);
            last = whole.end();

            match (whole.as_str(), caps.get(1)) {
                ("{{", _) => literal.push('{'),
                ("}}", _) => literal.push('}'),
                (_, Some(name)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    let name = name.as_str();
                    segments.push(match Placeholder::from_name(name) {
                        Some(p) => Segment::Slot(p),
                        None => Segment::Unknown(name.to_string()),
                    });
                }
                _ => literal.push_str(whole.as_str()),
            }
        }

        literal.push_str(&source[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: source.to_string(),
            segments,
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of slots that do not map to a known placeholder, in order.
    #[must_use]
    pub fn unknown_placeholders(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Unknown(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}
