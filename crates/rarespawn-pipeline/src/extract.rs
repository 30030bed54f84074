//! Pattern-based field extraction from raw alert text.
//!
//! Extraction is a table of `(field, regex)` rules applied in order. Each rule
//! only ever writes its own field, so a missing or malformed marker leaves
//! every other field untouched. When several rules target the same field the
//! first one that matches wins.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::types::{Coordinates, ExtractedFields, SizeFlag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    CountryCode,
    Shiny,
    Species,
    Female,
    Iv,
    CombatPower,
    Level,
    Despawn,
    SizeFlags,
    Place,
    Coordinates,
}

struct ExtractionRule {
    field: Field,
    regex: Regex,
}

fn rule(field: Field, pattern: &str) -> ExtractionRule {
    ExtractionRule {
        field,
        regex: Regex::new(pattern).expect("valid extraction regex"),
    }
}

static RULES: LazyLock<Vec<ExtractionRule>> = LazyLock::new(|| {
    vec![
        rule(Field::CountryCode, r"(?i):flag_(\w+):"),
        rule(Field::Shiny, r"<a:shiny:\d+>"),
        rule(Field::Species, r"\*\*\*(.*?)\*\*\*"),
        rule(Field::Female, "♀"),
        rule(Field::Iv, r"IV(\d+)"),
        rule(Field::CombatPower, r"\*\*CP(\d+)\*\*"),
        rule(Field::Level, r"\*\*L(\d+)\*\*"),
        rule(Field::Despawn, r"DSP in (\d+)m"),
        rule(
            Field::SizeFlags,
            r"\b(WXXL|WXXS|WXL|WXS|HXXL|HXXS|HXL|HXS)\b",
        ),
        // `- *City, Country* -`
        rule(Field::Place, r"-\s*\*([\w\s,]+?)\*\s*-"),
        // `- City, Country -`, asterisks optional
        rule(Field::Place, r"-\s\*?([\w\s,]+)\*?\s*-"),
        // `- City, Country (lat, lng)` with no closing hyphen
        rule(
            Field::Place,
            r"-\s\*?([\w\s,]+?)\*?\s*\(\s*[-+]?\d+\.\d+",
        ),
        rule(
            Field::Coordinates,
            r"\(?\s*([-+]?\d+\.\d+)\s*,\s*([-+]?\d+\.\d+)\s*\)?",
        ),
    ]
});

/// Extract every recognizable attribute from `text`.
///
/// Always succeeds; attributes that are not found stay `None` / `false` /
/// empty.
#[must_use]
pub fn extract(text: &str) -> ExtractedFields {
    let mut fields = ExtractedFields::default();
    for rule in RULES.iter() {
        rule.apply(text, &mut fields);
    }
    fields
}

impl ExtractionRule {
    fn apply(&self, text: &str, fields: &mut ExtractedFields) {
        if self.field == Field::SizeFlags {
            fields.size_flags.extend(
                self.regex
                    .captures_iter(text)
                    .filter_map(|caps| caps.get(1))
                    .filter_map(|m| SizeFlag::from_tag(m.as_str())),
            );
            return;
        }

        if self.is_filled(fields) {
            return;
        }

        let Some(caps) = self.regex.captures(text) else {
            return;
        };

        match self.field {
            Field::CountryCode => {
                fields.country_code = group(&caps, 1).map(str::to_lowercase);
            }
            Field::Shiny => fields.is_shiny = true,
            Field::Species => fields.species_name = group(&caps, 1).map(str::to_string),
            Field::Female => fields.is_female = true,
            Field::Iv => fields.iv_digits = digits(&caps, 1),
            Field::CombatPower => fields.combat_power = digits(&caps, 1),
            Field::Level => fields.level = digits(&caps, 1),
            Field::Despawn => fields.despawn_minutes = digits(&caps, 1),
            Field::Place => {
                fields.place_raw = group(&caps, 1)
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string);
            }
            Field::Coordinates => {
                let lat = group(&caps, 1).and_then(|s| s.parse::<f64>().ok());
                let lng = group(&caps, 2).and_then(|s| s.parse::<f64>().ok());
                if let (Some(lat), Some(lng)) = (lat, lng) {
                    if lat.is_finite() && lng.is_finite() {
                        fields.coordinates = Some(Coordinates::rounded(lat, lng));
                    }
                }
            }
            Field::SizeFlags => {}
        }
    }

    fn is_filled(&self, fields: &ExtractedFields) -> bool {
        match self.field {
            Field::CountryCode => fields.country_code.is_some(),
            Field::Shiny => fields.is_shiny,
            Field::Species => fields.species_name.is_some(),
            Field::Female => fields.is_female,
            Field::Iv => fields.iv_digits.is_some(),
            Field::CombatPower => fields.combat_power.is_some(),
            Field::Level => fields.level.is_some(),
            Field::Despawn => fields.despawn_minutes.is_some(),
            Field::Place => fields.place_raw.is_some(),
            Field::Coordinates => fields.coordinates.is_some(),
            Field::SizeFlags => false,
        }
    }
}

fn group<'t>(caps: &Captures<'t>, idx: usize) -> Option<&'t str> {
    caps.get(idx).map(|m| m.as_str())
}

/// Matched digits kept verbatim, so width and leading zeros survive.
fn digits(caps: &Captures<'_>, idx: usize) -> Option<String> {
    group(caps, idx).map(str::to_string)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
