//! Template rendering and the display form of every field.

use rarespawn_core::{OutputTemplate, Placeholder, Segment};

use crate::resolve::flag_glyph;
use crate::types::ResolvedFields;

pub const UNKNOWN_SPECIES: &str = "未知寶可夢";
pub const UNKNOWN_VALUE: &str = "未知";
pub const NO_DESPAWN: &str = "無 DSP 時間";
pub const UNKNOWN_PLACE: &str = "未知地點";
pub const UNKNOWN_COORDS: &str = "未知座標";
pub const PLACEHOLDER_FLAG: &str = "🏳️";
pub const SHINY_SYMBOL: &str = "✨";
pub const PERFECT_IV: &str = "💯";
pub const FEMALE_SIGN: &str = "♀";
pub const MALE_SIGN: &str = "♂";

/// Display string for one placeholder.
#[must_use]
pub fn placeholder_value(placeholder: Placeholder, resolved: &ResolvedFields, label: &str) -> String {
    let f = &resolved.fields;
    match placeholder {
        Placeholder::Flag => flag_glyph(f.country_code.as_deref()),
        Placeholder::ShinySymbol => {
            if f.is_shiny {
                SHINY_SYMBOL.to_string()
            } else {
                String::new()
            }
        }
        Placeholder::NameCn => resolved
            .localized_species_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_SPECIES.to_string()),
        Placeholder::NameEn => f
            .species_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_SPECIES.to_string()),
        // No third state: anything without the female sign is shown as male.
        Placeholder::Gender => {
            let sign = if f.is_female { FEMALE_SIGN } else { MALE_SIGN };
            sign.to_string()
        }
        Placeholder::Iv => match f.iv_digits.as_deref() {
            Some("100") => PERFECT_IV.to_string(),
            Some(iv) => iv.to_string(),
            None => UNKNOWN_VALUE.to_string(),
        },
        Placeholder::SizeInfo => f
            .size_flags
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        Placeholder::Level => digits_or_unknown(f.level.as_deref()),
        Placeholder::Cp => digits_or_unknown(f.combat_power.as_deref()),
        Placeholder::Dsp => f
            .despawn_minutes
            .as_deref()
            .map_or_else(|| NO_DESPAWN.to_string(), |m| format!("DSP:{m}m")),
        Placeholder::CustomLabel => label.to_string(),
        Placeholder::TranslatedCity => resolved
            .localized_place
            .clone()
            .or_else(|| f.place_raw.clone())
            .unwrap_or_else(|| UNKNOWN_PLACE.to_string()),
        Placeholder::Coords => f
            .coordinates
            .map_or_else(|| UNKNOWN_COORDS.to_string(), |c| c.to_string()),
    }
}

fn digits_or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN_VALUE).to_string()
}

/// Substitute every slot in `template` and trim the result.
///
/// Slots that name no known placeholder render as an empty string.
#[must_use]
pub fn render(template: &OutputTemplate, resolved: &ResolvedFields, label: &str) -> String {
    let mut out = String::with_capacity(template.source().len() + 64);
    for segment in template.segments() {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Slot(p) => out.push_str(&placeholder_value(*p, resolved, label)),
            Segment::Unknown(_) => {}
        }
    }
    out.trim().to_string()
}
