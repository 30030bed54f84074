//! Localization of the species name, the place string, and the country flag.

use std::sync::Arc;
use std::time::Duration;

use rarespawn_core::NameTable;

use crate::error::TranslateError;
use crate::render::{PLACEHOLDER_FLAG, UNKNOWN_PLACE};
use crate::translate::Translator;
use crate::types::{ExtractedFields, ResolvedFields};

/// Offset from an ASCII capital letter to its regional indicator symbol.
const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

/// Language pair and time budget for one translation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateSettings {
    pub source_lang: String,
    pub target_lang: String,
    pub timeout: Duration,
}

impl Default for TranslateSettings {
    fn default() -> Self {
        Self {
            source_lang: "en".to_string(),
            target_lang: "zh-TW".to_string(),
            timeout: Duration::from_secs(3),
        }
    }
}

/// Maps extracted values to display values. Never fails: every lookup or
/// translation miss falls back to the raw value.
#[derive(Clone)]
pub struct Resolver {
    names: Arc<NameTable>,
    translator: Arc<dyn Translator>,
    settings: TranslateSettings,
}

impl Resolver {
    pub fn new(
        names: Arc<NameTable>,
        translator: Arc<dyn Translator>,
        settings: TranslateSettings,
    ) -> Self {
        Self {
            names,
            translator,
            settings,
        }
    }

    pub async fn resolve(&self, fields: ExtractedFields) -> ResolvedFields {
        let localized_species_name = fields
            .species_name
            .as_deref()
            .map(|s| self.localize_species(s));

        let localized_place = match fields.place_raw.as_deref() {
            Some(place) => Some(self.localize_place(place).await),
            None => None,
        };

        ResolvedFields {
            fields,
            localized_species_name,
            localized_place,
        }
    }

    /// Table lookup; unknown species pass through unchanged.
    #[must_use]
    pub fn localize_species(&self, species: &str) -> String {
        self.names.get(species).unwrap_or(species).to_string()
    }

    /// Translate a place string, keeping the region part after the first
    /// comma untranslated. Returns `place` unchanged on any failure.
    pub async fn localize_place(&self, place: &str) -> String {
        let trimmed = place.trim();
        if trimmed.is_empty() || trimmed == UNKNOWN_PLACE {
            return place.to_string();
        }

        match trimmed.split_once(',') {
            Some((city, region)) => {
                let city = city.trim();
                if city.is_empty() {
                    return place.to_string();
                }
                match self.translate_bounded(city).await {
                    Ok(translated) => format!("{translated}，{}", region.trim()),
                    Err(e) => {
                        tracing::warn!(place, error = %e, "city translation failed; using original place");
                        place.to_string()
                    }
                }
            }
            None => match self.translate_bounded(trimmed).await {
                Ok(translated) => translated,
                Err(e) => {
                    tracing::warn!(place, error = %e, "place translation failed; using original place");
                    place.to_string()
                }
            },
        }
    }

    async fn translate_bounded(&self, text: &str) -> Result<String, TranslateError> {
        let call = self.translator.translate(
            text,
            &self.settings.source_lang,
            &self.settings.target_lang,
        );
        let translated = tokio::time::timeout(self.settings.timeout, call)
            .await
            .map_err(|_| {
                TranslateError::Timeout(
                    u64::try_from(self.settings.timeout.as_millis()).unwrap_or(u64::MAX),
                )
            })??;

        let translated = translated.trim();
        if translated.is_empty() {
            return Err(TranslateError::EmptyResponse);
        }
        Ok(translated.to_string())
    }
}

/// Two-letter country code → flag emoji; anything else → the placeholder flag.
#[must_use]
pub fn flag_glyph(country_code: Option<&str>) -> String {
    let Some(code) = country_code else {
        return PLACEHOLDER_FLAG.to_string();
    };

    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return PLACEHOLDER_FLAG.to_string();
    }

    code.chars()
        .map(|c| char::from_u32(u32::from(c.to_ascii_uppercase()) + REGIONAL_INDICATOR_OFFSET))
        .collect::<Option<String>>()
        .unwrap_or_else(|| PLACEHOLDER_FLAG.to_string())
}
