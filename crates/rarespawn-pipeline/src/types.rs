use serde::Serialize;

/// One inbound alert: the submitter identity and the raw text it posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub identity: String,
    pub text: String,
}

impl RawMessage {
    pub fn new(identity: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            text: text.into(),
        }
    }
}

/// Weight / height size tags printed on an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SizeFlag {
    #[serde(rename = "WXXL")]
    Wxxl,
    #[serde(rename = "WXXS")]
    Wxxs,
    #[serde(rename = "WXL")]
    Wxl,
    #[serde(rename = "WXS")]
    Wxs,
    #[serde(rename = "HXXL")]
    Hxxl,
    #[serde(rename = "HXXS")]
    Hxxs,
    #[serde(rename = "HXL")]
    Hxl,
    #[serde(rename = "HXS")]
    Hxs,
}

impl SizeFlag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SizeFlag::Wxxl => "WXXL",
            SizeFlag::Wxxs => "WXXS",
            SizeFlag::Wxl => "WXL",
            SizeFlag::Wxs => "WXS",
            SizeFlag::Hxxl => "HXXL",
            SizeFlag::Hxxs => "HXXS",
            SizeFlag::Hxl => "HXL",
            SizeFlag::Hxs => "HXS",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "WXXL" => Some(SizeFlag::Wxxl),
            "WXXS" => Some(SizeFlag::Wxxs),
            "WXL" => Some(SizeFlag::Wxl),
            "WXS" => Some(SizeFlag::Wxs),
            "HXXL" => Some(SizeFlag::Hxxl),
            "HXXS" => Some(SizeFlag::Hxxs),
            "HXL" => Some(SizeFlag::Hxl),
            "HXS" => Some(SizeFlag::Hxs),
            _ => None,
        }
    }
}

impl std::fmt::Display for SizeFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latitude / longitude, each already rounded to 4 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn rounded(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: round4(latitude),
            longitude: round4(longitude),
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}",
            decimal_display(self.latitude),
            decimal_display(self.longitude)
        )
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Shortest decimal form, but always with a fractional part (`40` → `40.0`).
fn decimal_display(value: f64) -> String {
    let s = value.to_string();
    if s.contains('.') || s.contains("inf") || s.contains("NaN") {
        s
    } else {
        format!("{s}.0")
    }
}

/// Attributes pulled out of one alert. Every field is independent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedFields {
    pub country_code: Option<String>,
    pub is_shiny: bool,
    pub species_name: Option<String>,
    pub is_female: bool,
    /// Digits exactly as matched; `IV087` keeps its leading zero.
    pub iv_digits: Option<String>,
    pub combat_power: Option<String>,
    pub level: Option<String>,
    pub despawn_minutes: Option<String>,
    pub size_flags: Vec<SizeFlag>,
    pub place_raw: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// Extracted fields plus the two localized strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedFields {
    pub fields: ExtractedFields,
    pub localized_species_name: Option<String>,
    pub localized_place: Option<String>,
}
