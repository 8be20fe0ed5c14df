//! Front-matter parsing

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::MetadataError;

/// Raw front-matter as it deserializes off disk, before validation.
///
/// All fields are optional here; `FrontMatter::parse` enforces the required
/// ones. Unrecognized keys flatten into `extra` so future fields don't break
/// parsing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFrontMatter {
    title: Option<String>,
    date: Option<String>,
    draft: Option<bool>,
    math: Option<bool>,

    #[serde(flatten)]
    extra: IndexMap<String, serde_yaml::Value>,
}

/// Validated front-matter data from a document
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: String,
    pub date: DateTime<FixedOffset>,
    /// Drafts are excluded from assembled collections by default
    pub draft: bool,
    /// Hint for the external renderer to enable math typesetting
    pub math: bool,

    /// Additional custom fields, in source order
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content).
    ///
    /// Offset-less dates are resolved in `tz`; dates carrying an offset keep
    /// it. A document with no metadata block at all is a valid shape but
    /// still fails on the missing required keys - there is no fallback to
    /// filename or file mtime.
    pub fn parse(content: &str, tz: Tz) -> Result<(Self, &str), MetadataError> {
        let content = content.trim_start();

        // YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(content, tz);
        }

        // JSON front-matter (;;;)
        if content.starts_with(";;;") {
            return Self::parse_json(content, tz);
        }

        Self::validate(RawFrontMatter::default(), content, tz)
    }

    fn parse_yaml(content: &str, tz: Tz) -> Result<(Self, &str), MetadataError> {
        // Keep the newline after the opening --- so an immediately closing
        // (empty) block is still found.
        let rest = &content[3..];

        let Some(end_pos) = rest.find("\n---") else {
            return Err(MetadataError::UnterminatedBlock);
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..]; // Skip \n---
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        let raw = if yaml_content.trim().is_empty() {
            RawFrontMatter::default()
        } else {
            serde_yaml::from_str(yaml_content)
                .map_err(|e| MetadataError::InvalidBlock(e.to_string()))?
        };

        Self::validate(raw, remaining, tz)
    }

    fn parse_json(content: &str, tz: Tz) -> Result<(Self, &str), MetadataError> {
        let rest = &content[3..]; // Skip opening ;;;

        let Some(end_pos) = rest.find(";;;") else {
            return Err(MetadataError::UnterminatedBlock);
        };

        let json_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 3..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        let raw: RawFrontMatter = serde_json::from_str(json_content)
            .map_err(|e| MetadataError::InvalidBlock(e.to_string()))?;

        Self::validate(raw, remaining, tz)
    }

    fn validate(raw: RawFrontMatter, body: &str, tz: Tz) -> Result<(Self, &str), MetadataError> {
        let title = raw
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(MetadataError::MissingField("title"))?;

        let date_str = raw.date.ok_or(MetadataError::MissingField("date"))?;
        let date = parse_date_string(&date_str, tz)
            .ok_or_else(|| MetadataError::InvalidDate(date_str.clone()))?;

        Ok((
            Self {
                title,
                date,
                draft: raw.draft.unwrap_or(false),
                math: raw.math.unwrap_or(false),
                extra: raw.extra,
            },
            body,
        ))
    }

    /// Re-serialize the metadata mapping as a YAML front-matter block.
    ///
    /// Parsing the result yields the same mapping back.
    pub fn to_block(&self) -> String {
        let mut map = serde_yaml::Mapping::new();
        map.insert("title".into(), self.title.clone().into());
        map.insert("date".into(), self.date.to_rfc3339().into());
        map.insert("draft".into(), self.draft.into());
        map.insert("math".into(), self.math.into());
        for (key, value) in &self.extra {
            map.insert(key.clone().into(), value.clone());
        }

        let yaml = serde_yaml::to_string(&map).unwrap_or_default();
        format!("---\n{yaml}---\n")
    }
}

/// Parse a date string in the formats posts actually use
fn parse_date_string(s: &str, tz: Tz) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    // Forms carrying their own offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    // Offset-less forms resolve in the site timezone
    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(dt, tz);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return localize(d.and_hms_opt(0, 0, 0)?, tz);
        }
    }

    None
}

/// Ambiguous local times (DST fold) take the earlier offset; nonexistent
/// local times are a parse failure.
fn localize(dt: NaiveDateTime, tz: Tz) -> Option<DateTime<FixedOffset>> {
    tz.from_local_datetime(&dt)
        .earliest()
        .map(|dt| dt.fixed_offset())
}
