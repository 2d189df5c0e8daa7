//! Decoding rules for admin form payloads.
//!
//! Dashboard forms post loosely typed values: lists arrive as comma-separated
//! text or arrays, numbers as text, and optional fields as empty strings. The
//! helpers here normalise those shapes while deserializing so the typed inputs
//! never see them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer};
use uuid::Uuid;

pub static SLUG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern compiles")
});

/// Lowercases `input`, keeps `a-z`, `0-9`, whitespace and `-`, then joins the
/// remaining words with single dashes.
pub fn generate_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '-' {
            pending_dash = true;
        }
    }

    slug
}

/// Returns `slug` when it has content, otherwise a slug derived from `source`.
pub fn slug_or_generate(slug: &str, source: &str) -> String {
    let trimmed = slug.trim();
    if trimmed.is_empty() {
        generate_slug(source)
    } else {
        trimmed.to_string()
    }
}

/// Estimated minutes to read `content`, one minute per thousand characters.
pub fn estimate_read_time(content: &str) -> i32 {
    let chars = content.chars().count();
    chars.div_ceil(1000) as i32
}

/// Leading-integer parse: optional sign followed by digits, anything after is
/// ignored. Text without a leading number yields 0.
pub fn parse_leading_int(raw: &str) -> i32 {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let number: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    if number.is_empty() {
        return 0;
    }

    number
        .parse::<i64>()
        .map(|n| (sign * n).clamp(i32::MIN as i64, i32::MAX as i64) as i32)
        .unwrap_or(0)
}

pub fn split_list(raw: &str) -> Vec<String> {
    clean_list(raw.split(','))
}

fn clean_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListInput {
    Text(String),
    Items(Vec<String>),
}

/// Accepts `"a, b"` or `["a", "b"]`; blank entries are dropped.
pub fn list_field<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ListInput>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(ListInput::Text(raw)) => split_list(&raw),
        Some(ListInput::Items(items)) => clean_list(items),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberInput {
    Int(i64),
    Float(f64),
    Text(String),
}

pub fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberInput>::deserialize(deserializer)? {
        None => 0,
        Some(NumberInput::Int(n)) => n.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        Some(NumberInput::Float(f)) if f.is_finite() => f.trunc() as i32,
        Some(NumberInput::Float(_)) => 0,
        Some(NumberInput::Text(raw)) => parse_leading_int(&raw),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolInput {
    Flag(bool),
    Text(String),
}

/// Checkbox values: `true`, `"true"`, `"on"` and `"1"` are set.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<BoolInput>::deserialize(deserializer)? {
        None => false,
        Some(BoolInput::Flag(flag)) => flag,
        Some(BoolInput::Text(raw)) => {
            matches!(raw.trim().to_lowercase().as_str(), "true" | "on" | "1" | "yes")
        }
    })
}

/// Whitespace-only text becomes `None`.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

pub fn optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    match blank_as_none(deserializer)? {
        None => Ok(None),
        Some(raw) => Uuid::parse_str(raw.trim())
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid id: {raw}"))),
    }
}

/// Same shapes as [`list_field`], each entry parsed as an id.
pub fn uuid_list<'de, D>(deserializer: D) -> Result<Vec<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    list_field(deserializer)?
        .into_iter()
        .map(|raw| {
            Uuid::parse_str(&raw).map_err(|_| de::Error::custom(format!("invalid id: {raw}")))
        })
        .collect()
}

/// Accepts RFC 3339, `datetime-local` input values and plain dates.
pub fn optional_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = blank_as_none(deserializer)? else {
        return Ok(None);
    };
    parse_datetime(raw.trim())
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
