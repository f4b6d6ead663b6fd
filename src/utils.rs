use crate::config::{FAILURE_GLYPH, SUCCESS_GLYPH};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

// Leading integer, the way `parseInt(.., 10)` reads an attribute value
static LEADING_INT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?)(\d+)").unwrap());

// `{id}` placeholder inside an endpoint template
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{id\}").unwrap());

/// Coerce a raw counter attribute into a non-negative target.
///
/// - `None` (attribute absent) yields `default`.
/// - A leading integer is accepted even with trailing garbage: "42abc" -> 42.
/// - Negative, empty or non-numeric input yields 0.
/// - Values too large for `u64` saturate.
///
/// # Examples
/// ```
/// use attendance_dash::utils::parse_counter_target;
/// assert_eq!(parse_counter_target(Some("42"), 0), 42);
/// assert_eq!(parse_counter_target(Some(" 7 students"), 0), 7);
/// assert_eq!(parse_counter_target(Some("n/a"), 0), 0);
/// assert_eq!(parse_counter_target(None, 98), 98);
/// ```
pub fn parse_counter_target(raw: Option<&str>, default: u64) -> u64 {
    let Some(raw) = raw else {
        return default;
    };

    match LEADING_INT_REGEX.captures(raw) {
        Some(captures) if &captures[1] == "-" => 0,
        Some(captures) => captures[2].parse::<u64>().unwrap_or(u64::MAX),
        None => 0,
    }
}

/// Substitute an identifier into an endpoint template.
///
/// Templates without a `{id}` placeholder are returned unchanged.
pub fn interpolate_endpoint(template: &str, id: Option<&str>) -> String {
    match id {
        Some(id) => PLACEHOLDER_REGEX.replace_all(template, NoExpand(id)).into_owned(),
        None => template.to_string(),
    }
}

/// Whether the template expects an identifier.
pub fn endpoint_needs_id(template: &str) -> bool {
    PLACEHOLDER_REGEX.is_match(template)
}

/// Glyph prefix + message, the final status line shown to the user.
///
/// The message is used literally; callers write it as text content.
pub fn status_line(success: bool, msg: &str) -> String {
    let glyph = if success { SUCCESS_GLYPH } else { FAILURE_GLYPH };
    format!("{}{}", glyph, msg)
}

/// Render a percentage as a CSS width value.
pub fn percent_width(percent: u8) -> String {
    format!("{}%", percent)
}
