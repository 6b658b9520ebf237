//! Display formatting for explorer values.

use crate::error::DomainError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Formats a byte count in powers of 1000 (`1.50 MB`, `512 Bytes`).
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", value.round(), SIZE_UNITS[unit])
    } else {
        format!("{:.2} {}", value, SIZE_UNITS[unit])
    }
}

/// Like [`format_bytes`] but reports an empty archive as `0 MB`.
pub fn format_storage(bytes: u64) -> String {
    if bytes == 0 {
        "0 MB".to_string()
    } else {
        format_bytes(bytes)
    }
}

/// Formats a balance as `1,234.50 Coins`.
pub fn format_coins(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part} Coins")
}

/// Decodes a base64 hash into lowercase hex.
///
/// # Errors
/// Returns [`DomainError::InvalidBase64`] if the input does not decode.
pub fn try_base64_to_hex(value: &str) -> Result<String, DomainError> {
    STANDARD
        .decode(value)
        .map(hex::encode)
        .map_err(|_| DomainError::InvalidBase64(value.to_string()))
}

/// Decodes a base64 hash into lowercase hex, returning the input unchanged
/// when it is not valid base64 (it is then assumed to be hex already).
pub fn base64_to_hex(value: &str) -> String {
    try_base64_to_hex(value).unwrap_or_else(|_| value.to_string())
}

/// Last path segment of a file URL.
pub fn last_segment(file_url: &str) -> &str {
    match file_url.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => file_url,
    }
}

/// File URL without its first path segment, as the file viewer expects it.
pub fn strip_first_segment(file_url: &str) -> &str {
    match file_url.split_once('/') {
        Some((_, rest)) if !rest.is_empty() => rest,
        _ => file_url,
    }
}

/// Shortens an identifier to its first 10 characters.
pub fn short_id(id: &str) -> String {
    match id.char_indices().nth(10) {
        Some((idx, _)) => format!("{}...", &id[..idx]),
        None => id.to_string(),
    }
}

/// Parses a backend timestamp (RFC 3339, or ISO without offset read as UTC).
pub fn parse_backend_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}
