//! Archived filenames carrying a capture timestamp prefix.
//!
//! Files archived by the network are named `YYYYMMDDhhmmss<sep><name>`, where
//! the 14-digit prefix is the capture time of the archived page. File URLs
//! in storage contracts use `YYYYMMDDhhmmss/<name>`.

use crate::error::DomainError;
use chrono::NaiveDateTime;
use std::fmt;

const TIMESTAMP_LEN: usize = 14;
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const SEPARATORS: [char; 5] = ['_', '-', '/', '.', ' '];

/// An archived filename split into its capture time and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedFileName {
    /// Capture time decoded from the prefix, if present and valid.
    pub captured_at: Option<NaiveDateTime>,
    /// Name without the timestamp prefix.
    pub name: String,
}

impl ArchivedFileName {
    /// Parses a filename, keeping it whole when it has no valid prefix.
    pub fn parse(raw: &str) -> Self {
        match Self::try_parse(raw) {
            Ok(parsed) => parsed,
            Err(_) => Self {
                captured_at: None,
                name: raw.to_string(),
            },
        }
    }

    /// Parses a filename that must start with a valid timestamp prefix.
    ///
    /// # Errors
    /// Returns [`DomainError::MissingTimestamp`] when the first 14 characters
    /// are not all digits, and [`DomainError::InvalidTimestamp`] when they do
    /// not form a real date.
    pub fn try_parse(raw: &str) -> Result<Self, DomainError> {
        let prefix = raw
            .get(..TIMESTAMP_LEN)
            .filter(|p| p.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| DomainError::MissingTimestamp(raw.to_string()))?;

        let captured_at = NaiveDateTime::parse_from_str(prefix, TIMESTAMP_FORMAT)
            .map_err(|_| DomainError::InvalidTimestamp(prefix.to_string()))?;

        let rest = &raw[TIMESTAMP_LEN..];
        let name = rest
            .strip_prefix(|c: char| SEPARATORS.contains(&c))
            .unwrap_or(rest);

        Ok(Self {
            captured_at: Some(captured_at),
            name: name.to_string(),
        })
    }

    /// Parses a storage-contract file URL of the form `YYYYMMDDhhmmss/<name>`.
    ///
    /// The capture time comes from the first path segment; the name is the
    /// remainder with any repeated timestamp prefix removed.
    pub fn from_file_url(file_url: &str) -> Self {
        let Some((head, tail)) = file_url.split_once('/') else {
            return Self::parse(file_url);
        };

        let head_time = (head.len() == TIMESTAMP_LEN)
            .then(|| NaiveDateTime::parse_from_str(head, TIMESTAMP_FORMAT).ok())
            .flatten();

        match head_time {
            Some(captured_at) => {
                let inner = Self::parse(tail);
                Self {
                    captured_at: Some(captured_at),
                    name: inner.name,
                }
            }
            None => Self::parse(file_url),
        }
    }

    /// Display form used by the file viewer and block listings:
    /// `YYYY-MM-DD hh:mm:ss name`.
    pub fn display(&self) -> String {
        match self.captured_at {
            Some(ts) => format!("{} {}", ts.format("%Y-%m-%d %H:%M:%S"), self.name),
            None => self.name.clone(),
        }
    }

    /// Date column used by the storage contract listing: `DD/MM/YYYY hh:mm:ss`.
    pub fn listing_date(&self) -> Option<String> {
        self.captured_at
            .map(|ts| ts.format("%d/%m/%Y %H:%M:%S").to_string())
    }
}

impl fmt::Display for ArchivedFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_prefix() {
        let parsed = ArchivedFileName::parse("20231015120000mypage.html");
        assert_eq!(parsed.display(), "2023-10-15 12:00:00 mypage.html");
    }

    #[test]
    fn test_separator_is_dropped() {
        let parsed = ArchivedFileName::parse("20231015120000_index.html");
        assert_eq!(parsed.name, "index.html");
        assert_eq!(parsed.display(), "2023-10-15 12:00:00 index.html");
    }

    #[test]
    fn test_without_prefix_is_unchanged() {
        let parsed = ArchivedFileName::parse("photo.jpg");
        assert_eq!(parsed.captured_at, None);
        assert_eq!(parsed.display(), "photo.jpg");
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let err = ArchivedFileName::try_parse("20231345120000page.html").unwrap_err();
        assert_eq!(err, DomainError::InvalidTimestamp("20231345120000".into()));

        let kept = ArchivedFileName::parse("20231345120000page.html");
        assert_eq!(kept.display(), "20231345120000page.html");
    }

    #[test]
    fn test_short_name() {
        let err = ArchivedFileName::try_parse("2023").unwrap_err();
        assert!(matches!(err, DomainError::MissingTimestamp(_)));
    }

    #[test]
    fn test_from_file_url() {
        let parsed = ArchivedFileName::from_file_url("20240102030405/20240102030405_news.html");
        assert_eq!(parsed.name, "news.html");
        assert_eq!(parsed.listing_date().as_deref(), Some("02/01/2024 03:04:05"));
    }

    #[test]
    fn test_from_file_url_without_timestamp_segment() {
        let parsed = ArchivedFileName::from_file_url("files/report.pdf");
        assert_eq!(parsed.captured_at, None);
        assert_eq!(parsed.name, "files/report.pdf");
        assert_eq!(parsed.listing_date(), None);
    }
}
