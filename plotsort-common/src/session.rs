//! Session identifiers
//!
//! A session is created per page load and only names the persisted
//! selection file. The page carries the raw id; the save endpoint turns
//! whatever comes back into a [`SessionId`].

use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// Raw session id for a page loaded at `loaded_at`
///
/// ISO-8601 UTC with millisecond precision, `:` replaced by `-`
/// (e.g. `2024-01-01T00-00-00.000Z`). The `.` is removed by
/// [`SessionId::sanitize`] when the browser sends it back.
pub fn page_session_id(loaded_at: DateTime<Utc>) -> String {
    loaded_at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(':', "-")
}

/// Raw session id for a page loaded now
pub fn new_page_session_id() -> String {
    page_session_id(Utc::now())
}

/// Sanitized session identifier, safe to use as a file stem
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Strip every character that is not ASCII alphanumeric or `-`
    ///
    /// Fails if nothing is left.
    pub fn sanitize(raw: &str) -> Result<Self> {
        let clean: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();

        if clean.is_empty() {
            return Err(Error::InvalidInput(format!(
                "session id {:?} has no usable characters",
                raw
            )));
        }

        Ok(Self(clean))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the selection file for this session
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_page_session_id_format() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 45).unwrap();
        assert_eq!(page_session_id(t), "2024-01-01T12-30-45.000Z");
    }

    #[test]
    fn test_new_page_session_id_round_trips_through_sanitize() {
        let raw = new_page_session_id();
        assert_eq!(raw.len(), "2024-01-01T12-30-45.000Z".len());
        assert!(!raw.contains(':'));

        let id = SessionId::sanitize(&raw).unwrap();
        assert_eq!(id.as_str(), raw.replace('.', ""));
    }

    #[test]
    fn test_sanitize_keeps_timestamp_ids() {
        let id = SessionId::sanitize("2024-01-01T00-00-00").unwrap();
        assert_eq!(id.as_str(), "2024-01-01T00-00-00");
        assert_eq!(id.file_name(), "2024-01-01T00-00-00.json");
    }

    #[test]
    fn test_sanitize_strips_path_characters() {
        assert_eq!(SessionId::sanitize("../evil").unwrap().as_str(), "evil");
        assert_eq!(
            SessionId::sanitize("/etc/passwd\\..\u{0}x").unwrap().as_str(),
            "etcpasswdx"
        );
        assert_eq!(
            SessionId::sanitize("2024-01-01T00-00-00.123Z").unwrap().as_str(),
            "2024-01-01T00-00-00123Z"
        );
    }

    #[test]
    fn test_sanitize_rejects_empty_result() {
        assert!(SessionId::sanitize("").is_err());
        assert!(SessionId::sanitize("../..//").is_err());
        // Non-ASCII alphanumerics are stripped too
        assert!(SessionId::sanitize("ääö").is_err());
    }

    #[test]
    fn test_new_page_ids_sanitize_to_sortable_stems() {
        let a = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let sa = SessionId::sanitize(&page_session_id(a)).unwrap();
        let sb = SessionId::sanitize(&page_session_id(b)).unwrap();
        assert!(sa.file_name() < sb.file_name());
    }
}
