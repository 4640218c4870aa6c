//! Query-parameter assembly shared by every endpoint operation
//!
//! The XTM API follows one convention across its whole surface: absent
//! optional values are omitted from the query string entirely (never sent as
//! `null`), and list values are sent as repeated entries under the same key.
//! Endpoint operations build their parameters through this one type so the
//! convention cannot drift per endpoint.

use chrono::{DateTime, SecondsFormat, Utc};

/// Ordered query-string pairs for one request
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// `key=value` pairs in the order they were appended
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single `key=value` pair when the value is present
    pub fn scalar<T: ToString>(mut self, key: &'static str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Append one `key=value` pair per element when the list is present
    pub fn list<T: ToString>(mut self, key: &'static str, values: Option<&[T]>) -> Self {
        if let Some(values) = values {
            for value in values {
                self.pairs.push((key, value.to_string()));
            }
        }
        self
    }

    /// True when no pair was appended
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in insertion order
    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}

/// Render a date filter the way the API expects it (RFC 3339, UTC)
pub fn datetime_param(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_none_values_are_omitted() {
        let params = QueryParams::new()
            .scalar("fileScope", Some("JOB"))
            .scalar::<String>("targetLanguage", None)
            .list::<u64>("jobIds", None);

        assert_eq!(params.as_pairs(), &[("fileScope", "JOB".to_string())]);
    }

    #[test]
    fn test_lists_repeat_the_key() {
        let params = QueryParams::new().list("projectIds", Some(&[7u64, 8, 9]));

        assert_eq!(
            params.as_pairs(),
            &[
                ("projectIds", "7".to_string()),
                ("projectIds", "8".to_string()),
                ("projectIds", "9".to_string()),
            ]
        );
    }

    #[test]
    fn test_bool_renders_as_string() {
        let params = QueryParams::new().scalar("fetchAddress", Some(true));
        assert_eq!(params.as_pairs(), &[("fetchAddress", "true".to_string())]);
    }

    #[test]
    fn test_empty() {
        assert!(QueryParams::new().is_empty());
        assert!(!QueryParams::new().scalar("type", Some("FILE")).is_empty());
    }

    #[test]
    fn test_datetime_param_is_rfc3339_utc() {
        let date = Utc.with_ymd_and_hms(2023, 5, 17, 8, 30, 0).unwrap();
        assert_eq!(datetime_param(&date), "2023-05-17T08:30:00Z");
    }
}
