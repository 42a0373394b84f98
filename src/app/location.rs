//! Shareable location: the slice of state mirrored into a link.
//!
//! Only the active cohort, the attendance date and the view mode survive in a
//! link. Filters, search, sort and pagination are volatile per session.
//!
//! ```text
//! ?cycle=<cohort id>&date=YYYY-MM-DD&view=registrations|arrivals
//! ```

use super::modes::ViewMode;
use chrono::NaiveDate;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped in query values (RFC 3986 unreserved).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareableLocation {
    pub cohort: Option<String>,
    pub date: Option<NaiveDate>,
    pub view: ViewMode,
}

impl ShareableLocation {
    /// Encodes the location as a query string without the leading `?`.
    ///
    /// Absent parts are omitted; the view is always present.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use regdesk::app::{ShareableLocation, ViewMode};
    ///
    /// let location = ShareableLocation {
    ///     cohort: Some("חורף 2025".to_string()),
    ///     date: NaiveDate::from_ymd_opt(2025, 1, 5),
    ///     view: ViewMode::Arrivals,
    /// };
    /// let query = location.to_query();
    /// assert!(query.starts_with("cycle=%D7%97"));
    /// assert!(query.ends_with("&date=2025-01-05&view=arrivals"));
    /// assert_eq!(ShareableLocation::from_query(&query), location);
    /// ```
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(cohort) = &self.cohort {
            parts.push(format!("cycle={}", utf8_percent_encode(cohort, QUERY_VALUE)));
        }
        if let Some(date) = self.date {
            parts.push(format!("date={}", date.format(DATE_FORMAT)));
        }
        parts.push(format!("view={}", self.view.as_str()));
        parts.join("&")
    }

    /// Parses a query string, with or without the leading `?`.
    ///
    /// Lenient: unknown keys, undecodable values, malformed dates and unknown
    /// view names are skipped rather than rejected.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut location = Self::default();

        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let Some(value) = decode(raw) else {
                tracing::debug!(key, "skipping undecodable query value");
                continue;
            };

            match key {
                "cycle" if !value.is_empty() => location.cohort = Some(value),
                "date" => match NaiveDate::parse_from_str(&value, DATE_FORMAT) {
                    Ok(date) => location.date = Some(date),
                    Err(err) => tracing::debug!(value = %value, error = %err, "ignoring malformed date"),
                },
                "view" => match value.parse() {
                    Ok(view) => location.view = view,
                    Err(err) => tracing::debug!(error = %err, "ignoring view"),
                },
                _ => {}
            }
        }

        location
    }
}

fn decode(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .ok()
        .map(|value| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_location_only_carries_view() {
        assert_eq!(ShareableLocation::default().to_query(), "view=registrations");
    }

    #[test]
    fn parse_ignores_unknown_and_malformed_parts() {
        let location = ShareableLocation::from_query("?utm=x&date=2025-13-40&view=gallery&cycle=c%201");
        assert_eq!(
            location,
            ShareableLocation {
                cohort: Some("c 1".into()),
                date: None,
                view: ViewMode::Registrations,
            }
        );
    }

    #[test]
    fn plus_decodes_as_space() {
        let location = ShareableLocation::from_query("cycle=winter+group");
        assert_eq!(location.cohort.as_deref(), Some("winter group"));
    }

    #[test]
    fn round_trips_reserved_characters() {
        let location = ShareableLocation {
            cohort: Some("a&b=c".into()),
            date: NaiveDate::from_ymd_opt(2024, 9, 1),
            view: ViewMode::Arrivals,
        };
        let query = location.to_query();
        assert_eq!(query, "cycle=a%26b%3Dc&date=2024-09-01&view=arrivals");
        assert_eq!(ShareableLocation::from_query(&query), location);
    }
}
