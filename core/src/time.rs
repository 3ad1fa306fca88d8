//! Time related utils.

use crate::Error;
use chrono::NaiveDateTime;
use chrono::Utc;

/// DateTime is the alias of `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Date format: "20170425"
const DATE: &str = "%Y%m%d";

/// Compact ISO 8601 timestamp: "20170425T143000Z"
const ISO8601: &str = "%Y%m%dT%H%M%SZ";

/// RFC 1123 in GMT, as used by the `Date` header: "Tue, 25 Apr 2017 14:30:00 GMT"
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Create a new DateTime with the current time.
#[inline]
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into date: "20170425"
#[inline]
pub fn format_date(t: DateTime) -> String {
    t.format(DATE).to_string()
}

/// Format time into compact ISO 8601: "20170425T143000Z"
#[inline]
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601).to_string()
}

/// Format time into http date: "Tue, 25 Apr 2017 14:30:00 GMT"
#[inline]
pub fn format_http_date(t: DateTime) -> String {
    t.format(HTTP_DATE).to_string()
}

/// Parse an http date like "Tue, 25 Apr 2017 14:30:00 GMT".
pub fn parse_http_date(s: &str) -> crate::Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, HTTP_DATE).map_err(|e| {
        Error::invalid_argument(format!("parse '{s}' into http date failed")).with_source(e)
    })?;
    Ok(t.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime {
        Utc.with_ymd_and_hms(2017, 4, 25, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(test_time()), "20170425");
    }

    #[test]
    fn test_format_iso8601() {
        assert_eq!(format_iso8601(test_time()), "20170425T143000Z");
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(format_http_date(test_time()), "Tue, 25 Apr 2017 14:30:00 GMT");

        // Day of month is always two digits.
        let t = Utc.with_ymd_and_hms(2017, 5, 1, 8, 5, 9).unwrap();
        assert_eq!(format_http_date(t), "Mon, 01 May 2017 08:05:09 GMT");
    }

    #[test]
    fn test_parse_http_date() {
        let t = parse_http_date("Tue, 25 Apr 2017 14:30:00 GMT").expect("must be valid");
        assert_eq!(t, test_time());

        assert!(parse_http_date("2017-04-25").is_err());
    }
}
