use chrono::NaiveDate;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %b, %Y",
];

/// Parses the date column of a bout row.
///
/// Empty or unrecognized strings yield `None`; they are not errors. Timestamps with a time part
/// (`2023-08-26T21:00:00Z`, `2023-08-26 21:00`) are truncated to their date.
pub fn parse_bout_date(raw: &str) -> Option<NaiveDate> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            return Some(d);
        }
    }

    if let Some(head) = t.get(..10) {
        let sep = t.as_bytes().get(10).copied();
        if matches!(sep, Some(b'T') | Some(b' ')) {
            if let Ok(d) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
                return Some(d);
            }
        }
    }

    // Month precision (`2019-10`) anchors to the first of the month.
    if t.len() == 7 && t.as_bytes()[4] == b'-' {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{t}-01"), "%Y-%m-%d") {
            return Some(d);
        }
    }

    None
}

/// Milliseconds since the Unix epoch at midnight UTC, used as the time-scale domain.
pub fn date_to_epoch_ms(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn parses_common_layouts() {
        assert_eq!(parse_bout_date("2023-08-26"), ymd(2023, 8, 26));
        assert_eq!(parse_bout_date("2023/08/26"), ymd(2023, 8, 26));
        assert_eq!(parse_bout_date("08/26/2023"), ymd(2023, 8, 26));
        assert_eq!(parse_bout_date("Aug 26, 2023"), ymd(2023, 8, 26));
        assert_eq!(parse_bout_date("August 26, 2023"), ymd(2023, 8, 26));
        assert_eq!(parse_bout_date("26 Aug 2023"), ymd(2023, 8, 26));
        assert_eq!(parse_bout_date(" 2023-08-26T21:00:00Z "), ymd(2023, 8, 26));
        assert_eq!(parse_bout_date("2019-10"), ymd(2019, 10, 1));
    }

    #[test]
    fn garbage_and_empty_are_none() {
        assert_eq!(parse_bout_date(""), None);
        assert_eq!(parse_bout_date("   "), None);
        assert_eq!(parse_bout_date("sometime in May"), None);
        assert_eq!(parse_bout_date("2023-13-40"), None);
    }

    #[test]
    fn epoch_ms_is_monotonic() {
        let a = date_to_epoch_ms(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        let b = date_to_epoch_ms(NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
        assert_eq!(b - a, 86_400_000);
        assert_eq!(
            date_to_epoch_ms(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()),
            0
        );
    }
}
