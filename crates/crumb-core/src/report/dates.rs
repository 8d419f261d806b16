//! Date parsing for waste reports.

use chrono::NaiveDate;

use super::patterns::ORDER_DATETIME;

/// Outcome of scanning a line for the receipt order timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateScan {
    /// No timestamp-shaped substring on the line.
    NotFound,
    /// A timestamp-shaped substring that does not parse to a real date.
    Invalid,
    /// A valid order date.
    Found(NaiveDate),
}

/// Scan a line for the `MM/DD/YY HH:MM AM` order timestamp.
///
/// Only the calendar date is kept; the time components are validated and
/// discarded. Two-digit years expand to the 2000s/1900s.
pub fn scan_order_datetime(line: &str) -> DateScan {
    let Some(caps) = ORDER_DATETIME.captures(line) else {
        return DateScan::NotFound;
    };

    let month: u32 = match caps[1].parse() {
        Ok(m) => m,
        Err(_) => return DateScan::Invalid,
    };
    let day: u32 = match caps[2].parse() {
        Ok(d) => d,
        Err(_) => return DateScan::Invalid,
    };
    let year = match caps[3].len() {
        2 => expand_year(caps[3].parse().unwrap_or(0)),
        4 => caps[3].parse().unwrap_or(0),
        // Three digit "years" are OCR garbage.
        _ => return DateScan::Invalid,
    };

    let hour: u32 = caps[4].parse().unwrap_or(99);
    let minute: u32 = caps[5].parse().unwrap_or(99);
    if !(1..=12).contains(&hour) || minute > 59 {
        return DateScan::Invalid;
    }

    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => DateScan::Found(date),
        None => DateScan::Invalid,
    }
}

/// Parse a canonical `MM/DD/YYYY` date string.
pub fn parse_mdy(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%m/%d/%Y").ok()
}

fn expand_year(year: i32) -> i32 {
    // Two-digit year: assume 2000s for 00-50, 1900s for 51-99.
    if year <= 50 { 2000 + year } else { 1900 + year }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_two_digit_year() {
        assert_eq!(
            scan_order_datetime("Ordered: 03/14/24 10:30 AM"),
            DateScan::Found(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap())
        );
    }

    #[test]
    fn test_scan_four_digit_year() {
        assert_eq!(
            scan_order_datetime("Ordered: 3/1/2024  7:05 PM"),
            DateScan::Found(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_scan_surrounding_text() {
        assert_eq!(
            scan_order_datetime("Take Out Ordered: 12/31/25 11:59 PM Store #4"),
            DateScan::Found(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap())
        );
    }

    #[test]
    fn test_scan_invalid_calendar_date() {
        assert_eq!(
            scan_order_datetime("Ordered: 13/45/24 10:30 AM"),
            DateScan::Invalid
        );
    }

    #[test]
    fn test_scan_invalid_time() {
        assert_eq!(
            scan_order_datetime("Ordered: 03/14/24 19:30 AM"),
            DateScan::Invalid
        );
        assert_eq!(
            scan_order_datetime("Ordered: 03/14/24 10:75 AM"),
            DateScan::Invalid
        );
    }

    #[test]
    fn test_scan_missing_timestamp() {
        assert_eq!(scan_order_datetime("Ordered: tomorrow"), DateScan::NotFound);
        assert_eq!(scan_order_datetime(""), DateScan::NotFound);
    }

    #[test]
    fn test_old_two_digit_years_map_to_1900s() {
        assert_eq!(
            scan_order_datetime("Ordered: 01/02/99 9:00 AM"),
            DateScan::Found(NaiveDate::from_ymd_opt(1999, 1, 2).unwrap())
        );
    }

    #[test]
    fn test_parse_mdy() {
        assert_eq!(
            parse_mdy("01/01/2025"),
            Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
        assert_eq!(parse_mdy("2025-01-01"), None);
        assert_eq!(parse_mdy("not a date"), None);
    }
}
