//! Fixed regex patterns for waste-report line scanning.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Receipt order timestamp: `MM/DD/YY HH:MM AM` with a 2- or 4-digit
    /// year and flexible internal whitespace.
    pub static ref ORDER_DATETIME: Regex = Regex::new(
        r"(\d{1,2})/(\d{1,2})/(\d{2,4})\s+(\d{1,2}):(\d{2})\s+([AP]M)"
    ).unwrap();

    /// Inline waste entry: count, the literal word `Wasted`, then the raw
    /// item name running to end of line.
    pub static ref WASTE_LINE: Regex = Regex::new(
        r"(\d+)\s+Wasted\s+(.+)"
    ).unwrap();

    /// A section-entry count must be digits and nothing else.
    pub static ref COUNT_TOKEN: Regex = Regex::new(
        r"^\d+$"
    ).unwrap();
}
