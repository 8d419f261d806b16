//! Waste record model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single extracted waste entry: on `date`, `count` units of `item`
/// were discarded.
///
/// Records are immutable once produced. Corrections are new records with
/// the same (date, item); aggregation happens downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteRecord {
    /// Date the waste was reported, serialized as `MM/DD/YYYY`.
    #[serde(with = "mdy_date")]
    pub date: NaiveDate,

    /// Canonical menu-item name. Never empty, never digits-only.
    pub item: String,

    /// Number of discarded units. Parsed from a pure-digit token.
    pub count: u32,
}

impl WasteRecord {
    pub fn new(date: NaiveDate, item: impl Into<String>, count: u32) -> Self {
        Self {
            date,
            item: item.into(),
            count,
        }
    }

    /// The canonical `MM/DD/YYYY` rendering of the record date.
    pub fn date_string(&self) -> String {
        self.date.format("%m/%d/%Y").to_string()
    }
}

/// Serde adapter for the canonical `MM/DD/YYYY` date form used by the
/// downstream sheet store.
mod mdy_date {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%m/%d/%Y";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_date_serialized_as_mdy() {
        let record = WasteRecord::new(
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            "Blueberry Muffin",
            2,
        );

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"date":"03/14/2024","item":"Blueberry Muffin","count":2}"#
        );

        let back: WasteRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_date_string() {
        let record =
            WasteRecord::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), "Croissant", 5);
        assert_eq!(record.date_string(), "01/01/2025");
    }
}
