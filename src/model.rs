use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A calendar month, keyed by its canonical three-letter abbreviation.
/// Ordering is calendar order, which keeps serialized output deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn abbreviation(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Rejection for strings outside the canonical abbreviation set. Matching is
/// case-sensitive: `"jan"` is not a month key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMonth(pub String);

impl fmt::Display for InvalidMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} must be a valid month abbreviation (e.g., Jan, Feb, etc.)",
            self.0
        )
    }
}

impl std::error::Error for InvalidMonth {}

impl FromStr for Month {
    type Err = InvalidMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .iter()
            .copied()
            .find(|m| m.abbreviation() == s)
            .ok_or_else(|| InvalidMonth(s.to_string()))
    }
}

/// A column of the source table: either a year of occurrence counts or the
/// single trailing `Average` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKey {
    Year(String),
    Average,
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Year(year) => f.write_str(year),
            ColumnKey::Average => f.write_str("Average"),
        }
    }
}

/// One month's slice of the table: an occurrence count per year column and
/// the historical mean, stored rounded to two fraction digits.
///
/// Serializes to the flat shape of the source feed,
/// `{"2005": 3, ..., "Average": 0.61}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRecord {
    #[serde(flatten)]
    pub counts: BTreeMap<String, u64>,
    #[serde(rename = "Average")]
    pub average: f64,
}

/// The fully parsed month → record mapping. Built once per load and handed
/// out by value; nothing mutates it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    months: BTreeMap<Month, MonthRecord>,
}

impl Dataset {
    pub(crate) fn insert(&mut self, month: Month, record: MonthRecord) {
        self.months.insert(month, record);
    }

    pub fn get(&self, month: Month) -> Option<&MonthRecord> {
        self.months.get(&month)
    }

    pub fn contains(&self, month: Month) -> bool {
        self.months.contains_key(&month)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, &MonthRecord)> {
        self.months.iter().map(|(m, r)| (*m, r))
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Derived per-year and per-month occurrence totals. Recomputed on demand,
/// never cached; the `Average` column does not contribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformedSummary {
    pub years: BTreeMap<String, u64>,
    pub months: BTreeMap<Month, u64>,
}

/// Round to two fraction digits, the precision the source feed and the
/// possibility percentage both use.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
